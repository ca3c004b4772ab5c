//! Text measurement for the HTML layout pass.
//!
//! Without a loaded face, glyph advances fall back to a Helvetica-like
//! average (0.5 × size, 0.55 × size for bold). A real TTF/OTF can be
//! registered through `ttf-parser` for tighter intrinsic sizes.

use std::collections::HashMap;

/// Metrics of a registered face.
#[derive(Clone)]
struct FontData {
    bytes: Vec<u8>,
    units_per_em: f32,
}

/// Registered faces, keyed by weight.
#[derive(Default)]
pub struct FontManager {
    faces: HashMap<bool, FontData>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a TTF/OTF face for regular (`bold == false`) or bold text.
    pub fn load_font(&mut self, bold: bool, bytes: Vec<u8>) -> Result<(), String> {
        let face =
            ttf_parser::Face::parse(&bytes, 0).map_err(|e| format!("Failed to parse font: {e}"))?;
        let units_per_em = face.units_per_em() as f32;
        self.faces.insert(bold, FontData { bytes, units_per_em });
        Ok(())
    }

    pub fn has_real_fonts(&self) -> bool {
        !self.faces.is_empty()
    }

    /// Width of `text` in px at `font_size` px.
    pub fn measure_text_width(&self, text: &str, font_size: f32, bold: bool) -> f32 {
        let data = self.faces.get(&bold).or_else(|| self.faces.get(&!bold));
        let Some(data) = data else {
            let avg = if bold { 0.55 } else { 0.5 };
            return text.chars().count() as f32 * font_size * avg;
        };

        match ttf_parser::Face::parse(&data.bytes, 0) {
            Ok(face) => {
                let scale = font_size / data.units_per_em;
                text.chars()
                    .map(|ch| {
                        face.glyph_index(ch)
                            .and_then(|gid| face.glyph_hor_advance(gid))
                            .map(|adv| adv as f32 * scale)
                            .unwrap_or(font_size * 0.5)
                    })
                    .sum()
            }
            Err(_) => text.chars().count() as f32 * font_size * 0.5,
        }
    }

    /// Line box height for a computed `line-height` value (`normal`,
    /// a unitless factor, or px).
    pub fn line_height_px(&self, font_size: f32, line_height: &str) -> f32 {
        let lh = line_height.trim();
        if lh.is_empty() || lh == "normal" {
            return font_size * 1.2;
        }
        match lh.strip_suffix("px") {
            Some(px) => px.trim().parse().unwrap_or(font_size * 1.2),
            None => lh
                .parse::<f32>()
                .map(|f| f * font_size)
                .unwrap_or(font_size * 1.2),
        }
    }
}

/// Word-wrap text to fit within `max_width` pixels.
pub fn wrap_text(
    text: &str,
    font_size: f32,
    bold: bool,
    max_width: f32,
    fonts: &FontManager,
) -> Vec<String> {
    if max_width <= 0.0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty()
                && fonts.measure_text_width(&candidate, font_size, bold) > max_width
            {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_text_width() {
        let mgr = FontManager::default();
        // 5 chars × 16 × 0.5
        assert!((mgr.measure_text_width("Hello", 16.0, false) - 40.0).abs() < 0.1);
        assert!((mgr.measure_text_width("Hello", 16.0, true) - 44.0).abs() < 0.1);
    }

    #[test]
    fn word_wrap_basic() {
        let mgr = FontManager::default();
        let lines = wrap_text("Hello world foo bar", 16.0, false, 60.0, &mgr);
        assert!(lines.len() >= 2, "Expected wrapping, got {lines:?}");
        assert_eq!(lines.join(" "), "Hello world foo bar");
    }

    #[test]
    fn line_height_forms() {
        let mgr = FontManager::default();
        assert!((mgr.line_height_px(10.0, "normal") - 12.0).abs() < 1e-4);
        assert!((mgr.line_height_px(10.0, "1.5") - 15.0).abs() < 1e-4);
        assert!((mgr.line_height_px(10.0, "20px") - 20.0).abs() < 1e-4);
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let mut mgr = FontManager::new();
        assert!(mgr.load_font(false, vec![0, 1, 2, 3]).is_err());
        assert!(!mgr.has_real_fonts());
    }
}
