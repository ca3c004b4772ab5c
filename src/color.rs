//! Color normalisation: any CSS color string → `#rrggbb` or `"transparent"`.

/// Sentinel returned for colors that should not be painted.
pub const TRANSPARENT: &str = "transparent";

/// Alpha at or below this value is treated as fully transparent.
const MIN_VISIBLE_ALPHA: f32 = 0.1;

/// Normalise a CSS color to a lowercase `#rrggbb` string.
///
/// Returns [`TRANSPARENT`] for empty input, the `transparent` keyword,
/// zero-alpha `rgba()` forms, any color whose alpha is ≤ 0.1, and anything
/// the parser rejects.
pub fn to_hex(css: &str) -> String {
    let css = css.trim();
    if css.is_empty()
        || css.eq_ignore_ascii_case(TRANSPARENT)
        || css == "rgba(0, 0, 0, 0)"
        || css == "rgba(255, 255, 255, 0)"
    {
        return TRANSPARENT.to_string();
    }

    match css.parse::<csscolorparser::Color>() {
        Ok(color) => {
            if (color.a as f32) <= MIN_VISIBLE_ALPHA {
                return TRANSPARENT.to_string();
            }
            let [r, g, b, _] = color.to_rgba8();
            format!("#{r:02x}{g:02x}{b:02x}")
        }
        Err(e) => {
            log::debug!("Unparsable color {css:?}: {e}");
            TRANSPARENT.to_string()
        }
    }
}

pub fn is_transparent(hex: &str) -> bool {
    hex.is_empty() || hex == TRANSPARENT
}

/// Split a normalised `#rrggbb` string into 0.0–1.0 channels.
pub fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| {
        let pair = hex.get(i..i + 2)?;
        u8::from_str_radix(pair, 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_literals() {
        assert_eq!(to_hex(""), TRANSPARENT);
        assert_eq!(to_hex("transparent"), TRANSPARENT);
        assert_eq!(to_hex("rgba(0, 0, 0, 0)"), TRANSPARENT);
        assert_eq!(to_hex("rgba(0,0,0,0)"), TRANSPARENT);
        assert_eq!(to_hex("rgba(255, 255, 255, 0)"), TRANSPARENT);
    }

    #[test]
    fn hex_is_lowercased() {
        assert_eq!(to_hex("#3B82F6"), "#3b82f6");
        assert_eq!(to_hex("#fff"), "#ffffff");
    }

    #[test]
    fn functional_and_named_colors() {
        assert_eq!(to_hex("rgb(255, 0, 0)"), "#ff0000");
        assert_eq!(to_hex("rgba(0, 128, 0, 0.5)"), "#008000");
        assert_eq!(to_hex("white"), "#ffffff");
        assert_eq!(to_hex("hsl(0, 100%, 50%)"), "#ff0000");
    }

    #[test]
    fn low_alpha_is_transparent() {
        assert_eq!(to_hex("rgba(10, 20, 30, 0.1)"), TRANSPARENT);
        assert_eq!(to_hex("rgba(10, 20, 30, 0.05)"), TRANSPARENT);
        assert_ne!(to_hex("rgba(10, 20, 30, 0.11)"), TRANSPARENT);
    }

    #[test]
    fn non_ascii_hex_is_rejected() {
        // Six bytes, but the pairs do not fall on char boundaries.
        assert_eq!(hex_to_rgb("#ééé"), None);
        assert_eq!(hex_to_rgb("#a€bc"), None);
        assert_eq!(hex_to_rgb("#ff00ff"), Some([1.0, 0.0, 1.0]));
    }

    #[test]
    fn garbage_never_panics() {
        for input in ["not-a-color", "#12", "rgb(", "var(--x)", "😀", "#zzzzzz"] {
            let out = to_hex(input);
            assert!(
                out == TRANSPARENT || (out.len() == 7 && out.starts_with('#')),
                "unexpected output {out:?} for {input:?}"
            );
        }
    }

    #[test]
    fn rgb_channels() {
        let [r, g, b] = hex_to_rgb("#ff8000").unwrap();
        assert!((r - 1.0).abs() < 1e-6);
        assert!((g - 0.502).abs() < 0.01);
        assert_eq!(b, 0.0);
        assert!(hex_to_rgb(TRANSPARENT).is_none());
    }
}
