//! Rasterization seam.
//!
//! Exports turn DOM subtrees into PNG images through the [`Rasterizer`]
//! trait. Browser hosts plug in a real renderer; [`BoxPainter`] is the
//! built-in fallback that paints box backgrounds, borders and embedded
//! images of a subtree with the `image` crate. It does not draw glyphs.

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use futures::future::BoxFuture;
use image::{imageops, Rgba, RgbaImage};

use crate::assets::parse_data_uri;
use crate::color::{hex_to_rgb, is_transparent, to_hex};
use crate::dom::{Document, NodeId, Tag};
use crate::geometry::Rect;
use crate::style::ComputedStyle;

/// Largest canvas side [`BoxPainter`] will allocate.
const MAX_CANVAS_SIDE: u32 = 16_384;

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Device pixels per CSS pixel.
    pub pixel_ratio: f32,
    /// Canvas fill, any CSS color.
    pub background: String,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 2.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

/// An encoded raster and its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    /// `data:image/png;base64,...`
    pub data_uri: String,
    pub width: u32,
    pub height: u32,
}

/// Converts a DOM element into an image.
///
/// Implementations must not mutate the document; failures are reported as
/// strings and the caller decides whether to skip the element.
pub trait Rasterizer: Send + Sync {
    fn rasterize<'a>(
        &'a self,
        doc: &'a Document,
        node: NodeId,
        options: &'a RasterOptions,
    ) -> BoxFuture<'a, Result<RasterImage, String>>;
}

/// Encode an RGBA buffer as a PNG data URI.
pub fn encode_png_data_uri(img: &RgbaImage) -> Result<String, String> {
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| format!("PNG encode error: {e}"))?;
    Ok(format!("data:image/png;base64,{}", BASE64_STD.encode(&bytes)))
}

fn css_rgba(css: &str) -> Option<Rgba<u8>> {
    let hex = to_hex(css);
    if is_transparent(&hex) {
        return None;
    }
    let [r, g, b] = hex_to_rgb(&hex)?;
    Some(Rgba([
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        255,
    ]))
}

/// Paints backgrounds, borders and `<img>` data URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxPainter;

impl BoxPainter {
    pub fn paint(
        &self,
        doc: &Document,
        node: NodeId,
        options: &RasterOptions,
    ) -> Result<RasterImage, String> {
        let origin = doc.rect(node);
        if origin.is_empty() {
            return Err("element has no size".to_string());
        }
        let ratio = if options.pixel_ratio > 0.0 {
            options.pixel_ratio
        } else {
            1.0
        };
        let width = (origin.w * ratio).ceil() as u32;
        let height = (origin.h * ratio).ceil() as u32;
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(format!("canvas {width}x{height} exceeds {MAX_CANVAS_SIDE}px"));
        }

        let fill = css_rgba(&options.background).unwrap_or(Rgba([255, 255, 255, 255]));
        let mut canvas = RgbaImage::from_pixel(width, height, fill);
        let to_canvas = |r: Rect| {
            Rect::new(
                (r.x - origin.x) * ratio,
                (r.y - origin.y) * ratio,
                r.w * ratio,
                r.h * ratio,
            )
        };

        let mut nodes = vec![node];
        nodes.extend(doc.descendants(node));
        for id in nodes {
            let Some(el) = doc.element(id) else {
                continue;
            };
            if el.tag.is_raw_text() {
                continue;
            }
            let r = to_canvas(el.rect);
            if r.is_empty() {
                continue;
            }
            if let Some(bg) = css_rgba(el.style.get("background-color")) {
                fill_rect(&mut canvas, r, bg);
            }
            paint_borders(&mut canvas, r, &el.style, ratio);
            if el.tag == Tag::Img {
                if let Some(src) = el.src() {
                    paint_image(&mut canvas, r, src);
                }
            }
        }

        Ok(RasterImage {
            data_uri: encode_png_data_uri(&canvas)?,
            width,
            height,
        })
    }
}

impl Rasterizer for BoxPainter {
    fn rasterize<'a>(
        &'a self,
        doc: &'a Document,
        node: NodeId,
        options: &'a RasterOptions,
    ) -> BoxFuture<'a, Result<RasterImage, String>> {
        Box::pin(async move { self.paint(doc, node, options) })
    }
}

fn fill_rect(canvas: &mut RgbaImage, r: Rect, color: Rgba<u8>) {
    let x0 = r.x.max(0.0).round() as u32;
    let y0 = r.y.max(0.0).round() as u32;
    let x1 = (r.right().round().max(0.0) as u32).min(canvas.width());
    let y1 = (r.bottom().round().max(0.0) as u32).min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

fn paint_borders(canvas: &mut RgbaImage, r: Rect, style: &ComputedStyle, ratio: f32) {
    let side = |name: &str| {
        let width = style.px(&format!("border-{name}-width")) * ratio;
        let color = css_rgba(style.get(&format!("border-{name}-color")));
        color.filter(|_| width > 0.0).map(|c| (width, c))
    };
    if let Some((w, c)) = side("top") {
        fill_rect(canvas, Rect::new(r.x, r.y, r.w, w), c);
    }
    if let Some((w, c)) = side("bottom") {
        fill_rect(canvas, Rect::new(r.x, r.bottom() - w, r.w, w), c);
    }
    if let Some((w, c)) = side("left") {
        fill_rect(canvas, Rect::new(r.x, r.y, w, r.h), c);
    }
    if let Some((w, c)) = side("right") {
        fill_rect(canvas, Rect::new(r.right() - w, r.y, w, r.h), c);
    }
}

/// Draw an `<img>` scaled into `r`. Targets larger than the canvas limit
/// are skipped.
fn paint_image(canvas: &mut RgbaImage, r: Rect, src: &str) {
    let w = r.w.round().max(1.0);
    let h = r.h.round().max(1.0);
    let limit = MAX_CANVAS_SIDE as f32;
    if !w.is_finite() || !h.is_finite() || w > limit || h > limit {
        log::warn!("Skipping <img> while painting: {w}x{h} exceeds {MAX_CANVAS_SIDE}px");
        return;
    }
    let decoded = parse_data_uri(src).and_then(|bytes| {
        image::load_from_memory(&bytes).map_err(|e| format!("decode error: {e}"))
    });
    let img = match decoded {
        Ok(img) => img,
        Err(e) => {
            log::warn!("Skipping <img> while painting: {e}");
            return;
        }
    };
    let scaled = imageops::resize(
        &img.to_rgba8(),
        w as u32,
        h as u32,
        imageops::FilterType::Triangle,
    );
    imageops::overlay(canvas, &scaled, r.x.round() as i64, r.y.round() as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn decode(img: &RasterImage) -> RgbaImage {
        let bytes = parse_data_uri(&img.data_uri).unwrap();
        image::load_from_memory(&bytes).unwrap().to_rgba8()
    }

    fn card() -> (Document, NodeId) {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::new(0.0, 0.0, 100.0, 100.0));
        let card = doc.append_element(root, Tag::Div);
        doc.set_rect(card, Rect::new(10.0, 10.0, 20.0, 10.0));
        doc.set_style(card, "background-color", "#ff0000");
        doc.set_style(card, "border-left-width", "2px");
        doc.set_style(card, "border-left-color", "#0000ff");
        (doc, card)
    }

    #[test]
    fn paints_background_and_border_at_pixel_ratio() {
        let (doc, card) = card();
        let out = block_on(BoxPainter.rasterize(&doc, card, &RasterOptions::default())).unwrap();
        assert_eq!((out.width, out.height), (40, 20));
        let px = decode(&out);
        assert_eq!(px.get_pixel(20, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(px.get_pixel(1, 10), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn background_option_fills_canvas() {
        let (doc, _) = card();
        let opts = RasterOptions {
            pixel_ratio: 1.0,
            background: "#00ff00".into(),
        };
        let out = BoxPainter.paint(&doc, doc.root(), &opts).unwrap();
        let px = decode(&out);
        assert_eq!(px.get_pixel(90, 90), &Rgba([0, 255, 0, 255]));
        assert_eq!(px.get_pixel(15, 15), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn embedded_images_are_drawn() {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::new(0.0, 0.0, 10.0, 10.0));
        let img = doc.append_element(root, Tag::Img);
        doc.set_rect(img, Rect::new(0.0, 0.0, 10.0, 10.0));
        let blue = encode_png_data_uri(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]))).unwrap();
        doc.set_attr(img, "src", &blue);
        let opts = RasterOptions {
            pixel_ratio: 1.0,
            ..Default::default()
        };
        let px = decode(&BoxPainter.paint(&doc, root, &opts).unwrap());
        assert_eq!(px.get_pixel(5, 5), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn oversized_image_target_is_skipped() {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::new(0.0, 0.0, 10.0, 10.0));
        let img = doc.append_element(root, Tag::Img);
        doc.set_rect(img, Rect::new(0.0, 0.0, 100_000.0, 40.0));
        let blue = encode_png_data_uri(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]))).unwrap();
        doc.set_attr(img, "src", &blue);
        let opts = RasterOptions {
            pixel_ratio: 1.0,
            ..Default::default()
        };
        let out = BoxPainter.paint(&doc, root, &opts).unwrap();
        assert_eq!((out.width, out.height), (10, 10));
        let px = decode(&out);
        assert_eq!(px.get_pixel(5, 5), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn empty_element_fails() {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::ZERO);
        assert!(BoxPainter.paint(&doc, root, &RasterOptions::default()).is_err());
    }
}
