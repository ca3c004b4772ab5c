//! PDF writer for [`PdfLayout`] pages: background fill, first-page header,
//! and one image XObject per placed block.

use std::collections::{HashMap, HashSet};

use printpdf::*;

use crate::assets::parse_data_uri;
use crate::color::hex_to_rgb;
use crate::fonts::FontManager;
use crate::layout_config::*;

/// Header baseline, page units from the top.
const HEADER_BASELINE: f32 = 30.0;
/// Header rule, page units from the top.
const HEADER_RULE_Y: f32 = 36.0;
const TITLE_SIZE_PT: f32 = 20.0;
const DATE_SIZE_PT: f32 = 10.0;

/// Registered XObject and its source size in pixels.
struct ImageResource {
    xobj_id: XObjectId,
    px_width: u32,
    px_height: u32,
}

/// Page-unit → PDF-point mapping with the y axis flipped.
#[derive(Clone, Copy)]
struct PageSpace {
    ppu: f32,
    height_pt: f32,
}

impl PageSpace {
    fn x(&self, x: f32) -> Pt {
        Pt(x * self.ppu)
    }

    fn y(&self, y: f32) -> Pt {
        Pt(self.height_pt - y * self.ppu)
    }

    fn point(&self, x: f32, y: f32) -> LinePoint {
        LinePoint {
            p: Point {
                x: self.x(x),
                y: self.y(y),
            },
            bezier: false,
        }
    }
}

fn rgb(color: [f32; 3]) -> Color {
    Color::Rgb(Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
        icc_profile: None,
    })
}

/// Render a PdfLayout into PDF bytes.
///
/// Images whose `src` is not a base64 data URI, or whose bytes cannot be
/// decoded, are skipped (a `log::warn` is emitted).
pub fn render_pdf(config: &PdfLayout) -> Result<Vec<u8>, String> {
    if config.page_width <= 0.0 || config.page_height <= 0.0 {
        return Err(format!(
            "Invalid page size {} x {}",
            config.page_width, config.page_height
        ));
    }
    let space = PageSpace {
        ppu: config.points_per_unit,
        height_pt: config.page_height * config.points_per_unit,
    };
    let page_w = Mm(config.page_width * config.points_per_unit * 0.352778); // pt → mm
    let page_h = Mm(space.height_pt * 0.352778);

    let mut doc = PdfDocument::new(&config.title);

    // Every distinct source becomes one XObject, shared across pages.
    let sources: HashSet<&str> = config
        .pages
        .iter()
        .flat_map(|p| p.images.iter().map(|i| i.src.as_str()))
        .collect();
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let mut image_resources: HashMap<&str, ImageResource> = HashMap::new();
    for src in sources {
        match register_image(&mut doc, src, &mut warnings) {
            Ok(res) => {
                image_resources.insert(src, res);
            }
            Err(e) => log::warn!("Skipping image: {e}"),
        }
    }

    let background = hex_to_rgb(&config.background).unwrap_or([1.0, 1.0, 1.0]);
    let metrics = FontManager::new();

    let mut pages = Vec::new();
    for page_layout in &config.pages {
        let mut ops = Vec::new();
        fill_page(&mut ops, space, config, background);
        if let Some(header) = &page_layout.header {
            render_header(&mut ops, space, config, header, &metrics);
        }
        for img in &page_layout.images {
            render_image(&mut ops, space, img, &image_resources);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    // A layout without pages still yields a blank first page.
    if pages.is_empty() {
        let mut ops = Vec::new();
        fill_page(&mut ops, space, config, background);
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    log::debug!(
        "Rendering {} pages with {} distinct images",
        pages.len(),
        image_resources.len()
    );
    doc.with_pages(pages);
    Ok(doc.save(&PdfSaveOptions::default(), &mut Vec::new()))
}

fn register_image(
    doc: &mut PdfDocument,
    src: &str,
    warnings: &mut Vec<PdfWarnMsg>,
) -> Result<ImageResource, String> {
    let bytes = parse_data_uri(src)?;
    let (px_width, px_height) = ::image::load_from_memory(&bytes)
        .map(|img| (img.width(), img.height()))
        .map_err(|e| format!("decode error: {e}"))?;
    let raw = RawImage::decode_from_bytes(&bytes, warnings)
        .map_err(|e| format!("PDF encode error: {e}"))?;
    Ok(ImageResource {
        xobj_id: doc.add_image(&raw),
        px_width,
        px_height,
    })
}

fn fill_page(ops: &mut Vec<Op>, space: PageSpace, config: &PdfLayout, color: [f32; 3]) {
    ops.push(Op::SetFillColor { col: rgb(color) });
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    space.point(0.0, config.page_height),
                    space.point(config.page_width, config.page_height),
                    space.point(config.page_width, 0.0),
                    space.point(0.0, 0.0),
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

fn write_text(
    ops: &mut Vec<Op>,
    pos: Point,
    text: &str,
    size: f32,
    font: BuiltinFont,
    color: [f32; 3],
) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor { pos });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::SetFillColor { col: rgb(color) });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(to_winlatin(text))],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Bold title on the left, grey date right-aligned, thin rule underneath.
fn render_header(
    ops: &mut Vec<Op>,
    space: PageSpace,
    config: &PdfLayout,
    header: &PageHeader,
    metrics: &FontManager,
) {
    let left = config.margin_x;
    let right = config.page_width - config.margin_x;

    write_text(
        ops,
        Point {
            x: space.x(left),
            y: space.y(HEADER_BASELINE),
        },
        &header.title,
        TITLE_SIZE_PT,
        BuiltinFont::HelveticaBold,
        [0.0, 0.0, 0.0],
    );

    // Font sizes are in points; positions in page units.
    let date_width = metrics.measure_text_width(&header.date, DATE_SIZE_PT, false) / space.ppu;
    let grey = 100.0 / 255.0;
    write_text(
        ops,
        Point {
            x: space.x(right - date_width),
            y: space.y(HEADER_BASELINE),
        },
        &header.date,
        DATE_SIZE_PT,
        BuiltinFont::Helvetica,
        [grey, grey, grey],
    );

    let rule = 180.0 / 255.0;
    ops.push(Op::SetOutlineColor {
        col: rgb([rule, rule, rule]),
    });
    ops.push(Op::SetOutlineThickness {
        pt: Pt(0.5 * space.ppu),
    });
    ops.push(Op::DrawLine {
        line: Line {
            points: vec![
                space.point(left, HEADER_RULE_Y),
                space.point(right, HEADER_RULE_Y),
            ],
            is_closed: false,
        },
    });
}

/// Embed a pre-registered XObject at the image's box.
fn render_image(
    ops: &mut Vec<Op>,
    space: PageSpace,
    img: &PlacedImage,
    images: &HashMap<&str, ImageResource>,
) {
    let Some(res) = images.get(img.src.as_str()) else {
        return;
    };
    // dpi 72: one image pixel is one point before scaling.
    let width_pt = img.width * space.ppu;
    let height_pt = img.height * space.ppu;
    let scale_x = if res.px_width > 0 {
        width_pt / res.px_width as f32
    } else {
        1.0
    };
    let scale_y = if res.px_height > 0 {
        height_pt / res.px_height as f32
    } else {
        1.0
    };

    ops.push(Op::UseXobject {
        id: res.xobj_id.clone(),
        transform: XObjectTransform {
            translate_x: Some(space.x(img.x)),
            translate_y: Some(space.y(img.y + img.height)),
            dpi: Some(72.0),
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            rotate: None,
        },
    });
}

/// Builtin fonts are WinAnsi encoded: one byte per glyph. Characters outside
/// the code page become `?`.
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{00A0}' => 0x20,
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: printpdf copies the string bytes into the content stream
    // verbatim; the bytes are never read back as UTF-8.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::encode_png_data_uri;

    #[test]
    fn render_empty_layout() {
        let config = PdfLayout::a4("Empty");
        let bytes = render_pdf(&config).unwrap();
        assert!(bytes.len() > 100, "PDF should have content");
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn render_header_and_image() {
        let src = encode_png_data_uri(&::image::RgbaImage::from_pixel(
            4,
            2,
            ::image::Rgba([200, 10, 10, 255]),
        ))
        .unwrap();
        let mut config = PdfLayout::a4("Sales");
        config.pages.push(PageLayout {
            header: Some(PageHeader {
                title: "Sales".into(),
                date: "05/03/2024".into(),
            }),
            images: vec![PlacedImage {
                x: 20.0,
                y: 56.0,
                width: 200.0,
                height: 100.0,
                src,
            }],
        });
        config.pages.push(PageLayout::default());
        let bytes = render_pdf(&config).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn undecodable_image_is_skipped() {
        let mut config = PdfLayout::a4("Broken");
        config.pages.push(PageLayout {
            header: None,
            images: vec![PlacedImage {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                src: "https://example.com/a.png".into(),
            }],
        });
        assert!(render_pdf(&config).is_ok());
    }

    #[test]
    fn invalid_page_size_is_an_error() {
        let mut config = PdfLayout::a4("Zero");
        config.page_width = 0.0;
        assert!(render_pdf(&config).is_err());
    }

    #[test]
    fn winlatin_maps_nbsp_and_unknown() {
        assert_eq!(to_winlatin("a\u{00A0}b"), "a b");
        assert_eq!(to_winlatin("\u{4E2D}").as_bytes(), b"?");
    }
}
