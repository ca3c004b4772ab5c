//! Slide renderer – turns laid-out groups into a [`Deck`].
//!
//! Paint order follows the layers of a dashboard: every panel background
//! first, then shapes, texts and charts. Per-side CSS borders become thin
//! filled bars because slide shapes carry a single outline.

use crate::chart;
use crate::color::is_transparent;
use crate::deck::*;
use crate::dom::Document;
use crate::extract::ElementInfo;
use crate::geometry::Rect;
use crate::markers;
use crate::panels::Group;

/// Extra width given to `nowrap` text so the writer does not wrap it.
const NOWRAP_PADDING: f32 = 0.1;
const END_MESSAGE: &str = "Thank You !!!";
const WRAPPER_TITLE_SIZE: f32 = 50.0;
const WRAPPER_DATE_SIZE: f32 = 20.0;

/// Deck-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckOptions {
    pub title: String,
    pub slide_width: f32,
    pub slide_height: f32,
    /// Add a title slide before and a closing slide after the content.
    pub start_end: bool,
    /// `MM/DD/YYYY`, shown on the title slide.
    pub date: String,
}

/// Images already loaded as data URIs. `None` means missing or failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckAssets {
    pub start_image: Option<String>,
    pub end_image: Option<String>,
    pub middle_image: Option<String>,
    /// Whole-dashboard raster, used when no panel was detected.
    pub dashboard_image: Option<String>,
}

fn frame(r: Rect) -> Frame {
    Frame {
        x: r.x,
        y: r.y,
        w: r.w,
        h: r.h,
    }
}

fn visible(color: &str) -> Option<String> {
    (!is_transparent(color)).then(|| color.to_string())
}

/// Outline for a box: the thicker of border and outline, in the border
/// color (outline color when the border is transparent).
fn outline(info: &ElementInfo) -> Option<LineSpec> {
    let s = &info.styles;
    let width = s.border_width.max(s.outline_width);
    if width <= 0.0 {
        return None;
    }
    let color = visible(&s.border_color).or_else(|| visible(&s.outline_color))?;
    Some(LineSpec { color, width })
}

/// Text inner margin in points: the smallest positive padding, at least 1.
fn inset(info: &ElementInfo) -> f32 {
    let s = &info.styles;
    [s.padding_left, s.padding_right, s.padding_top, s.padding_bottom]
        .into_iter()
        .filter(|v| *v > 0.0)
        .reduce(f32::min)
        .unwrap_or(1.0)
        .max(1.0)
}

/// Number of slides and the index range of the content slides.
pub fn slide_count(groups: &[Group], start_end: bool) -> (usize, std::ops::Range<usize>) {
    let content = groups.iter().map(|g| g.slide).max().unwrap_or(0).max(1);
    if start_end {
        (content + 2, 1..content + 1)
    } else {
        (content, 0..content)
    }
}

/// A bold single-line text box centred vertically on `center_y`.
///
/// `size_x_offset == -100` makes the box span the slide; otherwise the
/// width is estimated from the character count plus the offset.
#[allow(clippy::too_many_arguments)]
pub fn add_text_element(
    slide: &mut SlideSpec,
    text: &str,
    font_size: f32,
    color: &str,
    x: f32,
    center_y: f32,
    size_x_offset: f32,
    align: Align,
    slide_width: f32,
) {
    let line_height = font_size * 1.2 / 72.0;
    let h = line_height.max(0.8);
    let w = if size_x_offset == -100.0 {
        slide_width
    } else {
        text.chars().count() as f32 * font_size * 0.55 / 72.0 + size_x_offset
    };
    slide.items.push(SlideItem::Text(TextBox {
        text: text.to_string(),
        frame: Frame {
            x,
            y: center_y - h / 2.0,
            w,
            h,
        },
        font_size,
        bold: true,
        color: color.to_string(),
        align,
        valign_middle: true,
        fill: None,
        line: None,
        inset: 0.0,
    }));
}

/// Title + date on the first slide, closing message on the last.
pub fn setup_wrapper_slides(slides: &mut [SlideSpec], options: &DeckOptions, assets: &DeckAssets) {
    let (w, h) = (options.slide_width, options.slide_height);
    let center_y = h / 2.0;
    let title = match options.title.trim() {
        "" => "Dashboard",
        t => t,
    };

    if let Some(first) = slides.first_mut() {
        let color = match &assets.start_image {
            Some(img) => {
                first.background.image = Some(img.clone());
                "#FFFFFF"
            }
            None => "#000000",
        };
        add_text_element(first, title, WRAPPER_TITLE_SIZE, color, 0.0, center_y, -100.0, Align::Center, w);
        add_text_element(
            first,
            &options.date,
            WRAPPER_DATE_SIZE,
            color,
            w - 2.0,
            h - 0.5,
            0.1,
            Align::Left,
            w,
        );
    }

    if let Some(last) = slides.last_mut() {
        match &assets.end_image {
            Some(img) => last.background.image = Some(img.clone()),
            None => add_text_element(
                last,
                END_MESSAGE,
                WRAPPER_TITLE_SIZE,
                "#000000",
                0.0,
                center_y,
                -100.0,
                Align::Center,
                w,
            ),
        }
    }
}

/// One filled bar per bordered side of `outer`.
pub fn add_border_bars(slide: &mut SlideSpec, info: &ElementInfo, outer: Rect) {
    let s = &info.styles;
    let sides = [
        (
            s.border_left_width,
            &s.border_left_color,
            Rect::new(outer.x, outer.y, s.border_left_width, outer.h),
        ),
        (
            s.border_right_width,
            &s.border_right_color,
            Rect::new(outer.right() - s.border_right_width, outer.y, s.border_right_width, outer.h),
        ),
        (
            s.border_top_width,
            &s.border_top_color,
            Rect::new(outer.x, outer.y, outer.w, s.border_top_width),
        ),
        (
            s.border_bottom_width,
            &s.border_bottom_color,
            Rect::new(outer.x, outer.bottom() - s.border_bottom_width, outer.w, s.border_bottom_width),
        ),
    ];
    for (width, color, bar) in sides {
        if width <= 0.0 || is_transparent(color) {
            continue;
        }
        slide.items.push(SlideItem::Shape(ShapeItem {
            shape: ShapeKind::Rect,
            frame: frame(bar),
            fill: Some(color.clone()),
            line: Some(LineSpec {
                color: color.clone(),
                width: 0.0,
            }),
            inset: None,
        }));
    }
}

/// Panel background rectangle.
pub fn add_background(slide: &mut SlideSpec, group: &Group) {
    let bg = &group.background;
    slide.items.push(SlideItem::Shape(ShapeItem {
        shape: ShapeKind::Rect,
        frame: frame(bg.outer_rect()),
        fill: visible(&bg.styles.background_color),
        line: outline(bg),
        inset: None,
    }));
}

/// Styled box inside a panel.
pub fn add_shape(slide: &mut SlideSpec, info: &ElementInfo) {
    let outer = info.outer_rect();
    let shape = if info.styles.border_radius > 0.0 {
        ShapeKind::RoundRect
    } else {
        ShapeKind::Rect
    };
    slide.items.push(SlideItem::Shape(ShapeItem {
        shape,
        frame: frame(outer),
        fill: visible(&info.styles.background_color),
        line: outline(info),
        inset: Some(inset(info)),
    }));
    add_border_bars(slide, info, outer);
}

/// Text box mirroring the element's box styling.
pub fn add_text(slide: &mut SlideSpec, info: &ElementInfo, slide_width: f32) {
    if info.text.trim().is_empty() {
        return;
    }
    let outer = info.outer_rect();
    let s = &info.styles;
    let align = Align::from_css(&s.text_align);
    let nowrap = s.white_space.contains("nowrap");

    let mut x = outer.x;
    let mut w = outer.w;
    let text = if nowrap {
        let content = if info.content_width > 0.0 {
            info.content_width
        } else {
            w
        };
        let desired = slide_width.min(content + NOWRAP_PADDING);
        if desired > w {
            let extra = desired - w;
            match align {
                Align::Center => x -= extra / 2.0,
                Align::Right => x -= extra,
                Align::Left => {}
            }
            w = desired;
        }
        info.text
            .chars()
            .map(|c| if c.is_whitespace() { '\u{00A0}' } else { c })
            .collect()
    } else {
        info.text.clone()
    };
    if x < 0.0 {
        x = 0.0;
    }
    if x + w > slide_width {
        x = (slide_width - w).max(0.0);
    }

    let color = match s.color.as_str() {
        "" | crate::color::TRANSPARENT => "#000000".to_string(),
        c => c.to_string(),
    };
    slide.items.push(SlideItem::Text(TextBox {
        text,
        frame: Frame {
            x,
            y: outer.y,
            w,
            h: outer.h,
        },
        font_size: s.font_size,
        bold: s.is_bold(),
        color,
        align,
        valign_middle: false,
        fill: visible(&s.background_color),
        line: outline(info),
        inset: inset(info),
    }));
    add_border_bars(slide, info, outer);
}

/// Native chart at the placeholder's box. Malformed descriptors are skipped.
pub fn add_chart(slide: &mut SlideSpec, doc: &Document, info: &ElementInfo) {
    let Some(raw) = markers::chart_attr(doc, info.node) else {
        return;
    };
    if let Some(native) = chart::interpret(raw) {
        slide.items.push(SlideItem::Chart(ChartItem {
            frame: frame(info.rect),
            chart: native,
        }));
    }
}

/// Build the deck for laid-out `groups` (slide indices already assigned).
pub fn render_deck(
    doc: &Document,
    groups: &[Group],
    options: &DeckOptions,
    assets: &DeckAssets,
) -> Deck {
    let (count, middle) = slide_count(groups, options.start_end);
    let mut slides: Vec<SlideSpec> = (0..count).map(|_| SlideSpec::blank()).collect();

    if let Some(img) = &assets.middle_image {
        for slide in &mut slides[middle.clone()] {
            slide.background.image = Some(img.clone());
        }
    }
    if options.start_end {
        setup_wrapper_slides(&mut slides, options, assets);
    }

    let content = &mut slides[middle];
    if groups.is_empty() {
        match (&assets.dashboard_image, content.first_mut()) {
            (Some(data), Some(slide)) => slide.items.push(SlideItem::Image(ImageItem {
                frame: Frame {
                    x: 0.2,
                    y: 1.0,
                    w: options.slide_width - 0.4,
                    h: options.slide_height - 1.4,
                },
                data: data.clone(),
            })),
            _ => log::warn!("No panels and no dashboard image; content slide left empty"),
        }
    } else {
        let target = |g: &Group| g.slide.checked_sub(1);
        for g in groups {
            if let Some(slide) = target(g).and_then(|i| content.get_mut(i)) {
                add_background(slide, g);
            }
        }
        for g in groups {
            if let Some(slide) = target(g).and_then(|i| content.get_mut(i)) {
                for info in &g.shapes {
                    add_shape(slide, info);
                }
            }
        }
        for g in groups {
            if let Some(slide) = target(g).and_then(|i| content.get_mut(i)) {
                for info in &g.texts {
                    add_text(slide, info, options.slide_width);
                }
            }
        }
        for g in groups {
            if let Some(slide) = target(g).and_then(|i| content.get_mut(i)) {
                for info in &g.charts {
                    add_chart(slide, doc, info);
                }
            }
        }
    }

    log::debug!("Rendered deck with {} slides", slides.len());
    Deck {
        title: options.title.clone(),
        width: options.slide_width,
        height: options.slide_height,
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{NodeId, Tag};
    use crate::extract::ElementStyles;
    use crate::geometry::Margins;

    fn info(node: NodeId, rect: Rect, text: &str) -> ElementInfo {
        ElementInfo {
            node,
            uid: format!("el-{node}"),
            text: text.to_string(),
            rect,
            margins: Margins::default(),
            content_width: 0.0,
            styles: ElementStyles {
                font_size: 12.0,
                font_weight: "400".into(),
                text_align: "left".into(),
                color: "#111111".into(),
                background_color: "transparent".into(),
                border_color: "transparent".into(),
                outline_color: "transparent".into(),
                ..Default::default()
            },
        }
    }

    fn options(start_end: bool) -> DeckOptions {
        DeckOptions {
            title: "Q3 Report".into(),
            slide_width: 13.333,
            slide_height: 7.5,
            start_end,
            date: "03/05/2024".into(),
        }
    }

    fn group(slide: usize) -> Group {
        let mut g = Group::new(info(1, Rect::new(1.0, 1.0, 5.0, 3.0), ""));
        g.background.styles.background_color = "#ffffff".into();
        g.slide = slide;
        g
    }

    #[test]
    fn slide_count_with_and_without_wrappers() {
        let groups = vec![group(1), group(1), group(2)];
        assert_eq!(slide_count(&groups, true), (4, 1..3));
        assert_eq!(slide_count(&groups, false), (2, 0..2));
        assert_eq!(slide_count(&[], true), (3, 1..2));
    }

    #[test]
    fn text_element_geometry() {
        let mut slide = SlideSpec::blank();
        add_text_element(&mut slide, "Title", 50.0, "#000000", 0.0, 3.75, -100.0, Align::Center, 13.333);
        add_text_element(&mut slide, "03/05/2024", 20.0, "#000000", 11.333, 7.0, 0.1, Align::Left, 13.333);
        let texts: Vec<&TextBox> = slide.texts().collect();
        let title = texts[0];
        assert_eq!(title.frame.w, 13.333);
        assert!((title.frame.h - 50.0 * 1.2 / 72.0).abs() < 1e-5);
        assert!((title.frame.y - (3.75 - title.frame.h / 2.0)).abs() < 1e-5);
        let date = texts[1];
        assert!((date.frame.h - 0.8).abs() < 1e-6);
        assert!((date.frame.w - (10.0 * 20.0 * 0.55 / 72.0 + 0.1)).abs() < 1e-5);
        assert!(date.bold && date.valign_middle);
    }

    #[test]
    fn wrappers_without_images_use_black_text() {
        let doc = Document::new(Tag::Div);
        let deck = render_deck(&doc, &[group(1)], &options(true), &DeckAssets::default());
        assert_eq!(deck.slides.len(), 3);
        let start: Vec<&TextBox> = deck.slides[0].texts().collect();
        assert_eq!(start[0].text, "Q3 Report");
        assert_eq!(start[0].color, "#000000");
        assert_eq!(start[1].text, "03/05/2024");
        let end: Vec<&TextBox> = deck.slides[2].texts().collect();
        assert_eq!(end[0].text, "Thank You !!!");
        assert!(deck.slides.iter().all(|s| s.background.color == SLIDE_BACKGROUND));
    }

    #[test]
    fn loaded_images_switch_wrapper_styling() {
        let doc = Document::new(Tag::Div);
        let assets = DeckAssets {
            start_image: Some("data:image/png;base64,AA==".into()),
            end_image: Some("data:image/png;base64,BB==".into()),
            middle_image: Some("data:image/png;base64,CC==".into()),
            dashboard_image: None,
        };
        let deck = render_deck(&doc, &[group(1), group(2)], &options(true), &assets);
        assert_eq!(deck.slides.len(), 4);
        assert_eq!(deck.slides[0].texts().next().unwrap().color, "#FFFFFF");
        assert_eq!(deck.slides[3].texts().count(), 0);
        assert_eq!(deck.slides[3].background.image.as_deref(), Some("data:image/png;base64,BB=="));
        for s in &deck.slides[1..3] {
            assert_eq!(s.background.image.as_deref(), Some("data:image/png;base64,CC=="));
        }
    }

    #[test]
    fn no_groups_places_dashboard_image() {
        let doc = Document::new(Tag::Div);
        let assets = DeckAssets {
            dashboard_image: Some("data:image/png;base64,AA==".into()),
            ..Default::default()
        };
        let deck = render_deck(&doc, &[], &options(false), &assets);
        assert_eq!(deck.slides.len(), 1);
        match &deck.slides[0].items[0] {
            SlideItem::Image(img) => {
                assert_eq!((img.frame.x, img.frame.y), (0.2, 1.0));
                assert!((img.frame.w - 12.933).abs() < 1e-4);
                assert!((img.frame.h - 6.1).abs() < 1e-4);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn text_box_mirrors_styles_and_borders() {
        let mut t = info(2, Rect::new(1.0, 1.0, 2.0, 0.5), "Revenue");
        t.margins = Margins {
            top: 0.1,
            right: 0.0,
            bottom: 0.0,
            left: 0.2,
        };
        t.styles.font_weight = "700".into();
        t.styles.text_align = "center".into();
        t.styles.padding_left = 4.0;
        t.styles.padding_top = 2.0;
        t.styles.border_left_width = 0.05;
        t.styles.border_left_color = "#ff0000".into();
        let mut slide = SlideSpec::blank();
        add_text(&mut slide, &t, 13.333);

        let SlideItem::Text(tb) = &slide.items[0] else {
            panic!("text first");
        };
        assert_eq!(tb.frame, Frame { x: 0.8, y: 0.9, w: 2.2, h: 0.6 });
        assert!(tb.bold);
        assert_eq!(tb.align, Align::Center);
        assert_eq!(tb.inset, 2.0);
        assert!(tb.fill.is_none() && tb.line.is_none());

        let SlideItem::Shape(bar) = &slide.items[1] else {
            panic!("border bar second");
        };
        assert_eq!(bar.frame, Frame { x: 0.8, y: 0.9, w: 0.05, h: 0.6 });
        assert_eq!(bar.fill.as_deref(), Some("#ff0000"));
        assert_eq!(bar.line.as_ref().map(|l| l.width), Some(0.0));
    }

    #[test]
    fn nowrap_text_widens_and_stays_on_slide() {
        let mut t = info(3, Rect::new(12.0, 1.0, 1.0, 0.3), "Total revenue");
        t.styles.white_space = "nowrap".into();
        t.styles.text_align = "right".into();
        t.content_width = 2.0;
        let mut slide = SlideSpec::blank();
        add_text(&mut slide, &t, 13.333);
        let tb = slide.texts().next().unwrap();
        assert_eq!(tb.text, "Total\u{00A0}revenue");
        assert!((tb.frame.w - 2.1).abs() < 1e-5);
        // Shifted left by the extra width: 12 - 1.1 = 10.9, inside the slide.
        assert!((tb.frame.x - 10.9).abs() < 1e-5);
    }

    #[test]
    fn rounded_shape_and_panel_outline() {
        let mut g = group(1);
        g.background.styles.border_width = 0.02;
        g.background.styles.outline_width = 1.0;
        g.background.styles.border_color = "#cccccc".into();
        let mut s = info(4, Rect::new(1.5, 1.5, 1.0, 1.0), "");
        s.styles.border_radius = 6.0;
        s.styles.background_color = "#eeeeee".into();
        g.shapes.push(s);

        let doc = Document::new(Tag::Div);
        let deck = render_deck(&doc, &[g], &options(false), &DeckAssets::default());
        let items = &deck.slides[0].items;
        let SlideItem::Shape(bg) = &items[0] else {
            panic!("background first");
        };
        assert_eq!(bg.fill.as_deref(), Some("#ffffff"));
        assert_eq!(bg.line, Some(LineSpec { color: "#cccccc".into(), width: 1.0 }));
        let SlideItem::Shape(shape) = &items[1] else {
            panic!("shape second");
        };
        assert_eq!(shape.shape, ShapeKind::RoundRect);
        assert_eq!(shape.inset, Some(1.0));
    }
}
