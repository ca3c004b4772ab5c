//! Layout engine – uses Taffy to compute flexbox / grid layout for a styled
//! [`Document`], then writes every element's border box back into the
//! document so the exporters can read it like a rendered page.
//!
//! After layout each element has:
//! * `rect` – absolute border box in CSS px (root at the origin),
//! * `width` / `height` computed style – the used size in px,
//! * `scroll_width` – the single-line content width of `nowrap` elements
//!   whose text overflows the box.

use std::collections::HashMap;

use taffy::{
    style_helpers::FromFlex, AvailableSpace, Dimension, LengthPercentage, LengthPercentageAuto, Size, Style, TaffyTree,
};

use crate::dom::{Document, NodeData, NodeId, Tag};
use crate::fonts::{wrap_text, FontManager};
use crate::geometry::Rect;
use crate::style::{leading_number, parse_float_val, ComputedStyle};

type TaffyNode = taffy::NodeId;

// ---------------------------------------------------------------------------
// Build Taffy tree from the styled document
// ---------------------------------------------------------------------------

struct LayoutBuilder<'a> {
    taffy: TaffyTree<()>,
    fonts: &'a FontManager,
    /// Taffy node → document element.
    elements: HashMap<TaffyNode, NodeId>,
    /// Document element → natural single-line text width (nowrap only).
    overflow: HashMap<NodeId, f32>,
}

impl<'a> LayoutBuilder<'a> {
    fn new(fonts: &'a FontManager) -> Self {
        Self {
            taffy: TaffyTree::new(),
            fonts,
            elements: HashMap::new(),
            overflow: HashMap::new(),
        }
    }

    fn build_node(
        &mut self,
        doc: &Document,
        id: NodeId,
        parent_style: &ComputedStyle,
        parent_width: f32,
    ) -> Result<Option<TaffyNode>, String> {
        match &doc.node(id).data {
            NodeData::Text(text) => self.build_text_node(text, parent_style, parent_width),
            NodeData::Element(_) => self.build_element_node(doc, id, parent_width).map(Some),
        }
    }

    fn build_text_node(
        &mut self,
        text: &str,
        style: &ComputedStyle,
        parent_width: f32,
    ) -> Result<Option<TaffyNode>, String> {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Ok(None);
        }
        let font_size = font_size_px(style);
        let bold = is_bold(style.get("font-weight"));
        let line_height = self.fonts.line_height_px(font_size, style.get("line-height"));

        let lines = if style.get("white-space") == "nowrap" {
            vec![collapsed]
        } else {
            wrap_text(&collapsed, font_size, bold, parent_width, self.fonts)
        };
        let width = lines
            .iter()
            .map(|l| self.fonts.measure_text_width(l, font_size, bold))
            .fold(0.0f32, f32::max);
        let height = lines.len() as f32 * line_height;

        let leaf = Style {
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            flex_shrink: 0.0,
            ..Default::default()
        };
        self.taffy.new_leaf(leaf).map(Some).map_err(|e| e.to_string())
    }

    fn build_element_node(
        &mut self,
        doc: &Document,
        id: NodeId,
        parent_width: f32,
    ) -> Result<TaffyNode, String> {
        let Some(element) = doc.element(id) else {
            return Err(format!("node {id} is not an element"));
        };
        let style = &element.style;
        let tag = &element.tag;

        if tag.is_metadata() || style.get("display") == "none" {
            let hidden = Style {
                display: taffy::Display::None,
                ..Default::default()
            };
            let node = self.taffy.new_leaf(hidden).map_err(|e| e.to_string())?;
            self.elements.insert(node, id);
            return Ok(node);
        }

        // Width available for children, used to word-wrap text at build time.
        let my_width = resolve_length(style.get("width"), parent_width).unwrap_or(parent_width);
        let inner_width = (my_width
            - style.px("padding-left")
            - style.px("padding-right")
            - style.px("border-left-width")
            - style.px("border-right-width"))
        .max(1.0);

        let element_kids = doc.element_children(id).len().max(1);
        let display = style.get("display");
        let is_flex_row = display == "flex" && style.get("flex-direction") == "row";
        let child_build_width = if is_flex_row || *tag == Tag::Tr {
            let gap_total = style.px("gap") * element_kids.saturating_sub(1) as f32;
            ((inner_width - gap_total) / element_kids as f32).max(1.0)
        } else if display == "grid" {
            let cols = grid_columns(style).max(1);
            let gap_total = style.px("gap") * cols.saturating_sub(1) as f32;
            ((inner_width - gap_total) / cols as f32).max(1.0)
        } else {
            inner_width
        };

        let mut child_nodes = Vec::new();
        for &child in doc.children(id) {
            if let Some(node) = self.build_node(doc, child, style, child_build_width)? {
                child_nodes.push(node);
            }
        }

        if style.get("white-space") == "nowrap" {
            let text = doc.inner_text(id);
            let natural = self.fonts.measure_text_width(
                &text,
                font_size_px(style),
                is_bold(style.get("font-weight")),
            ) + style.px("padding-left")
                + style.px("padding-right");
            self.overflow.insert(id, natural);
        }

        let mut taffy_style = computed_to_taffy(style, tag);
        if matches!(tag, Tag::Img | Tag::Canvas | Tag::Svg) {
            apply_replaced_size(&mut taffy_style, doc, id, parent_width);
        }
        let node = self
            .taffy
            .new_with_children(taffy_style, &child_nodes)
            .map_err(|e| e.to_string())?;
        self.elements.insert(node, id);
        Ok(node)
    }

    /// Write absolute boxes back into the document.
    fn write_back(
        &self,
        doc: &mut Document,
        node: TaffyNode,
        offset_x: f32,
        offset_y: f32,
    ) -> Result<(), String> {
        let layout = self.taffy.layout(node).map_err(|e| e.to_string())?;
        let x = offset_x + layout.location.x;
        let y = offset_y + layout.location.y;

        if let Some(&id) = self.elements.get(&node) {
            let rect = Rect::new(x, y, layout.size.width, layout.size.height);
            doc.set_rect(id, rect);
            doc.set_style(id, "width", &format!("{}px", rect.w));
            doc.set_style(id, "height", &format!("{}px", rect.h));
            if let Some(&natural) = self.overflow.get(&id) {
                if natural > rect.w {
                    if let Some(e) = doc.element_mut(id) {
                        e.scroll_width = Some(natural);
                    }
                }
            }
        }

        let children = self.taffy.children(node).map_err(|e| e.to_string())?;
        for child in children {
            self.write_back(doc, child, x, y)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

fn computed_to_taffy(s: &ComputedStyle, tag: &Tag) -> Style {
    let mut ts = Style::default();

    // HTML table model: always flex regardless of computed display.
    match tag {
        Tag::Table => {
            ts.display = taffy::Display::Flex;
            ts.flex_direction = taffy::FlexDirection::Column;
        }
        Tag::Tr => {
            ts.display = taffy::Display::Flex;
            ts.flex_direction = taffy::FlexDirection::Row;
            ts.align_items = Some(taffy::AlignItems::Stretch);
        }
        Tag::Td | Tag::Th => {
            ts.display = taffy::Display::Flex;
            ts.flex_direction = taffy::FlexDirection::Column;
            ts.flex_grow = 1.0;
            ts.flex_basis = Dimension::Length(0.0);
        }
        _ => match s.get("display") {
            "flex" | "inline-flex" => {
                ts.display = taffy::Display::Flex;
                ts.flex_direction = match s.get("flex-direction") {
                    "column" => taffy::FlexDirection::Column,
                    "column-reverse" => taffy::FlexDirection::ColumnReverse,
                    "row-reverse" => taffy::FlexDirection::RowReverse,
                    _ => taffy::FlexDirection::Row,
                };
                ts.flex_wrap = match s.get("flex-wrap") {
                    "wrap" => taffy::FlexWrap::Wrap,
                    _ => taffy::FlexWrap::NoWrap,
                };
                ts.justify_content = match s.get("justify-content") {
                    "flex-start" | "start" => Some(taffy::JustifyContent::Start),
                    "flex-end" | "end" => Some(taffy::JustifyContent::End),
                    "center" => Some(taffy::JustifyContent::Center),
                    "space-between" => Some(taffy::JustifyContent::SpaceBetween),
                    "space-around" => Some(taffy::JustifyContent::SpaceAround),
                    "space-evenly" => Some(taffy::JustifyContent::SpaceEvenly),
                    _ => None,
                };
                ts.align_items = match s.get("align-items") {
                    "flex-start" | "start" => Some(taffy::AlignItems::Start),
                    "flex-end" | "end" => Some(taffy::AlignItems::End),
                    "center" => Some(taffy::AlignItems::Center),
                    "stretch" => Some(taffy::AlignItems::Stretch),
                    _ => None,
                };
            }
            "grid" => {
                ts.display = taffy::Display::Grid;
                ts.grid_template_columns =
                    vec![taffy::TrackSizingFunction::from_flex(1.0); grid_columns(s).max(1)];
            }
            "inline" => {
                ts.display = taffy::Display::Flex;
                ts.flex_direction = taffy::FlexDirection::Row;
                ts.flex_wrap = taffy::FlexWrap::Wrap;
            }
            // Block-level boxes stack vertically.
            _ => {
                ts.display = taffy::Display::Flex;
                ts.flex_direction = taffy::FlexDirection::Column;
            }
        },
    }
    if matches!(s.get("display"), "inline" | "inline-block" | "inline-flex") {
        // Inline boxes shrink to their content instead of stretching.
        ts.align_self = Some(taffy::AlignSelf::Start);
    }

    ts.size = Size {
        width: dimension(s.get("width")),
        height: dimension(s.get("height")),
    };
    let grows = s.px("flex-grow") > 0.0;
    ts.min_size = Size {
        width: if grows {
            Dimension::Length(0.0)
        } else {
            dimension(s.get("min-width"))
        },
        height: Dimension::Auto,
    };
    ts.max_size = Size {
        width: dimension(s.get("max-width")),
        height: Dimension::Auto,
    };
    if !matches!(tag, Tag::Td | Tag::Th) {
        ts.flex_grow = s.px("flex-grow");
        ts.flex_shrink = s.px("flex-shrink");
    }

    ts.margin = taffy::Rect {
        top: margin(s.get("margin-top")),
        right: margin(s.get("margin-right")),
        bottom: margin(s.get("margin-bottom")),
        left: margin(s.get("margin-left")),
    };
    ts.padding = taffy::Rect {
        top: LengthPercentage::Length(s.px("padding-top")),
        right: LengthPercentage::Length(s.px("padding-right")),
        bottom: LengthPercentage::Length(s.px("padding-bottom")),
        left: LengthPercentage::Length(s.px("padding-left")),
    };
    ts.border = taffy::Rect {
        top: LengthPercentage::Length(s.px("border-top-width")),
        right: LengthPercentage::Length(s.px("border-right-width")),
        bottom: LengthPercentage::Length(s.px("border-bottom-width")),
        left: LengthPercentage::Length(s.px("border-left-width")),
    };
    ts.gap = Size {
        width: LengthPercentage::Length(s.px("gap")),
        height: LengthPercentage::Length(s.px("gap")),
    };

    ts
}

fn dimension(value: &str) -> Dimension {
    let v = value.trim();
    if let Some(pct) = v.strip_suffix('%') {
        return pct
            .trim()
            .parse::<f32>()
            .map(|p| Dimension::Percent(p / 100.0))
            .unwrap_or(Dimension::Auto);
    }
    match leading_number(v) {
        Some(px) if v.ends_with("px") || v.parse::<f32>().is_ok() => Dimension::Length(px),
        _ => Dimension::Auto,
    }
}

fn margin(value: &str) -> LengthPercentageAuto {
    if value.trim() == "auto" {
        LengthPercentageAuto::Auto
    } else {
        LengthPercentageAuto::Length(parse_float_val(value))
    }
}

/// Resolve a CSS length against the parent width; `None` for `auto`.
fn resolve_length(value: &str, parent: f32) -> Option<f32> {
    match dimension(value) {
        Dimension::Length(px) => Some(px),
        Dimension::Percent(p) => Some(parent * p),
        _ => None,
    }
}

fn grid_columns(s: &ComputedStyle) -> usize {
    s.get("grid-template-columns").split_whitespace().count()
}

fn font_size_px(s: &ComputedStyle) -> f32 {
    let fs = s.px("font-size");
    if fs > 0.0 {
        fs
    } else {
        16.0
    }
}

/// `bold`, `bolder`, or a numeric weight ≥ 600.
pub fn is_bold(weight: &str) -> bool {
    let w = weight.trim();
    w == "bold" || w == "bolder" || leading_number(w).is_some_and(|n| n >= 600.0)
}

// ---------------------------------------------------------------------------
// Replaced elements
// ---------------------------------------------------------------------------

/// Resolve `auto` sizes of images and canvases from their `width` / `height`
/// attributes or, for base64 data-URI images, the decoded intrinsic size.
fn apply_replaced_size(ts: &mut Style, doc: &Document, id: NodeId, parent_width: f32) {
    let known_w = match ts.size.width {
        Dimension::Length(v) => Some(v),
        Dimension::Percent(p) => Some(parent_width * p),
        _ => None,
    };
    let known_h = match ts.size.height {
        Dimension::Length(v) => Some(v),
        _ => None,
    };
    if known_w.is_some() && known_h.is_some() {
        return;
    }

    let attr_w = doc.attr(id, "width").and_then(leading_number);
    let attr_h = doc.attr(id, "height").and_then(leading_number);
    let intrinsic = match (attr_w, attr_h) {
        (Some(w), Some(h)) => Some((w, h)),
        _ => doc
            .attr(id, "src")
            .and_then(crate::assets::data_uri_dimensions)
            .map(|(w, h)| (w as f32, h as f32)),
    };
    let Some((px_w, px_h)) = intrinsic else {
        return;
    };
    if px_w <= 0.0 || px_h <= 0.0 {
        return;
    }
    let aspect = px_w / px_h;

    let (w, h) = match (known_w, known_h) {
        (Some(w), None) => (w, (w / aspect).max(1.0)),
        (None, Some(h)) => ((h * aspect).max(1.0), h),
        _ => (px_w, px_h),
    };
    ts.size = Size {
        width: Dimension::Length(w),
        height: Dimension::Length(h),
    };
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Lay out `doc` inside a viewport `viewport_width` px wide and record every
/// element's border box. The root sits at the origin.
pub fn compute_layout(
    doc: &mut Document,
    viewport_width: f32,
    fonts: &FontManager,
) -> Result<(), String> {
    let mut builder = LayoutBuilder::new(fonts);
    let root = doc.root();
    let root_node = builder.build_element_node(doc, root, viewport_width)?;

    // The root always spans the viewport.
    let mut root_style = builder
        .taffy
        .style(root_node)
        .map_err(|e| e.to_string())?
        .clone();
    root_style.size.width = Dimension::Length(viewport_width);
    root_style.margin = taffy::Rect {
        top: LengthPercentageAuto::Length(0.0),
        right: LengthPercentageAuto::Length(0.0),
        bottom: LengthPercentageAuto::Length(0.0),
        left: LengthPercentageAuto::Length(0.0),
    };
    builder
        .taffy
        .set_style(root_node, root_style)
        .map_err(|e| e.to_string())?;

    builder
        .taffy
        .compute_layout(
            root_node,
            Size {
                width: AvailableSpace::Definite(viewport_width),
                height: AvailableSpace::MaxContent,
            },
        )
        .map_err(|e| e.to_string())?;

    builder.write_back(doc, root_node, 0.0, 0.0)?;
    doc.set_layout_width(viewport_width);
    log::debug!(
        "Laid out {} elements, document height {:.1}px",
        builder.elements.len(),
        doc.rect(root).h
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::style::resolve_document;

    fn laid_out(html: &str, width: f32) -> Document {
        let mut doc = parse_html(html);
        resolve_document(&mut doc);
        compute_layout(&mut doc, width, &FontManager::default()).unwrap();
        doc
    }

    #[test]
    fn layout_simple_paragraph() {
        let doc = laid_out("<p>Hello world</p>", 600.0);
        let p = doc.content_root();
        let r = doc.rect(p);
        assert!(r.w > 0.0, "Box should have width");
        assert!(r.h > 0.0, "Box should have height");
        assert_eq!(doc.rect(doc.root()).w, 600.0);
    }

    #[test]
    fn layout_flex_row_splits_width() {
        let doc = laid_out(
            r#"<div class="flex"><div class="flex-1">A</div><div class="flex-1">B</div></div>"#,
            600.0,
        );
        let row = doc.content_root();
        let kids = doc.element_children(row);
        let a = doc.rect(kids[0]);
        let b = doc.rect(kids[1]);
        assert!((a.w - 300.0).abs() < 1.0, "got {a:?}");
        assert!((b.x - 300.0).abs() < 1.0, "got {b:?}");
        assert_eq!(a.y, b.y);
    }

    #[test]
    fn rects_are_absolute() {
        let doc = laid_out(
            r#"<div style="padding: 20px"><div style="height: 50px"></div><div style="height: 30px"></div></div>"#,
            400.0,
        );
        let outer = doc.content_root();
        let kids = doc.element_children(outer);
        assert_eq!(doc.rect(kids[0]), Rect::new(20.0, 20.0, 360.0, 50.0));
        assert_eq!(doc.rect(kids[1]).y, 70.0);
        assert_eq!(doc.rect(outer).h, 120.0);
        assert_eq!(doc.style_value(kids[0], "width"), "360px");
    }

    #[test]
    fn hidden_elements_have_no_box() {
        let doc = laid_out(r#"<div><p class="hidden">x</p><p>y</p></div>"#, 400.0);
        let kids = doc.element_children(doc.content_root());
        assert!(doc.rect(kids[0]).is_empty());
        assert!(!doc.rect(kids[1]).is_empty());
    }

    #[test]
    fn nowrap_overflow_records_scroll_width() {
        let doc = laid_out(
            r#"<div style="width: 40px; white-space: nowrap">A very long label</div>"#,
            400.0,
        );
        let div = doc.content_root();
        let scroll = doc.element(div).and_then(|e| e.scroll_width).unwrap();
        assert!(scroll > 40.0);
    }

    #[test]
    fn bold_weights() {
        assert!(is_bold("bold"));
        assert!(is_bold("700"));
        assert!(is_bold("600"));
        assert!(!is_bold("500"));
        assert!(!is_bold("normal"));
    }
}
