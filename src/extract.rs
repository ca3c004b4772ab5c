//! Geometry & style extraction.
//!
//! [`extract`] reads one element's border box and computed style and
//! converts them into the output coordinate space. [`ElementTable`] runs it
//! once per export over every descendant of the export root, assigning the
//! synthetic `el-N` uids the grouping stages key on. The document is never
//! written to.

use std::collections::HashMap;

use crate::color::to_hex;
use crate::dom::{Document, NodeId};
use crate::geometry::{Margins, Rect, UnitScale};
use crate::style::{leading_number, parse_float_val, ComputedStyle};

/// Normalised style snapshot of one element.
///
/// Border widths are in output units (vertical sides use the horizontal
/// converter, horizontal sides and the shorthand the vertical one). Padding,
/// radius and outline stay in CSS px. Colors are `#rrggbb` or
/// `"transparent"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementStyles {
    /// Points, integral.
    pub font_size: f32,
    pub font_weight: String,
    pub text_align: String,
    pub white_space: String,

    pub border_width: f32,
    pub border_top_width: f32,
    pub border_right_width: f32,
    pub border_bottom_width: f32,
    pub border_left_width: f32,

    pub padding: f32,
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
    pub border_radius: f32,
    pub outline_width: f32,

    pub color: String,
    pub background_color: String,
    pub outline_color: String,
    pub border_color: String,
    pub border_top_color: String,
    pub border_right_color: String,
    pub border_bottom_color: String,
    pub border_left_color: String,
}

impl ElementStyles {
    /// Multiply every size-like field by `factor`. Font size is rounded and
    /// kept at 1pt or more.
    pub fn scale(&mut self, factor: f32) {
        self.border_width *= factor;
        self.border_top_width *= factor;
        self.border_right_width *= factor;
        self.border_bottom_width *= factor;
        self.border_left_width *= factor;
        self.padding *= factor;
        self.padding_top *= factor;
        self.padding_right *= factor;
        self.padding_bottom *= factor;
        self.padding_left *= factor;
        self.border_radius *= factor;
        self.outline_width *= factor;
        self.font_size = (self.font_size * factor).round().max(1.0);
    }

    pub fn is_bold(&self) -> bool {
        crate::layout::is_bold(&self.font_weight)
    }
}

/// One element in output coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementInfo {
    pub node: NodeId,
    /// `el-N`, N being the element's position in document order.
    pub uid: String,
    /// Trimmed rendered text.
    pub text: String,
    pub rect: Rect,
    pub margins: Margins,
    /// Full single-line content width (`scrollWidth`), output units.
    pub content_width: f32,
    pub styles: ElementStyles,
}

impl ElementInfo {
    /// Box grown by the element's margins.
    pub fn outer_rect(&self) -> Rect {
        self.rect.expand(&self.margins)
    }
}

/// Font size in points: CSS px × 0.75, floored. Unparsable or zero sizes
/// fall back to 7px.
pub fn font_size_points(css: &str) -> f32 {
    let cleaned: String = css.chars().filter(|c| !c.is_ascii_alphabetic()).collect();
    let px = leading_number(cleaned.trim_start())
        .map(|n| n.trunc())
        .filter(|n| *n != 0.0)
        .unwrap_or(7.0);
    (px * 0.75).floor()
}

/// Pixel → output-unit converters for a slide deck.
///
/// The vertical scale maps `assumed_root_height` pixels (or, when `None`, the
/// root's measured height) onto the slide height.
pub fn setup_units(
    root_rect: &Rect,
    slide_width: f32,
    slide_height: f32,
    assumed_root_height: Option<f32>,
) -> UnitScale {
    let root_height = assumed_root_height.unwrap_or(root_rect.h.max(1.0));
    UnitScale::fit(root_rect.w, root_height, slide_width, slide_height)
}

/// Extract one element relative to `root_rect`'s origin.
pub fn extract(
    doc: &Document,
    id: NodeId,
    root_rect: &Rect,
    units: &UnitScale,
    uid: &str,
) -> ElementInfo {
    let rect = doc.rect(id);
    let empty = ComputedStyle::default();
    let style = doc.element(id).map(|e| &e.style).unwrap_or(&empty);
    let px = |prop: &str| parse_float_val(style.get(prop)).max(0.0);

    let scroll = doc
        .element(id)
        .and_then(|e| e.scroll_width)
        .unwrap_or(rect.w);

    let styles = ElementStyles {
        font_size: font_size_points(style.get("font-size")),
        font_weight: style.get("font-weight").to_string(),
        text_align: style.get("text-align").to_string(),
        white_space: style.get("white-space").to_string(),

        border_width: units.to_y(px("border-width")),
        border_top_width: units.to_y(px("border-top-width")),
        border_right_width: units.to_x(px("border-right-width")),
        border_bottom_width: units.to_y(px("border-bottom-width")),
        border_left_width: units.to_x(px("border-left-width")),

        padding: px("padding"),
        padding_top: px("padding-top"),
        padding_right: px("padding-right"),
        padding_bottom: px("padding-bottom"),
        padding_left: px("padding-left"),
        border_radius: px("border-radius"),
        outline_width: px("outline-width"),

        color: to_hex(style.get("color")),
        background_color: to_hex(style.get("background-color")),
        outline_color: to_hex(style.get("outline-color")),
        border_color: to_hex(style.get("border-color")),
        border_top_color: to_hex(style.get("border-top-color")),
        border_right_color: to_hex(style.get("border-right-color")),
        border_bottom_color: to_hex(style.get("border-bottom-color")),
        border_left_color: to_hex(style.get("border-left-color")),
    };

    ElementInfo {
        node: id,
        uid: uid.to_string(),
        text: doc.inner_text(id).trim().to_string(),
        rect: Rect::new(
            units.to_x(rect.x - root_rect.x).max(0.0),
            units.to_y(rect.y - root_rect.y).max(0.0),
            units.to_x(rect.w).max(0.0),
            units.to_y(rect.h).max(0.0),
        ),
        margins: Margins {
            top: units.to_y(px("margin-top")),
            right: units.to_x(px("margin-right")),
            bottom: units.to_y(px("margin-bottom")),
            left: units.to_x(px("margin-left")),
        },
        content_width: units.to_x(scroll.max(0.0)),
        styles,
    }
}

// ---------------------------------------------------------------------------
// Side table
// ---------------------------------------------------------------------------

/// Extraction results for every element under an export root, in document
/// order, built once per export.
#[derive(Debug, Clone)]
pub struct ElementTable {
    root: NodeId,
    root_rect: Rect,
    units: UnitScale,
    infos: Vec<ElementInfo>,
    index: HashMap<NodeId, usize>,
}

impl ElementTable {
    /// Extract every descendant of `root` (the root itself excluded).
    pub fn build(doc: &Document, root: NodeId, units: UnitScale) -> Self {
        let root_rect = doc.rect(root);
        let mut infos = Vec::new();
        let mut index = HashMap::new();
        for (i, id) in doc.descendants(root).into_iter().enumerate() {
            index.insert(id, i);
            infos.push(extract(doc, id, &root_rect, &units, &format!("el-{i}")));
        }
        log::debug!("Extracted {} elements", infos.len());
        Self {
            root,
            root_rect,
            units,
            infos,
            index,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_rect(&self) -> Rect {
        self.root_rect
    }

    pub fn units(&self) -> UnitScale {
        self.units
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementInfo> {
        self.infos.iter()
    }

    pub fn get(&self, id: NodeId) -> Option<&ElementInfo> {
        self.index.get(&id).map(|&i| &self.infos[i])
    }

    /// Document-order position of `id` (the N of its `el-N` uid).
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }
}
