//! Class and attribute markers authors put on dashboard markup.

use crate::dom::{Document, NodeId};

/// Subtree excluded from every export.
pub const NOPRINT: &str = "pdfppt-noprint";
/// Container rasterized once and swapped for an `<img>` in PDF exports.
pub const CHART_SNAPSHOT: &str = "pdfppt-chart-snapshot";
/// Forces an element to become a panel.
pub const GROUP_ROOT: &[&str] = &["pdfppt-ppt-group-root", "ppt-group-root"];
/// Panel that takes a slide on its own (attribute or class).
pub const FULL_SLIDE_ATTR: &str = "data-ppt-full-slide";
pub const FULL_SLIDE_CLASS: &str = "ppt-full-slide";
/// Element never considered as a panel or shape.
pub const SKIP_ATTRS: &[&str] = &["data-ppt-skip", "pdfppt-data-ppt-skip"];
/// JSON chart descriptor attributes, in lookup order.
pub const CHART_ATTRS: &[&str] = &["pdfppt-data-chart", "data-chart"];

pub fn is_noprint(doc: &Document, id: NodeId) -> bool {
    doc.closest_with_class(id, NOPRINT).is_some()
}

pub fn is_skipped(doc: &Document, id: NodeId) -> bool {
    SKIP_ATTRS.iter().any(|a| doc.has_attr(id, a))
}

pub fn is_forced_group(doc: &Document, id: NodeId) -> bool {
    GROUP_ROOT.iter().any(|c| doc.has_class(id, c)) || doc.has_attr(id, FULL_SLIDE_ATTR)
}

/// `data-ppt-full-slide` present and empty or `"true"`, or the
/// `ppt-full-slide` class.
pub fn is_full_slide(doc: &Document, id: NodeId) -> bool {
    let attr = doc
        .attr(id, FULL_SLIDE_ATTR)
        .is_some_and(|v| v.is_empty() || v.eq_ignore_ascii_case("true"));
    attr || doc.has_class(id, FULL_SLIDE_CLASS)
}

/// Raw chart descriptor when it looks like a JSON object.
pub fn chart_attr(doc: &Document, id: NodeId) -> Option<&str> {
    CHART_ATTRS
        .iter()
        .find_map(|a| doc.attr(id, a))
        .map(str::trim)
        .filter(|raw| raw.starts_with('{') && raw.ends_with('}'))
}
