//! Panel detection – finds the visually distinct containers that become
//! slide groups.

use crate::dom::{Document, NodeId};
use crate::extract::{ElementInfo, ElementTable};
use crate::markers;
use crate::style::{leading_number, ComputedStyle};

/// A panel and the elements it fully contains.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub background: ElementInfo,
    pub texts: Vec<ElementInfo>,
    pub shapes: Vec<ElementInfo>,
    pub charts: Vec<ElementInfo>,
    /// 1-based slide index; 0 until the layout engine runs.
    pub slide: usize,
    /// Product of every scale applied by the layout engine.
    pub applied_scale: f32,
    pub full_slide: bool,
    pub forced: bool,
}

impl Group {
    pub fn new(background: ElementInfo) -> Self {
        Self {
            background,
            texts: Vec::new(),
            shapes: Vec::new(),
            charts: Vec::new(),
            slide: 0,
            applied_scale: 1.0,
            full_slide: false,
            forced: false,
        }
    }

    /// Every member except the background.
    pub fn items(&self) -> impl Iterator<Item = &ElementInfo> {
        self.texts.iter().chain(&self.shapes).chain(&self.charts)
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut ElementInfo> {
        self.texts
            .iter_mut()
            .chain(self.shapes.iter_mut())
            .chain(self.charts.iter_mut())
    }

    /// `true` when `node` is the background or one of the members.
    pub fn holds(&self, node: NodeId) -> bool {
        self.background.node == node || self.items().any(|i| i.node == node)
    }
}

fn js_float(value: &str) -> Option<f32> {
    leading_number(value.trim_start())
}

fn is_unset_color(value: &str) -> bool {
    value.is_empty() || value == "transparent" || value == "rgba(0, 0, 0, 0)"
}

/// `true` when the computed style makes the element look like a container:
/// a background, a visible border, a shadow, or a narrow fixed-height flex
/// box (icons, badges).
pub fn has_visual_style(style: &ComputedStyle) -> bool {
    let has_bg = !is_unset_color(style.get("background-color"));

    let has_border_width = [
        "border-width",
        "border-left-width",
        "border-right-width",
        "border-bottom-width",
        "border-top-width",
    ]
    .iter()
    .any(|p| js_float(style.get(p)).is_some_and(|w| w > 0.0));
    let has_border = has_border_width && !is_unset_color(style.get("border-color"));

    let shadow = style.get("box-shadow");
    let has_shadow = !shadow.is_empty() && shadow != "none";

    let has_dimensions = js_float(style.get("height")).is_some_and(|h| h > 0.0)
        && js_float(style.get("width")).is_some_and(|w| w < 96.0)
        && style.get("display") == "flex";

    has_bg || has_border || has_shadow || has_dimensions
}

/// Nearest ancestor of `nodes[0]`'s parent chain that contains every node.
pub fn common_ancestor(doc: &Document, nodes: &[NodeId]) -> Option<NodeId> {
    let first = *nodes.first()?;
    let mut current = doc.parent(first);
    while let Some(candidate) = current {
        if nodes.iter().all(|&n| doc.contains(candidate, n)) {
            return Some(candidate);
        }
        current = doc.parent(candidate);
    }
    None
}

/// Collect panels in document order.
///
/// Skips `pdfppt-noprint` subtrees, `excluded` (the wrapper around all text),
/// elements marked `data-ppt-skip`, and anything inside an accepted forced
/// group. A candidate overlapping an accepted panel is dropped unless it is
/// forced.
pub fn detect_panels(doc: &Document, table: &ElementTable, excluded: Option<NodeId>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut forced_roots: Vec<NodeId> = Vec::new();

    for info in table.iter() {
        let id = info.node;
        if markers::is_noprint(doc, id) || Some(id) == excluded || markers::is_skipped(doc, id) {
            continue;
        }
        if forced_roots.iter().any(|&root| doc.contains(root, id)) {
            continue;
        }

        let forced = markers::is_forced_group(doc, id);
        if !forced {
            let Some(element) = doc.element(id) else {
                continue;
            };
            if !has_visual_style(&element.style) {
                continue;
            }
            let overlaps = groups
                .iter()
                .any(|g| info.rect.overlaps(&g.background.rect));
            if overlaps {
                continue;
            }
        }

        let mut group = Group::new(info.clone());
        group.forced = forced;
        group.full_slide = markers::is_full_slide(doc, id);
        if forced {
            forced_roots.push(id);
        }
        groups.push(group);
    }

    log::debug!(
        "Detected {} panels ({} forced)",
        groups.len(),
        forced_roots.len()
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;
    use crate::geometry::{Rect, UnitScale};

    fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
        ComputedStyle::from_pairs(pairs)
    }

    #[test]
    fn visual_style_rules() {
        assert!(!has_visual_style(&style(&[])));
        assert!(has_visual_style(&style(&[("background-color", "#fff")])));
        assert!(!has_visual_style(&style(&[("background-color", "rgba(0, 0, 0, 0)")])));
        assert!(has_visual_style(&style(&[
            ("border-left-width", "4px"),
            ("border-color", "rgb(1, 2, 3)")
        ])));
        assert!(!has_visual_style(&style(&[
            ("border-width", "1px"),
            ("border-color", "transparent")
        ])));
        assert!(has_visual_style(&style(&[("box-shadow", "0 1px 2px #000")])));
        assert!(!has_visual_style(&style(&[("box-shadow", "none")])));
        assert!(has_visual_style(&style(&[
            ("display", "flex"),
            ("width", "40px"),
            ("height", "40px")
        ])));
        assert!(!has_visual_style(&style(&[
            ("display", "flex"),
            ("width", "auto"),
            ("height", "40px")
        ])));
    }

    fn panel(doc: &mut Document, parent: NodeId, rect: Rect) -> NodeId {
        let id = doc.append_element(parent, Tag::Div);
        doc.set_rect(id, rect);
        doc.set_style(id, "background-color", "#ffffff");
        id
    }

    #[test]
    fn overlapping_panels_first_wins_unless_forced() {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let a = panel(&mut doc, root, Rect::new(0.0, 0.0, 500.0, 300.0));
        let b = panel(&mut doc, root, Rect::new(400.0, 100.0, 500.0, 300.0));
        let c = panel(&mut doc, root, Rect::new(100.0, 100.0, 100.0, 100.0));
        doc.set_attr(c, "class", "pdfppt-ppt-group-root");

        let table = ElementTable::build(&doc, root, UnitScale::IDENTITY);
        let groups = detect_panels(&doc, &table, None);
        let nodes: Vec<NodeId> = groups.iter().map(|g| g.background.node).collect();
        assert_eq!(nodes, vec![a, c]);
        assert!(!nodes.contains(&b));
        assert!(groups[1].forced);
    }

    #[test]
    fn forced_descendants_and_skips_are_excluded() {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let forced = doc.append_element(root, Tag::Div);
        doc.set_rect(forced, Rect::new(0.0, 0.0, 1000.0, 400.0));
        doc.set_attr(forced, "data-ppt-full-slide", "");
        let inner = panel(&mut doc, forced, Rect::new(0.0, 0.0, 100.0, 100.0));
        let skipped = panel(&mut doc, root, Rect::new(0.0, 500.0, 100.0, 100.0));
        doc.set_attr(skipped, "data-ppt-skip", "");
        let hidden = panel(&mut doc, root, Rect::new(0.0, 700.0, 100.0, 100.0));
        doc.set_attr(hidden, "class", "pdfppt-noprint");

        let table = ElementTable::build(&doc, root, UnitScale::IDENTITY);
        let groups = detect_panels(&doc, &table, None);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].background.node, forced);
        assert!(groups[0].full_slide);
        assert!(!groups.iter().any(|g| g.background.node == inner));
    }

    #[test]
    fn excluded_wrapper_is_not_a_panel() {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        doc.set_rect(root, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let wrapper = panel(&mut doc, root, Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let card = panel(&mut doc, wrapper, Rect::new(10.0, 10.0, 100.0, 100.0));
        let table = ElementTable::build(&doc, root, UnitScale::IDENTITY);

        let groups = detect_panels(&doc, &table, Some(wrapper));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].background.node, card);
    }

    #[test]
    fn common_ancestor_walks_up() {
        let mut doc = Document::new(Tag::Div);
        let root = doc.root();
        let a = doc.append_element(root, Tag::Div);
        let a1 = doc.append_element(a, Tag::Span);
        let a2 = doc.append_element(a, Tag::Span);
        let b = doc.append_element(root, Tag::Div);
        assert_eq!(common_ancestor(&doc, &[a1, a2]), Some(a));
        assert_eq!(common_ancestor(&doc, &[a1, b]), Some(root));
        assert_eq!(common_ancestor(&doc, &[]), None);
        assert_eq!(common_ancestor(&doc, &[a1]), Some(a));
    }
}
