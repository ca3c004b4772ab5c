//! Assignment of texts, shapes and charts to the panel that fully contains
//! them. The first containing panel in document order wins, so no element
//! lands in two groups.

use crate::dom::{Document, NodeId};
use crate::extract::{ElementInfo, ElementTable};
use crate::markers;
use crate::panels::{has_visual_style, Group};

fn containing_group<'g>(groups: &'g mut [Group], info: &ElementInfo) -> Option<&'g mut Group> {
    groups
        .iter_mut()
        .find(|g| info.rect.is_inside(&g.background.rect))
}

/// Attach every non-empty text element to its panel.
pub fn assign_texts(table: &ElementTable, text_nodes: &[NodeId], groups: &mut [Group]) {
    for &id in text_nodes {
        let Some(info) = table.get(id) else {
            continue;
        };
        if info.text.trim().is_empty() {
            continue;
        }
        if let Some(group) = containing_group(groups, info) {
            group.texts.push(info.clone());
        }
    }
}

/// Attach visually styled elements that are neither a panel background nor
/// already a text of that panel.
pub fn assign_shapes(doc: &Document, table: &ElementTable, groups: &mut [Group]) {
    for info in table.iter() {
        let id = info.node;
        if markers::is_noprint(doc, id) || markers::is_skipped(doc, id) {
            continue;
        }
        let Some(element) = doc.element(id) else {
            continue;
        };
        if !has_visual_style(&element.style) {
            continue;
        }
        let Some(group) = containing_group(groups, info) else {
            continue;
        };
        if group.background.node == id || group.texts.iter().any(|t| t.node == id) {
            continue;
        }
        group.shapes.push(info.clone());
    }
}

/// Attach chart placeholders (elements carrying a JSON chart descriptor).
pub fn assign_charts(doc: &Document, table: &ElementTable, groups: &mut [Group]) {
    for info in table.iter() {
        let id = info.node;
        if markers::is_noprint(doc, id) || markers::chart_attr(doc, id).is_none() {
            continue;
        }
        if let Some(group) = containing_group(groups, info) {
            group.charts.push(info.clone());
        }
    }
}

/// Run all three assignments.
pub fn assign_all(doc: &Document, table: &ElementTable, text_nodes: &[NodeId], groups: &mut [Group]) {
    assign_texts(table, text_nodes, groups);
    assign_shapes(doc, table, groups);
    assign_charts(doc, table, groups);
    for (i, g) in groups.iter().enumerate() {
        log::debug!(
            "Group {i} ({}): {} texts, {} shapes, {} charts",
            g.background.uid,
            g.texts.len(),
            g.shapes.len(),
            g.charts.len()
        );
    }
}
