//! Text deduplication: one element per visible string.
//!
//! Nested markup like `<div><span>Label</span></div>` reports "Label" for
//! both elements. Each string is resolved to the deepest element that holds
//! it without a descendant holding exactly the same text.

use std::collections::HashSet;

use crate::dom::{Document, NodeId};
use crate::extract::ElementTable;
use crate::markers;

/// The first element at or after document position `from` whose text
/// contains `text` and none of whose descendants carries exactly `text`.
pub fn lowest_unique_element(
    doc: &Document,
    table: &ElementTable,
    text: &str,
    from: usize,
) -> Option<NodeId> {
    let wanted = text.trim();
    table
        .iter()
        .skip(from)
        .map(|info| info.node)
        .filter(|&id| doc.text_content(id).contains(text))
        .find(|&id| {
            !doc
                .descendants(id)
                .into_iter()
                .any(|child| doc.text_content(child).trim() == wanted)
        })
}

/// Deduplicated text elements in document order.
pub fn renderable_text_nodes(doc: &Document, table: &ElementTable) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut rendered: HashSet<NodeId> = HashSet::new();

    for (position, info) in table.iter().enumerate() {
        if markers::is_noprint(doc, info.node) {
            continue;
        }
        if info.text.is_empty() || rendered.contains(&info.node) {
            continue;
        }
        if let Some(target) = lowest_unique_element(doc, table, &info.text, position) {
            if rendered.insert(target) {
                out.push(target);
            }
        }
    }

    log::debug!("Resolved {} unique text elements", out.len());
    out
}
