//! DOM snapshots – a JSON serialisation of a rendered page.
//!
//! A snapshot is what a browser-side collector records for every element:
//! tag, attributes, border box, computed style and children. Text children
//! are plain JSON strings.
//!
//! ```json
//! {
//!   "tag": "div",
//!   "attrs": { "class": "card" },
//!   "rect": { "x": 0, "y": 0, "width": 320, "height": 120 },
//!   "style": { "background-color": "rgb(255, 255, 255)", "display": "block" },
//!   "scrollWidth": 320,
//!   "children": ["Revenue", { "tag": "span", "children": ["42"] }]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeData, NodeId, Tag};
use crate::error::{ExportError, Result};
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SnapshotRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One element of a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotElement {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub rect: SnapshotRect,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(
        default,
        rename = "scrollWidth",
        skip_serializing_if = "Option::is_none"
    )]
    pub scroll_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotChild>,
}

/// A child is either a text run or a nested element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotChild {
    Text(String),
    Element(SnapshotElement),
}

/// Parse a snapshot JSON document into a [`Document`].
pub fn load_snapshot(json: &str) -> Result<Document> {
    let root: SnapshotElement = serde_json::from_str(json)?;
    if root.tag.trim().is_empty() {
        return Err(ExportError::Snapshot("root element has no tag".into()));
    }
    Ok(to_document(&root))
}

/// Build a [`Document`] whose root is the snapshot's root element.
pub fn to_document(root: &SnapshotElement) -> Document {
    let mut doc = Document::new(Tag::from_str(&root.tag));
    let id = doc.root();
    fill_element(&mut doc, id, root);
    doc
}

fn fill_element(doc: &mut Document, id: NodeId, snap: &SnapshotElement) {
    if let Some(e) = doc.element_mut(id) {
        for (k, v) in &snap.attrs {
            e.attributes.insert(k.to_ascii_lowercase(), v.clone());
        }
        for (k, v) in &snap.style {
            e.style.set(k, v);
        }
        e.rect = Rect::new(snap.rect.x, snap.rect.y, snap.rect.width, snap.rect.height);
        e.scroll_width = snap.scroll_width;
    }
    for child in &snap.children {
        match child {
            SnapshotChild::Text(text) => {
                doc.append_text(id, text);
            }
            SnapshotChild::Element(el) => {
                let child_id = doc.append_element(id, Tag::from_str(&el.tag));
                fill_element(doc, child_id, el);
            }
        }
    }
}

/// Record the subtree under `id` as a snapshot.
pub fn from_document(doc: &Document, id: NodeId) -> Option<SnapshotElement> {
    let e = doc.element(id)?;
    let children = doc
        .children(id)
        .iter()
        .filter_map(|&c| match &doc.node(c).data {
            NodeData::Text(t) => Some(SnapshotChild::Text(t.clone())),
            NodeData::Element(_) => from_document(doc, c).map(SnapshotChild::Element),
        })
        .collect();
    Some(SnapshotElement {
        tag: e.tag.name().to_string(),
        attrs: e
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        rect: SnapshotRect {
            x: e.rect.x,
            y: e.rect.y,
            width: e.rect.w,
            height: e.rect.h,
        },
        style: e
            .style
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        scroll_width: e.scroll_width,
        children,
    })
}

/// Serialise a document as pretty-printed snapshot JSON.
pub fn to_json(doc: &Document) -> Result<String> {
    let snap = from_document(doc, doc.root())
        .ok_or_else(|| ExportError::Snapshot("document root is not an element".into()))?;
    Ok(serde_json::to_string_pretty(&snap)?)
}
