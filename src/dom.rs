//! Document model – an arena of element and text nodes.
//!
//! Every element carries the three things the exporters read from a rendered
//! page: its attributes, its computed style and its border box in CSS
//! pixels. Documents are built by the HTML parser in this module, by the
//! snapshot loader in [`crate::snapshot`], or directly through the builder
//! methods on [`Document`].
//!
//! The HTML parser handles a controlled subset: block and inline elements,
//! void elements (`img`, `br`, ...), attributes with or without quotes,
//! comments, doctype, and raw-text `<style>` / `<script>` bodies.

use std::collections::HashMap;

use crate::geometry::Rect;
use crate::style::ComputedStyle;

/// Index of a node inside its [`Document`].
pub type NodeId = usize;

// ---------------------------------------------------------------------------
// DOM types
// ---------------------------------------------------------------------------

/// The tag name of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    P,
    H1,
    H2,
    H3,
    H4,
    Ul,
    Ol,
    Li,
    Table,
    Tr,
    Td,
    Th,
    Span,
    Strong,
    Em,
    A,
    Label,
    Button,
    Img,
    Br,
    Section,
    Header,
    Footer,
    Main,
    Canvas,
    Svg,
    Style,
    Script,
    Body,
    Html,
    Head,
    /// Catch-all for unknown tags – laid out like a `div`.
    Unknown(String),
}

impl Tag {
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "div" => Tag::Div,
            "p" => Tag::P,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "table" => Tag::Table,
            "tr" => Tag::Tr,
            "td" => Tag::Td,
            "th" => Tag::Th,
            "span" => Tag::Span,
            "strong" | "b" => Tag::Strong,
            "em" | "i" => Tag::Em,
            "a" => Tag::A,
            "label" => Tag::Label,
            "button" => Tag::Button,
            "img" => Tag::Img,
            "br" => Tag::Br,
            "section" | "article" | "aside" | "nav" => Tag::Section,
            "header" => Tag::Header,
            "footer" => Tag::Footer,
            "main" => Tag::Main,
            "canvas" => Tag::Canvas,
            "svg" => Tag::Svg,
            "style" => Tag::Style,
            "script" => Tag::Script,
            "body" => Tag::Body,
            "html" => Tag::Html,
            "head" => Tag::Head,
            other => Tag::Unknown(other.to_string()),
        }
    }

    /// Lowercase tag name.
    pub fn name(&self) -> &str {
        match self {
            Tag::Div => "div",
            Tag::P => "p",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Table => "table",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Th => "th",
            Tag::Span => "span",
            Tag::Strong => "strong",
            Tag::Em => "em",
            Tag::A => "a",
            Tag::Label => "label",
            Tag::Button => "button",
            Tag::Img => "img",
            Tag::Br => "br",
            Tag::Section => "section",
            Tag::Header => "header",
            Tag::Footer => "footer",
            Tag::Main => "main",
            Tag::Canvas => "canvas",
            Tag::Svg => "svg",
            Tag::Style => "style",
            Tag::Script => "script",
            Tag::Body => "body",
            Tag::Html => "html",
            Tag::Head => "head",
            Tag::Unknown(name) => name,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Tag::Span | Tag::Strong | Tag::Em | Tag::A | Tag::Label | Tag::Br
        )
    }

    /// Elements without children or a closing tag.
    pub fn is_void(&self) -> bool {
        matches!(self, Tag::Img | Tag::Br)
            || matches!(self, Tag::Unknown(n) if matches!(n.as_str(), "hr" | "input" | "meta" | "link"))
    }

    /// Elements whose body is raw text rather than markup.
    pub fn is_raw_text(&self) -> bool {
        matches!(self, Tag::Style | Tag::Script)
    }

    /// Elements that never produce a box.
    pub fn is_metadata(&self) -> bool {
        matches!(self, Tag::Style | Tag::Script | Tag::Head)
    }
}

/// A node in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

/// An element's tag, attributes, computed style and border box.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: Tag,
    pub attributes: HashMap<String, String>,
    pub style: ComputedStyle,
    /// Border box in CSS pixels, in the document's coordinate space.
    pub rect: Rect,
    /// Full content width when it exceeds the box (`scrollWidth`).
    pub scroll_width: Option<f32>,
}

impl ElementData {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: HashMap::new(),
            style: ComputedStyle::default(),
            rect: Rect::ZERO,
            scroll_width: None,
        }
    }

    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }

    pub fn inline_style(&self) -> Option<&str> {
        self.attributes.get("style").map(|s| s.as_str())
    }

    pub fn src(&self) -> Option<&str> {
        self.attributes.get("src").map(|s| s.as_str())
    }
}

/// Arena-backed document. Node 0 is always the root element.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    /// Viewport width of the last [`compute_layout`](crate::layout::compute_layout)
    /// run. `None` when the boxes were recorded by a browser.
    layout_width: Option<f32>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Tag::Body)
    }
}

impl Document {
    /// Create a document holding a single root element.
    pub fn new(root_tag: Tag) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element(ElementData::new(root_tag)),
            }],
            layout_width: None,
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// The dashboard element: the root's only element child, or the root
    /// itself when it wraps several siblings.
    pub fn content_root(&self) -> NodeId {
        let kids = self.element_children(self.root());
        let visible: Vec<NodeId> = kids
            .into_iter()
            .filter(|&id| self.tag(id).is_some_and(|t| !t.is_metadata()))
            .collect();
        match visible.as_slice() {
            [only] => *only,
            _ => self.root(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- construction -------------------------------------------------------

    pub fn append_element(&mut self, parent: NodeId, tag: Tag) -> NodeId {
        self.push(parent, NodeData::Element(ElementData::new(tag)))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeData::Text(text.to_string()))
    }

    fn push(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            data,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Detach a node from its parent. The node stays in the arena but is no
    /// longer reachable from the root.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) {
            self.nodes[parent].children.retain(|&c| c != id);
            self.nodes[id].parent = None;
        }
    }

    /// Detach every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let kids = std::mem::take(&mut self.nodes[id].children);
        for kid in kids {
            self.nodes[kid].parent = None;
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_style(&mut self, id: NodeId, prop: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.style.set(prop, value);
        }
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(e) = self.element_mut(id) {
            e.rect = rect;
        }
    }

    pub fn layout_width(&self) -> Option<f32> {
        self.layout_width
    }

    pub fn set_layout_width(&mut self, width: f32) {
        self.layout_width = Some(width);
    }

    // -- access -------------------------------------------------------------

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.nodes.get(id)?.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id)?.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn tag(&self, id: NodeId) -> Option<&Tag> {
        self.element(id).map(|e| &e.tag)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    /// All element descendants of `id` in pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if !self.is_element(next) {
                continue;
            }
            out.push(next);
            stack.extend(self.nodes[next].children.iter().rev().copied());
        }
        out
    }

    /// `true` when `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .and_then(|e| e.attributes.get(name))
            .map(|s| s.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Nearest inclusive ancestor carrying `class`.
    pub fn closest_with_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(n) = current {
            if self.has_class(n, class) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// Computed value of `prop`, or `""` when unset.
    pub fn style_value(&self, id: NodeId, prop: &str) -> &str {
        self.element(id).map(|e| e.style.get(prop)).unwrap_or("")
    }

    /// Border box of an element; text nodes report an empty box.
    pub fn rect(&self, id: NodeId) -> Rect {
        self.element(id).map(|e| e.rect).unwrap_or(Rect::ZERO)
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out, false);
        out
    }

    /// Rendered text: skips hidden and metadata subtrees and collapses runs
    /// of whitespace to one space.
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut raw = String::new();
        self.collect_text(id, &mut raw, true);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn collect_text(&self, id: NodeId, out: &mut String, rendered_only: bool) {
        match &self.nodes[id].data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element(e) => {
                if rendered_only && (e.tag.is_metadata() || e.style.get("display") == "none") {
                    return;
                }
                if e.tag == Tag::Br {
                    out.push('\n');
                }
                for &child in &self.nodes[id].children {
                    self.collect_text(child, out, rendered_only);
                    if rendered_only
                        && self.tag(child).is_some_and(|t| !t.is_inline())
                        && !out.ends_with(char::is_whitespace)
                    {
                        out.push(' ');
                    }
                }
            }
        }
    }

    /// Copy the subtree under `root` into a new document, dropping every
    /// element for which `skip` returns `true` (with its subtree).
    pub fn clone_subtree<F>(&self, root: NodeId, skip: F) -> Document
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        let root_data = match &self.nodes[root].data {
            NodeData::Element(e) => e.clone(),
            NodeData::Text(_) => ElementData::new(Tag::Div),
        };
        let mut out = Document {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Element(root_data),
            }],
            layout_width: None,
        };
        self.copy_children(root, 0, &mut out, &skip);
        out
    }

    fn copy_children<F>(&self, from: NodeId, to: NodeId, out: &mut Document, skip: &F)
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        for &child in &self.nodes[from].children {
            if self.is_element(child) && skip(self, child) {
                continue;
            }
            let copied = out.push(to, self.nodes[child].data.clone());
            self.copy_children(child, copied, out, skip);
        }
    }
}

// ---------------------------------------------------------------------------
// Parser – simple recursive descent over HTML
// ---------------------------------------------------------------------------

/// Parse an HTML string into a [`Document`].
///
/// `<html>` and `<body>` wrappers are transparent: their children become
/// children of the document root. `<head>` content is discarded.
pub fn parse_html(html: &str) -> Document {
    let mut doc = Document::new(Tag::Body);
    let mut parser = Parser::new(html);
    let root = doc.root();
    parser.parse_nodes(&mut doc, root);
    doc
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse_nodes(&mut self, doc: &mut Document, parent: NodeId) {
        loop {
            self.skip_whitespace_preserve();
            if self.eof() || self.starts_with("</") {
                break;
            }
            self.parse_node(doc, parent);
        }
    }

    fn parse_node(&mut self, doc: &mut Document, parent: NodeId) {
        if self.starts_with("<!--") {
            self.skip_comment();
            return;
        }
        if self.starts_with("<!") || self.starts_with("<?") {
            // Skip doctype / processing instructions
            while !self.eof() && !self.starts_with(">") {
                self.advance(1);
            }
            if !self.eof() {
                self.advance(1);
            }
            return;
        }
        if self.starts_with("<") {
            self.parse_element(doc, parent);
        } else {
            self.parse_text(doc, parent);
        }
    }

    fn parse_text(&mut self, doc: &mut Document, parent: NodeId) {
        let start = self.pos;
        while !self.eof() && !self.starts_with("<") {
            self.advance(1);
        }
        let text = decode_entities(&self.input[start..self.pos]);
        doc.append_text(parent, &text);
    }

    fn parse_element(&mut self, doc: &mut Document, parent: NodeId) {
        // Consume '<'
        self.advance(1);
        let tag_name = self.parse_tag_name();
        let tag = Tag::from_str(&tag_name);

        let mut attributes = HashMap::new();
        loop {
            self.skip_whitespace();
            if self.eof() || self.starts_with(">") || self.starts_with("/>") {
                break;
            }
            let (key, value) = self.parse_attribute();
            if key.is_empty() {
                // Stray character inside the tag; skip it.
                self.advance(1);
                continue;
            }
            attributes.insert(key.to_ascii_lowercase(), value);
        }

        let explicit_close = self.starts_with("/>");
        if explicit_close {
            self.advance(2);
        } else if self.starts_with(">") {
            self.advance(1);
        }

        // <html>/<body> wrappers are transparent, <head> is dropped.
        let target = match tag {
            Tag::Html | Tag::Body => {
                if let Some(root) = doc.element_mut(parent) {
                    for (k, v) in attributes {
                        root.attributes.entry(k).or_insert(v);
                    }
                }
                parent
            }
            Tag::Head => {
                let scratch = doc.append_element(parent, Tag::Head);
                doc.detach(scratch);
                scratch
            }
            _ => {
                let id = doc.append_element(parent, tag.clone());
                if let Some(e) = doc.element_mut(id) {
                    e.attributes = attributes;
                }
                id
            }
        };

        if explicit_close || tag.is_void() {
            return;
        }

        if tag.is_raw_text() {
            let close = format!("</{}", tag.name());
            let start = self.pos;
            while !self.eof() && !self.starts_with_ignore_case(&close) {
                self.advance(1);
            }
            let body = &self.input[start..self.pos];
            if !body.trim().is_empty() {
                doc.append_text(target, body);
            }
        } else {
            self.parse_nodes(doc, target);
        }

        // Consume closing tag
        if self.starts_with("</") {
            self.advance(2);
            self.parse_tag_name();
            self.skip_whitespace();
            if self.starts_with(">") {
                self.advance(1);
            }
        }
    }

    fn parse_tag_name(&mut self) -> String {
        let start = self.pos;
        while !self.eof() {
            let c = self.current_char();
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ':' {
                self.advance(1);
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    fn parse_attribute(&mut self) -> (String, String) {
        let key = self.parse_tag_name();
        self.skip_whitespace();
        if !self.starts_with("=") {
            return (key, String::new());
        }
        self.advance(1); // skip '='
        self.skip_whitespace();
        let value = self.parse_attr_value();
        (key, value)
    }

    fn parse_attr_value(&mut self) -> String {
        for quote in ["\"", "'"] {
            if self.starts_with(quote) {
                self.advance(1);
                let start = self.pos;
                while !self.eof() && !self.starts_with(quote) {
                    self.advance(1);
                }
                let val = self.input[start..self.pos].to_string();
                if !self.eof() {
                    self.advance(1);
                }
                return decode_entities(&val);
            }
        }
        let start = self.pos;
        while !self.eof() {
            let c = self.current_char();
            if c.is_whitespace() || c == '>' {
                break;
            }
            if c == '/' && self.input[self.pos..].starts_with("/>") {
                break;
            }
            self.advance(1);
        }
        self.input[start..self.pos].to_string()
    }

    fn skip_whitespace(&mut self) {
        while !self.eof() && self.current_char().is_whitespace() {
            self.advance(1);
        }
    }

    fn skip_whitespace_preserve(&mut self) {
        // Skip runs of pure whitespace between elements.
        let saved = self.pos;
        while !self.eof() && self.current_char().is_whitespace() {
            self.advance(1);
        }
        // If we reached a tag or EOF, keep the skip. Otherwise revert.
        if !self.eof() && !self.starts_with("<") {
            self.pos = saved;
        }
    }

    fn skip_comment(&mut self) {
        self.advance(4); // skip <!--
        while !self.eof() && !self.starts_with("-->") {
            self.advance(1);
        }
        if !self.eof() {
            self.advance(3);
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn starts_with_ignore_case(&self, s: &str) -> bool {
        self.input
            .get(self.pos..self.pos + s.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(s))
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_char(&self) -> char {
        self.input[self.pos..].chars().next().unwrap_or('\0')
    }

    fn advance(&mut self, n: usize) {
        // Advance by `n` characters (not bytes).
        for _ in 0..n {
            if let Some(c) = self.input[self.pos..].chars().next() {
                self.pos += c.len_utf8();
            }
        }
    }
}

fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{00A0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_div() {
        let doc = parse_html(r#"<div class="flex p-4"><p>Hello</p></div>"#);
        let kids = doc.element_children(doc.root());
        assert_eq!(kids.len(), 1);
        let div = doc.element(kids[0]).unwrap();
        assert_eq!(div.tag, Tag::Div);
        assert_eq!(div.classes(), vec!["flex", "p-4"]);
        assert_eq!(doc.element_children(kids[0]).len(), 1);
        assert_eq!(doc.content_root(), kids[0]);
    }

    #[test]
    fn body_and_head_are_unwrapped() {
        let doc = parse_html(
            "<!DOCTYPE html><html><head><title>x</title></head><body><div>A</div><div>B</div></body></html>",
        );
        let kids = doc.element_children(doc.root());
        assert_eq!(kids.len(), 2);
        assert_eq!(doc.content_root(), doc.root());
        assert_eq!(doc.inner_text(doc.root()), "A B");
    }

    #[test]
    fn self_closing_and_void_elements() {
        let doc = parse_html(r#"<div><img src="logo.png"><br><span>x</span></div>"#);
        let div = doc.content_root();
        let kids = doc.element_children(div);
        assert_eq!(kids.len(), 3);
        assert_eq!(doc.element(kids[0]).unwrap().src(), Some("logo.png"));
        assert_eq!(doc.tag(kids[2]), Some(&Tag::Span));
    }

    #[test]
    fn attribute_json_survives_quoting() {
        let doc = parse_html(
            r#"<div data-chart='{"chartType":"bar","labels":["A"],"values":[1]}'></div>"#,
        );
        let div = doc.content_root();
        assert_eq!(
            doc.attr(div, "data-chart"),
            Some(r#"{"chartType":"bar","labels":["A"],"values":[1]}"#)
        );
    }

    #[test]
    fn style_body_is_raw_text() {
        let doc = parse_html("<div><style>.a > b { color: red; }</style><p>Hi</p></div>");
        let div = doc.content_root();
        let kids = doc.element_children(div);
        assert_eq!(doc.tag(kids[0]), Some(&Tag::Style));
        assert_eq!(doc.tag(kids[1]), Some(&Tag::P));
        assert_eq!(doc.inner_text(div), "Hi");
        assert!(doc.text_content(div).contains("color: red"));
    }

    #[test]
    fn descendants_are_preorder() {
        let doc = parse_html("<div id=a><div id=b><span id=c>x</span></div><p id=d>y</p></div>");
        let order: Vec<&str> = doc
            .descendants(doc.root())
            .into_iter()
            .filter_map(|id| doc.attr(id, "id"))
            .collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn contains_and_closest() {
        let doc = parse_html(r#"<div class="pdfppt-noprint"><p><span>x</span></p></div>"#);
        let div = doc.content_root();
        let span = *doc.descendants(div).last().unwrap();
        assert!(doc.contains(div, span));
        assert!(!doc.contains(span, div));
        assert_eq!(doc.closest_with_class(span, "pdfppt-noprint"), Some(div));
    }

    #[test]
    fn clone_subtree_skips_marked_elements() {
        let doc = parse_html(r#"<div><p>keep</p><p class="pdfppt-noprint">drop</p></div>"#);
        let clone = doc.clone_subtree(doc.content_root(), |d, id| {
            d.has_class(id, "pdfppt-noprint")
        });
        assert_eq!(clone.inner_text(clone.root()), "keep");
        assert_eq!(clone.element_children(clone.root()).len(), 1);
    }

    #[test]
    fn entities_are_decoded() {
        let doc = parse_html("<p>Fish &amp; Chips &lt;3</p>");
        assert_eq!(doc.inner_text(doc.root()), "Fish & Chips <3");
    }
}
