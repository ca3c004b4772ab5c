//! Style resolver – computes a `getComputedStyle`-like property map for every
//! element of a parsed HTML document.
//!
//! Sources, lowest to highest precedence: tag defaults, inherited text
//! properties, Tailwind-like utility classes, the inline `style` attribute.
//! Values stay CSS strings (`"16px"`, `"#3b82f6"`, `"flex"`) so documents
//! built here look exactly like DOM snapshots taken from a browser.

use std::collections::BTreeMap;

use crate::dom::{Document, NodeId, Tag};

/// Resolved CSS property map for one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    props: BTreeMap<String, String>,
}

impl ComputedStyle {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut s = Self::default();
        for (k, v) in pairs {
            s.set(k, v);
        }
        s
    }

    /// Value of `prop`, or `""` when unset.
    pub fn get(&self, prop: &str) -> &str {
        self.props.get(prop).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn set(&mut self, prop: &str, value: &str) {
        self.props.insert(prop.to_string(), value.trim().to_string());
    }

    pub fn contains(&self, prop: &str) -> bool {
        self.props.contains_key(prop)
    }

    /// Numeric value of `prop` with unit letters stripped; 0 when absent.
    pub fn px(&self, prop: &str) -> f32 {
        parse_float_val(self.get(prop))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Strip ASCII letters and parse the leading number, `0.0` when there is
/// none. `"12.5px"` → 12.5, `"1px 2px"` → 1, `"auto"` → 0.
pub fn parse_float_val(value: &str) -> f32 {
    let cleaned: String = value.chars().filter(|c| !c.is_ascii_alphabetic()).collect();
    leading_number(cleaned.trim_start()).unwrap_or(0.0)
}

/// Parse the longest numeric prefix (`[+-]?digits[.digits]`).
pub fn leading_number(s: &str) -> Option<f32> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || (end == digits_start + 1 && bytes[digits_start] == b'.') {
        return None;
    }
    s[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Property tables
// ---------------------------------------------------------------------------

/// Properties a child inherits from its parent.
const INHERITED: &[&str] = &[
    "color",
    "font-size",
    "font-weight",
    "font-family",
    "font-style",
    "text-align",
    "line-height",
    "white-space",
];

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Initial values for every property the exporters read.
fn initial_values() -> Vec<(&'static str, &'static str)> {
    vec![
        ("display", "block"),
        ("flex-direction", "row"),
        ("flex-wrap", "nowrap"),
        ("flex-grow", "0"),
        ("flex-shrink", "1"),
        ("justify-content", "normal"),
        ("align-items", "normal"),
        ("gap", "0px"),
        ("width", "auto"),
        ("height", "auto"),
        ("min-width", "auto"),
        ("max-width", "none"),
        ("margin-top", "0px"),
        ("margin-right", "0px"),
        ("margin-bottom", "0px"),
        ("margin-left", "0px"),
        ("padding-top", "0px"),
        ("padding-right", "0px"),
        ("padding-bottom", "0px"),
        ("padding-left", "0px"),
        ("border-top-width", "0px"),
        ("border-right-width", "0px"),
        ("border-bottom-width", "0px"),
        ("border-left-width", "0px"),
        ("border-top-style", "none"),
        ("border-right-style", "none"),
        ("border-bottom-style", "none"),
        ("border-left-style", "none"),
        ("border-top-color", "currentcolor"),
        ("border-right-color", "currentcolor"),
        ("border-bottom-color", "currentcolor"),
        ("border-left-color", "currentcolor"),
        ("border-radius", "0px"),
        ("outline-width", "0px"),
        ("outline-style", "none"),
        ("outline-color", "currentcolor"),
        ("background-color", "rgba(0, 0, 0, 0)"),
        ("box-shadow", "none"),
        ("color", "rgb(0, 0, 0)"),
        ("font-size", "16px"),
        ("font-weight", "400"),
        ("font-family", "Helvetica"),
        ("font-style", "normal"),
        ("text-align", "start"),
        ("line-height", "normal"),
        ("white-space", "normal"),
    ]
}

/// Default declarations based on tag semantics.
fn tag_defaults(tag: &Tag) -> Vec<(&'static str, &'static str)> {
    match tag {
        Tag::H1 => vec![
            ("font-size", "32px"),
            ("font-weight", "700"),
            ("margin-top", "16px"),
            ("margin-bottom", "12px"),
        ],
        Tag::H2 => vec![
            ("font-size", "24px"),
            ("font-weight", "700"),
            ("margin-top", "14px"),
            ("margin-bottom", "10px"),
        ],
        Tag::H3 => vec![
            ("font-size", "20px"),
            ("font-weight", "700"),
            ("margin-top", "12px"),
            ("margin-bottom", "8px"),
        ],
        Tag::H4 => vec![
            ("font-size", "16px"),
            ("font-weight", "700"),
            ("margin-top", "10px"),
            ("margin-bottom", "6px"),
        ],
        Tag::P => vec![("margin-bottom", "10px")],
        Tag::Ul | Tag::Ol => vec![("margin-bottom", "10px"), ("padding-left", "24px")],
        Tag::Li => vec![("display", "list-item"), ("margin-bottom", "4px")],
        Tag::Table => vec![("display", "table")],
        Tag::Tr => vec![("display", "table-row")],
        Tag::Td => vec![
            ("display", "table-cell"),
            ("padding-top", "4px"),
            ("padding-right", "8px"),
            ("padding-bottom", "4px"),
            ("padding-left", "8px"),
        ],
        Tag::Th => vec![
            ("display", "table-cell"),
            ("padding-top", "4px"),
            ("padding-right", "8px"),
            ("padding-bottom", "4px"),
            ("padding-left", "8px"),
            ("font-weight", "700"),
        ],
        Tag::Span | Tag::A | Tag::Label | Tag::Br => vec![("display", "inline")],
        Tag::Strong => vec![("display", "inline"), ("font-weight", "700")],
        Tag::Em => vec![("display", "inline"), ("font-style", "italic")],
        Tag::Img | Tag::Canvas | Tag::Svg => vec![("display", "inline-block")],
        Tag::Button => vec![
            ("display", "inline-block"),
            ("padding-top", "4px"),
            ("padding-right", "8px"),
            ("padding-bottom", "4px"),
            ("padding-left", "8px"),
        ],
        Tag::Style | Tag::Script | Tag::Head => vec![("display", "none")],
        _ => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Style resolution
// ---------------------------------------------------------------------------

/// Compute the style of every element reachable from the document root.
pub fn resolve_document(doc: &mut Document) {
    let root = doc.root();
    resolve_subtree(doc, root, None);
}

fn resolve_subtree(doc: &mut Document, id: NodeId, parent: Option<&ComputedStyle>) {
    let Some(element) = doc.element(id) else {
        return;
    };
    let style = resolve_element(
        &element.tag,
        &element.classes(),
        element.inline_style(),
        parent,
    );
    for child in doc.element_children(id) {
        resolve_subtree(doc, child, Some(&style));
    }
    if let Some(e) = doc.element_mut(id) {
        e.style = style;
    }
}

/// Resolve the style for one element, inheriting text properties from its
/// parent.
pub fn resolve_element(
    tag: &Tag,
    classes: &[&str],
    inline: Option<&str>,
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let mut style = ComputedStyle::default();
    for (k, v) in initial_values() {
        style.set(k, v);
    }

    if let Some(p) = parent {
        for prop in INHERITED {
            if p.contains(prop) {
                style.set(prop, p.get(prop));
            }
        }
    }

    for (k, v) in tag_defaults(tag) {
        style.set(k, v);
    }

    for class in classes {
        for (prop, value) in utility_class(class) {
            apply_declaration(&mut style, &prop, &value);
        }
    }

    if let Some(inline) = inline {
        for (prop, value) in parse_declarations(inline) {
            apply_declaration(&mut style, &prop, &value);
        }
    }

    finalize(&mut style);
    style
}

/// Split a declaration block into `(property, value)` pairs. Semicolons
/// inside parentheses (`url(data:...;base64,...)`) do not end a declaration.
pub fn parse_declarations(block: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let bytes = block.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b';' if depth <= 0 => {
                push_declaration(&block[start..i], &mut out);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_declaration(&block[start..], &mut out);
    out
}

fn push_declaration(decl: &str, out: &mut Vec<(String, String)>) {
    let Some((prop, value)) = decl.split_once(':') else {
        return;
    };
    let prop = prop.trim().to_ascii_lowercase();
    let value = value.trim().trim_end_matches("!important").trim();
    if !prop.is_empty() && !value.is_empty() {
        out.push((prop, value.to_string()));
    }
}

/// Apply one declaration, expanding the shorthands the resolver understands.
pub fn apply_declaration(s: &mut ComputedStyle, prop: &str, value: &str) {
    match prop {
        "margin" | "padding" => {
            let parts: Vec<&str> = value.split_whitespace().collect();
            if let Some(sides) = expand_sides(&parts) {
                for (side, v) in SIDES.iter().zip(sides) {
                    s.set(&format!("{prop}-{side}"), v);
                }
            }
        }
        "border-width" | "border-style" => {
            let suffix = prop.trim_start_matches("border-");
            let parts: Vec<&str> = value.split_whitespace().collect();
            if let Some(sides) = expand_sides(&parts) {
                for (side, v) in SIDES.iter().zip(sides) {
                    s.set(&format!("border-{side}-{suffix}"), v);
                }
            }
        }
        "border-color" => {
            for side in SIDES {
                s.set(&format!("border-{side}-color"), value);
            }
        }
        "border" => {
            for side in SIDES {
                apply_border_side(s, side, value);
            }
        }
        "border-top" | "border-right" | "border-bottom" | "border-left" => {
            let side = prop.trim_start_matches("border-");
            apply_border_side(s, side, value);
        }
        "outline" => {
            let (width, style, color) = split_border_value(value);
            if let Some(w) = width {
                s.set("outline-width", &w);
            }
            if let Some(st) = style {
                s.set("outline-style", &st);
            }
            if let Some(c) = color {
                s.set("outline-color", &c);
            }
        }
        "background" => {
            if crate::color::to_hex(value) != crate::color::TRANSPARENT
                || value.trim().eq_ignore_ascii_case("transparent")
            {
                s.set("background-color", value);
            }
        }
        "flex" => {
            let parts: Vec<&str> = value.split_whitespace().collect();
            match parts.as_slice() {
                ["none"] => {
                    s.set("flex-grow", "0");
                    s.set("flex-shrink", "0");
                }
                ["auto"] => {
                    s.set("flex-grow", "1");
                    s.set("flex-shrink", "1");
                }
                [grow, rest @ ..] => {
                    s.set("flex-grow", grow);
                    s.set("flex-shrink", rest.first().copied().unwrap_or("1"));
                }
                [] => {}
            }
        }
        "font-weight" => {
            let normalized = match value {
                "normal" => "400",
                "bold" | "bolder" => "700",
                "lighter" => "300",
                other => other,
            };
            s.set(prop, normalized);
        }
        _ => s.set(prop, value),
    }
}

fn apply_border_side(s: &mut ComputedStyle, side: &str, value: &str) {
    let (width, style, color) = split_border_value(value);
    s.set(
        &format!("border-{side}-width"),
        width.as_deref().unwrap_or("3px"),
    );
    s.set(
        &format!("border-{side}-style"),
        style.as_deref().unwrap_or("none"),
    );
    s.set(
        &format!("border-{side}-color"),
        color.as_deref().unwrap_or("currentcolor"),
    );
}

/// Split `1px solid rgb(1, 2, 3)` into width, style and color tokens.
fn split_border_value(value: &str) -> (Option<String>, Option<String>, Option<String>) {
    const STYLES: &[&str] = &[
        "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset",
        "outset",
    ];
    let mut width = None;
    let mut style = None;
    let mut color_parts: Vec<&str> = Vec::new();
    for token in tokenize_value(value) {
        if STYLES.contains(&token) {
            style = Some(token.to_string());
        } else if token.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            || matches!(token, "thin" | "medium" | "thick")
        {
            width = Some(match token {
                "thin" => "1px".to_string(),
                "medium" => "3px".to_string(),
                "thick" => "5px".to_string(),
                other => other.to_string(),
            });
        } else {
            color_parts.push(token);
        }
    }
    let color = if color_parts.is_empty() {
        None
    } else {
        Some(color_parts.join(" "))
    };
    (width, style, color)
}

/// Whitespace split that keeps parenthesised groups together.
fn tokenize_value(value: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start: Option<usize> = None;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            c if c.is_whitespace() && depth <= 0 => {
                if let Some(s) = start.take() {
                    out.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(&value[s..]);
    }
    out
}

/// CSS 1–4 value side expansion (top, right, bottom, left).
fn expand_sides<'a>(parts: &[&'a str]) -> Option<[&'a str; 4]> {
    match *parts {
        [a] => Some([a, a, a, a]),
        [a, b] => Some([a, b, a, b]),
        [a, b, c] => Some([a, b, c, b]),
        [a, b, c, d] => Some([a, b, c, d]),
        _ => None,
    }
}

/// Derive computed values the way a browser reports them: borders and
/// outlines without a style have zero width, `currentcolor` resolves to the
/// text color, and the `border-width` / `border-color` summaries are filled.
fn finalize(s: &mut ComputedStyle) {
    let text_color = s.get("color").to_string();

    for side in SIDES {
        let style_key = format!("border-{side}-style");
        let width_key = format!("border-{side}-width");
        let color_key = format!("border-{side}-color");
        if matches!(s.get(&style_key), "none" | "hidden") {
            s.set(&width_key, "0px");
        }
        if s.get(&color_key).eq_ignore_ascii_case("currentcolor") {
            s.set(&color_key, &text_color);
        }
    }
    if matches!(s.get("outline-style"), "none" | "hidden") {
        s.set("outline-width", "0px");
    }
    if s.get("outline-color").eq_ignore_ascii_case("currentcolor") {
        s.set("outline-color", &text_color);
    }

    let widths: Vec<String> = SIDES
        .iter()
        .map(|side| s.get(&format!("border-{side}-width")).to_string())
        .collect();
    let colors: Vec<String> = SIDES
        .iter()
        .map(|side| s.get(&format!("border-{side}-color")).to_string())
        .collect();
    s.set("border-width", &collapse_sides(&widths));
    s.set("border-color", &collapse_sides(&colors));
}

fn collapse_sides(values: &[String]) -> String {
    if values.iter().all(|v| v == &values[0]) {
        values[0].clone()
    } else {
        values.join(" ")
    }
}

// ---------------------------------------------------------------------------
// Utility classes
// ---------------------------------------------------------------------------

/// Tailwind-like palette subset.
const PALETTE: &[(&str, &str)] = &[
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("transparent", "transparent"),
    ("slate-50", "#f8fafc"),
    ("gray-50", "#f9fafb"),
    ("gray-100", "#f3f4f6"),
    ("gray-200", "#e5e7eb"),
    ("gray-300", "#d1d5db"),
    ("gray-500", "#6b7280"),
    ("gray-700", "#374151"),
    ("gray-900", "#111827"),
    ("red-500", "#ef4444"),
    ("red-700", "#b91c1c"),
    ("blue-50", "#eff6ff"),
    ("blue-500", "#3b82f6"),
    ("blue-700", "#1d4ed8"),
    ("green-500", "#22c55e"),
    ("green-700", "#15803d"),
    ("yellow-500", "#eab308"),
    ("amber-500", "#f59e0b"),
    ("indigo-500", "#6366f1"),
];

fn palette(name: &str) -> Option<&'static str> {
    PALETTE.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

fn decl(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Declarations produced by a single utility class.
fn utility_class(class: &str) -> Vec<(String, String)> {
    match class {
        // Display
        "flex" => decl(&[("display", "flex")]),
        "grid" => decl(&[("display", "grid")]),
        "block" => decl(&[("display", "block")]),
        "inline" => decl(&[("display", "inline")]),
        "inline-block" => decl(&[("display", "inline-block")]),
        "hidden" => decl(&[("display", "none")]),

        // Flex
        "flex-row" => decl(&[("flex-direction", "row")]),
        "flex-col" => decl(&[("flex-direction", "column")]),
        "flex-wrap" => decl(&[("flex-wrap", "wrap")]),
        "flex-nowrap" => decl(&[("flex-wrap", "nowrap")]),
        "flex-grow" | "grow" => decl(&[("flex-grow", "1")]),
        "flex-shrink" | "shrink" => decl(&[("flex-shrink", "1")]),
        "shrink-0" => decl(&[("flex-shrink", "0")]),
        "flex-1" => decl(&[("flex-grow", "1"), ("flex-shrink", "1")]),
        "justify-start" => decl(&[("justify-content", "flex-start")]),
        "justify-end" => decl(&[("justify-content", "flex-end")]),
        "justify-center" => decl(&[("justify-content", "center")]),
        "justify-between" => decl(&[("justify-content", "space-between")]),
        "justify-around" => decl(&[("justify-content", "space-around")]),
        "justify-evenly" => decl(&[("justify-content", "space-evenly")]),
        "items-start" => decl(&[("align-items", "flex-start")]),
        "items-end" => decl(&[("align-items", "flex-end")]),
        "items-center" => decl(&[("align-items", "center")]),
        "items-stretch" => decl(&[("align-items", "stretch")]),

        // Typography
        "font-bold" => decl(&[("font-weight", "700")]),
        "font-semibold" => decl(&[("font-weight", "600")]),
        "font-medium" => decl(&[("font-weight", "500")]),
        "font-normal" => decl(&[("font-weight", "400")]),
        "italic" => decl(&[("font-style", "italic")]),
        "not-italic" => decl(&[("font-style", "normal")]),
        "underline" => decl(&[("text-decoration", "underline")]),
        "text-left" => decl(&[("text-align", "left")]),
        "text-center" => decl(&[("text-align", "center")]),
        "text-right" => decl(&[("text-align", "right")]),
        "text-xs" => decl(&[("font-size", "12px")]),
        "text-sm" => decl(&[("font-size", "14px")]),
        "text-base" => decl(&[("font-size", "16px")]),
        "text-lg" => decl(&[("font-size", "18px")]),
        "text-xl" => decl(&[("font-size", "20px")]),
        "text-2xl" => decl(&[("font-size", "24px")]),
        "text-3xl" => decl(&[("font-size", "30px")]),
        "text-4xl" => decl(&[("font-size", "36px")]),
        "whitespace-nowrap" => decl(&[("white-space", "nowrap")]),

        // Width
        "w-full" => decl(&[("width", "100%")]),
        "w-auto" => decl(&[("width", "auto")]),
        "w-1/2" => decl(&[("width", "50%")]),
        "w-1/3" => decl(&[("width", "33.333%")]),
        "w-2/3" => decl(&[("width", "66.666%")]),
        "w-1/4" => decl(&[("width", "25%")]),
        "w-3/4" => decl(&[("width", "75%")]),

        // Borders, corners and shadows
        "border" => decl(&[
            ("border-width", "1px"),
            ("border-style", "solid"),
            ("border-color", "#e5e7eb"),
        ]),
        "border-2" => decl(&[
            ("border-width", "2px"),
            ("border-style", "solid"),
            ("border-color", "#e5e7eb"),
        ]),
        "rounded" => decl(&[("border-radius", "4px")]),
        "rounded-md" => decl(&[("border-radius", "6px")]),
        "rounded-lg" => decl(&[("border-radius", "8px")]),
        "rounded-xl" => decl(&[("border-radius", "12px")]),
        "rounded-full" => decl(&[("border-radius", "9999px")]),
        "shadow" | "shadow-sm" => decl(&[("box-shadow", "0 1px 3px 0 rgba(0, 0, 0, 0.1)")]),
        "shadow-md" | "shadow-lg" => decl(&[("box-shadow", "0 4px 6px -1px rgba(0, 0, 0, 0.1)")]),

        _ => dynamic_class(class),
    }
}

/// Numeric and palette patterns: `p-4`, `gap-2`, `grid-cols-3`, `w-24`,
/// `h-10`, `bg-white`, `text-gray-500`, `border-blue-500`, `border-l-4`.
fn dynamic_class(class: &str) -> Vec<(String, String)> {
    if let Some(rest) = class.strip_prefix("bg-") {
        if let Some(c) = palette(rest) {
            return decl(&[("background-color", c)]);
        }
    }
    if let Some(rest) = class.strip_prefix("text-") {
        if let Some(c) = palette(rest) {
            return decl(&[("color", c)]);
        }
    }
    if let Some(rest) = class.strip_prefix("border-") {
        if let Some(c) = palette(rest) {
            return decl(&[("border-color", c)]);
        }
        // border-{side}-{n}
        let mut it = rest.splitn(2, '-');
        if let (Some(side), Some(n)) = (it.next(), it.next()) {
            let side = match side {
                "t" => Some("top"),
                "r" => Some("right"),
                "b" => Some("bottom"),
                "l" => Some("left"),
                _ => None,
            };
            if let (Some(side), Ok(n)) = (side, n.parse::<f32>()) {
                return vec![
                    (format!("border-{side}-width"), format!("{n}px")),
                    (format!("border-{side}-style"), "solid".to_string()),
                ];
            }
        }
    }
    if let Some(rest) = class.strip_prefix("grid-cols-") {
        if let Ok(n) = rest.parse::<usize>() {
            return vec![(
                "grid-template-columns".to_string(),
                vec!["1fr"; n].join(" "),
            )];
        }
    }
    if let Some(rest) = class.strip_prefix("gap-") {
        if let Ok(v) = rest.parse::<f32>() {
            return vec![("gap".to_string(), format!("{}px", v * 4.0))];
        }
    }
    for (prefix, prop) in [("w-", "width"), ("h-", "height")] {
        if let Some(rest) = class.strip_prefix(prefix) {
            if let Ok(v) = rest.parse::<f32>() {
                return vec![(prop.to_string(), format!("{}px", v * 4.0))];
            }
        }
    }
    spacing_class(class)
}

fn spacing_class(class: &str) -> Vec<(String, String)> {
    // p-{n}, px-{n}, py-{n}, pt-{n}, ... and the same for m  (1 unit = 4px)
    let Some((prefix, value)) = class.rsplit_once('-') else {
        return Vec::new();
    };
    let Ok(units) = value.parse::<f32>() else {
        return Vec::new();
    };
    let px = format!("{}px", units * 4.0);
    let (kind, sides): (&str, &[&str]) = match prefix {
        "p" => ("padding", &SIDES),
        "px" => ("padding", &["left", "right"]),
        "py" => ("padding", &["top", "bottom"]),
        "pt" => ("padding", &["top"]),
        "pr" => ("padding", &["right"]),
        "pb" => ("padding", &["bottom"]),
        "pl" => ("padding", &["left"]),
        "m" => ("margin", &SIDES),
        "mx" => ("margin", &["left", "right"]),
        "my" => ("margin", &["top", "bottom"]),
        "mt" => ("margin", &["top"]),
        "mr" => ("margin", &["right"]),
        "mb" => ("margin", &["bottom"]),
        "ml" => ("margin", &["left"]),
        _ => return Vec::new(),
    };
    sides
        .iter()
        .map(|side| (format!("{kind}-{side}"), px.clone()))
        .collect()
}
