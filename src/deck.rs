//! Deck IR – the frozen slide description handed to a presentation writer.
//!
//! Every coordinate and size is in inches from the slide's top-left corner,
//! font sizes are in points and colors are `#rrggbb`.

use serde::{Deserialize, Serialize};

use crate::chart::NativeChart;

/// Default slide fill.
pub const SLIDE_BACKGROUND: &str = "#F5F5F5";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub slides: Vec<SlideSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideSpec {
    pub background: SlideBackground,
    pub items: Vec<SlideItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideBackground {
    pub color: String,
    /// Data URI drawn over the fill.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rect,
    RoundRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    /// CSS `text-align` → box alignment; `start`/`justify`/unknown are left.
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "center" => Align::Center,
            "right" | "end" => Align::Right,
            _ => Align::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeItem {
    pub shape: ShapeKind,
    pub frame: Frame,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line: Option<LineSpec>,
    /// Inner margin in points.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub inset: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    pub text: String,
    pub frame: Frame,
    pub font_size: f32,
    pub bold: bool,
    pub color: String,
    pub align: Align,
    /// Center vertically instead of the writer's default (top).
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub valign_middle: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub line: Option<LineSpec>,
    /// Inner margin in points.
    pub inset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    pub frame: Frame,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartItem {
    pub frame: Frame,
    pub chart: NativeChart,
}

/// One drawing primitive, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlideItem {
    Shape(ShapeItem),
    Text(TextBox),
    Image(ImageItem),
    Chart(ChartItem),
}

impl SlideSpec {
    pub fn blank() -> Self {
        Self {
            background: SlideBackground {
                color: SLIDE_BACKGROUND.to_string(),
                image: None,
            },
            items: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextBox> {
        self.items.iter().filter_map(|i| match i {
            SlideItem::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartItem> {
        self.items.iter().filter_map(|i| match i {
            SlideItem::Chart(c) => Some(c),
            _ => None,
        })
    }
}

impl Deck {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
