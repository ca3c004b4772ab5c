//! PDF page IR – the frozen structure between block placement and PDF
//! rendering. It encodes exactly what goes on each page: an optional header
//! and a list of raster images at page coordinates.
//!
//! Coordinates are in page units with the origin at the top-left corner of
//! the page. One unit is `points_per_unit` PDF points.

use serde::{Deserialize, Serialize};

/// A complete PDF document ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfLayout {
    /// Document title embedded in the PDF metadata and the first header.
    #[serde(default = "PdfLayout::default_title")]
    pub title: String,
    pub page_width: f32,
    pub page_height: f32,
    /// PDF points per page unit.
    #[serde(default = "PdfLayout::default_points_per_unit")]
    pub points_per_unit: f32,
    /// Horizontal page margin, used by the header.
    #[serde(default)]
    pub margin_x: f32,
    /// Page fill, `#rrggbb`.
    #[serde(default = "PdfLayout::default_background")]
    pub background: String,
    pub pages: Vec<PageLayout>,
}

/// One page of content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub header: Option<PageHeader>,
    #[serde(default)]
    pub images: Vec<PlacedImage>,
}

/// Title + date header with a rule underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageHeader {
    pub title: String,
    pub date: String,
}

/// A raster image placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedImage {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// `data:image/png;base64,...`
    pub src: String,
}

impl PdfLayout {
    fn default_title() -> String {
        "Dashboard".to_string()
    }

    /// A4 is 595.28 pt wide and 446.46 units.
    fn default_points_per_unit() -> f32 {
        4.0 / 3.0
    }

    fn default_background() -> String {
        "#FFFFFF".to_string()
    }

    /// Empty A4 portrait document (1 unit = 4/3 pt).
    pub fn a4(title: &str) -> Self {
        Self {
            title: title.to_string(),
            page_width: 446.46,
            page_height: 631.4,
            points_per_unit: Self::default_points_per_unit(),
            margin_x: 20.0,
            background: Self::default_background(),
            pages: Vec::new(),
        }
    }

    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}
