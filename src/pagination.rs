//! Pagination – places rasterized blocks top to bottom on PDF pages,
//! starting a new page whenever the next block would cross the bottom
//! margin.
//!
//! Handles:
//! - First-page header, blank later pages
//! - Downscaling to the content box (never upscaling)
//! - Horizontal centering
//! - Oversized blocks (placed anyway after the break)

use crate::layout_config::*;

/// Page size and spacing constants, in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_x: f32,
    /// Gap between the header (or page top) and the first block.
    pub top_content_margin: f32,
    pub bottom_margin: f32,
    /// Gap between consecutive blocks.
    pub spacing: f32,
    /// Height reserved by the first-page header.
    pub header_height: f32,
}

impl Default for PageGeometry {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            page_width: 446.46,
            page_height: 631.4,
            margin_x: 20.0,
            top_content_margin: 16.0,
            bottom_margin: 20.0,
            spacing: 16.0,
            header_height: 40.0,
        }
    }
}

impl PageGeometry {
    pub fn max_content_width(&self) -> f32 {
        self.page_width - self.margin_x * 2.0
    }

    /// Content height of a page carrying the full header. Used to size
    /// blocks before any of them is placed.
    pub fn max_content_height(&self) -> f32 {
        self.page_height - self.header_height - self.bottom_margin - self.top_content_margin
    }

    /// Lowest y a block may reach without forcing a page break.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height - self.bottom_margin
    }
}

/// Running cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    pub current_y: f32,
    /// Header height of the page being filled (0 after the first page).
    pub current_header_height: f32,
}

/// Builds a [`PdfLayout`] one block at a time.
pub struct PageBuilder {
    geometry: PageGeometry,
    header: PageHeader,
    layout: PdfLayout,
    state: LayoutState,
}

impl PageBuilder {
    /// Start a document whose first page carries `title` and `date`.
    pub fn new(geometry: PageGeometry, title: &str, date: &str, background: &str) -> Self {
        let mut layout = PdfLayout::a4(title.trim());
        layout.page_width = geometry.page_width;
        layout.page_height = geometry.page_height;
        layout.margin_x = geometry.margin_x;
        layout.background = background.to_string();

        let mut builder = Self {
            geometry,
            header: PageHeader {
                title: title.trim().to_string(),
                date: date.to_string(),
            },
            layout,
            state: LayoutState {
                current_y: 0.0,
                current_header_height: 0.0,
            },
        };
        let used = builder.prepare_page(true);
        builder.state = LayoutState {
            current_y: used + geometry.top_content_margin,
            current_header_height: used,
        };
        builder
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn page_count(&self) -> usize {
        self.layout.pages.len()
    }

    /// Open a new page and return the header height it uses.
    pub fn prepare_page(&mut self, include_header: bool) -> f32 {
        let header = include_header.then(|| self.header.clone());
        self.layout.pages.push(PageLayout {
            header,
            images: Vec::new(),
        });
        if include_header {
            self.geometry.header_height
        } else {
            0.0
        }
    }

    fn display_size(&self, width: f32, height: f32) -> (f32, f32) {
        let g = &self.geometry;
        let max_width = g.max_content_width();
        let max_height = g.page_height
            - self.state.current_header_height
            - g.bottom_margin
            - g.top_content_margin;
        let width_scale = if width > 0.0 {
            (max_width / width).min(1.0)
        } else {
            1.0
        };
        let height_scale = if height > 0.0 && max_height > 0.0 {
            (max_height / height).min(1.0)
        } else {
            1.0
        };
        let scale = width_scale.min(height_scale);
        (
            (width * scale).round().max(1.0),
            (height * scale).round().max(1.0),
        )
    }

    /// Place an image whose natural size is `width` × `height`, breaking
    /// to a new page first when it would cross the bottom margin. Returns
    /// `false` for zero-size images, which are ignored.
    pub fn place_with_page_break(&mut self, src: &str, width: f32, height: f32) -> bool {
        if src.is_empty() || width <= 0.0 || height <= 0.0 {
            return false;
        }

        let (mut dw, mut dh) = self.display_size(width, height);
        if self.state.current_y + dh > self.geometry.bottom_limit() {
            let used = self.prepare_page(false);
            self.state.current_header_height = used;
            self.state.current_y = used + self.geometry.top_content_margin;
            (dw, dh) = self.display_size(width, height);
            log::debug!("Page break before block; now on page {}", self.page_count());
        }

        let x = self
            .geometry
            .margin_x
            .max(((self.geometry.page_width - dw) / 2.0).round());
        if let Some(page) = self.layout.pages.last_mut() {
            page.images.push(PlacedImage {
                x,
                y: self.state.current_y,
                width: dw,
                height: dh,
                src: src.to_string(),
            });
        }
        self.state.current_y += dh + self.geometry.spacing;
        true
    }

    pub fn finish(self) -> PdfLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "data:image/png;base64,AAAA";

    fn builder() -> PageBuilder {
        PageBuilder::new(PageGeometry::default(), " Report ", "01/02/2024", "#FFFFFF")
    }

    #[test]
    fn first_page_has_header() {
        let b = builder();
        assert_eq!(b.state().current_y, 56.0);
        assert_eq!(b.state().current_header_height, 40.0);
        let layout = b.finish();
        assert_eq!(layout.pages.len(), 1);
        let header = layout.pages[0].header.as_ref().unwrap();
        assert_eq!(header.title, "Report");
        assert_eq!(header.date, "01/02/2024");
    }

    #[test]
    fn small_block_is_centered_at_natural_size() {
        let mut b = builder();
        assert!(b.place_with_page_break(SRC, 200.0, 100.0));
        assert_eq!(b.state().current_y, 56.0 + 100.0 + 16.0);
        let layout = b.finish();
        let img = &layout.pages[0].images[0];
        assert_eq!((img.x, img.y, img.width, img.height), (123.0, 56.0, 200.0, 100.0));
    }

    #[test]
    fn wide_block_is_scaled_to_content_width() {
        let mut b = builder();
        b.place_with_page_break(SRC, 812.92, 200.0);
        let layout = b.finish();
        let img = &layout.pages[0].images[0];
        // 406.46 / 812.92 = 0.5
        assert_eq!((img.width, img.height), (406.0, 100.0));
        assert_eq!(img.x, 20.0);
    }

    #[test]
    fn overflow_breaks_to_blank_page() {
        let mut b = builder();
        b.place_with_page_break(SRC, 300.0, 400.0);
        b.place_with_page_break(SRC, 300.0, 200.0);
        assert_eq!(b.page_count(), 2);
        assert_eq!(b.state().current_header_height, 0.0);
        assert_eq!(b.state().current_y, 16.0 + 200.0 + 16.0);
        let layout = b.finish();
        assert!(layout.pages[1].header.is_none());
        assert_eq!(layout.pages[1].images[0].y, 16.0);
    }

    #[test]
    fn tall_block_is_fit_to_page_after_break() {
        let mut b = builder();
        b.place_with_page_break(SRC, 100.0, 50.0);
        b.place_with_page_break(SRC, 100.0, 2000.0);
        let layout = b.finish();
        let img = &layout.pages[1].images[0];
        // Blank page content height: 631.4 - 20 - 16 = 595.4
        assert_eq!(img.height, 595.0);
    }

    #[test]
    fn zero_size_is_ignored() {
        let mut b = builder();
        assert!(!b.place_with_page_break(SRC, 0.0, 100.0));
        assert!(!b.place_with_page_break(SRC, 100.0, 0.0));
        assert_eq!(b.finish().image_count(), 0);
    }

    #[test]
    fn cursor_never_passes_bottom_limit() {
        let mut b = builder();
        let limit = b.geometry().bottom_limit();
        for i in 0..40 {
            let h = 30.0 + (i % 7) as f32 * 45.0;
            b.place_with_page_break(SRC, 250.0, h);
        }
        let layout = b.finish();
        for page in &layout.pages {
            for img in &page.images {
                assert!(img.y + img.height <= limit, "{} + {}", img.y, img.height);
            }
        }
    }
}
