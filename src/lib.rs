//! # deck-forge – rendered dashboard → PDF and slide deck
//!
//! This crate exports a laid-out dashboard DOM in two shapes:
//!
//! * **PDF** – the dashboard is cut into page-sized blocks, each block is
//!   rasterized and the images are stacked on A4 pages under a title
//!   header ([`pipeline::export_pdf`]).
//! * **Slides** – visual panels are detected, their text, shapes and charts
//!   are turned into editable slide items and packed into slides
//!   ([`pipeline::export_slides`]).
//!
//! The stages are:
//!
//! 1. **Load** – HTML string → styled, laid-out DOM ([`dom`], [`style`],
//!    [`layout`]) or a browser DOM snapshot ([`snapshot`])
//! 2. **Extract** – element table in slide units ([`extract`])
//! 3. **Group** – panels, text assignment and shapes ([`panels`],
//!    [`dedup`], [`grouping`])
//! 4. **Place** – slide slots ([`slide_layout`]) or PDF pages
//!    ([`blocks`], [`pagination`])
//! 5. **Emit** – deck IR ([`slide_render`], [`deck`]) or PDF bytes
//!    ([`render`])
//!
//! Rasterization goes through the [`raster::Rasterizer`] trait so a host
//! with a real browser renderer can plug it in.

pub mod assets;
pub mod blocks;
pub mod cancel;
pub mod chart;
pub mod color;
pub mod deck;
pub mod dedup;
pub mod dom;
pub mod error;
pub mod extract;
pub mod fonts;
pub mod geometry;
pub mod grouping;
pub mod layout;
pub mod layout_config;
pub mod markers;
pub mod pagination;
pub mod panels;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod slide_layout;
pub mod slide_render;
pub mod snapshot;
pub mod style;
pub mod templates;

// Re-exports for convenience
pub use cancel::CancelToken;
pub use deck::Deck;
pub use error::{ExportError, Result};
pub use pipeline::{export_pdf, export_slides, prepare_html, PdfConfig, SlideConfig};
pub use raster::{BoxPainter, Rasterizer};
