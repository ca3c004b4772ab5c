//! Pipeline – ties together extraction, grouping, layout, rasterization and
//! rendering into the two export calls.
//!
//! Both exports are async because rasterization and asset loading are
//! suspension points; everything in between is synchronous. Rasterization
//! requests are issued together with `join_all` and their results consumed
//! in document order.

use futures::future::join_all;

use crate::assets::load_with_fallback;
use crate::blocks::{collect_blocks, BlockLimits};
use crate::cancel::CancelToken;
use crate::dedup::renderable_text_nodes;
use crate::deck::Deck;
use crate::dom::{parse_html, Document, NodeId, Tag};
use crate::error::{ExportError, Result};
use crate::extract::{setup_units, ElementTable};
use crate::fonts::FontManager;
use crate::grouping::assign_all;
use crate::layout::compute_layout;
use crate::layout_config::PdfLayout;
use crate::markers;
use crate::pagination::{PageBuilder, PageGeometry};
use crate::panels::{common_ancestor, detect_panels, Group};
use crate::raster::{RasterOptions, Rasterizer};
use crate::render::render_pdf;
use crate::slide_layout::{layout_groups, SlideLayoutParams};
use crate::slide_render::{render_deck, DeckAssets, DeckOptions};
use crate::style::resolve_document;

/// Configuration for the PDF export.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// Header title and PDF metadata title (default: "Dashboard").
    pub title: String,
    pub geometry: PageGeometry,
    pub limits: BlockLimits,
    /// Block rasterization (pixel ratio 2 on white by default).
    pub raster: RasterOptions,
    /// Header date; today as `DD/MM/YYYY` when `None`.
    pub date: Option<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            title: "Dashboard".to_string(),
            geometry: PageGeometry::default(),
            limits: BlockLimits::default(),
            raster: RasterOptions::default(),
            date: None,
        }
    }
}

/// Configuration for the slide export.
#[derive(Debug, Clone)]
pub struct SlideConfig {
    pub title: String,
    /// Slide size, margins, slot gap and maximum panel scale.
    pub layout: SlideLayoutParams,
    /// Title and closing slides around the content (default: on).
    pub start_end: bool,
    /// Root height mapped onto the slide height; the measured root height
    /// when `None`.
    pub assumed_root_height: Option<f32>,
    pub start_image: Option<String>,
    pub middle_image: Option<String>,
    pub end_image: Option<String>,
    /// Tried when the corresponding image above fails to load.
    pub fallback_start_image: Option<String>,
    pub fallback_end_image: Option<String>,
    /// Title slide date; today as `MM/DD/YYYY` when `None`.
    pub date: Option<String>,
    /// Used for the whole-dashboard image when no panel is found.
    pub raster: RasterOptions,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            title: "Dashboard".to_string(),
            layout: SlideLayoutParams::default(),
            start_end: true,
            assumed_root_height: Some(1862.0),
            start_image: None,
            middle_image: None,
            end_image: None,
            fallback_start_image: None,
            fallback_end_image: None,
            date: None,
            raster: RasterOptions {
                pixel_ratio: 1.0,
                ..RasterOptions::default()
            },
        }
    }
}

/// A finished PDF and the page layout it was rendered from.
#[derive(Debug, Clone)]
pub struct PdfExport {
    pub bytes: Vec<u8>,
    pub layout: PdfLayout,
}

/// Parse HTML, resolve styles and lay it out `viewport_width` px wide.
pub fn prepare_html(html: &str, viewport_width: f32) -> Result<Document> {
    let mut doc = parse_html(html);
    resolve_document(&mut doc);
    let fonts = FontManager::new();
    compute_layout(&mut doc, viewport_width, &fonts)
        .map_err(|e| ExportError::Render(format!("layout failed: {e}")))?;
    Ok(doc)
}

fn check_root(doc: &Document, root: NodeId) -> Result<()> {
    if !doc.is_element(root) {
        return Err(ExportError::EmptyRoot(format!("node {root} is not an element")));
    }
    let rect = doc.rect(root);
    if rect.is_empty() {
        return Err(ExportError::EmptyRoot(format!(
            "root measures {} x {}",
            rect.w, rect.h
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

/// Replace every chart snapshot container in `clone` with a raster of it.
/// Containers that fail to rasterize keep their original content.
async fn snapshot_charts(
    clone: &mut Document,
    rasterizer: &dyn Rasterizer,
    options: &RasterOptions,
    cancel: &CancelToken,
) -> Result<()> {
    let root = clone.root();
    let mut charts: Vec<NodeId> = clone
        .descendants(root)
        .into_iter()
        .filter(|&id| clone.has_class(id, markers::CHART_SNAPSHOT))
        .collect();
    if clone.has_class(root, markers::CHART_SNAPSHOT) {
        charts.insert(0, root);
    }
    if charts.is_empty() {
        return Ok(());
    }

    let images = {
        let doc: &Document = clone;
        join_all(charts.iter().map(|&id| rasterizer.rasterize(doc, id, options))).await
    };
    cancel.check()?;

    for (id, result) in charts.into_iter().zip(images) {
        match result {
            Ok(img) => {
                let rect = clone.rect(id);
                clone.clear_children(id);
                let el = clone.append_element(id, Tag::Img);
                clone.set_attr(el, "src", &img.data_uri);
                clone.set_style(el, "width", "100%");
                clone.set_rect(el, rect);
            }
            Err(e) => log::warn!("Failed to render chart image: {e}"),
        }
    }
    Ok(())
}

fn has_noprint(doc: &Document, root: NodeId) -> bool {
    doc.descendants(root)
        .into_iter()
        .any(|id| doc.has_class(id, markers::NOPRINT))
}

/// Lay out a copy again so content below a dropped subtree moves up.
fn reflow(clone: &mut Document, width: f32) -> Result<()> {
    compute_layout(clone, width, &FontManager::new())
        .map_err(|e| ExportError::Render(format!("layout failed: {e}")))
}

/// Export `root` as a paginated PDF of rasterized blocks.
///
/// `pdfppt-noprint` subtrees are dropped from a private copy of the
/// document. A copy of an HTML layout is laid out again at the root's width
/// so nothing keeps the space of the dropped nodes. Chart snapshots are
/// pre-rasterized, and the copy is split into page-sized blocks that are
/// rasterized and placed top to bottom. When no block renders, the whole
/// copy is rasterized as a single image.
pub async fn export_pdf(
    doc: &Document,
    root: NodeId,
    rasterizer: &dyn Rasterizer,
    config: &PdfConfig,
    cancel: &CancelToken,
) -> Result<PdfExport> {
    cancel.check()?;
    check_root(doc, root)?;

    let mut clone = doc.clone_subtree(root, markers::is_noprint);
    if doc.layout_width().is_some() && has_noprint(doc, root) {
        reflow(&mut clone, doc.rect(root).w)?;
    }
    snapshot_charts(&mut clone, rasterizer, &config.raster, cancel).await?;
    let clone_root = clone.root();

    let date = config
        .date
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%d/%m/%Y").to_string());
    let mut builder = PageBuilder::new(config.geometry, &config.title, &date, &config.raster.background);

    let geometry = builder.geometry();
    let blocks = collect_blocks(
        &clone,
        clone_root,
        geometry.max_content_height(),
        geometry.max_content_width(),
        config.limits,
    );
    let blocks = if blocks.is_empty() {
        vec![clone_root]
    } else {
        blocks
    };

    let images = join_all(
        blocks
            .iter()
            .map(|&id| rasterizer.rasterize(&clone, id, &config.raster)),
    )
    .await;
    cancel.check()?;

    let mut rendered = 0usize;
    for (id, result) in blocks.iter().zip(images) {
        let rect = clone.rect(*id);
        if rect.is_empty() {
            continue;
        }
        match result {
            Ok(img) => {
                if builder.place_with_page_break(&img.data_uri, rect.w, rect.h) {
                    rendered += 1;
                }
            }
            Err(e) => log::warn!("Failed to rasterize block: {e}"),
        }
    }

    if rendered == 0 {
        log::warn!("No block rendered; falling back to a full snapshot");
        let rect = clone.rect(clone_root);
        match rasterizer.rasterize(&clone, clone_root, &config.raster).await {
            Ok(img) => {
                builder.place_with_page_break(&img.data_uri, rect.w, rect.h);
            }
            Err(e) => log::warn!("Fallback snapshot failed: {e}"),
        }
        cancel.check()?;
    }

    let layout = builder.finish();
    log::debug!(
        "PDF layout: {} pages, {} images",
        layout.pages.len(),
        layout.image_count()
    );
    let bytes = render_pdf(&layout).map_err(ExportError::Render)?;
    Ok(PdfExport { bytes, layout })
}

// ---------------------------------------------------------------------------
// Slides
// ---------------------------------------------------------------------------

/// Extract, group and lay out the panels of `root` in slide units.
pub fn build_groups(doc: &Document, root: NodeId, config: &SlideConfig) -> Result<Vec<Group>> {
    check_root(doc, root)?;
    let p = &config.layout;
    let units = setup_units(
        &doc.rect(root),
        p.slide_width,
        p.slide_height,
        config.assumed_root_height,
    );
    let table = ElementTable::build(doc, root, units);
    let text_nodes = renderable_text_nodes(doc, &table);
    let wrapper = common_ancestor(doc, &text_nodes);

    let mut groups = detect_panels(doc, &table, wrapper);
    assign_all(doc, &table, &text_nodes, &mut groups);
    layout_groups(&mut groups, p);
    log::debug!("{} groups over {} elements", groups.len(), table.len());
    Ok(groups)
}

/// Export `root` as a slide deck.
pub async fn export_slides(
    doc: &Document,
    root: NodeId,
    rasterizer: &dyn Rasterizer,
    config: &SlideConfig,
    cancel: &CancelToken,
) -> Result<Deck> {
    cancel.check()?;
    let groups = build_groups(doc, root, config)?;

    let (start_image, end_image, middle_image) = futures::join!(
        load_with_fallback(config.start_image.as_deref(), config.fallback_start_image.as_deref()),
        load_with_fallback(config.end_image.as_deref(), config.fallback_end_image.as_deref()),
        load_with_fallback(config.middle_image.as_deref(), None),
    );
    cancel.check()?;

    let dashboard_image = if groups.is_empty() {
        log::debug!("No panels detected; rasterizing the whole dashboard");
        let result = rasterizer.rasterize(doc, root, &config.raster).await;
        cancel.check()?;
        match result {
            Ok(img) => Some(img.data_uri),
            Err(e) => {
                log::warn!("Dashboard snapshot failed: {e}");
                None
            }
        }
    } else {
        None
    };

    let options = DeckOptions {
        title: config.title.clone(),
        slide_width: config.layout.slide_width,
        slide_height: config.layout.slide_height,
        start_end: config.start_end,
        date: config
            .date
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%m/%d/%Y").to_string()),
    };
    let assets = DeckAssets {
        start_image,
        end_image,
        middle_image,
        dashboard_image,
    };
    Ok(render_deck(doc, &groups, &options, &assets))
}
