//! PDF rasterisation: render pages to `DynamicImage` via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves the work onto a dedicated thread pool
//! thread designed for blocking operations, preventing the Tokio worker
//! threads from stalling during CPU-heavy rendering.
//!
//! ## Scale factor
//!
//! PDF coordinates are native 72 units per inch, so a target resolution of
//! `dpi` means scaling every page by `dpi / 72` — the same factor for both
//! the full export render and the lower-DPI viewer preview.

use crate::error::PageProofError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Count the pages of a PDF without rendering anything.
pub async fn page_count(pdf_path: &Path) -> Result<usize, PageProofError> {
    let path = pdf_path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let pdfium = Pdfium::default();
        let document = open_document(&pdfium, &path)?;
        Ok(document.pages().len() as usize)
    })
    .await
    .map_err(|e| PageProofError::Internal(format!("Page-count task panicked: {}", e)))?
}

/// Rasterise every page of a PDF, in document order, at `dpi`.
///
/// This runs inside `spawn_blocking` since pdfium operations are CPU-bound.
/// Any page failure aborts the whole render — the export contract has no
/// partial-success mode.
pub async fn render_pages(
    pdf_path: &Path,
    dpi: u32,
) -> Result<Vec<DynamicImage>, PageProofError> {
    let path = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || render_pages_blocking(&path, dpi))
        .await
        .map_err(|e| PageProofError::Internal(format!("Render task panicked: {}", e)))?
}

/// Rasterise a single page (0-indexed) at `dpi`.
///
/// Used by the viewer to re-render one preview page per navigation step;
/// the document handle is opened and released within the call.
pub async fn render_page(
    pdf_path: &Path,
    page_index: usize,
    dpi: u32,
) -> Result<DynamicImage, PageProofError> {
    let path = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let pdfium = Pdfium::default();
        let document = open_document(&pdfium, &path)?;
        let pages = document.pages();
        let total = pages.len() as usize;
        if page_index >= total {
            return Err(PageProofError::RasterisationFailed {
                page: page_index + 1,
                detail: format!("page index out of range (document has {} pages)", total),
            });
        }
        render_one(&pages, page_index, dpi)
    })
    .await
    .map_err(|e| PageProofError::Internal(format!("Render task panicked: {}", e)))?
}

fn render_pages_blocking(pdf_path: &Path, dpi: u32) -> Result<Vec<DynamicImage>, PageProofError> {
    let pdfium = Pdfium::default();
    let document = open_document(&pdfium, pdf_path)?;
    let pages = document.pages();
    let total = pages.len() as usize;
    info!("PDF loaded: {} pages", total);

    let mut results = Vec::with_capacity(total);
    for idx in 0..total {
        results.push(render_one(&pages, idx, dpi)?);
    }
    Ok(results)
}

fn render_one(
    pages: &PdfPages<'_>,
    idx: usize,
    dpi: u32,
) -> Result<DynamicImage, PageProofError> {
    let render_config = PdfRenderConfig::new().scale_page_by_factor(dpi as f32 / 72.0);

    let page = pages
        .get(idx as u16)
        .map_err(|e| PageProofError::RasterisationFailed {
            page: idx + 1,
            detail: format!("{:?}", e),
        })?;

    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|e| PageProofError::RasterisationFailed {
            page: idx + 1,
            detail: format!("{:?}", e),
        })?;

    let image = bitmap.as_image();
    debug!(
        "Rendered page {} -> {}x{} px",
        idx + 1,
        image.width(),
        image.height()
    );

    Ok(image)
}

fn open_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
) -> Result<PdfDocument<'a>, PageProofError> {
    pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| PageProofError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })
}
