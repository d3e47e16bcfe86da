//! Page export: PDF in, a directory of numbered page images out.
//!
//! Drives the rasteriser and enhancer across every page of the source
//! document, writing one PNG per page with deterministic zero-padded
//! naming (`page_0001.png`, `page_0002.png`, …). The 4-digit suffix is
//! the pagination contract the extraction pipeline and viewer both rely
//! on: files sort identically by name and by numeric value.
//!
//! Failure policy: any per-page error aborts the entire export. This is
//! deliberate and differs from the extraction pipeline's per-page
//! resilience — a gap in the image sequence would silently truncate every
//! downstream run, so it is better to fail loudly here.

use crate::config::ConversionConfig;
use crate::error::PageProofError;
use crate::pipeline::{enhance, render};
use std::fs;
use tracing::info;

/// File name for a 1-indexed page number: `page_0007.png`.
pub fn page_file_name(page_num: usize) -> String {
    format!("page_{:04}.png", page_num)
}

/// Convert every page of `config.input_pdf` to an enhanced PNG in
/// `config.output_dir`, returning the number of pages written.
///
/// The output directory is created if absent — but only after the source
/// file check, so a missing PDF never leaves an empty directory behind.
///
/// # Errors
/// - [`PageProofError::FileNotFound`] if the source PDF does not exist
/// - [`PageProofError::CorruptPdf`] if pdfium cannot open it
/// - [`PageProofError::RasterisationFailed`] / [`PageProofError::ImageWriteFailed`]
///   on the first page that fails; no partial-success continuation
pub async fn export_pages(config: &ConversionConfig) -> Result<usize, PageProofError> {
    if !config.input_pdf.exists() {
        return Err(PageProofError::FileNotFound {
            path: config.input_pdf.clone(),
        });
    }

    fs::create_dir_all(&config.output_dir).map_err(|e| PageProofError::Internal(format!(
        "Failed to create output directory '{}': {}",
        config.output_dir.display(),
        e
    )))?;

    let rendered = render::render_pages(&config.input_pdf, config.dpi).await?;
    let total = rendered.len();
    info!(
        "Processing {} pages from {}",
        total,
        config.input_pdf.display()
    );

    for (idx, img) in rendered.iter().enumerate() {
        let page_num = idx + 1;
        let enhanced = enhance::enhance_page(img, config.grayscale, config.contrast_factor);

        let output_path = config.output_dir.join(page_file_name(page_num));
        enhanced
            .save(&output_path)
            .map_err(|e| PageProofError::ImageWriteFailed {
                path: output_path.clone(),
                detail: format!("{e}"),
            })?;

        info!("Saved: {}", output_path.display());
    }

    info!("Conversion complete! {} pages processed.", total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_file_names_are_zero_padded() {
        assert_eq!(page_file_name(1), "page_0001.png");
        assert_eq!(page_file_name(42), "page_0042.png");
        assert_eq!(page_file_name(9999), "page_9999.png");
    }

    #[test]
    fn page_file_names_sort_identically_by_name_and_number() {
        let names: Vec<String> = (1..=120).map(page_file_name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn missing_source_fails_before_creating_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("png_output");
        let config = ConversionConfig::builder()
            .input_pdf(dir.path().join("nope.pdf"))
            .output_dir(&out)
            .build()
            .unwrap();

        let err = export_pages(&config).await.unwrap_err();
        assert!(matches!(err, PageProofError::FileNotFound { .. }));
        assert!(!out.exists(), "output dir must not be created");
    }
}
