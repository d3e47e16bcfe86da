//! Text extraction: a directory of numbered page images in, one
//! page-delimited markdown file out.
//!
//! ## Sequential-scan termination
//!
//! Pages are discovered by probing `page_0001.png`, `page_0002.png`, … and
//! stopping at the first absent file. The directory listing is never
//! scanned, so a gap (or out-of-range numbering) silently truncates
//! processing. This is a load-bearing contract, not an accident: it
//! preserves strict page order without a sort step, and the exporter's
//! abort-on-error policy guarantees a gapless sequence in normal operation.
//!
//! ## Write discipline
//!
//! The output file is truncated and given its title header once at start.
//! Every subsequent write appends exactly one complete section through a
//! freshly opened handle, flushed before the next page begins — a crash
//! mid-run leaves a valid prefix of complete sections, and no handle is
//! ever held across the vision call.

use crate::error::{PageError, PageProofError};
use crate::export::page_file_name;
use crate::pipeline::vision::{VisionClient, MEDIA_TYPE_PNG};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Fixed title line written when the output file is created.
pub const OUTPUT_TITLE: &str = "# OCR Extracted Text\n\n";

/// Inline annotation prefix for a failed page.
pub const ERROR_ANNOTATION: &str = "Error processing this page";

/// Counters for one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages for which a section was written (success or error annotation).
    pub attempted_pages: usize,
    /// Pages whose text was extracted successfully.
    pub processed_pages: usize,
    /// Pages recorded with an inline error annotation.
    pub failed_pages: usize,
}

/// Extract text from every sequentially-numbered image in `image_dir`,
/// appending one markdown section per page to `output_file`.
///
/// Pages are processed strictly one at a time; the vision call is the only
/// suspension point, awaited before the next page starts. Per-page failures
/// are logged, recorded inline, and do not stop the run — the markdown file
/// always ends up with exactly one section per attempted page, in order.
///
/// # Errors
/// Fatal only: missing image directory, or an output file that cannot be
/// created or appended to.
pub async fn extract_text(
    image_dir: &Path,
    output_file: &Path,
    client: &dyn VisionClient,
) -> Result<ExtractionStats, PageProofError> {
    if !image_dir.exists() {
        return Err(PageProofError::DirectoryNotFound {
            path: image_dir.to_path_buf(),
        });
    }

    // Truncate and write the title header once; every later write appends.
    fs::write(output_file, OUTPUT_TITLE).map_err(|e| PageProofError::OutputWriteFailed {
        path: output_file.to_path_buf(),
        source: e,
    })?;

    let mut stats = ExtractionStats::default();
    let mut page_num = 1usize;

    loop {
        let image_path = image_dir.join(page_file_name(page_num));
        if !image_path.exists() {
            break;
        }

        info!("Processing: {}", image_path.display());

        let body = match process_page(&image_path, client).await {
            Ok(text) => {
                stats.processed_pages += 1;
                text
            }
            Err(e) => {
                warn!("Error processing {}: {}", image_path.display(), e);
                stats.failed_pages += 1;
                format!("*{}: {}*", ERROR_ANNOTATION, e)
            }
        };

        append_section(output_file, page_num, &body)?;
        stats.attempted_pages += 1;
        page_num += 1;
    }

    info!(
        "Processing complete! {} pages processed.",
        stats.processed_pages
    );
    info!("Output saved to: {}", output_file.display());

    Ok(stats)
}

/// Load one page image and run it through the vision client.
async fn process_page(
    image_path: &Path,
    client: &dyn VisionClient,
) -> Result<String, PageError> {
    let bytes = fs::read(image_path).map_err(|e| PageError::ImageReadFailed {
        path: image_path.to_path_buf(),
        detail: format!("{e}"),
    })?;

    // Validate the image decodes before paying for an API call.
    image::load_from_memory(&bytes).map_err(|e| PageError::ImageReadFailed {
        path: image_path.to_path_buf(),
        detail: format!("{e}"),
    })?;

    client.extract_text(&bytes, MEDIA_TYPE_PNG).await
}

/// Append one complete section (heading + body + delimiter) and flush.
///
/// The file is reopened for each append rather than held open, so each
/// completed section is durable independent of later crashes.
fn append_section(
    output_file: &Path,
    page_num: usize,
    body: &str,
) -> Result<(), PageProofError> {
    let write = |path: &Path| -> std::io::Result<()> {
        let mut f = OpenOptions::new().append(true).open(path)?;
        write!(f, "## Page {:04}\n\n{}\n\n---\n\n", page_num, body)?;
        f.flush()
    };

    write(output_file).map_err(|e| PageProofError::OutputWriteFailed {
        path: output_file.to_path_buf(),
        source: e,
    })
}
