//! Error types for the pageproof library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`PageProofError`] — **Fatal**: the operation cannot proceed at all
//!   (missing source PDF, invalid configuration, unwritable output).
//!   Returned as `Err(PageProofError)` from the top-level entry points.
//!   The export run treats every per-page problem as fatal: a half-written
//!   image directory is worse than no directory, so there is no
//!   partial-success bookkeeping there.
//!
//! * [`PageError`] — **Non-fatal**: a single page failed during text
//!   extraction (unreadable image, vision call error). Its `Display` text
//!   is recorded inline in that page's markdown section and the pipeline
//!   moves on, so pagination stays aligned with the image sequence.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pageproof library.
///
/// Per-page extraction failures use [`PageError`] and are written into the
/// output markdown rather than propagated here.
#[derive(Debug, Error)]
pub enum PageProofError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Source PDF was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// The page-image directory does not exist.
    #[error("Directory not found: '{path}'\nRun the export step first to produce page images.")]
    DirectoryNotFound { path: PathBuf },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' could not be opened: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium-render returned an error for a specific page (1-indexed).
    #[error("Rasterisation failed for page {page}: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write a page image to the output directory.
    #[error("Failed to write page image '{path}': {detail}")]
    ImageWriteFailed { path: PathBuf, detail: String },

    /// Could not create, truncate, or append to the output markdown file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured vision provider is not initialised (missing API key etc.).
    #[error("Vision provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single page during text extraction.
///
/// The `Display` text of this error becomes the inline annotation
/// `*Error processing this page: <message>*` in the output markdown.
#[derive(Debug, Clone, Error)]
pub enum PageError {
    /// The page image could not be read or decoded.
    #[error("failed to read image '{path}': {detail}")]
    ImageReadFailed { path: PathBuf, detail: String },

    /// The vision extraction call failed.
    #[error("extraction call failed: {detail}")]
    ExtractionFailed { detail: String },
}
