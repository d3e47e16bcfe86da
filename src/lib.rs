//! # pageproof
//!
//! Convert PDF pages to enhanced PNG images, extract their text with a
//! vision-capable language model, and verify the result page by page.
//!
//! ## Why images instead of a text layer?
//!
//! Scanned documents and PDFs with broken text layers defeat conventional
//! extraction tools. pageproof rasterises each page, sharpens it for
//! reading (grayscale + contrast), and lets a VLM transcribe it as a human
//! would — then keeps every stage aligned on one pagination contract so the
//! output can be proofread against the source, page by page.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Export   rasterise via pdfium, enhance, write page_####.png
//!  ├─ 2. Extract  one VLM call per image, append one section per page
//!  │              to output.md (strictly sequential, gap-terminated)
//!  └─ 3. Verify   parse output.md into a page map and view each section
//!                 beside a fresh preview render of the same PDF page
//! ```
//!
//! The shared contract is the page number: 1-indexed and 4-digit
//! zero-padded in file names (`page_0007.png`) and section headings
//! (`## Page 0007`), 0-indexed in the derived page map.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pageproof::{export_pages, extract_text, ConversionConfig, VlmVisionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .input_pdf("report.pdf")
//!         .build()?;
//!     let pages = export_pages(&config).await?;
//!     println!("exported {pages} pages");
//!
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let client = VlmVisionClient::from_env(None, None)?;
//!     let stats = extract_text(&config.output_dir, "output.md".as_ref(), &client).await?;
//!     println!("{}/{} pages extracted", stats.processed_pages, stats.attempted_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pageproof` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pageproof = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod pagemap;
pub mod pipeline;
pub mod prompts;
pub mod viewer;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use error::{PageError, PageProofError};
pub use export::{export_pages, page_file_name};
pub use extract::{extract_text, ExtractionStats};
pub use pagemap::{load_page_map, parse_page_map};
pub use pipeline::vision::{VisionClient, VlmVisionClient};
pub use viewer::{list_page_images, render_preview, ViewerState};
