//! Pipeline stages shared by the export and extraction entry points.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch rendering backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! PDF ──▶ render ──▶ enhance ──▶ page_####.png ──▶ vision ──▶ output.md
//!        (pdfium)  (grayscale,                     (VLM)
//!                   contrast)
//! ```
//!
//! 1. [`render`]  — rasterise pages at `dpi / 72` scale; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 2. [`enhance`] — pure grayscale + contrast transform on the raster
//! 3. [`vision`]  — the only stage with network I/O: one VLM call per page
//!    behind the [`vision::VisionClient`] seam

pub mod enhance;
pub mod render;
pub mod vision;
