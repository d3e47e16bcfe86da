//! Prompts for VLM-based text extraction.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the same instruction is sent for every
//!    page of every run; changing extraction behaviour means editing exactly
//!    one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without
//!    spinning up a real VLM.

/// System prompt establishing the extraction role.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "Extract all text from the provided image. \
Return the extracted text in markdown format, preserving the structure and \
formatting as much as possible.";

/// Fixed per-page instruction sent alongside the image attachment.
pub const EXTRACTION_INSTRUCTION: &str = "Extract all text from this image and format \
it in markdown. Preserve the structure, tables, and formatting as much as possible.";
