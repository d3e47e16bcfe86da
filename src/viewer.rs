//! Viewer support: everything a side-by-side page viewer needs except the
//! widget framework itself.
//!
//! The viewer shows the original PDF page next to its extracted markdown
//! section, navigating forward and backward in lockstep. This module keeps
//! that logic UI-agnostic: numeric-sorted image listing, a lower-resolution
//! preview render, and explicit navigation state. Current-page state lives
//! in [`ViewerState`], owned by the caller and clamped once per render —
//! never in process-wide session storage.

use crate::error::PageProofError;
use crate::pipeline::render;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Preview resolution for the PDF pane. Lower than the export DPI on
/// purpose: previews are re-rendered on every navigation step and only
/// need to be legible, not OCR-grade.
pub const PREVIEW_DPI: u32 = 150;

/// List the exported page images in a directory, sorted by page number.
///
/// Only files matching `page_<digits>.png` are returned. A missing
/// directory yields an empty list — the viewer reports "no pages" rather
/// than failing.
pub fn list_page_images(image_dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(image_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut pages: Vec<(usize, PathBuf)> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let num = page_number_of(&path)?;
            Some((num, path))
        })
        .collect();

    pages.sort_by_key(|(num, _)| *num);
    pages.into_iter().map(|(_, path)| path).collect()
}

/// Parse the page number out of a `page_####.png` file name.
fn page_number_of(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.strip_prefix("page_")?;
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    digits.parse().ok()
}

/// Re-rasterise one PDF page (0-indexed) at [`PREVIEW_DPI`] for display.
///
/// The document handle is opened and released within the call; nothing is
/// cached between navigation steps.
pub async fn render_preview(
    pdf_path: &Path,
    page_index: usize,
) -> Result<DynamicImage, PageProofError> {
    render::render_page(pdf_path, page_index, PREVIEW_DPI).await
}

/// Navigation state for a paginated viewer.
///
/// The navigable range is `0..min(pdf_page_count, derived_page_count)` so
/// both panes always have content for the current index; all mutation is
/// clamped to that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerState {
    page_index: usize,
    total_pages: usize,
}

impl ViewerState {
    /// Build state from the two independent page counts.
    pub fn new(pdf_page_count: usize, derived_page_count: usize) -> Self {
        Self {
            page_index: 0,
            total_pages: pdf_page_count.min(derived_page_count),
        }
    }

    /// Current 0-indexed page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Number of navigable pages.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// True when there is no page to show at all.
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Advance one page, clamped to the last page.
    pub fn next_page(&mut self) {
        if self.page_index + 1 < self.total_pages {
            self.page_index += 1;
        }
    }

    /// Go back one page, clamped to the first page.
    pub fn prev_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Jump to a specific 0-indexed page, clamped into range.
    pub fn go_to(&mut self, index: usize) {
        self.page_index = index.min(self.total_pages.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn listing_sorts_numerically_and_skips_strays() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page_0010.png", "page_0002.png", "page_0001.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join("cover.png"), b"x").unwrap();

        let pages = list_page_images(dir.path());
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["page_0001.png", "page_0002.png", "page_0010.png"]);
    }

    #[test]
    fn listing_missing_directory_is_empty() {
        assert!(list_page_images(Path::new("/definitely/not/here")).is_empty());
    }

    #[test]
    fn navigation_is_clamped_to_min_of_both_counts() {
        // 10 PDF pages but only 3 extracted sections: navigable range is 3.
        let mut state = ViewerState::new(10, 3);
        assert_eq!(state.total_pages(), 3);

        state.prev_page();
        assert_eq!(state.page_index(), 0);

        state.next_page();
        state.next_page();
        state.next_page(); // clamped at last page
        assert_eq!(state.page_index(), 2);

        state.go_to(99);
        assert_eq!(state.page_index(), 2);
        state.go_to(1);
        assert_eq!(state.page_index(), 1);
    }

    #[test]
    fn empty_viewer_state() {
        let mut state = ViewerState::new(0, 5);
        assert!(state.is_empty());
        state.next_page();
        assert_eq!(state.page_index(), 0);
    }
}
