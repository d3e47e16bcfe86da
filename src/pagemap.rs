//! Page-aligned markdown parsing: markdown text in, page map out.
//!
//! The parser is an explicit two-pass scan: first find every page-heading
//! position in document order, then slice the text between consecutive
//! positions. Two passes rather than a single-pass accumulator keeps the
//! duplicate-heading semantics trivially visible: later occurrences of the
//! same page number simply overwrite earlier ones at the same key.
//!
//! Malformed input is not an error condition. A file with no matching
//! heading at all maps entirely to page index 0, and out-of-order or
//! duplicate headings degrade to last-write-wins — the parser never
//! second-guesses the extraction pipeline that produced the file.

use crate::error::PageProofError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

static RE_PAGE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## Page (\d+)").expect("valid page-heading regex"));

/// Parse markdown into a mapping from 0-indexed page number to the verbatim
/// section text for that page (heading included, slice trimmed).
///
/// Each section spans from its heading's start to the start of the next
/// heading (or end of text for the last). The heading's numeric value minus
/// one is the mapping key. With zero heading matches the entire text is
/// returned at key 0, unmodified.
pub fn parse_page_map(markdown: &str) -> HashMap<usize, String> {
    // Pass 1: every heading's byte offset and page number, in document order.
    // Numbers too large for usize are skipped; a literal "Page 0000" in
    // malformed input saturates to key 0 rather than underflowing.
    let headings: Vec<(usize, usize)> = RE_PAGE_HEADING
        .captures_iter(markdown)
        .filter_map(|caps| {
            let start = caps.get(0).map(|m| m.start())?;
            let page: usize = caps[1].parse().ok()?;
            Some((start, page.saturating_sub(1)))
        })
        .collect();

    if headings.is_empty() {
        let mut map = HashMap::new();
        map.insert(0, markdown.to_string());
        return map;
    }

    // Pass 2: slice between consecutive heading positions.
    let mut map = HashMap::with_capacity(headings.len());
    for (i, &(start, key)) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|&(next_start, _)| next_start)
            .unwrap_or(markdown.len());
        map.insert(key, markdown[start..end].trim().to_string());
    }
    map
}

/// Read a markdown file and parse it into a page map.
///
/// The map is rebuilt fresh on every call — never cached, never persisted —
/// so the viewer always reflects the file as it currently stands.
pub fn load_page_map(path: &Path) -> Result<HashMap<usize, String>, PageProofError> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PageProofError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PageProofError::Internal(format!("Failed to read '{}': {}", path.display(), e))
        }
    })?;
    Ok(parse_page_map(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_headings_maps_full_text_to_page_zero() {
        let text = "just some notes\nwithout any page markers\n";
        let map = parse_page_map(text);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&0], text);
    }

    #[test]
    fn well_formed_sections_map_to_dense_keys() {
        let text = "# OCR Extracted Text\n\n\
                    ## Page 0001\n\nfirst page body\n\n---\n\n\
                    ## Page 0002\n\nsecond page body\n\n---\n\n\
                    ## Page 0003\n\nthird page body\n\n---\n";
        let map = parse_page_map(text);
        assert_eq!(map.len(), 3);
        for i in 0..3 {
            assert!(map.contains_key(&i), "missing key {i}");
            assert!(map[&i].contains(&format!("Page {:04}", i + 1)));
        }
        assert!(map[&1].contains("second page body"));
        assert!(!map[&1].contains("third page body"));
    }

    #[test]
    fn sections_are_trimmed_and_keep_their_heading() {
        let text = "## Page 0001\n\nbody text\n\n---\n\n";
        let map = parse_page_map(text);
        assert_eq!(map[&0], "## Page 0001\n\nbody text\n\n---");
    }

    #[test]
    fn duplicate_headings_last_write_wins() {
        let text = "## Page 0001\n\nfirst occurrence\n\n\
                    ## Page 0001\n\nsecond occurrence\n";
        let map = parse_page_map(text);
        assert_eq!(map.len(), 1);
        assert!(map[&0].contains("second occurrence"));
        assert!(!map[&0].contains("first occurrence"));
    }

    #[test]
    fn out_of_order_headings_are_keyed_by_value_not_position() {
        let text = "## Page 0002\n\nlater page first\n\n## Page 0001\n\nearlier page\n";
        let map = parse_page_map(text);
        assert!(map[&1].contains("later page first"));
        assert!(map[&0].contains("earlier page"));
    }

    #[test]
    fn heading_must_start_a_line() {
        let text = "inline mention of ## Page 0005 is not a heading";
        let map = parse_page_map(text);
        assert_eq!(map.len(), 1);
        assert_eq!(map[&0], text);
    }

    #[test]
    fn unpadded_page_numbers_still_match() {
        let text = "## Page 12\n\nhand-edited file\n";
        let map = parse_page_map(text);
        assert!(map[&11].contains("hand-edited"));
    }

    #[test]
    fn page_zero_heading_saturates_instead_of_underflowing() {
        let text = "## Page 0000\n\nmalformed but tolerated\n";
        let map = parse_page_map(text);
        assert!(map[&0].contains("malformed"));
    }
}
