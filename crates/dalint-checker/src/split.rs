//! Multi-document splitting and line remapping.
//!
//! An interview file is a stream of YAML documents separated by `---`
//! marker lines. Fragments are loaded individually, so every fragment
//! carries the absolute line number of its first line; a line reported
//! relative to a fragment maps back to the file by addition.

use regex::Regex;
use std::sync::LazyLock;

/// A line consisting solely of three dashes (trailing spaces allowed).
static DOCUMENT_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^--- *$").unwrap());

/// A `...` end-of-document marker below the fragment's content.
static TRAILING_END_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\r]+\.\.\.$").unwrap());

/// One document's worth of text, ready to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Normalized fragment text (tabs expanded, end marker stripped).
    pub text: String,
    /// 1-based absolute line number of the fragment's first line.
    pub line_offset: usize,
    /// Newline count of the raw fragment, before normalization.
    pub raw_newlines: usize,
}

/// Split a source file into loadable fragments.
///
/// Offsets accumulate the raw newline counts of preceding fragments, so
/// they are unaffected by normalization. Tab expansion never changes the
/// line count, and the end-marker strip only removes lines below all of
/// the fragment's content.
#[must_use]
pub fn split_documents(content: &str) -> Vec<Fragment> {
    let mut line_offset = 1;
    let mut fragments = Vec::new();

    for raw in DOCUMENT_BOUNDARY.split(content) {
        let raw_newlines = raw.bytes().filter(|&b| b == b'\n').count();
        let text = TRAILING_END_MARKER.replace(raw, "").replace('\t', "  ");
        fragments.push(Fragment {
            text,
            line_offset,
            raw_newlines,
        });
        line_offset += raw_newlines;
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_document_no_markers() {
        let fragments = split_documents("a: 1\nb: 2\n");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].line_offset, 1);
        assert_eq!(fragments[0].raw_newlines, 2);
    }

    #[test]
    fn test_marker_count_yields_one_more_fragment() {
        let content = "a: 1\n---\nb: 2\n---\nc: 3\n";
        let fragments = split_documents(content);
        assert_eq!(fragments.len(), 3);
    }

    #[test]
    fn test_newline_counts_sum_to_file_total() {
        let content = "a: 1\n---\nb: 2\n---\nc: 3\n";
        let total: usize = split_documents(content)
            .iter()
            .map(|f| f.raw_newlines)
            .sum();
        assert_eq!(total, content.bytes().filter(|&b| b == b'\n').count());
    }

    #[test]
    fn test_offsets_accumulate() {
        let content = "a: 1\n---\nb: 2\n---\nc: 3\n";
        let fragments = split_documents(content);
        assert_eq!(fragments[0].line_offset, 1);
        // Second fragment starts with the newline that followed the marker,
        // so its first line is the marker's line.
        assert_eq!(fragments[1].line_offset, 2);
        assert_eq!(fragments[2].line_offset, 4);
    }

    #[test]
    fn test_dashes_inside_content_are_not_boundaries() {
        // Indented or suffixed dashes are content; only a bare marker line splits.
        let fragments = split_documents("a: |\n  --- not a marker\nb: 2\n");
        assert_eq!(fragments.len(), 1);
        let fragments = split_documents("a: 1\n--- trailing words\n");
        assert_eq!(fragments.len(), 1);
    }

    #[test]
    fn test_tabs_become_two_spaces_same_line_count() {
        let fragments = split_documents("a:\n\t- x\n");
        assert_eq!(fragments[0].text, "a:\n  - x\n");
        assert_eq!(fragments[0].raw_newlines, 2);
    }

    #[test]
    fn test_trailing_end_marker_stripped() {
        let fragments = split_documents("a: 1\n...");
        assert_eq!(fragments[0].text, "a: 1");
        // Raw count is taken before the strip.
        assert_eq!(fragments[0].raw_newlines, 1);
    }

    #[test]
    fn test_empty_fragment_still_advances_offset() {
        let content = "# just a comment\n---\nb: 2\n";
        let fragments = split_documents(content);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[1].line_offset, 2);
    }
}
