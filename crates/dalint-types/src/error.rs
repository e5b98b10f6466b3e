//! The uniform error record produced by every validator.

/// One finding in one interview file.
///
/// `line` is the 1-based absolute line in the original file, after any
/// remapping from document fragments or embedded sub-language positions.
///
/// `experimental` splits findings by confidence: `false` marks
/// high-confidence errors (parse failures, unknown keys) and `true` marks
/// heuristic findings that may be false positives (ambiguous block kinds,
/// scope violations). The split is curated per error kind, not derived from
/// a general rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable message
    pub message: String,
    /// 1-based absolute line in the original file
    pub line: usize,
    /// Path (or pseudo-name) of the file the finding belongs to
    pub file: String,
    /// `true` for heuristic findings, `false` for high-confidence errors
    pub experimental: bool,
}

impl ValidationError {
    /// Create a heuristic finding.
    #[must_use]
    pub fn heuristic(message: impl Into<String>, line: usize, file: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
            file: file.into(),
            experimental: true,
        }
    }

    /// Create a high-confidence error.
    #[must_use]
    pub fn real(message: impl Into<String>, line: usize, file: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
            file: file.into(),
            experimental: false,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.experimental {
            write!(f, "At {}:{}: {}", self.file, self.line, self.message)
        } else {
            write!(f, "REAL ERROR: At {}:{}: {}", self.file, self.line, self.message)
        }
    }
}
