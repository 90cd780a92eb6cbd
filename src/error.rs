//! Error handling types and utilities.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized Result type for vla-table operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the application layer.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when the paper catalogue cannot be loaded.
///
/// Loading is the only terminal failure in the crate: the caller is expected to
/// show an empty-state message and not retry.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The CSV file could not be read.
    #[error("failed to read dataset at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The header row could not be parsed.
    #[error("failed to parse dataset header: {0}")]
    Csv(#[from] csv::Error),
    /// The input contained no header row at all.
    #[error("dataset has no header row")]
    MissingHeader,
}

/// A non-fatal problem with a single CSV record.
///
/// Records with issues are either skipped (unparseable) or kept with missing
/// cells treated as absent (field-count mismatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    /// 1-based line number in the source, when the parser knows it.
    pub line: Option<u64>,
    pub kind: RowIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssueKind {
    /// The record could not be parsed and was dropped.
    Malformed(String),
    /// The record had fewer fields than the header; it was kept.
    TooFewFields { expected: usize, found: usize },
    /// The record had more fields than the header; surplus cells were dropped.
    TooManyFields { expected: usize, found: usize },
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {}: ", line)?;
        }
        match &self.kind {
            RowIssueKind::Malformed(message) => write!(f, "malformed record ({})", message),
            RowIssueKind::TooFewFields { expected, found } => {
                write!(f, "too few fields: expected {}, found {}", expected, found)
            }
            RowIssueKind::TooManyFields { expected, found } => {
                write!(f, "too many fields: expected {}, found {}", expected, found)
            }
        }
    }
}
