//! Error taxonomy for loading, validating and running the network.

use std::path::PathBuf;

/// Every failure the inference pipeline can report.
///
/// Nothing is recovered: the first error aborts the run and no partial
/// output is written.
#[derive(thiserror::Error, Debug)]
pub enum AnnError {
    /// File missing or unreadable.
    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token that is not a finite real number.
    #[error("invalid number '{token}' in {source_name}")]
    Parse { source_name: String, token: String },

    /// A parsed element count (or derived count) disagrees with the expected one.
    #[error("size mismatch in {what} (expected {expected}, got {actual})")]
    SizeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// A tabular row whose width differs from the first row.
    #[error("column mismatch in {source_name}: row {row} has {actual} columns, expected {expected}")]
    ColumnMismatch {
        source_name: String,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// An element count that is not an exact multiple of the dimension it is split by.
    #[error("{what} has {len} values, which is not a multiple of {divisor}")]
    Shape {
        what: String,
        len: usize,
        divisor: usize,
    },

    /// Incompatible operands of a matrix operation.
    #[error("{op} dimension mismatch: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("no numeric data found in {source_name}")]
    EmptySource { source_name: String },

    /// A tabular vector file that is neither 1xN nor Nx1.
    #[error("vector file {source_name} must be 1xN or Nx1, got {rows}x{cols}")]
    NotAVector {
        source_name: String,
        rows: usize,
        cols: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AnnError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnnError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn size_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        AnnError::SizeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, AnnError>;
