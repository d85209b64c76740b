use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a source file into a [`Table`](super::model::Table).
///
/// Every variant is fatal for a run: nothing downstream of the loader sees a
/// partially read table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{ext}")]
    UnsupportedFormat { ext: String },

    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    /// A data row whose width differs from the header.
    #[error("{path}, row {row}: expected {expected} fields, found {found}")]
    Ragged {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {path}: {reason}")]
    Json { path: PathBuf, reason: String },

    #[error("malformed parquet in {path}: {reason}")]
    Parquet { path: PathBuf, reason: String },
}

/// A table lacks columns that a later stage depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("required column(s) missing: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// A row pushed into a table does not match the table's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} fields, found {found}")]
pub struct ShapeError {
    pub expected: usize,
    pub found: usize,
}
