//! Error module
//!
//! Defines the crate's error type using `thiserror`. All table operations
//! fail synchronously with a [`CsvTableError`]; there is no retry or
//! internal recovery anywhere in the crate.

use std::path::PathBuf;
use thiserror::Error;

/// The error type for all table operations.
///
/// Lookup failures carry enough context to identify the offending column
/// name or index, so callers can branch on the outcome without losing the
/// information the failure was raised with.
#[derive(Error, Debug)]
pub enum CsvTableError {
    /// A column name lookup failed against the header.
    #[error("column \"{0}\" not found in header")]
    ColumnNotFound(String),

    /// A row access went past the stored row count.
    #[error("row index {index} out of range (table has {row_count} rows)")]
    RowIndexOutOfRange {
        /// The requested row index.
        index: usize,
        /// Number of rows the table holds.
        row_count: usize,
    },

    /// A row range was reversed or exceeded the stored row count.
    #[error("invalid row range {start}..{end} (table has {row_count} rows)")]
    InvalidRange {
        /// Inclusive start of the requested range.
        start: usize,
        /// Exclusive end of the requested range.
        end: usize,
        /// Number of rows the table holds.
        row_count: usize,
    },

    /// A column accessor hit a row narrower than the requested index.
    ///
    /// The input format does not enforce that every row matches the header
    /// width, so positional column reads check each row before indexing.
    #[error("row {row} has {width} fields, no field at column index {index}")]
    FieldIndexOutOfRange {
        /// The row that was too narrow.
        row: usize,
        /// The requested column index.
        index: usize,
        /// The actual field count of that row.
        width: usize,
    },

    /// The input or output path could not be opened.
    ///
    /// Construction fails atomically on this error; no partially
    /// initialized table is usable afterwards.
    #[error("failed to open {path:?}: {source}")]
    FileOpen {
        /// The path that could not be opened.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// CSV record parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General I/O error while copying, appending, or flushing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
