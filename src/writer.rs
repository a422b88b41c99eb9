//! Derived output file handling.
//!
//! The output file lives next to the input, named by stripping the input's
//! final extension and appending `_OUT.csv`. On creation it receives a
//! byte-for-byte copy of the input; afterwards it only grows, one
//! newline-prefixed formatted row per append. Every append is flushed so
//! the file on disk always reflects completed calls.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::CsvTableError;
use crate::format::{format_row, SENTINEL};

/// Suffix appended to the extension-stripped input path.
pub const OUTPUT_SUFFIX: &str = "_OUT.csv";

/// Statistics collected while writing the output file.
///
/// Useful for reporting what a session did to the output file without
/// re-reading it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteStats {
    /// Bytes mirrored from the input at construction time.
    pub copied_bytes: u64,
    /// Rows appended since construction.
    pub appended_rows: u64,
    /// Sentinel fields suppressed to empty text across all appends.
    pub sentinel_fields: u64,
}

impl fmt::Display for WriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Output file statistics:")?;
        writeln!(f, "  Copied bytes:    {}", self.copied_bytes)?;
        writeln!(f, "  Appended rows:   {}", self.appended_rows)?;
        write!(f, "  Sentinel fields: {}", self.sentinel_fields)
    }
}

/// The derived output file, owned for the lifetime of the table.
///
/// Dropping the writer flushes any buffered bytes and closes the handle;
/// appends also flush eagerly so observers see each row as soon as the
/// call returns.
pub struct OutputFile {
    /// Buffered handle to the output file.
    writer: BufWriter<File>,
    /// Where the output file lives on disk.
    path: PathBuf,
    /// Running write statistics.
    stats: WriteStats,
}

impl OutputFile {
    /// Create the output file for `input_path` and mirror `input` into it.
    ///
    /// The input file is consumed from its current position; the caller is
    /// responsible for rewinding it afterwards if it needs re-reading.
    /// Fails with [`CsvTableError::FileOpen`] if the output path cannot be
    /// created.
    pub fn create(input_path: &Path, input: &mut File) -> Result<Self, CsvTableError> {
        let path = derive_output_path(input_path);
        let file = File::create(&path).map_err(|source| CsvTableError::FileOpen {
            path: path.clone(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        let copied_bytes = io::copy(input, &mut writer)?;
        writer.flush()?;
        tracing::debug!(
            output = %path.display(),
            copied_bytes,
            "mirrored input into output file"
        );

        Ok(Self {
            writer,
            path,
            stats: WriteStats {
                copied_bytes,
                ..WriteStats::default()
            },
        })
    }

    /// Serialize `fields` and append them, preceded by a newline.
    ///
    /// The leading newline means each call adds exactly one new line after
    /// the existing content, whether or not the copy ended with one.
    pub fn append_row(&mut self, fields: &[String]) -> Result<(), CsvTableError> {
        let line = format_row(fields);
        write!(self.writer, "\n{}", line)?;
        self.writer.flush()?;

        self.stats.appended_rows += 1;
        self.stats.sentinel_fields += fields
            .iter()
            .filter(|field| field.as_str() == SENTINEL)
            .count() as u64;
        tracing::trace!(row = %line, "appended row to output file");

        Ok(())
    }

    /// Flush buffered bytes to disk.
    pub fn flush(&mut self) -> Result<(), CsvTableError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Path of the output file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write statistics accumulated so far.
    #[must_use]
    pub fn stats(&self) -> &WriteStats {
        &self.stats
    }
}

/// Derive the output path: strip the final extension, append `_OUT.csv`.
///
/// `data.csv` becomes `data_OUT.csv`; an extensionless `data` becomes
/// `data_OUT.csv` as well.
#[must_use]
pub fn derive_output_path(input: &Path) -> PathBuf {
    let mut stem = input.with_extension("").into_os_string();
    stem.push(OUTPUT_SUFFIX);
    PathBuf::from(stem)
}
