//! The in-memory CSV table.
//!
//! [`CsvTable`] ties the parsed input to its derived output file: opening a
//! table mirrors the input into `<input>_OUT.csv`, parses the header and
//! data rows into memory, and keeps the output handle open for appends.
//! Reads always reflect the rows present at construction time; appends go
//! to the output file only.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use crate::error::CsvTableError;
use crate::format::SENTINEL;
use crate::reader::read_table;
use crate::writer::{OutputFile, WriteStats};

/// A comma-delimited table loaded from a file, with a mirrored output file
/// that accepts appended rows.
///
/// Both file handles are acquired in [`CsvTable::open`] and released when
/// the table is dropped, on every exit path. A single table owns its
/// output path exclusively; constructing two tables over the same input
/// concurrently makes their `_OUT.csv` writes collide.
pub struct CsvTable {
    /// Column names from the first input record.
    header: Vec<String>,
    /// Data rows in file order.
    rows: Vec<Vec<String>>,
    /// The derived output file.
    output: OutputFile,
}

impl CsvTable {
    /// Open `path`, mirror it into the derived output file, and parse it.
    ///
    /// The output file is a byte-for-byte copy of the input at the moment
    /// this returns; the first input record becomes the header and every
    /// later record a data row.
    ///
    /// # Errors
    ///
    /// [`CsvTableError::FileOpen`] if the input or output path cannot be
    /// opened. A failed construction leaves no usable table and no open
    /// handles.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CsvTableError> {
        let path = path.as_ref();
        let mut input = File::open(path).map_err(|source| CsvTableError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        // Mirror first, then rewind for the parse pass.
        let output = OutputFile::create(path, &mut input)?;
        input.seek(SeekFrom::Start(0))?;

        let parsed = read_table(input)?;
        tracing::debug!(
            columns = parsed.header.len(),
            rows = parsed.rows.len(),
            output = %output.path().display(),
            "loaded csv table"
        );

        Ok(Self {
            header: parsed.header,
            rows: parsed.rows,
            output,
        })
    }

    /// First header position equal to `name`.
    ///
    /// Header names are not required to be unique; lookup always returns
    /// the first match.
    pub fn column_index(&self, name: &str) -> Result<usize, CsvTableError> {
        self.header
            .iter()
            .position(|column| column.as_str() == name)
            .ok_or_else(|| CsvTableError::ColumnNotFound(name.to_string()))
    }

    /// Resolve a name→value mapping to an index→value mapping.
    ///
    /// Keys are processed in sorted order, so if two names were ever to
    /// resolve to the same index, the later-sorted key deterministically
    /// wins.
    pub fn column_indices(
        &self,
        values: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<usize, String>, CsvTableError> {
        let mut indexed = BTreeMap::new();
        for (name, value) in values {
            indexed.insert(self.column_index(name)?, value.clone());
        }
        Ok(indexed)
    }

    /// Append one row to the output file, keyed by column name.
    ///
    /// Builds a header-width row pre-filled with [`SENTINEL`], overwrites
    /// the slots named in `values`, and appends the formatted result to
    /// the output file on a new line. The in-memory rows are not touched:
    /// reads keep reflecting the rows present at construction time.
    ///
    /// # Errors
    ///
    /// [`CsvTableError::ColumnNotFound`] if any key is missing from the
    /// header; nothing is written in that case.
    pub fn append_row(&mut self, values: &BTreeMap<String, String>) -> Result<(), CsvTableError> {
        let indexed = self.column_indices(values)?;
        let mut row = vec![SENTINEL.to_string(); self.header.len()];
        for (index, value) in indexed {
            row[index] = value;
        }
        self.output.append_row(&row)
    }

    /// All values of the named column, one per data row.
    pub fn column_values(&self, name: &str) -> Result<Vec<String>, CsvTableError> {
        self.column_values_at(self.column_index(name)?)
    }

    /// All values at a column index, one per data row.
    ///
    /// Fails with [`CsvTableError::FieldIndexOutOfRange`] if any row is
    /// narrower than the requested index.
    pub fn column_values_at(&self, index: usize) -> Result<Vec<String>, CsvTableError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, fields)| {
                fields
                    .get(index)
                    .cloned()
                    .ok_or(CsvTableError::FieldIndexOutOfRange {
                        row,
                        index,
                        width: fields.len(),
                    })
            })
            .collect()
    }

    /// Column vectors for several indices, in requested order.
    pub fn columns_by_index(&self, indices: &[usize]) -> Result<Vec<Vec<String>>, CsvTableError> {
        indices
            .iter()
            .map(|&index| self.column_values_at(index))
            .collect()
    }

    /// Column vectors for several names, in requested order.
    pub fn columns_by_name(&self, names: &[&str]) -> Result<Vec<Vec<String>>, CsvTableError> {
        names.iter().map(|name| self.column_values(name)).collect()
    }

    /// The row at `index`.
    pub fn row_at(&self, index: usize) -> Result<&[String], CsvTableError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(CsvTableError::RowIndexOutOfRange {
                index,
                row_count: self.rows.len(),
            })
    }

    /// Rows in `[start, end)`, in order. `start == end` yields empty.
    ///
    /// A reversed range or a bound past the row count fails with
    /// [`CsvTableError::InvalidRange`].
    pub fn row_range(&self, start: usize, end: usize) -> Result<&[Vec<String>], CsvTableError> {
        if end < start || end > self.rows.len() {
            return Err(CsvTableError::InvalidRange {
                start,
                end,
                row_count: self.rows.len(),
            });
        }
        Ok(&self.rows[start..end])
    }

    /// Column names from the first input record.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All data rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if the table holds no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Path of the derived output file.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        self.output.path()
    }

    /// Statistics for the output file.
    #[must_use]
    pub fn stats(&self) -> &WriteStats {
        self.output.stats()
    }

    /// Flush the output file to disk.
    pub fn flush(&mut self) -> Result<(), CsvTableError> {
        self.output.flush()
    }
}

/// Human-readable dump: each data row's fields space-joined, one row per
/// line, a newline after every row including the last. The header is not
/// rendered.
impl fmt::Display for CsvTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
