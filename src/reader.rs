//! CSV input parsing.
//!
//! Reads an already-open input file into an in-memory header plus data
//! rows. The reader is configured for this crate's primitive dialect:
//! quoting is disabled (a `"` is an ordinary byte and a comma inside quotes
//! still splits the field), record widths are not validated against the
//! header, and both LF and CRLF line endings are accepted.

use csv::ReaderBuilder;
use std::fs::File;

use crate::error::CsvTableError;

/// Parsed contents of an input file.
///
/// The first record becomes the header; every later record becomes a data
/// row. Blank lines are skipped, so a trailing newline does not produce an
/// empty row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// Column names from the first record. Empty for an empty input.
    pub header: Vec<String>,
    /// Data rows in file order. Widths may differ from the header.
    pub rows: Vec<Vec<String>>,
}

/// Read an open input file into a [`ParsedTable`].
///
/// The file is consumed from its current position; callers rewind before
/// handing it over if it has already been read.
pub fn read_table(input: File) -> Result<ParsedTable, CsvTableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let mut parsed = ParsedTable::default();
    let mut first = true;
    for result in reader.records() {
        let record = result?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if first {
            parsed.header = fields;
            first = false;
        } else {
            parsed.rows.push(fields);
        }
    }

    Ok(parsed)
}
