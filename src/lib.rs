//! Minimal CSV table library
//!
//! Loads a comma-delimited text file into an in-memory header + rows table,
//! mirrors the input byte-for-byte into a derived `<input>_OUT.csv` file, and
//! appends new rows supplied as column-name-keyed values to that output file.
//!
//! The dialect is deliberately primitive: fields are split on bare commas
//! with no quoting or escaping, the first line is always the header, and the
//! `"NULL"` sentinel marks fields that were not supplied (it serializes to an
//! empty field in the output).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::BTreeMap;
//! use csv_table::CsvTable;
//!
//! let mut table = CsvTable::open("measurements.csv")?;
//! let temps = table.column_values("temperature")?;
//!
//! let mut row = BTreeMap::new();
//! row.insert("temperature".to_string(), "23.5".to_string());
//! table.append_row(&row)?; // written to measurements_OUT.csv
//! ```

pub mod error;
pub mod format;
pub mod reader;
pub mod table;
pub mod writer;

pub use error::CsvTableError;
pub use format::{format_row, SENTINEL};
pub use reader::ParsedTable;
pub use table::CsvTable;
pub use writer::{derive_output_path, OutputFile, WriteStats};
