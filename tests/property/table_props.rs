//! Property-based tests for parsing, row formatting, and appends.

use std::collections::BTreeMap;

use proptest::prelude::*;
use tempfile::tempdir;

use csv_table::{format_row, CsvTable, SENTINEL};

/// Strategy for a single field that survives the no-quoting dialect:
/// no commas, newlines, or carriage returns, non-empty so blank-line
/// skipping cannot swallow a single-column row, and never the sentinel.
fn field_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}".prop_filter("field must not be the sentinel", |s| s.as_str() != SENTINEL)
}

/// Strategy for a well-formed table: a header of `width` names and rows of
/// exactly `width` fields each. Header names may repeat.
fn table_strategy() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
    (1usize..6).prop_flat_map(|width| {
        (
            prop::collection::vec(field_strategy(), width..=width),
            prop::collection::vec(
                prop::collection::vec(field_strategy(), width..=width),
                0..6,
            ),
        )
    })
}

/// Strategy for a header of distinct names plus an optional value per
/// column, modeling the name-keyed append map.
fn append_case_strategy() -> impl Strategy<Value = (Vec<String>, Vec<Option<String>>)> {
    prop::collection::btree_set(field_strategy(), 1..6)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_flat_map(|header| {
            let width = header.len();
            (
                Just(header),
                prop::collection::vec(prop::option::of(field_strategy()), width..=width),
            )
        })
}

/// Strategy for a row mixing ordinary fields and sentinels.
fn mixed_row_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![field_strategy(), Just(SENTINEL.to_string())],
        1..8,
    )
}

fn write_input(header: &[String], rows: &[Vec<String>], trailing_newline: bool) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);
    lines.push(header.join(","));
    for row in rows {
        lines.push(row.join(","));
    }
    let mut content = lines.join("\n");
    if trailing_newline {
        content.push('\n');
    }
    content
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any row, the formatted output carries exactly width - 1
    // delimiters, however many sentinel fields it contains.
    #[test]
    fn property_format_row_delimiter_count(fields in mixed_row_strategy()) {
        let formatted = format_row(&fields);
        prop_assert_eq!(formatted.matches(',').count(), fields.len() - 1);
    }

    // For any row of non-sentinel, non-empty fields, splitting the
    // formatted output on `,` reproduces the fields exactly.
    #[test]
    fn property_format_row_split_roundtrip(
        fields in prop::collection::vec(field_strategy(), 1..8)
    ) {
        let formatted = format_row(&fields);
        let split: Vec<&str> = formatted.split(',').collect();
        prop_assert_eq!(split, fields.iter().map(String::as_str).collect::<Vec<_>>());
    }

    // Sentinel fields split back as empty strings in their positions.
    #[test]
    fn property_format_row_sentinel_positions_empty(fields in mixed_row_strategy()) {
        let formatted = format_row(&fields);
        let split: Vec<&str> = formatted.split(',').collect();
        prop_assert_eq!(split.len(), fields.len());
        for (part, field) in split.iter().zip(&fields) {
            if field.as_str() == SENTINEL {
                prop_assert_eq!(*part, "");
            } else {
                prop_assert_eq!(*part, field.as_str());
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // For any well-formed input with N data lines and header width W:
    // parsed row count is N, header length is W, the output file is a
    // byte copy of the input, name lookup inverts header positions, and
    // the row-range identities hold.
    #[test]
    fn property_parse_and_accessors(
        (header, rows) in table_strategy(),
        trailing_newline in any::<bool>()
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.csv");
        let content = write_input(&header, &rows, trailing_newline);
        std::fs::write(&path, &content).unwrap();

        let table = CsvTable::open(&path).unwrap();

        prop_assert_eq!(table.header(), header.as_slice());
        prop_assert_eq!(table.row_count(), rows.len());
        prop_assert_eq!(table.rows(), rows.as_slice());

        // Construction mirrors the input byte-for-byte.
        let mirrored = std::fs::read(table.output_path()).unwrap();
        prop_assert_eq!(mirrored, content.into_bytes());

        // Lookup inverts header positions, first match winning.
        for name in &header {
            let index = table.column_index(name).unwrap();
            prop_assert_eq!(&table.header()[index], name);
            prop_assert_eq!(index, header.iter().position(|h| h == name).unwrap());
        }

        // Every column reads back positionally.
        for index in 0..header.len() {
            let column = table.column_values_at(index).unwrap();
            prop_assert_eq!(column.len(), rows.len());
            for (row, value) in rows.iter().zip(&column) {
                prop_assert_eq!(&row[index], value);
            }
        }

        // Range identities.
        for at in 0..=table.row_count() {
            prop_assert!(table.row_range(at, at).unwrap().is_empty());
        }
        prop_assert_eq!(table.row_range(0, table.row_count()).unwrap(), rows.as_slice());
    }

    // For any subset of columns supplied by name, the appended line fills
    // the named slots and suppresses the rest, and the in-memory table is
    // unchanged.
    #[test]
    fn property_append_row_wire_format(
        (header, supplied) in append_case_strategy()
    ) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.csv");
        let input_content = header.join(",");
        std::fs::write(&path, &input_content).unwrap();

        let mut table = CsvTable::open(&path).unwrap();

        let mut values = BTreeMap::new();
        for (name, value) in header.iter().zip(&supplied) {
            if let Some(value) = value {
                values.insert(name.clone(), value.clone());
            }
        }
        table.append_row(&values).unwrap();

        let expected_line: Vec<&str> = supplied
            .iter()
            .map(|value| value.as_deref().unwrap_or(""))
            .collect();
        let expected = format!("{}\n{}", input_content, expected_line.join(","));

        let content = std::fs::read_to_string(table.output_path()).unwrap();
        prop_assert_eq!(content, expected);
        prop_assert_eq!(table.row_count(), 0);
        prop_assert_eq!(table.stats().appended_rows, 1);
    }
}
