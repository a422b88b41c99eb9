//! Row serialization for the output file.
//!
//! A row is joined with bare commas, no quoting. Fields equal to the
//! [`SENTINEL`] serialize as empty strings, so a formatted row always
//! carries exactly `width - 1` delimiters no matter how many fields were
//! left unsupplied.

/// Placeholder value for fields not supplied to an append.
///
/// The sentinel only exists in memory; on the wire it becomes an empty
/// field between delimiters.
pub const SENTINEL: &str = "NULL";

/// Serialize a row for the output file.
///
/// Joins the fields with `,`, emitting sentinel fields as empty strings.
/// All other values are written as their literal text.
///
/// # Example
///
/// ```rust,ignore
/// let row = vec!["NULL".to_string(), "X".to_string(), "NULL".to_string()];
/// assert_eq!(format_row(&row), ",X,");
/// ```
#[must_use]
pub fn format_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| {
            if field.as_str() == SENTINEL {
                ""
            } else {
                field.as_str()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
