use serde::Serialize;

use crate::{
    core::{field::FieldDescriptor, value::RecordValues},
    error::CsvError,
};

const QUOTE: char = '"';
const SEPARATOR: &str = ",";

/// Wraps `content` in double quotes, doubling every quote inside it.
///
/// ```
/// use records2csv::core::encoder::quote;
///
/// assert_eq!(quote("plain"), r#""plain""#);
/// assert_eq!(quote(r#"test, "user""#), r#""test, ""user""""#);
/// ```
pub fn quote(content: &str) -> String {
    let mut quoted = String::with_capacity(content.len() + 2);
    quoted.push(QUOTE);
    for c in content.chars() {
        if c == QUOTE {
            quoted.push(QUOTE);
        }
        quoted.push(c);
    }
    quoted.push(QUOTE);
    quoted
}

/// Header line for `descriptors`: one quoted label per non-ignored field.
///
/// Returns an empty string when every field is ignored.
pub fn render_header(descriptors: &[FieldDescriptor]) -> String {
    descriptors
        .iter()
        .filter(|descriptor| !descriptor.is_ignored())
        .map(|descriptor| quote(descriptor.label()))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Row line for `record`, columns matching [`render_header`] one to one.
///
/// Null and skipped values are written as `""`.
pub fn render_row<R>(record: &R, descriptors: &[FieldDescriptor]) -> Result<String, CsvError>
where
    R: Serialize + ?Sized,
{
    let values = RecordValues::capture(record)?;

    let cells = descriptors
        .iter()
        .filter(|descriptor| !descriptor.is_ignored())
        .map(|descriptor| {
            let content = values.value(descriptor)?;
            Ok::<_, CsvError>(quote(content.unwrap_or_default()))
        })
        .collect::<Result<Vec<_>, CsvError>>()?;

    Ok(cells.join(SEPARATOR))
}
