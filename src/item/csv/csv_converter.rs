use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        field::{CsvRecord, RecordLayout},
        introspect::{describe, describe_type},
        item::ItemWriter,
    },
    error::CsvError,
    item::csv::csv_writer::CsvItemWriterBuilder,
};

/// Converts `records` into a quoted CSV string.
///
/// The field layout is taken from the first record, so the collection must
/// not be empty.
///
/// ```
/// use records2csv::{CsvError, CsvRecord, to_csv_string};
///
/// #[derive(serde::Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct User {
///     user: String,
///     email: String,
///     user_id: u64,
/// }
///
/// impl CsvRecord for User {}
///
/// let users = vec![
///     User { user: "testuser".into(), email: "test@test.org".into(), user_id: 1 },
///     User { user: "test, \"user\"".into(), email: "another@test.org".into(), user_id: 2 },
/// ];
///
/// let csv = to_csv_string(&users).unwrap();
/// assert_eq!(
///     csv,
///     "\"user\",\"email\",\"userId\"\n\
///      \"testuser\",\"test@test.org\",\"1\"\n\
///      \"test, \"\"user\"\"\",\"another@test.org\",\"2\""
/// );
///
/// let empty: Vec<User> = Vec::new();
/// assert!(matches!(to_csv_string(&empty), Err(CsvError::EmptyInput)));
/// ```
pub fn to_csv_string<T>(records: &[T]) -> Result<String, CsvError>
where
    T: Serialize + CsvRecord,
{
    let mut buffer: Vec<u8> = Vec::new();
    write_csv(records, &mut buffer)?;
    into_string(buffer)
}

/// Converts `records` into a quoted CSV string, accepting an empty
/// collection.
///
/// A non-empty collection is converted exactly like [`to_csv_string`]. An
/// empty one yields the header line described from `T` itself, followed by
/// its newline.
pub fn to_csv_string_for_type<T>(records: &[T]) -> Result<String, CsvError>
where
    T: Serialize + for<'de> Deserialize<'de> + CsvRecord,
{
    let mut buffer: Vec<u8> = Vec::new();
    write_csv_for_type(records, &mut buffer)?;
    into_string(buffer)
}

/// Streams `records` into `sink` as quoted CSV.
///
/// Output is byte-identical to [`to_csv_string`]. The sink is flushed once
/// the last row has been written; the first sink failure aborts the rest.
pub fn write_csv<T, W>(records: &[T], sink: W) -> Result<(), CsvError>
where
    T: Serialize + CsvRecord,
    W: Write,
{
    if records.is_empty() {
        return Err(CsvError::EmptyInput);
    }

    write_with_layout(records, sink, None)
}

/// Streams `records` into `sink`, accepting an empty collection.
///
/// Rows are always read through `Serialize`, so the layout comes from the
/// first record whenever there is one. The `Deserialize` field list of `T`
/// is only used for the header of an empty collection.
pub fn write_csv_for_type<T, W>(records: &[T], sink: W) -> Result<(), CsvError>
where
    T: Serialize + for<'de> Deserialize<'de> + CsvRecord,
    W: Write,
{
    let layout = match records.first() {
        Some(first) => describe(first)?,
        None => describe_type::<T>()?,
    };
    write_with_layout(records, sink, Some(layout))
}

fn write_with_layout<T, W>(
    records: &[T],
    sink: W,
    layout: Option<RecordLayout>,
) -> Result<(), CsvError>
where
    T: Serialize + CsvRecord,
    W: Write,
{
    let builder = match layout {
        Some(layout) => CsvItemWriterBuilder::new().layout(layout),
        None => CsvItemWriterBuilder::new(),
    };
    let writer = builder.from_writer::<T, W>(sink);

    writer.open()?;
    writer.write(records)?;
    writer.close()
}

fn into_string(buffer: Vec<u8>) -> Result<String, CsvError> {
    String::from_utf8(buffer)
        .map_err(|error| CsvError::Sink(io::Error::new(io::ErrorKind::InvalidData, error)))
}
