mod common;

use std::io::{self, ErrorKind};

use common::{MockSink, PlainUser, two_users};

use mockall::Sequence;
use records2csv::{
    CsvError, CsvRecord, core::item::ItemWriter, item::csv::csv_writer::CsvItemWriterBuilder,
    to_csv_string, to_csv_string_for_type, write_csv, write_csv_for_type,
};
use serde::{Deserialize, Serialize};

#[test]
fn empty_collection_fails_with_empty_input() {
    let empty: Vec<PlainUser> = Vec::new();
    let mut sink = MockSink::new();
    sink.expect_write().never();
    sink.expect_flush().never();

    assert!(matches!(to_csv_string(&empty), Err(CsvError::EmptyInput)));
    assert!(matches!(write_csv(&empty, &mut sink), Err(CsvError::EmptyInput)));
}

#[test]
fn sink_write_failure_aborts_the_conversion() {
    let mut sink = MockSink::new();
    sink.expect_write()
        .times(1)
        .returning(|_| Err(io::Error::new(ErrorKind::Other, "disk full")));
    sink.expect_flush().never();

    let result = write_csv(&two_users::<PlainUser>(), &mut sink);

    match result {
        Err(CsvError::Sink(error)) => {
            assert_eq!(error.kind(), ErrorKind::Other);
            assert_eq!(error.to_string(), "disk full");
        }
        other => panic!("expected a sink error, got {:?}", other),
    }
}

#[test]
fn sink_failure_after_the_header_stops_the_remaining_rows() {
    let mut seq = Sequence::new();
    let mut sink = MockSink::new();

    // header, header separator
    sink.expect_write()
        .times(2)
        .in_sequence(&mut seq)
        .returning(|buf| Ok(buf.len()));
    // first row
    sink.expect_write()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(io::Error::new(ErrorKind::BrokenPipe, "reader went away")));
    sink.expect_flush().never();

    let result = write_csv(&two_users::<PlainUser>(), &mut sink);

    assert!(matches!(result, Err(CsvError::Sink(ref e)) if e.kind() == ErrorKind::BrokenPipe));
}

#[test]
fn sink_flush_failure_is_reported() {
    let mut sink = MockSink::new();
    sink.expect_write().returning(|buf| Ok(buf.len()));
    sink.expect_flush()
        .times(1)
        .returning(|| Err(io::Error::new(ErrorKind::Other, "flush refused")));

    let result = write_csv_for_type(&two_users::<PlainUser>(), &mut sink);

    assert!(matches!(result, Err(CsvError::Sink(_))));
}

#[test]
fn successful_conversion_flushes_the_sink_once() -> Result<(), CsvError> {
    let mut sink = MockSink::new();
    sink.expect_write().returning(|buf| Ok(buf.len()));
    sink.expect_flush().times(1).returning(|| Ok(()));

    let users: Vec<PlainUser> = two_users();
    write_csv(&users, &mut sink)?;
    Ok(())
}

#[test]
fn non_scalar_field_fails_with_field_access() {
    #[derive(Serialize)]
    struct Order {
        id: u32,
        lines: Vec<String>,
    }

    impl CsvRecord for Order {}

    let orders = vec![Order {
        id: 1,
        lines: vec!["book".to_string()],
    }];

    match to_csv_string(&orders) {
        Err(CsvError::FieldAccess { field, .. }) => assert_eq!(field, "lines"),
        other => panic!("expected a field access error, got {:?}", other),
    }
}

#[test]
fn ignored_non_scalar_field_is_never_read() -> Result<(), CsvError> {
    #[derive(Serialize)]
    struct Order {
        id: u32,
        lines: Vec<String>,
    }

    impl CsvRecord for Order {
        fn is_ignored(field: &str) -> bool {
            field == "lines"
        }
    }

    let orders = vec![Order {
        id: 1,
        lines: vec!["book".to_string()],
    }];

    assert_eq!(to_csv_string(&orders)?, "\"id\"\n\"1\"");
    Ok(())
}

#[test]
fn explicit_type_reads_renames_from_the_serialize_side() -> Result<(), CsvError> {
    #[derive(Serialize, Deserialize)]
    struct Legacy {
        #[serde(rename(serialize = "code", deserialize = "legacy_code"))]
        code: String,
    }

    impl CsvRecord for Legacy {}

    let records = vec![Legacy {
        code: "X1".to_string(),
    }];

    assert_eq!(to_csv_string_for_type(&records)?, "\"code\"\n\"X1\"");
    assert_eq!(to_csv_string_for_type(&records)?, to_csv_string(&records)?);
    Ok(())
}

#[test]
fn primitive_records_cannot_be_converted() {
    #[derive(Serialize)]
    struct Celsius(f64);

    impl CsvRecord for Celsius {}

    let temperatures = vec![Celsius(21.5)];

    assert!(matches!(
        to_csv_string(&temperatures),
        Err(CsvError::FieldAccess { .. })
    ));
}

#[test]
fn writer_closed_without_records_or_layout_fails() {
    let mut sink = MockSink::new();
    sink.expect_write().never();
    sink.expect_flush().never();

    let writer = CsvItemWriterBuilder::new().from_writer::<PlainUser, _>(&mut sink);

    assert!(matches!(writer.open(), Ok(())));
    assert!(matches!(writer.close(), Err(CsvError::EmptyInput)));
}
