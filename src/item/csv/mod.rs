//! Quoted CSV output for collections of serde records.
//!
//! This module turns a slice of records into RFC 4180 text in which every
//! field is wrapped in double quotes, whatever its content.
//!
//! # Module Architecture
//!
//! The CSV module consists of two main components:
//!
//! 1. **Conversion functions** (`to_csv_string`, `write_csv` and their
//!    `_for_type` variants): one call converts a whole collection, either into
//!    a `String` or into any `Write` sink.
//!
//! 2. **CsvItemWriter**: a writer receiving records chunk by chunk through the
//!    [`ItemWriter`](crate::core::item::ItemWriter) trait, for collections
//!    that should never be materialized at once.
//!
//! Both produce byte-identical text: the header line, a newline, then the
//! rows separated by newlines, without a newline after the last row.
//!
//! # Field layout
//!
//! The header and the columns of every row come from one
//! [`RecordLayout`](crate::core::field::RecordLayout). It is described either
//! from the first record (which is why an empty collection is rejected with
//! [`CsvError::EmptyInput`](crate::CsvError::EmptyInput)) or, for an empty
//! collection handed to a `_for_type` variant, from the record type itself
//! when the type also derives `Deserialize`.
//!
//! # Examples
//!
//! ## Renaming and ignoring fields
//!
//! ```
//! use records2csv::{CsvRecord, to_csv_string};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Car {
//!     year: u16,
//!     make: String,
//!     model: String,
//!     internal_ref: u64,
//! }
//!
//! impl CsvRecord for Car {
//!     fn display_name(field: &str) -> Option<&'static str> {
//!         match field {
//!             "make" => Some("Brand"),
//!             _ => None,
//!         }
//!     }
//!
//!     fn is_ignored(field: &str) -> bool {
//!         field == "internal_ref"
//!     }
//! }
//!
//! let cars = vec![
//!     Car { year: 1948, make: "Porsche".into(), model: "356".into(), internal_ref: 7 },
//!     Car {
//!         year: 1967,
//!         make: "Ford".into(),
//!         model: "Mustang \"fastback\"".into(),
//!         internal_ref: 9,
//!     },
//! ];
//!
//! let csv = to_csv_string(&cars).unwrap();
//! assert_eq!(
//!     csv,
//!     "\"year\",\"Brand\",\"model\"\n\
//!      \"1948\",\"Porsche\",\"356\"\n\
//!      \"1967\",\"Ford\",\"Mustang \"\"fastback\"\"\""
//! );
//! ```
//!
//! ## Streaming into a sink
//!
//! ```
//! use records2csv::{CsvRecord, write_csv};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Reading {
//!     sensor: &'static str,
//!     value: Option<f64>,
//! }
//!
//! impl CsvRecord for Reading {}
//!
//! let readings = [
//!     Reading { sensor: "north", value: Some(1.5) },
//!     Reading { sensor: "south", value: None },
//! ];
//!
//! let mut out: Vec<u8> = Vec::new();
//! write_csv(&readings, &mut out).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "\"sensor\",\"value\"\n\"north\",\"1.5\"\n\"south\",\"\""
//! );
//! ```

/// A module providing the one-call conversion functions.
pub mod csv_converter;

/// A module providing facilities for writing CSV data records.
pub mod csv_writer;
