#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 <div align="center">
   <h1>records2csv</h1>
   <h3>Fully quoted RFC 4180 CSV from any collection of serde records</h3>

   ![license](https://shields.io/badge/license-MIT%2FApache--2.0-blue)

  </div>

 # records2csv

 **records2csv** turns a slice of plain Rust structs into CSV text in which
 every field is individually wrapped in double quotes. Embedded quotes are
 doubled, commas and line breaks inside values are kept literally, so the
 output can be read back by any RFC 4180 parser whatever the content of the
 records.

 ## Core Concepts

- **Record:** any struct deriving `serde::Serialize`. Serde reports the fields
  in declaration order; that order is the column order.
- **CsvRecord:** the per-type metadata provider. An empty `impl` means "no
  metadata"; overriding `display_name` renames a column in the header,
  overriding `is_ignored` removes a field from the header and from every row.
- **FieldDescriptor / RecordLayout:** the resolved metadata of each field,
  derived once per conversion and shared by the header and every row so that
  columns always line up.
- **Sink:** either an in-memory `String` or any `std::io::Write`.

 ## Output format

- The header line holds one quoted label per non-ignored field.
- The header is always followed by `\n`; rows are separated by `\n`; the last
  row has no trailing newline.
- `None` and unit values are written as `""`; other scalars use their
  canonical text (`Display`), enum unit variants their variant name.

 ## Getting Started

```rust
use records2csv::{CsvError, CsvRecord, to_csv_string};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct User {
    user: String,
    email: String,
    user_id: u64,
}

impl CsvRecord for User {
    fn display_name(field: &str) -> Option<&'static str> {
        match field {
            "user" => Some("User"),
            _ => None,
        }
    }

    fn is_ignored(field: &str) -> bool {
        field == "userId"
    }
}

fn main() -> Result<(), CsvError> {
    let users = vec![
        User {
            user: "testuser".to_string(),
            email: "test@test.org".to_string(),
            user_id: 1,
        },
        User {
            user: "test, \"user\"".to_string(),
            email: "another@test.org".to_string(),
            user_id: 2,
        },
    ];

    let csv = to_csv_string(&users)?;

    assert_eq!(
        csv,
        "\"User\",\"email\"\n\
         \"testuser\",\"test@test.org\"\n\
         \"test, \"\"user\"\"\",\"another@test.org\""
    );

    Ok(())
}
```

 ## Logging

 The crate logs through the [`log`](https://docs.rs/log) facade: layout
 derivation and written chunks at `debug`, writer completion at `info`.
 Install any logger implementation (for example `env_logger`) to see them.

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 ## Contribution
 Unless you explicitly state otherwise, any contribution intentionally submitted
 for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
 dual licensed as above, without any additional terms or conditions

 */

/// Core module: field descriptors, introspection and encoding
pub mod core;

/// Error types for conversions
pub mod error;

#[doc(inline)]
pub use error::*;

/// CSV converter and writer
pub mod item;

#[doc(inline)]
pub use crate::core::field::{CsvRecord, FieldDescriptor, RecordLayout};

#[doc(inline)]
pub use item::csv::csv_converter::{
    to_csv_string, to_csv_string_for_type, write_csv, write_csv_for_type,
};
