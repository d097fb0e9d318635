use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
/// Conversion error
pub enum CsvError {
    /// The field layout has to be inferred from the first record but the
    /// collection holds none.
    #[error("The specified collection must not be empty")]
    EmptyInput,

    /// A field value (or the field list of a type) could not be read.
    #[error("FieldAccess from `{field}`: {reason}")]
    FieldAccess { field: String, reason: String },

    /// The output sink refused the generated text.
    #[error("Sink from: {0}")]
    Sink(#[from] io::Error),
}

impl CsvError {
    pub(crate) fn field_access(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CsvError::FieldAccess {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
