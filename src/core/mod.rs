/// Encoding of headers and rows into quoted CSV text
pub mod encoder;

/// Field descriptors, record layouts and the per-type metadata provider
pub mod field;

/// Discovery of record fields through serde
pub mod introspect;

/// Chunked writer abstraction
pub mod item;

/// Reading field values out of records
pub mod value;
