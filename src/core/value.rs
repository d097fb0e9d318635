//! Reading field values out of a record.
//!
//! Records are read through serde: the record is serialized once into a list
//! of `(field name, value)` pairs, where every value is rendered to its
//! canonical text. Values that have no text form (sequences, maps, nested
//! structs, bytes) are remembered as unreadable and only turn into an error
//! when a column actually asks for them, so ignored fields may hold anything.

use std::fmt::Display;

use serde::ser::{self, Impossible, Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use crate::{core::field::FieldDescriptor, error::CsvError};

/// Error raised inside the serde plumbing, turned into
/// [`CsvError::FieldAccess`] once the failing field is known.
#[derive(Error, Debug)]
#[error("{0}")]
pub(crate) struct AccessError(pub(crate) String);

impl AccessError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        AccessError(reason.into())
    }
}

impl ser::Error for AccessError {
    fn custom<T: Display>(msg: T) -> Self {
        AccessError(msg.to_string())
    }
}

impl serde::de::Error for AccessError {
    fn custom<T: Display>(msg: T) -> Self {
        AccessError(msg.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Text(String),
    Absent,
    Unreadable(String),
}

/// Field values of one record, in the order serde reported them.
#[derive(Debug)]
pub struct RecordValues {
    type_name: &'static str,
    fields: Vec<(&'static str, FieldValue)>,
}

impl RecordValues {
    /// Serializes `record` and keeps the text of each field.
    pub fn capture<R: Serialize + ?Sized>(record: &R) -> Result<Self, CsvError> {
        let type_name = std::any::type_name::<R>();

        record
            .serialize(RecordSerializer { type_name })
            .map_err(|error| CsvError::field_access(type_name, error.0))
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Field names in declaration order, skipped fields included.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Text of the field described by `descriptor`; `None` stands for a null
    /// or skipped value.
    pub fn value(&self, descriptor: &FieldDescriptor) -> Result<Option<&str>, CsvError> {
        let name = descriptor.intrinsic_name();

        // Same layout for every record, so the declared position almost always hits.
        let entry = self
            .fields
            .get(descriptor.order())
            .filter(|(field, _)| *field == name)
            .or_else(|| self.fields.iter().find(|(field, _)| *field == name));

        match entry {
            Some((_, FieldValue::Text(text))) => Ok(Some(text.as_str())),
            Some((_, FieldValue::Absent)) => Ok(None),
            Some((_, FieldValue::Unreadable(reason))) => Err(CsvError::field_access(name, reason)),
            None => Err(CsvError::field_access(
                name,
                format!("{} does not expose this field", self.type_name),
            )),
        }
    }
}

struct RecordSerializer {
    type_name: &'static str,
}

impl RecordSerializer {
    fn not_a_struct(&self, kind: &str) -> AccessError {
        AccessError(format!("records must be structs, {} is a {}", self.type_name, kind))
    }
}

macro_rules! reject_record {
    ($($method:ident($ty:ty) => $kind:literal,)*) => {
        $(
            fn $method(self, _v: $ty) -> Result<Self::Ok, Self::Error> {
                Err(self.not_a_struct($kind))
            }
        )*
    };
}

impl Serializer for RecordSerializer {
    type Ok = RecordValues;
    type Error = AccessError;
    type SerializeSeq = Impossible<RecordValues, AccessError>;
    type SerializeTuple = Impossible<RecordValues, AccessError>;
    type SerializeTupleStruct = Impossible<RecordValues, AccessError>;
    type SerializeTupleVariant = Impossible<RecordValues, AccessError>;
    type SerializeMap = Impossible<RecordValues, AccessError>;
    type SerializeStruct = StructCapture;
    type SerializeStructVariant = Impossible<RecordValues, AccessError>;

    reject_record! {
        serialize_bool(bool) => "boolean",
        serialize_i8(i8) => "number",
        serialize_i16(i16) => "number",
        serialize_i32(i32) => "number",
        serialize_i64(i64) => "number",
        serialize_i128(i128) => "number",
        serialize_u8(u8) => "number",
        serialize_u16(u16) => "number",
        serialize_u32(u32) => "number",
        serialize_u64(u64) => "number",
        serialize_u128(u128) => "number",
        serialize_f32(f32) => "number",
        serialize_f64(f64) => "number",
        serialize_char(char) => "character",
        serialize_str(&str) => "string",
        serialize_bytes(&[u8]) => "byte array",
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Err(self.not_a_struct("missing value"))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Err(self.not_a_struct("unit value"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(RecordValues {
            type_name: self.type_name,
            fields: Vec::new(),
        })
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.not_a_struct("enum"))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        Err(self.not_a_struct("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(self.not_a_struct("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(self.not_a_struct("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(self.not_a_struct("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(self.not_a_struct("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Err(self.not_a_struct("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(StructCapture {
            values: RecordValues {
                type_name: self.type_name,
                fields: Vec::with_capacity(len),
            },
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(self.not_a_struct("enum"))
    }
}

struct StructCapture {
    values: RecordValues,
}

impl SerializeStruct for StructCapture {
    type Ok = RecordValues;
    type Error = AccessError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        let value = match value.serialize(ValueSerializer) {
            Ok(Some(text)) => FieldValue::Text(text),
            Ok(None) => FieldValue::Absent,
            Err(error) => FieldValue::Unreadable(error.0),
        };
        self.values.fields.push((key, value));
        Ok(())
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), Self::Error> {
        self.values.fields.push((key, FieldValue::Absent));
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        Ok(self.values)
    }
}

/// Renders one scalar to its canonical text, `None` for null-like values.
pub(crate) struct ValueSerializer;

impl ValueSerializer {
    fn text(value: impl Display) -> Result<Option<String>, AccessError> {
        Ok(Some(value.to_string()))
    }

    fn not_scalar(kind: &str) -> AccessError {
        AccessError(format!("{} values have no CSV text form", kind))
    }
}

macro_rules! scalar_to_text {
    ($($method:ident($ty:ty),)*) => {
        $(
            fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
                Self::text(v)
            }
        )*
    };
}

impl Serializer for ValueSerializer {
    type Ok = Option<String>;
    type Error = AccessError;
    type SerializeSeq = Impossible<Option<String>, AccessError>;
    type SerializeTuple = Impossible<Option<String>, AccessError>;
    type SerializeTupleStruct = Impossible<Option<String>, AccessError>;
    type SerializeTupleVariant = Impossible<Option<String>, AccessError>;
    type SerializeMap = Impossible<Option<String>, AccessError>;
    type SerializeStruct = Impossible<Option<String>, AccessError>;
    type SerializeStructVariant = Impossible<Option<String>, AccessError>;

    scalar_to_text! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_i128(i128),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_u128(u128),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok, Self::Error> {
        Err(Self::not_scalar("byte array"))
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Self::text(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(Self::not_scalar("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(Self::not_scalar("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(Self::not_scalar("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(Self::not_scalar("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Err(Self::not_scalar("map"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Err(Self::not_scalar("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(Self::not_scalar("struct variant"))
    }
}
