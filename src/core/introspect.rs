use std::any::type_name;

use log::debug;
use serde::{
    Deserialize, Serialize,
    de::{Deserializer, Visitor},
    forward_to_deserialize_any,
};

use crate::{
    core::{
        field::{CsvRecord, RecordLayout},
        value::{AccessError, RecordValues},
    },
    error::CsvError,
};

/// Describes the fields of `R` by serializing one sample record.
///
/// Fields are listed in declaration order. Fields skipped with
/// `#[serde(skip_serializing_if)]` are still listed; fields marked
/// `#[serde(skip)]` are invisible to serde and therefore to the layout.
///
/// ```
/// use records2csv::core::{field::CsvRecord, introspect::describe};
///
/// #[derive(serde::Serialize)]
/// struct City {
///     name: String,
///     population: u64,
/// }
///
/// impl CsvRecord for City {}
///
/// let city = City { name: "Boston".to_string(), population: 4628910 };
/// let layout = describe(&city).unwrap();
///
/// let labels: Vec<_> = layout.columns().map(|d| d.label()).collect();
/// assert_eq!(labels, vec!["name", "population"]);
/// ```
pub fn describe<R>(record: &R) -> Result<RecordLayout, CsvError>
where
    R: Serialize + CsvRecord + ?Sized,
{
    let values = RecordValues::capture(record)?;
    let layout = RecordLayout::from_names::<R, _>(values.names());

    debug!(
        "Derived {} field descriptors for {} from a sample record",
        layout.len(),
        values.type_name()
    );

    Ok(layout)
}

/// Describes the fields of `R` without any instance at hand.
///
/// The field list is the one serde's `Deserialize` derive hands to
/// `deserialize_struct`. Renames therefore have to agree between the
/// serialize and deserialize side, and `#[serde(alias)]` adds its aliases
/// to the list.
pub fn describe_type<R>() -> Result<RecordLayout, CsvError>
where
    R: for<'de> Deserialize<'de> + CsvRecord,
{
    let name = type_name::<R>();
    let mut fields = None;

    let outcome = R::deserialize(FieldListDeserializer {
        fields: &mut fields,
    });

    let fields = match (fields, outcome) {
        (Some(fields), _) => fields,
        (None, Err(error)) => return Err(CsvError::field_access(name, error.0)),
        (None, Ok(_)) => {
            return Err(CsvError::field_access(
                name,
                "type was built without declaring its fields",
            ));
        }
    };

    let layout = RecordLayout::from_names::<R, _>(fields.iter().copied());

    debug!("Derived {} field descriptors for {}", layout.len(), name);

    Ok(layout)
}

/// Deserializer that never yields a value: it only records the field list a
/// derived `Deserialize` impl asks for.
struct FieldListDeserializer<'a> {
    fields: &'a mut Option<&'static [&'static str]>,
}

impl<'de> Deserializer<'de> for FieldListDeserializer<'_> {
    type Error = AccessError;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(AccessError::new("records must be structs with named fields"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.fields = Some(fields);
        Err(AccessError::new("field list captured"))
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.fields = Some(&[]);
        Err(AccessError::new("field list captured"))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit seq tuple tuple_struct map enum identifier
        ignored_any
    }
}
