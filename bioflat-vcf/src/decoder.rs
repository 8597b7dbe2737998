use log::debug;
use thiserror::Error;

use crate::header::FieldDescriptor;
use crate::types::{Number, TypedValue, ValueType};

/// A raw value that does not fit its declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionError {
    #[error("{0:?} is not a base-10 integer")]
    InvalidInteger(String),
    #[error("{0:?} is not a floating point number")]
    InvalidFloat(String),
    #[error("a Character value cannot be empty")]
    EmptyCharacter,
}

fn decode_integer(raw: &str) -> Result<i64, CoercionError> {
    raw.parse::<i64>()
        .map_err(|_| CoercionError::InvalidInteger(raw.to_string()))
}

fn decode_float(raw: &str) -> Result<f64, CoercionError> {
    raw.parse::<f64>()
        .map_err(|_| CoercionError::InvalidFloat(raw.to_string()))
}

fn decode_character(raw: &str) -> Result<char, CoercionError> {
    raw.chars().next().ok_or(CoercionError::EmptyCharacter)
}

/// Decode every `,`-separated element; one bad element fails the whole field.
fn decode_vector<T, F>(raw: &str, decode: F) -> Result<Vec<T>, CoercionError>
where
    F: Fn(&str) -> Result<T, CoercionError>,
{
    raw.split(',').map(decode).collect()
}

///
/// Decode raw INFO/FORMAT text into the [`TypedValue`] selected by its declared
/// type and arity.
///
/// `Number=1` gives a scalar and every other arity a vector split on `,`.
/// Flags ignore the text and always decode to `Flag(true)`.
///
pub fn decode_value(value_type: ValueType, number: Number, raw: &str) -> Result<TypedValue, CoercionError> {
    let scalar = number.is_scalar();
    let value = match value_type {
        ValueType::Flag => TypedValue::Flag(true),
        ValueType::String if scalar => TypedValue::String(raw.to_string()),
        ValueType::String => TypedValue::StringVector(raw.split(',').map(str::to_string).collect()),
        ValueType::Integer if scalar => TypedValue::Integer(decode_integer(raw)?),
        ValueType::Integer => TypedValue::IntegerVector(decode_vector(raw, decode_integer)?),
        ValueType::Float if scalar => TypedValue::Float(decode_float(raw)?),
        ValueType::Float => TypedValue::FloatVector(decode_vector(raw, decode_float)?),
        ValueType::Character if scalar => TypedValue::Character(decode_character(raw)?),
        ValueType::Character => TypedValue::CharacterVector(decode_vector(raw, decode_character)?),
    };
    Ok(value)
}

impl FieldDescriptor {
    pub fn decode(&self, raw: &str) -> Result<TypedValue, CoercionError> {
        decode_value(self.value_type, self.number, raw)
    }
}

///
/// Decode a value against an optional descriptor, never failing.
///
/// Text for an undeclared field, or text that does not coerce to its declared
/// type, is kept as an untyped `String`.
///
pub fn decode_or_string(descriptor: Option<&FieldDescriptor>, raw: &str) -> TypedValue {
    match descriptor {
        Some(descriptor) => descriptor.decode(raw).unwrap_or_else(|e| {
            debug!("Field {}: {}, keeping the raw text", descriptor.id, e);
            TypedValue::String(raw.to_string())
        }),
        None => TypedValue::String(raw.to_string()),
    }
}
