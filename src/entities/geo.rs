use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{missing_field_error, validation_error, Error};

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Geo {
    pub lat: f64,
    pub lng: f64,
}

impl Geo {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates the loose `{"lat": .., "lng": ..}` payload geocoding
    /// providers return.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let fields = value.as_object().ok_or_else(|| {
            validation_error(format!(
                "geo should be set by passing an object, got {}",
                type_name(value)
            ))
        })?;

        Ok(Self {
            lat: coordinate(fields, "lat")?,
            lng: coordinate(fields, "lng")?,
        })
    }
}

fn coordinate(fields: &serde_json::Map<String, Value>, key: &str) -> Result<f64, Error> {
    let value = fields.get(key).ok_or_else(|| {
        missing_field_error(format!(
            "geo should carry 'lat' and 'lng' fields, '{}' is missing",
            key
        ))
    })?;

    value.as_f64().ok_or_else(|| {
        validation_error(format!(
            "geo '{}' should be a number, got {}",
            key,
            type_name(value)
        ))
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
