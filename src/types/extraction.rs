//! Validated extraction results

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{MuninError, Result};

/// A validated extraction result: a single JSON object or an array of
/// records.
///
/// Both shapes are legitimate model output: the free-text pipeline returns
/// one policy-holder object, the fixed-width pipeline returns an array of
/// insured persons. Callers distinguish by matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extraction {
    Array(Vec<Value>),
    Object(Map<String, Value>),
}

impl Extraction {
    /// Parse cleaned response text into an accepted shape.
    ///
    /// Scalars, strings, and undecodable text are rejected with a `Parse`
    /// error that preserves the offending text.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| MuninError::parse(format!("invalid JSON: {e}"), text))?;
        match value {
            Value::Object(map) => Ok(Extraction::Object(map)),
            Value::Array(items) => Ok(Extraction::Array(items)),
            other => Err(MuninError::parse(
                format!("expected a JSON object or array, got {}", type_name(&other)),
                text,
            )),
        }
    }

    /// The object form, if this is a single object.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Extraction::Object(map) => Some(map),
            Extraction::Array(_) => None,
        }
    }

    /// The record slice, if this is an array.
    pub fn as_records(&self) -> Option<&[Value]> {
        match self {
            Extraction::Array(items) => Some(items),
            Extraction::Object(_) => None,
        }
    }

    /// Unwrap into a plain `serde_json::Value`.
    pub fn into_value(self) -> Value {
        match self {
            Extraction::Object(map) => Value::Object(map),
            Extraction::Array(items) => Value::Array(items),
        }
    }
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
