//! Component-specific parameters of a score transformation.

use std::fmt;

use ahash::AHashMap;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::constants::params;
use crate::error::TransformationError;

/// A single parameter value. Formula parameters are numbers,
/// `transformation_type` is a string. Flags such as `transformation` and
/// nested component settings are carried along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Other(serde_json::Value),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Number(v) => write!(f, "{}", v),
            ParameterValue::Text(s) => f.write_str(s),
            ParameterValue::Bool(b) => write!(f, "{}", b),
            ParameterValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(v: f64) -> Self {
        ParameterValue::Number(v)
    }
}

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        ParameterValue::Bool(v)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        ParameterValue::Text(v.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(v: String) -> Self {
        ParameterValue::Text(v)
    }
}

/// Mapping from parameter name to value, as read from a scoring
/// component's configuration.
///
/// ```json
/// {"transformation_type": "sigmoid", "low": 0, "high": 10, "k": 0.5}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: AHashMap<CompactString, ParameterValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object.
    pub fn from_json(json: &str) -> Result<Self, TransformationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<ParameterValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParameterValue>) {
        self.values.insert(CompactString::from(name), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The requested transformation kind name. A value that is not a
    /// string can never name a kind and fails the same way an unknown name does.
    pub fn transformation_type(&self) -> Result<&str, TransformationError> {
        match self.get(params::TRANSFORMATION_TYPE) {
            Some(ParameterValue::Text(s)) => Ok(s.as_str()),
            Some(other) => Err(TransformationError::UnknownTransformationType(
                other.to_string(),
            )),
            None => Err(TransformationError::MissingTransformationType),
        }
    }

    /// A numeric parameter required by transformation `kind`.
    pub(crate) fn number(
        &self,
        kind: &'static str,
        name: &'static str,
    ) -> Result<f64, TransformationError> {
        match self.get(name) {
            Some(ParameterValue::Number(v)) => Ok(*v),
            Some(_) => Err(TransformationError::InvalidParameterType {
                name: name.to_string(),
                expected: "number",
            }),
            None => Err(TransformationError::MissingParameter { kind, name }),
        }
    }
}
