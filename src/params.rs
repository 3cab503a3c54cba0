// Caller-supplied request parameters
use serde_json::{Map, Value};

use crate::error::MappingError;

/// A flat, partially-populated map of named request fields.
///
/// Keys are matched exactly, so `"POS.Code"` is one key rather than a path.
/// A key holding JSON `null` reads the same as an absent key. Entry order is
/// the caller's insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    fields: Map<String, Value>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| MappingError::InvalidParameters(e.to_string()))?;
        Self::try_from(value)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn contains_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.contains(key))
    }

    /// Keys from `keys` that are absent, in the order given.
    pub fn missing(&self, keys: &[&'static str]) -> Vec<&'static str> {
        keys.iter()
            .copied()
            .filter(|key| !self.contains(key))
            .collect()
    }

    pub fn text(&self, key: &str) -> Result<Option<String>, MappingError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => scalar_text(value)
                .map(Some)
                .ok_or_else(|| MappingError::invalid(key, "a string")),
        }
    }

    pub fn integer(&self, key: &str) -> Result<Option<u32>, MappingError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => to_u32(value)
                .map(Some)
                .ok_or_else(|| MappingError::invalid(key, "a non-negative integer")),
        }
    }

    pub fn flag(&self, key: &str) -> Result<Option<bool>, MappingError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("true") || s == "1" => Ok(Some(true)),
            Some(Value::String(s)) if s.eq_ignore_ascii_case("false") || s == "0" => {
                Ok(Some(false))
            }
            Some(Value::Number(n)) if n.as_u64() == Some(1) => Ok(Some(true)),
            Some(Value::Number(n)) if n.as_u64() == Some(0) => Ok(Some(false)),
            Some(_) => Err(MappingError::invalid(key, "a boolean")),
        }
    }

    pub fn group(&self, key: &str) -> Result<Option<ParameterMap>, MappingError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(Self::from(fields.clone()))),
            Some(_) => Err(MappingError::invalid(key, "a nested map")),
        }
    }

    /// An ordered sequence of nested maps. A lone map counts as a sequence of one.
    pub fn groups(&self, key: &str) -> Result<Vec<ParameterMap>, MappingError> {
        self.sequence(key)
            .into_iter()
            .map(|item| match item {
                Value::Object(fields) => Ok(Self::from(fields.clone())),
                _ => Err(MappingError::invalid(key, "a sequence of nested maps")),
            })
            .collect()
    }

    /// An ordered sequence of scalars. A lone scalar counts as a sequence of one.
    pub fn texts(&self, key: &str) -> Result<Vec<String>, MappingError> {
        self.sequence(key)
            .into_iter()
            .map(|item| {
                scalar_text(item).ok_or_else(|| MappingError::invalid(key, "a sequence of strings"))
            })
            .collect()
    }

    /// Raw items of a repeated field, in caller order.
    pub fn sequence(&self, key: &str) -> Vec<&Value> {
        match self.get(key) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().filter(|item| !item.is_null()).collect(),
            Some(value) => vec![value],
        }
    }

    /// Entries of a nested `name -> count` map, in caller order.
    pub fn counts(&self, key: &str) -> Result<Vec<(String, u32)>, MappingError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Object(entries)) => entries
                .iter()
                .map(|(name, count)| {
                    to_u32(count)
                        .map(|count| (name.clone(), count))
                        .ok_or_else(|| {
                            MappingError::invalid(format!("{key}.{name}"), "a non-negative integer")
                        })
                })
                .collect(),
            Some(_) => Err(MappingError::invalid(key, "a map of category counts")),
        }
    }
}

impl From<Map<String, Value>> for ParameterMap {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for ParameterMap {
    type Error = MappingError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(MappingError::InvalidParameters(
                "expected a JSON object".to_string(),
            )),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn to_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
