//! Input maps: variable bindings for one evaluation

use crate::descriptor::FormulaDescriptor;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Mapping from variable key to value.
///
/// Keys are kept sorted so serialized records are deterministic.
/// Keys the expression does not reference are ignored by the evaluator.
/// JSON has no infinity or NaN: such values are written as `null` and read
/// back as NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputMap {
    values: BTreeMap<String, f64>,
}

impl InputMap {
    /// Create an empty input map
    pub fn new() -> Self {
        Self::default()
    }

    /// Every variable of `formula` bound to its declared default
    pub fn defaults_for(formula: &FormulaDescriptor) -> Self {
        formula
            .variables
            .iter()
            .map(|v| (v.key.clone(), v.default))
            .collect()
    }

    /// Defaults of `formula` overlaid with `overrides`.
    ///
    /// Overrides for keys the formula does not declare are kept; the
    /// evaluator ignores them unless the expression refers to them.
    pub fn resolve<I, K>(formula: &FormulaDescriptor, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut inputs = Self::defaults_for(formula);
        for (key, value) in overrides {
            inputs.insert(key, value);
        }
        inputs
    }

    /// Parse a `key=value` assignment as typed on a command line.
    ///
    /// The value must be finite: `inf` and `NaN` are rejected.
    pub fn parse_assignment(text: &str) -> Result<(String, f64)> {
        let (key, value) = text
            .split_once('=')
            .ok_or_else(|| Error::InvalidInput(text.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::InvalidInput(text.to_string()));
        }
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(text.to_string()))?;
        if !value.is_finite() {
            return Err(Error::InvalidInput(text.to_string()));
        }
        Ok((key.to_string(), value))
    }

    /// Bind `key` to `value`, replacing any previous binding
    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(key.into(), value)
    }

    /// Get the value bound to `key`
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over bindings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'de> Deserialize<'de> for InputMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let values = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or(f64::NAN)))
            .collect())
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for InputMap {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for InputMap {
    fn from(pairs: [(K, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}
