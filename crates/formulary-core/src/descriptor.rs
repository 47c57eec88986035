//! Formula descriptors: the catalog's unit of work

use serde::{Deserialize, Serialize};

/// A named formula with its variable contract and output contract.
///
/// Descriptors are immutable once loaded; `id` is the identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaDescriptor {
    /// Unique identifier, e.g. `HS_3.1`
    pub id: String,
    /// Grouping label, e.g. `Heat Source`
    pub category: String,
    pub title: String,
    pub description: String,
    /// Infix expression over the variable keys
    pub formula: String,
    /// Variables in declaration order
    pub variables: Vec<VariableSpec>,
    pub output: OutputSpec,
}

/// One input variable of a formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Identifier used in the expression
    pub key: String,
    pub label: String,
    pub unit: String,
    /// Value used when the caller supplies none
    pub default: f64,
}

/// Description of a formula's result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub key: String,
    pub label: String,
    pub unit: String,
}

impl FormulaDescriptor {
    /// Look up a variable by key
    pub fn variable(&self, key: &str) -> Option<&VariableSpec> {
        self.variables.iter().find(|v| v.key == key)
    }

    /// Iterate over the variable keys in declaration order
    pub fn variable_keys(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.key.as_str())
    }
}
