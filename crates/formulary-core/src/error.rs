//! Error types for formulary-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in formulary-core
#[derive(Debug, Error)]
pub enum Error {
    /// Two catalog entries share an id
    #[error("Duplicate formula id: {0}")]
    DuplicateFormulaId(String),

    /// Two variables of one formula share a key
    #[error("Duplicate variable key '{key}' in formula {formula}")]
    DuplicateVariableKey { formula: String, key: String },

    /// A variable key is not a valid identifier token
    #[error("Invalid variable key '{key}' in formula {formula}")]
    InvalidVariableKey { formula: String, key: String },

    /// A formula has no expression text
    #[error("Formula {0} has an empty expression")]
    EmptyExpression(String),

    /// Lookup of an unknown formula id
    #[error("Formula not found: {0}")]
    FormulaNotFound(String),

    /// Input value could not be parsed
    #[error("Invalid input '{0}': expected key=value with a numeric value")]
    InvalidInput(String),

    /// Catalog JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
