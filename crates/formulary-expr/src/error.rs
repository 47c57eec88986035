//! Expression error types

use thiserror::Error;

/// Result type for expression operations
pub type ExprResult<T> = std::result::Result<T, ExprError>;

/// Errors that can occur during expression parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Malformed expression
    #[error("Parse error: {0}")]
    Parse(String),

    /// Identifier that is neither bound nor a known constant
    #[error("Undefined symbol {0}")]
    UndefinedSymbol(String),

    /// Invalid function argument
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Non-finite arithmetic under the strict numeric policy
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}
