//! Calculation outcomes

use serde::{Deserialize, Serialize};

/// Outcome of evaluating a formula.
///
/// Serializes in the export format `{"success":true,"result":2508.0}` or
/// `{"success":false,"error":"..."}`.
///
/// The round trip is lossy for non-finite values: an infinite or NaN result
/// is written as `"result":null` and reads back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResult", into = "RawResult")]
pub enum CalculationResult {
    /// Evaluation produced a (rounded) value
    Success { value: f64 },
    /// Evaluation failed; the message is meant for the user
    Failure { error_message: String },
}

impl CalculationResult {
    pub fn success(value: f64) -> Self {
        CalculationResult::Success { value }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        CalculationResult::Failure {
            error_message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success { .. })
    }

    /// The value, if successful
    pub fn value(&self) -> Option<f64> {
        match self {
            CalculationResult::Success { value } => Some(*value),
            CalculationResult::Failure { .. } => None,
        }
    }

    /// The error message, if failed
    pub fn error_message(&self) -> Option<&str> {
        match self {
            CalculationResult::Success { .. } => None,
            CalculationResult::Failure { error_message } => Some(error_message),
        }
    }
}

/// Wire shape of [`CalculationResult`]
#[derive(Serialize, Deserialize)]
struct RawResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    result: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<CalculationResult> for RawResult {
    fn from(result: CalculationResult) -> Self {
        match result {
            CalculationResult::Success { value } => RawResult {
                success: true,
                result: Some(value),
                error: None,
            },
            CalculationResult::Failure { error_message } => RawResult {
                success: false,
                result: None,
                error: Some(error_message),
            },
        }
    }
}

impl TryFrom<RawResult> for CalculationResult {
    type Error = String;

    fn try_from(raw: RawResult) -> Result<Self, Self::Error> {
        if raw.success {
            // Non-finite values serialize as null
            Ok(CalculationResult::Success {
                value: raw.result.unwrap_or(f64::NAN),
            })
        } else {
            Ok(CalculationResult::Failure {
                error_message: raw
                    .error
                    .ok_or_else(|| "failed result without an error message".to_string())?,
            })
        }
    }
}
