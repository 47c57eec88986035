//! Structured export records

use chrono::{DateTime, Utc};
use formulary_core::{CalculationResult, FormulaDescriptor, InputMap};
use serde::{Deserialize, Serialize};

use crate::error::ReportResult;

/// One calculation, captured for export.
///
/// JSON keys follow the export format: the formula title is written under
/// `formula` and the expression under `equation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// When the record was taken (RFC 3339, UTC, milliseconds)
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Formula title
    #[serde(rename = "formula")]
    pub formula_title: String,
    pub description: String,
    /// Expression text
    pub equation: String,
    pub inputs: InputMap,
    pub output: CalculationResult,
}

impl ExportRecord {
    /// Build a record stamped with a fixed time
    pub fn at(
        formula: &FormulaDescriptor,
        inputs: &InputMap,
        result: &CalculationResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            formula_title: formula.title.clone(),
            description: formula.description.clone(),
            equation: formula.formula.clone(),
            inputs: inputs.clone(),
            output: result.clone(),
        }
    }

    /// Serialize as indented JSON
    pub fn to_json_pretty(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a record back from JSON
    pub fn from_json_str(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build a record stamped with the current time
pub fn to_record(
    formula: &FormulaDescriptor,
    inputs: &InputMap,
    result: &CalculationResult,
) -> ExportRecord {
    ExportRecord::at(formula, inputs, result, Utc::now())
}

/// `2024-03-01T12:30:00.000Z`
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
