//! Formula calculation
//!
//! Evaluates a formula against its inputs and turns the outcome into a
//! [`CalculationResult`]. Evaluation errors never escape: they become
//! `Failure` values carrying the error text.
//!
//! # Example
//!
//! ```rust
//! use formulary::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let formula = catalog.get("EFF_3.7").unwrap();
//! let inputs = InputMap::from([("Wnet", 3520.0), ("Qin", 2508.0)]);
//!
//! let result = formula.calculate(&inputs);
//! assert_eq!(result, CalculationResult::success(140.3509));
//! ```

use crate::{
    round_to, CalculationResult, FormulaDescriptor, InputMap, NumericPolicy, MAX_DECIMAL_PLACES,
};

/// Options for formula calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationOptions {
    /// Decimal places kept in successful results (default: 4)
    pub decimal_places: u32,
    /// Treatment of division by zero and other non-finite results
    pub numeric_policy: NumericPolicy,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            decimal_places: 4,
            numeric_policy: NumericPolicy::Ieee,
        }
    }
}

impl CalculationOptions {
    /// Strict numeric policy with default rounding
    pub fn strict() -> Self {
        Self {
            numeric_policy: NumericPolicy::Strict,
            ..Self::default()
        }
    }

    /// Round to `places` decimals (capped at [`MAX_DECIMAL_PLACES`])
    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places.min(MAX_DECIMAL_PLACES);
        self
    }
}

/// Evaluate `formula` with default options
pub fn calculate(formula: &str, inputs: &InputMap) -> CalculationResult {
    calculate_with_options(formula, inputs, &CalculationOptions::default())
}

/// Evaluate `formula` with custom options
pub fn calculate_with_options(
    formula: &str,
    inputs: &InputMap,
    options: &CalculationOptions,
) -> CalculationResult {
    match formulary_expr::evaluate_with_policy(formula, inputs, options.numeric_policy) {
        Ok(value) => {
            let rounded = round_to(value, options.decimal_places);
            tracing::debug!(formula, value, rounded, "calculation succeeded");
            CalculationResult::success(rounded)
        }
        Err(e) => {
            tracing::debug!(formula, error = %e, "calculation failed");
            CalculationResult::failure(e.to_string())
        }
    }
}

/// Evaluate a catalog formula with default options
pub fn calculate_descriptor(formula: &FormulaDescriptor, inputs: &InputMap) -> CalculationResult {
    calculate(&formula.formula, inputs)
}

/// Extension trait for FormulaDescriptor to add calculation methods
pub trait FormulaCalculationExt {
    /// Calculate with default options
    fn calculate(&self, inputs: &InputMap) -> CalculationResult;

    /// Calculate with custom options
    fn calculate_with_options(
        &self,
        inputs: &InputMap,
        options: &CalculationOptions,
    ) -> CalculationResult;

    /// Expression text with the bound values written in
    fn substitute(&self, inputs: &InputMap) -> String;
}

impl FormulaCalculationExt for FormulaDescriptor {
    fn calculate(&self, inputs: &InputMap) -> CalculationResult {
        calculate_descriptor(self, inputs)
    }

    fn calculate_with_options(
        &self,
        inputs: &InputMap,
        options: &CalculationOptions,
    ) -> CalculationResult {
        calculate_with_options(&self.formula, inputs, options)
    }

    fn substitute(&self, inputs: &InputMap) -> String {
        formulary_expr::substitute(&self.formula, inputs)
    }
}
