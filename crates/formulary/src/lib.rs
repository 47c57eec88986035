//! # formulary
//!
//! An engineering formula calculator.
//!
//! Formulary evaluates the formulas of a catalog (by default the heat
//! source, turbine, pump, condenser, absorber, solar and efficiency
//! equations of a solar-driven binary vapor power cycle) against
//! user-supplied inputs, and exports the outcome as JSON or as a plain-text
//! report.
//!
//! ## Features
//!
//! - Validated formula catalogs loaded from JSON, with a built-in default
//! - A small arithmetic expression language with math functions and constants
//! - Results rounded half away from zero to a fixed number of decimals
//! - Substitution of input values into the formula text for display
//! - JSON export records and fixed-layout text reports
//!
//! ## Example
//!
//! ```rust
//! use formulary::prelude::*;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let formula = catalog.get("HS_3.1").unwrap();
//!
//! // Start from the declared defaults and override one value
//! let inputs = InputMap::resolve(formula, [("m", 12.0)]);
//!
//! let result = formula.calculate(&inputs);
//! assert_eq!(result.value(), Some(3009.6));
//! assert_eq!(formula.substitute(&inputs), "12 * 4.18 * (80 - 20)");
//! ```

pub mod calculation;
pub mod prelude;

// Re-export calculation types
pub use calculation::{
    calculate, calculate_descriptor, calculate_with_options, CalculationOptions,
    FormulaCalculationExt,
};

// Re-export core types
pub use formulary_core::{
    format_number, round_to, Assumption, CalculationResult, Catalog, Error, FormulaDescriptor,
    InputMap, OutputSpec, Result, VariableSpec, MAX_DECIMAL_PLACES,
};

// Re-export expression types
pub use formulary_expr::{
    evaluate, evaluate_with_policy, parse_expression, substitute, Expr, ExprError, ExprResult,
    NumericPolicy,
};

// Re-export export formatters
pub use formulary_report::{
    render_text_report, render_text_report_with, to_record, to_text_report, write_report_file,
    ExportRecord, ReportError, ReportResult, TextReportOptions,
};
