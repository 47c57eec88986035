//! # formulary-core
//!
//! Core data structures for the formulary engineering calculator.
//!
//! This crate provides the fundamental types used throughout formulary:
//! - [`FormulaDescriptor`] - A catalog entry (expression, variables, output)
//! - [`InputMap`] - Variable bindings for one evaluation
//! - [`CalculationResult`] - The outcome of evaluating a formula
//! - [`Catalog`] - A validated collection of descriptors and reference assumptions
//!
//! ## Example
//!
//! ```rust
//! use formulary_core::{Catalog, InputMap};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let formula = catalog.get("HS_3.1").unwrap();
//!
//! let inputs = InputMap::defaults_for(formula);
//! assert_eq!(inputs.get("cp"), Some(4.18));
//! ```

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod inputs;
pub mod number;
pub mod result;

// Re-exports for convenience
pub use catalog::{Assumption, Catalog};
pub use descriptor::{FormulaDescriptor, OutputSpec, VariableSpec};
pub use error::{Error, Result};
pub use inputs::InputMap;
pub use number::{format_number, round_to, MAX_DECIMAL_PLACES};
pub use result::CalculationResult;
