//! Prelude module - common imports for formulary users
//!
//! ```rust
//! use formulary::prelude::*;
//! ```

pub use crate::{
    // Calculation types
    CalculationOptions,
    CalculationResult,
    // Catalog types
    Catalog,
    // Error types
    Error,
    ExportRecord,
    ExprError,
    FormulaCalculationExt,
    FormulaDescriptor,
    InputMap,
    NumericPolicy,
    Result,
    VariableSpec,
};
