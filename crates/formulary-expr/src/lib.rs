//! # formulary-expr
//!
//! Expression engine for formulary.
//!
//! This crate provides:
//! - Expression parsing (text → AST)
//! - Expression evaluation over named variables (AST → number)
//! - Built-in math functions and constants
//! - Substitution of bound values into the expression text for display
//!
//! ## Example
//!
//! ```rust
//! use formulary_core::InputMap;
//! use formulary_expr::{evaluate, substitute};
//!
//! let inputs = InputMap::from([("m", 10.0), ("cp", 4.18), ("Tin", 20.0), ("Tout", 80.0)]);
//!
//! let q = evaluate("m * cp * (Tout - Tin)", &inputs).unwrap();
//! assert!((q - 2508.0).abs() < 1e-9);
//!
//! assert_eq!(substitute("m * cp * (Tout - Tin)", &inputs), "10 * 4.18 * (80 - 20)");
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod substitute;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{ExprError, ExprResult};
pub use evaluator::{evaluate, evaluate_expr, evaluate_with_policy, EvaluationContext, NumericPolicy};
pub use parser::{parse_expression, MAX_DEPTH};
pub use substitute::substitute;
