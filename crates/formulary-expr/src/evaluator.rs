//! Expression evaluator
//!
//! Evaluates expression ASTs against a set of variable bindings.

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{ExprError, ExprResult};
use crate::functions::FunctionRegistry;
use crate::parser::parse_expression;
use formulary_core::InputMap;
use std::sync::OnceLock;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

fn get_function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// How non-finite arithmetic results are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// IEEE-754 semantics: `1/0` is `Infinity`, `0/0` is `NaN`, and both
    /// flow through as ordinary values
    #[default]
    Ieee,
    /// Division by zero and any non-finite intermediate result are errors
    Strict,
}

/// Context for expression evaluation
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Variable bindings
    pub bindings: &'a InputMap,
    /// Treatment of non-finite results
    pub policy: NumericPolicy,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context with the default numeric policy
    pub fn new(bindings: &'a InputMap) -> Self {
        Self {
            bindings,
            policy: NumericPolicy::default(),
        }
    }

    /// Use the given numeric policy
    pub fn with_policy(mut self, policy: NumericPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve a name: bindings first, then built-in constants
    pub fn lookup(&self, name: &str) -> ExprResult<f64> {
        if let Some(value) = self.bindings.get(name) {
            return Ok(value);
        }

        match name {
            "pi" | "PI" => Ok(std::f64::consts::PI),
            "e" | "E" => Ok(std::f64::consts::E),
            _ => Err(ExprError::UndefinedSymbol(name.to_string())),
        }
    }

    /// Apply the numeric policy to an intermediate result
    fn check(&self, value: f64, what: impl FnOnce() -> String) -> ExprResult<f64> {
        if self.policy == NumericPolicy::Strict && !value.is_finite() {
            return Err(ExprError::Arithmetic(what()));
        }
        Ok(value)
    }
}

/// Parse and evaluate `expression` with the default numeric policy
pub fn evaluate(expression: &str, bindings: &InputMap) -> ExprResult<f64> {
    evaluate_with_policy(expression, bindings, NumericPolicy::default())
}

/// Parse and evaluate `expression` with an explicit numeric policy
pub fn evaluate_with_policy(
    expression: &str,
    bindings: &InputMap,
    policy: NumericPolicy,
) -> ExprResult<f64> {
    let ast = parse_expression(expression)?;
    tracing::trace!(expression, ?policy, "evaluating expression");
    let ctx = EvaluationContext::new(bindings).with_policy(policy);
    evaluate_expr(&ast, &ctx)
}

/// Evaluate a parsed expression
pub fn evaluate_expr(expr: &Expr, ctx: &EvaluationContext) -> ExprResult<f64> {
    match expr {
        Expr::Number(n) => Ok(*n),

        Expr::Variable(name) => ctx.lookup(name),

        Expr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx),

        Expr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, ctx),

        Expr::Function { name, args } => evaluate_function(name, args, ctx),
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &Expr,
    right: &Expr,
    ctx: &EvaluationContext,
) -> ExprResult<f64> {
    // Evaluate operands first, left to right
    let l = evaluate_expr(left, ctx)?;
    let r = evaluate_expr(right, ctx)?;

    let result = match op {
        BinaryOperator::Add => l + r,
        BinaryOperator::Subtract => l - r,
        BinaryOperator::Multiply => l * r,
        BinaryOperator::Divide => {
            if r == 0.0 && ctx.policy == NumericPolicy::Strict {
                return Err(ExprError::Arithmetic("Division by zero".into()));
            }
            l / r
        }
        BinaryOperator::Power => l.powf(r),
    };

    ctx.check(result, || {
        format!("{} {} {} is not a finite number", l, op, r)
    })
}

/// Evaluate a unary operation
fn evaluate_unary_op(op: UnaryOperator, operand: &Expr, ctx: &EvaluationContext) -> ExprResult<f64> {
    let val = evaluate_expr(operand, ctx)?;

    match op {
        UnaryOperator::Negate => Ok(-val),
    }
}

/// Evaluate a function call
fn evaluate_function(name: &str, args: &[Expr], ctx: &EvaluationContext) -> ExprResult<f64> {
    let registry = get_function_registry();

    let func = registry
        .get(name)
        .ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;

    // Check argument count
    if args.len() < func.min_args {
        return Err(ExprError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at least {}", func.min_args),
            actual: args.len(),
        });
    }

    if let Some(max) = func.max_args {
        if args.len() > max {
            return Err(ExprError::ArgumentCount {
                function: name.to_string(),
                expected: format!("at most {}", max),
                actual: args.len(),
            });
        }
    }

    // Evaluate arguments
    let mut evaluated_args = Vec::with_capacity(args.len());
    for arg in args {
        evaluated_args.push(evaluate_expr(arg, ctx)?);
    }

    // Call the function
    let result = (func.implementation)(&evaluated_args)?;
    ctx.check(result, || format!("{}() returned a non-finite number", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expression: &str) -> ExprResult<f64> {
        evaluate(expression, &InputMap::new())
    }

    fn eval_with(expression: &str, pairs: &[(&str, f64)]) -> ExprResult<f64> {
        let inputs: InputMap = pairs.iter().map(|(k, v)| (*k, *v)).collect();
        evaluate(expression, &inputs)
    }

    fn eval_strict(expression: &str) -> ExprResult<f64> {
        evaluate_with_policy(expression, &InputMap::new(), NumericPolicy::Strict)
    }

    #[test]
    fn test_evaluate_number() {
        assert_eq!(eval("42").unwrap(), 42.0);
        assert_eq!(eval("3.14").unwrap(), 3.14);
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("1+2").unwrap(), 3.0);
        assert_eq!(eval("10-4").unwrap(), 6.0);
        assert_eq!(eval("3*4").unwrap(), 12.0);
        assert_eq!(eval("20/4").unwrap(), 5.0);
        assert_eq!(eval("2^10").unwrap(), 1024.0);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("1+2*3").unwrap(), 7.0);
        assert_eq!(eval("(1+2)*3").unwrap(), 9.0);
        assert_eq!(eval("10-4-3").unwrap(), 3.0);
        assert_eq!(eval("24/4/3").unwrap(), 2.0);
        assert_eq!(eval("2^3^2").unwrap(), 512.0);
    }

    #[test]
    fn test_evaluate_unary() {
        assert_eq!(eval("-5").unwrap(), -5.0);
        assert_eq!(eval("--5").unwrap(), 5.0);
        assert_eq!(eval("-2*3").unwrap(), -6.0);
        assert_eq!(eval("-2^2").unwrap(), -4.0);
        assert_eq!(eval("2^-1").unwrap(), 0.5);
        assert_eq!(eval("3 - -2").unwrap(), 5.0);
    }

    #[test]
    fn test_evaluate_variables() {
        let q = eval_with(
            "m * cp * (Tout - Tin)",
            &[("m", 10.0), ("cp", 4.18), ("Tin", 20.0), ("Tout", 80.0)],
        )
        .unwrap();
        assert!((q - 2508.0).abs() < 1e-9);
    }

    #[test]
    fn test_variables_are_case_sensitive() {
        assert_eq!(
            eval_with("Tin", &[("tin", 1.0)]),
            Err(ExprError::UndefinedSymbol("Tin".into()))
        );
    }

    #[test]
    fn test_undefined_symbol() {
        let err = eval_with("A * I * eta_collector", &[("A", 100.0), ("I", 800.0)]).unwrap_err();
        assert_eq!(err, ExprError::UndefinedSymbol("eta_collector".into()));
        assert_eq!(err.to_string(), "Undefined symbol eta_collector");
    }

    #[test]
    fn test_constants_and_shadowing() {
        assert_eq!(eval("pi").unwrap(), std::f64::consts::PI);
        assert_eq!(eval("e").unwrap(), std::f64::consts::E);
        assert_eq!(eval_with("e * 2", &[("e", 0.5)]).unwrap(), 1.0);
    }

    #[test]
    fn test_division_by_zero_ieee() {
        assert_eq!(eval("1/0").unwrap(), f64::INFINITY);
        assert_eq!(eval("-1/0").unwrap(), f64::NEG_INFINITY);
        assert!(eval("0/0").unwrap().is_nan());
    }

    #[test]
    fn test_division_by_zero_strict() {
        assert_eq!(
            eval_strict("1/0"),
            Err(ExprError::Arithmetic("Division by zero".into()))
        );
        assert!(matches!(eval_strict("sqrt(-1)"), Err(ExprError::Arithmetic(_))));
        assert!(matches!(eval_strict("10^400"), Err(ExprError::Arithmetic(_))));
        assert_eq!(eval_strict("1/4").unwrap(), 0.25);
    }

    #[test]
    fn test_evaluate_functions() {
        assert_eq!(eval("sqrt(16)").unwrap(), 4.0);
        assert_eq!(eval("abs(-3)").unwrap(), 3.0);
        assert_eq!(eval("max(1, 7, 3)").unwrap(), 7.0);
        assert_eq!(eval("min(4, -2)").unwrap(), -2.0);
        assert_eq!(eval("pow(2, 5)").unwrap(), 32.0);
        assert!((eval("log10(1000)").unwrap() - 3.0).abs() < 1e-12);
        assert!((eval("log(8, 2)").unwrap() - 3.0).abs() < 1e-12);
        assert!((eval("log(e)").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(eval("ln(1)").unwrap(), 0.0);
    }

    #[test]
    fn test_function_errors() {
        assert_eq!(
            eval("frobnicate(1)"),
            Err(ExprError::UnknownFunction("frobnicate".into()))
        );
        assert!(matches!(
            eval("sqrt(1, 2)"),
            Err(ExprError::ArgumentCount { actual: 2, .. })
        ));
        assert!(matches!(
            eval("max()"),
            Err(ExprError::ArgumentCount { actual: 0, .. })
        ));
    }

    #[test]
    fn test_parse_errors_surface() {
        assert!(matches!(eval("(1+2"), Err(ExprError::Parse(_))));
        assert!(matches!(eval(""), Err(ExprError::Parse(_))));
    }
}
