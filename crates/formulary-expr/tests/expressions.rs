//! Expression engine tests against the shapes used by the built-in catalog

use formulary_core::{Catalog, InputMap};
use formulary_expr::{evaluate, parse_expression, substitute, ExprError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Every built-in formula parses and evaluates with its own defaults
#[test]
fn test_builtin_formulas_evaluate_with_defaults() {
    let catalog = Catalog::builtin().unwrap();
    for formula in catalog.formulas() {
        let inputs = InputMap::defaults_for(formula);
        let value = evaluate(&formula.formula, &inputs)
            .unwrap_or_else(|e| panic!("{} failed: {}", formula.id, e));
        assert!(value.is_finite(), "{} gave {}", formula.id, value);
    }
}

/// Every identifier a built-in expression references is a declared variable
#[test]
fn test_builtin_formulas_reference_declared_variables() {
    let catalog = Catalog::builtin().unwrap();
    for formula in catalog.formulas() {
        let ast = parse_expression(&formula.formula).unwrap();
        for name in ast.variables() {
            assert!(
                formula.variable(name).is_some(),
                "{} references undeclared {}",
                formula.id,
                name
            );
        }
    }
}

/// Absorber balance keeps `m_rich` and `m_lean` apart from each other
#[test]
fn test_absorber_substitution() {
    let catalog = Catalog::builtin().unwrap();
    let formula = catalog.get("ABSORBER_3.9").unwrap();
    let inputs = InputMap::from([
        ("m_rich", 1.0),
        ("h_rich", 100.0),
        ("m_lean", 0.5),
        ("h_lean", 80.0),
        ("m_vapor", 0.5),
        ("h_vapor", 20.0),
    ]);

    assert_eq!(
        substitute(&formula.formula, &inputs),
        "1 * 100 - 0.5 * 80 - 0.5 * 20"
    );
    assert_eq!(evaluate(&formula.formula, &inputs).unwrap(), 50.0);
}

/// A missing variable names the symbol in the error text
#[test]
fn test_missing_variable_message() {
    let inputs = InputMap::from([("A", 100.0), ("I", 800.0)]);
    let err = evaluate("A * I * eta_collector", &inputs).unwrap_err();
    assert!(matches!(err, ExprError::UndefinedSymbol(_)));
    assert!(err.to_string().contains("eta_collector"));
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

proptest! {
    /// Linear combinations evaluate to what plain f64 arithmetic gives
    #[test]
    fn prop_linear_expression(a in -1e6f64..1e6, b in -1e6f64..1e6, c in -1e3f64..1e3) {
        let inputs = InputMap::from([("a", a), ("b", b), ("c", c)]);
        let value = evaluate("a * c + b - c", &inputs).unwrap();
        prop_assert_eq!(value, a * c + b - c);
    }

    /// A bound identifier standing alone never survives substitution
    #[test]
    fn prop_bound_keys_are_replaced(key in identifier(), value in -1e9f64..1e9) {
        let mut inputs = InputMap::new();
        inputs.insert(key.clone(), value);
        let text = format!("({} + 1) * {}", key, key);
        let substituted = substitute(&text, &inputs);
        let tokens: Vec<&str> = substituted
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .collect();
        prop_assert!(!tokens.contains(&key.as_str()));
    }

    /// Substitution with no bindings is the identity
    #[test]
    fn prop_unbound_text_is_unchanged(text in "[a-z0-9_ +*/()^.-]{0,40}") {
        prop_assert_eq!(substitute(&text, &InputMap::new()), text);
    }
}
