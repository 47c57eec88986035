//! Built-in functions

pub mod math;

use crate::error::ExprResult;
use std::collections::HashMap;

/// Function implementation signature; arguments are already evaluated and
/// their count checked against the definition
pub type FunctionImpl = fn(&[f64]) -> ExprResult<f64>;

/// Function definition
pub struct FunctionDef {
    /// Function name, as written in expressions
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionDef>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_math_functions();

        registry
    }

    /// Look up a function by name (case-sensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }

    /// Names of all registered functions, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn register_fixed(&mut self, name: &'static str, args: usize, implementation: FunctionImpl) {
        self.register(FunctionDef {
            name,
            min_args: args,
            max_args: Some(args),
            implementation,
        });
    }

    fn register_math_functions(&mut self) {
        // Single argument
        self.register_fixed("abs", 1, math::fn_abs);
        self.register_fixed("sqrt", 1, math::fn_sqrt);
        self.register_fixed("cbrt", 1, math::fn_cbrt);
        self.register_fixed("exp", 1, math::fn_exp);
        self.register_fixed("ln", 1, math::fn_ln);
        self.register_fixed("log10", 1, math::fn_log10);
        self.register_fixed("log2", 1, math::fn_log2);
        self.register_fixed("sin", 1, math::fn_sin);
        self.register_fixed("cos", 1, math::fn_cos);
        self.register_fixed("tan", 1, math::fn_tan);
        self.register_fixed("asin", 1, math::fn_asin);
        self.register_fixed("acos", 1, math::fn_acos);
        self.register_fixed("atan", 1, math::fn_atan);
        self.register_fixed("sinh", 1, math::fn_sinh);
        self.register_fixed("cosh", 1, math::fn_cosh);
        self.register_fixed("tanh", 1, math::fn_tanh);
        self.register_fixed("floor", 1, math::fn_floor);
        self.register_fixed("ceil", 1, math::fn_ceil);
        self.register_fixed("sign", 1, math::fn_sign);

        // Two arguments
        self.register_fixed("pow", 2, math::fn_pow);
        self.register_fixed("atan2", 2, math::fn_atan2);

        // log(x) is the natural log, log(x, base) any base
        self.register(FunctionDef {
            name: "log",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_log,
        });

        // round(x) or round(x, digits)
        self.register(FunctionDef {
            name: "round",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_round,
        });

        // Variadic
        self.register(FunctionDef {
            name: "min",
            min_args: 1,
            max_args: None,
            implementation: math::fn_min,
        });
        self.register(FunctionDef {
            name: "max",
            min_args: 1,
            max_args: None,
            implementation: math::fn_max,
        });
        self.register(FunctionDef {
            name: "hypot",
            min_args: 1,
            max_args: None,
            implementation: math::fn_hypot,
        });
    }
}
