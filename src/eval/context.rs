//! Name resolution for the evaluator.
//!
//! Tag tokens linearize to their opaque `value`, which the evaluator reads as
//! an identifier. The context maps those identifiers to numbers and provides
//! a fixed table of pure functions. Nothing here can reach outside the
//! process.

use std::collections::HashMap;

use crate::error::EvalError;

/// Built-in functions. The set is closed; unknown names are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Abs,
    Ceil,
    Floor,
    Round,
    Sqrt,
    Min,
    Max,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "abs" => Some(Builtin::Abs),
            "ceil" => Some(Builtin::Ceil),
            "floor" => Some(Builtin::Floor),
            "round" => Some(Builtin::Round),
            "sqrt" => Some(Builtin::Sqrt),
            "min" => Some(Builtin::Min),
            "max" => Some(Builtin::Max),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Abs => "abs",
            Builtin::Ceil => "ceil",
            Builtin::Floor => "floor",
            Builtin::Round => "round",
            Builtin::Sqrt => "sqrt",
            Builtin::Min => "min",
            Builtin::Max => "max",
        }
    }

    pub fn apply(&self, args: &[f64]) -> Result<f64, EvalError> {
        let unary = |f: fn(f64) -> f64| match args {
            [x] => Ok(f(*x)),
            _ => Err(self.arity("1", args.len())),
        };
        match self {
            Builtin::Abs => unary(f64::abs),
            Builtin::Ceil => unary(f64::ceil),
            Builtin::Floor => unary(f64::floor),
            // Half rounds toward +infinity
            Builtin::Round => unary(|x| (x + 0.5).floor()),
            Builtin::Sqrt => unary(f64::sqrt),
            Builtin::Min => self.fold(args, f64::min),
            Builtin::Max => self.fold(args, f64::max),
        }
    }

    fn fold(&self, args: &[f64], f: fn(f64, f64) -> f64) -> Result<f64, EvalError> {
        let (first, rest) = args
            .split_first()
            .ok_or_else(|| self.arity("at least 1", 0))?;
        Ok(rest.iter().copied().fold(*first, f))
    }

    fn arity(&self, expected: &'static str, found: usize) -> EvalError {
        EvalError::Arity {
            function: self.name().to_string(),
            expected,
            found,
        }
    }
}

/// Variable bindings used to resolve identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalContext {
    variables: HashMap<String, f64>,
}

impl Default for EvalContext {
    fn default() -> Self {
        let mut variables = HashMap::new();
        variables.insert("Date".to_string(), 100.0);
        Self { variables }
    }
}

impl EvalContext {
    /// A context with no bindings at all.
    pub fn empty() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> Result<f64, EvalError> {
        self.get(name)
            .ok_or_else(|| EvalError::UnknownIdentifier(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl Extend<(String, f64)> for EvalContext {
    fn extend<T: IntoIterator<Item = (String, f64)>>(&mut self, iter: T) {
        self.variables.extend(iter);
    }
}
