//! Expression evaluator abstraction.

use crate::error::EvalError;

/// Turns a linearized formula into a number.
///
/// Implementations must not execute arbitrary code; they only interpret
/// arithmetic over numbers and known identifiers.
pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}
