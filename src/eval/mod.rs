//! Constrained arithmetic evaluation of linearized formulas.
//!
//! Accepts numeric literals, identifiers resolved through an [`EvalContext`],
//! calls to a closed set of [`Builtin`] functions, `+ - * / ^`, unary sign and
//! parentheses. Anything else is rejected at the lexer or parser; there is
//! no path from formula text to code execution.

pub mod context;
pub mod lexer;
pub mod parser;

pub use context::{Builtin, EvalContext};

use crate::error::EvalError;
use crate::traits::Evaluator;
use parser::{BinaryOp, Expr};

/// [`Evaluator`] backed by the recursive-descent parser in this module.
#[derive(Debug, Clone, Default)]
pub struct ArithmeticEvaluator {
    context: EvalContext,
}

impl ArithmeticEvaluator {
    pub fn new(context: EvalContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    fn eval(&self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Number(n) => Ok(*n),
            Expr::Variable(name) => self.context.resolve(name),
            Expr::Negate(inner) => Ok(-self.eval(inner)?),
            Expr::Binary { op, left, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                Ok(match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powf(r),
                })
            }
            Expr::Call { name, args } => {
                let builtin = Builtin::lookup(name)
                    .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                builtin.apply(&values)
            }
        }
    }
}

impl Evaluator for ArithmeticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let tokens = lexer::tokenize(expression)?;
        let ast = parser::parse(&tokens)?;
        let value = self.eval(&ast)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NotFinite)
        }
    }
}

/// Shortest round-trip rendering: `7` rather than `7.0`, and `-0` as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
