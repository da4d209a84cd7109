//! Evaluation errors.
//!
//! Raised by the arithmetic evaluator. The widget never shows these to the
//! user: any failure collapses to the fixed "Error" result.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("unexpected {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{function}() expects {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: &'static str,
        found: usize,
    },

    #[error("result is not a finite number")]
    NotFinite,

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("expression has more than {limit} operations")]
    TooLarge { limit: usize },
}

impl EvalError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EvalError::Empty => "E_EVAL_EMPTY",
            EvalError::UnexpectedChar { .. }
            | EvalError::InvalidNumber(_)
            | EvalError::UnexpectedToken { .. }
            | EvalError::UnexpectedEnd => "E_EVAL_SYNTAX",
            EvalError::UnknownIdentifier(_) | EvalError::UnknownFunction(_) => "E_EVAL_NAME",
            EvalError::Arity { .. } => "E_EVAL_ARITY",
            EvalError::NotFinite => "E_EVAL_RANGE",
            EvalError::TooDeep { .. } | EvalError::TooLarge { .. } => "E_EVAL_DEPTH",
        }
    }
}
