//! Unified error type for the formula widget.

use std::fmt;

use super::category::ErrorCategory;
use super::config::ConfigError;
use super::eval::EvalError;
use super::network::NetworkError;

/// Every error the crate can produce.
#[derive(Debug)]
pub enum FormulaError {
    /// Suggestion service failures.
    Network(NetworkError),

    /// Expression evaluation failures.
    Eval(EvalError),

    /// Invalid configuration.
    Config(ConfigError),

    /// Filesystem or terminal I/O.
    Io(std::io::Error),
}

impl FormulaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormulaError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            FormulaError::Network(NetworkError::InvalidResponse { .. }) => ErrorCategory::Client,
            FormulaError::Network(_) => ErrorCategory::Network,
            FormulaError::Eval(_) => ErrorCategory::User,
            FormulaError::Config(_) => ErrorCategory::Configuration,
            FormulaError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            FormulaError::Network(err) => err.is_retryable(),
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            FormulaError::Network(err) => err.user_message(),
            FormulaError::Eval(_) => "Error".to_string(),
            FormulaError::Config(err) => err.to_string(),
            FormulaError::Io(err) => format!("I/O error: {}", err),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            FormulaError::Network(err) => err.error_code(),
            FormulaError::Eval(err) => err.error_code(),
            FormulaError::Config(_) => "E_CONFIG",
            FormulaError::Io(_) => "E_IO",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::Network(err) => write!(f, "{}", err),
            FormulaError::Eval(err) => write!(f, "{}", err),
            FormulaError::Config(err) => write!(f, "{}", err),
            FormulaError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FormulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormulaError::Network(err) => Some(err),
            FormulaError::Eval(err) => Some(err),
            FormulaError::Config(err) => Some(err),
            FormulaError::Io(err) => Some(err),
        }
    }
}

impl From<NetworkError> for FormulaError {
    fn from(err: NetworkError) -> Self {
        FormulaError::Network(err)
    }
}

impl From<EvalError> for FormulaError {
    fn from(err: EvalError) -> Self {
        FormulaError::Eval(err)
    }
}

impl From<ConfigError> for FormulaError {
    fn from(err: ConfigError) -> Self {
        FormulaError::Config(err)
    }
}

impl From<std::io::Error> for FormulaError {
    fn from(err: std::io::Error) -> Self {
        FormulaError::Io(err)
    }
}
