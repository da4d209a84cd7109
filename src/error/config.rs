//! Configuration errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("invalid variable binding '{0}', expected name=number")]
    InvalidVariable(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
}

impl ConfigError {
    pub fn invalid_value(key: &str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
