//! Error handling for the formula widget.
//!
//! - **Domain errors**: [`NetworkError`] (suggestion fetches), [`EvalError`]
//!   (formula evaluation), [`ConfigError`] (settings)
//! - **Unified error**: [`FormulaError`] with categorisation and user messages
//! - **Result alias**: [`FormulaResult`]
//!
//! | Category | Source | Retryable |
//! |----------|--------|-----------|
//! | Network | connection, timeout, 429 | Yes |
//! | Server | HTTP 5xx | Yes |
//! | Client | malformed response | No |
//! | User | formula evaluation | No |
//! | System | I/O | No |
//! | Configuration | env / flags | No |
//!
//! None of these are fatal inside the widget: fetch failures become an empty
//! suggestion list and evaluation failures become the "Error" result.

mod category;
mod config;
mod eval;
mod formula_error;
mod network;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use eval::EvalError;
pub use formula_error::FormulaError;
pub use network::NetworkError;

/// Result alias used across the crate.
pub type FormulaResult<T> = Result<T, FormulaError>;
