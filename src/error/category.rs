//! Error category classification for unified error handling.
//!
//! Categories drive retry decisions and the hint shown next to a failure.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout. Generally transient.
    Network,

    /// Suggestion service errors (HTTP 5xx). Retryable after a delay.
    Server,

    /// Unexpected responses or internal bugs. Not retryable.
    Client,

    /// Invalid input, such as a malformed formula.
    User,

    /// Filesystem and terminal errors.
    System,

    /// Invalid settings from the environment or command line.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection, then press Ctrl+R to retry",
            ErrorCategory::Server => "The service may be busy. Press Ctrl+R to retry",
            ErrorCategory::Client => "This may be a bug. Please report it if it persists",
            ErrorCategory::User => "Check the formula and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check FORMULA_* environment variables and flags",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
