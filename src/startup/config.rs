//! Runtime configuration.
//!
//! Built from defaults, then environment variables, then command-line flags,
//! each layer overriding the one before.
//!
//! # Example
//!
//! ```ignore
//! use formula_tui::startup::AppConfig;
//!
//! let config = AppConfig::from_env()?
//!     .with_suggest_url("http://localhost:3000/autocomplete")
//!     .with_variable("rev", 1200.0);
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::eval::EvalContext;

/// Mock autocomplete endpoint the widget was first built against.
pub const DEFAULT_SUGGEST_URL: &str = "https://652f91320b8d8ddac0b2b62b.mockapi.io/autocomplete";

pub const ENV_SUGGEST_URL: &str = "FORMULA_SUGGEST_URL";
pub const ENV_CACHE_TTL: &str = "FORMULA_CACHE_TTL_SECS";
pub const ENV_TIMEOUT: &str = "FORMULA_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "FORMULA_LOG_FILE";
pub const ENV_VARS: &str = "FORMULA_VARS";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the suggestion service
    pub suggest_url: String,
    /// How long a suggestion response stays fresh (default: 60s)
    pub cache_ttl: Duration,
    /// HTTP request timeout (default: 10s)
    pub request_timeout: Duration,
    /// Default tracing filter when FORMULA_LOG is unset
    pub log_filter: String,
    /// Log destination; `None` picks the cache directory
    pub log_file: Option<PathBuf>,
    /// Numeric bindings for tag identifiers
    pub variables: BTreeMap<String, f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            suggest_url: DEFAULT_SUGGEST_URL.to_string(),
            cache_ttl: Duration::from_secs(60),
            request_timeout: Duration::from_secs(10),
            log_filter: "info".to_string(),
            log_file: None,
            variables: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suggest_url(mut self, url: impl Into<String>) -> Self {
        self.suggest_url = url.into();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: f64) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`, which maps an environment key to its value.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_SUGGEST_URL) {
            self.suggest_url = parse_url(ENV_SUGGEST_URL, &url)?;
        }
        if let Some(secs) = lookup(ENV_CACHE_TTL) {
            self.cache_ttl = parse_secs(ENV_CACHE_TTL, &secs)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT) {
            self.request_timeout = parse_secs(ENV_TIMEOUT, &secs)?;
        }
        if let Some(path) = lookup(ENV_LOG_FILE) {
            if !path.trim().is_empty() {
                self.log_file = Some(PathBuf::from(path));
            }
        }
        if let Some(vars) = lookup(ENV_VARS) {
            for (name, value) in parse_variables(&vars)? {
                self.variables.insert(name, value);
            }
        }
        Ok(self)
    }

    /// Evaluation context: the default bindings plus configured variables.
    pub fn eval_context(&self) -> EvalContext {
        let mut context = EvalContext::default();
        context.extend(self.variables.iter().map(|(k, v)| (k.clone(), *v)));
        context
    }

    /// Resolved log path, falling back to `<cache dir>/formula-tui/formula.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("formula-tui").join("formula.log"))
        })
    }
}

pub(crate) fn parse_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_string())
    } else {
        Err(ConfigError::invalid_value(
            key,
            value,
            "expected an http:// or https:// URL",
        ))
    }
}

pub(crate) fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::invalid_value(key, value, "expected whole seconds"))
}

/// Parse one `name=number` binding.
pub fn parse_binding(binding: &str) -> Result<(String, f64), ConfigError> {
    let (name, value) = binding
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidVariable(binding.to_string()))?;
    let name = name.trim();
    let valid_name = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    if !valid_name {
        return Err(ConfigError::InvalidVariable(binding.to_string()));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidVariable(binding.to_string()))?;
    if !value.is_finite() {
        return Err(ConfigError::InvalidVariable(binding.to_string()));
    }
    Ok((name.to_string(), value))
}

/// Parse a comma-separated list of `name=number` bindings. Empty items are
/// skipped.
pub fn parse_variables(list: &str) -> Result<Vec<(String, f64)>, ConfigError> {
    list.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(parse_binding)
        .collect()
}
