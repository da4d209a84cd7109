//! Log file setup.
//!
//! The TUI owns stdout, so logs go to a file. Filtering comes from
//! `FORMULA_LOG` when set, else the configured default (`info`).
//!
//! ```text
//! FORMULA_LOG=formula_tui::app=debug formula
//! tail -f ~/.cache/formula-tui/formula.log
//! ```

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::startup::AppConfig;

pub const ENV_LOG: &str = "FORMULA_LOG";

/// Install the file subscriber. Returns the log path on success; any failure
/// (no cache dir, unwritable file, subscriber already set) leaves logging off.
pub fn init(config: &AppConfig) -> Option<PathBuf> {
    let path = config.log_path()?;
    let filter = build_filter(std::env::var(ENV_LOG).ok().as_deref(), &config.log_filter);

    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(_) => return None,
    };

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .ok()?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), path = %path.display(), "logging started");
    Some(path)
}

/// `FORMULA_LOG` wins when it parses; otherwise the configured default, then `info`.
pub fn build_filter(env_value: Option<&str>, default: &str) -> EnvFilter {
    env_value
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(default).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_prefers_env() {
        let filter = build_filter(Some("debug"), "warn");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        assert_eq!(build_filter(None, "warn").to_string(), "warn");
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("formula.log");
        assert!(open_log_file(&path).is_ok());
        assert!(path.exists());
    }
}
