//! Command-line argument parsing.
//!
//! Flags accept both `--flag value` and `--flag=value`.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::startup::config::{parse_binding, parse_secs, parse_url};
use crate::startup::AppConfig;

/// Settings given on the command line. They override the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub endpoint: Option<String>,
    pub cache_ttl: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub variables: Vec<(String, f64)>,
}

impl CliOptions {
    /// Overlay these options on `config`.
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(url) = self.endpoint {
            config.suggest_url = url;
        }
        if let Some(ttl) = self.cache_ttl {
            config.cache_ttl = ttl;
        }
        if let Some(path) = self.log_file {
            config.log_file = Some(path);
        }
        config.variables.extend(self.variables);
        config
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Evaluate one expression and exit
    Eval {
        expression: String,
        options: CliOptions,
    },
    /// Run the TUI (default)
    Run(CliOptions),
}

/// Parse command-line arguments. The first item is the program name.
///
/// # Examples
///
/// ```
/// use formula_tui::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["formula".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ConfigError>
where
    I: Iterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut expression = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| ConfigError::MissingValue(name.to_string()))
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--endpoint" => {
                options.endpoint = Some(parse_url("--endpoint", &value("--endpoint")?)?);
            }
            "--cache-ttl" => {
                options.cache_ttl = Some(parse_secs("--cache-ttl", &value("--cache-ttl")?)?);
            }
            "--log-file" => {
                options.log_file = Some(PathBuf::from(value("--log-file")?));
            }
            "--var" => options.variables.push(parse_binding(&value("--var")?)?),
            "--eval" | "-e" => expression = Some(value("--eval")?),
            _ => return Err(ConfigError::UnknownArgument(arg)),
        }
    }

    Ok(match expression {
        Some(expression) => CliCommand::Eval {
            expression,
            options,
        },
        None => CliCommand::Run(options),
    })
}
