//! Configuration from the real process environment and the command line.
//!
//! These tests mutate environment variables, so they run serially.

use std::time::Duration;

use formula_tui::cli::{evaluate_once, parse_args, CliCommand};
use formula_tui::domain::CalcOutcome;
use formula_tui::error::ConfigError;
use formula_tui::startup::config::{
    AppConfig, DEFAULT_SUGGEST_URL, ENV_CACHE_TTL, ENV_LOG_FILE, ENV_SUGGEST_URL, ENV_TIMEOUT,
    ENV_VARS,
};
use serial_test::serial;

const ALL_VARS: [&str; 5] = [ENV_SUGGEST_URL, ENV_CACHE_TTL, ENV_TIMEOUT, ENV_LOG_FILE, ENV_VARS];

fn clear_env() {
    for key in ALL_VARS {
        std::env::remove_var(key);
    }
}

fn args(list: &[&str]) -> std::vec::IntoIter<String> {
    std::iter::once("formula")
        .chain(list.iter().copied())
        .map(String::from)
        .collect::<Vec<_>>()
        .into_iter()
}

#[test]
#[serial]
fn test_from_env_without_variables_uses_defaults() {
    clear_env();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.suggest_url, DEFAULT_SUGGEST_URL);
    assert_eq!(config.cache_ttl, Duration::from_secs(60));
}

#[test]
#[serial]
fn test_from_env_reads_every_key() {
    clear_env();
    std::env::set_var(ENV_SUGGEST_URL, "http://127.0.0.1:8080/suggest");
    std::env::set_var(ENV_CACHE_TTL, "30");
    std::env::set_var(ENV_TIMEOUT, "3");
    std::env::set_var(ENV_LOG_FILE, "/tmp/formula-test.log");
    std::env::set_var(ENV_VARS, "rev=1200,cost=300");

    let config = AppConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.suggest_url, "http://127.0.0.1:8080/suggest");
    assert_eq!(config.cache_ttl, Duration::from_secs(30));
    assert_eq!(config.request_timeout, Duration::from_secs(3));
    assert_eq!(
        config.log_path().as_deref(),
        Some(std::path::Path::new("/tmp/formula-test.log"))
    );
    assert_eq!(config.variables.get("rev"), Some(&1200.0));
    assert_eq!(config.eval_context().get("cost"), Some(300.0));
    assert_eq!(config.eval_context().get("Date"), Some(100.0));
}

#[test]
#[serial]
fn test_bad_ttl_is_an_error() {
    clear_env();
    std::env::set_var(ENV_CACHE_TTL, "soon");
    let result = AppConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial]
fn test_bad_variable_is_an_error() {
    clear_env();
    std::env::set_var(ENV_VARS, "rev=lots");
    let result = AppConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::InvalidVariable(_))));
}

#[test]
#[serial]
fn test_command_line_overrides_environment() {
    clear_env();
    std::env::set_var(ENV_SUGGEST_URL, "http://env.example/s");
    std::env::set_var(ENV_VARS, "rev=1");
    let env_config = AppConfig::from_env().unwrap();
    clear_env();

    let command = parse_args(args(&[
        "--endpoint",
        "http://cli.example/s",
        "--var",
        "rev=2",
        "--cache-ttl=0",
    ]))
    .unwrap();
    let CliCommand::Run(options) = command else {
        panic!("expected run command, got {:?}", command);
    };
    let config = options.apply(env_config);

    assert_eq!(config.suggest_url, "http://cli.example/s");
    assert_eq!(config.variables.get("rev"), Some(&2.0));
    assert_eq!(config.cache_ttl, Duration::ZERO);
}

#[test]
#[serial]
fn test_one_shot_eval_uses_configured_variables() {
    clear_env();
    std::env::set_var(ENV_VARS, "rev=7");
    let config = AppConfig::from_env().unwrap();
    clear_env();

    let CliCommand::Eval {
        expression,
        options,
    } = parse_args(args(&["--eval", "rev * 6"])).unwrap()
    else {
        panic!("expected eval command");
    };
    let config = options.apply(config);
    assert_eq!(evaluate_once(&expression, &config), CalcOutcome::Value(42.0));
    assert_eq!(evaluate_once("rev *", &config), CalcOutcome::Error);
}

#[test]
fn test_unknown_flag_is_rejected() {
    assert!(matches!(
        parse_args(args(&["--bogus"])),
        Err(ConfigError::UnknownArgument(_))
    ));
}
