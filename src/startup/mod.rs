//! Startup configuration.
//!
//! - [`config`] - [`AppConfig`] with environment overrides

pub mod config;

pub use config::AppConfig;
