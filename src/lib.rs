//! Formula TUI - a terminal formula-entry widget with autocompleted tags.
//!
//! A formula is a sequence of tokens: plain text typed by the user, and tags
//! picked from a remote suggestion service. The widget keeps them in a
//! [`domain::TokenStore`], drives editing through
//! [`domain::EditingController`], and evaluates the linearized formula with
//! the constrained [`eval::ArithmeticEvaluator`].
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod eval;
pub mod logging;
pub mod models;
pub mod startup;
pub mod state;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod widgets;
