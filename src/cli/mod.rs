//! Command-line interface.
//!
//! Parsed early in `main()`; everything except [`CliCommand::Run`] finishes
//! without touching the terminal:
//!
//! ```ignore
//! use formula_tui::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => handle_version_command(),
//!     CliCommand::Help => handle_help_command(),
//!     CliCommand::Eval { expression, options } => { /* ... */ }
//!     CliCommand::Run(options) => { /* start the TUI */ }
//! }
//! ```

pub mod args;
pub mod eval;
pub mod version;

pub use args::{parse_args, CliCommand, CliOptions};
pub use eval::{evaluate_once, handle_eval_command};
pub use version::{handle_help_command, handle_version_command, USAGE, VERSION};
