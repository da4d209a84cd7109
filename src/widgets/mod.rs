//! Reusable input widgets.

pub mod line_input;

pub use line_input::LineInput;
