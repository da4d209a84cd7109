//! Value types shared across the widget.

mod suggestion;
mod token;

pub use suggestion::Suggestion;
pub use token::{Token, TokenKind};
