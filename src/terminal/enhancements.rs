//! Kitty keyboard protocol.
//!
//! With escape codes disambiguated a lone Esc (close popup, cancel edit) is
//! reported immediately instead of waiting to see whether a sequence follows,
//! and Ctrl+Left/Right arrive intact. Terminals without the protocol ignore
//! the request.

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
};
use std::io::Write;

/// Returns `true` if the flags were written.
pub fn push_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(
        writer,
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok()
}

pub fn pop_keyboard_enhancements<W: Write>(writer: &mut W) -> bool {
    execute!(writer, PopKeyboardEnhancementFlags).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop_write_to_buffer() {
        let mut buffer = Vec::new();
        assert!(push_keyboard_enhancements(&mut buffer));
        assert!(pop_keyboard_enhancements(&mut buffer));
        assert!(!buffer.is_empty());
    }
}
