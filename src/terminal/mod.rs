//! Terminal ownership for the TUI.
//!
//! [`TerminalManager`] puts the terminal into raw/alternate-screen mode with
//! mouse capture (chips and popup rows are clickable) and restores it on
//! drop. [`setup_panic_hook`] covers the paths where drop never runs.
//!
//! ```no_run
//! use formula_tui::terminal::{setup_panic_hook, TerminalManager};
//!
//! fn main() -> color_eyre::Result<()> {
//!     setup_panic_hook();
//!     let mut manager = TerminalManager::new()?;
//!     let _terminal = manager.terminal();
//!     Ok(())
//! }
//! ```

mod enhancements;
mod panic;
mod setup;

pub use enhancements::{pop_keyboard_enhancements, push_keyboard_enhancements};
pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

pub type FormulaTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Owns the ratatui terminal and restores the shell's terminal on drop.
pub struct TerminalManager {
    terminal: FormulaTerminal,
    enhanced_keys: bool,
    restored: bool,
}

impl TerminalManager {
    /// Enable raw mode, enter the alternate screen with mouse capture and
    /// bracketed paste, then try the keyboard enhancement protocol.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;
        // Unsupported terminals just keep legacy key reporting
        let enhanced_keys = push_keyboard_enhancements(&mut stdout);

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        tracing::debug!(enhanced_keys, "terminal ready");
        Ok(Self {
            terminal,
            enhanced_keys,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut FormulaTerminal {
        &mut self.terminal
    }

    /// Whether the terminal accepted the keyboard enhancement flags.
    pub fn has_enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    /// Put the terminal back the way we found it. Later calls are no-ops.
    pub fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if self.enhanced_keys {
            pop_keyboard_enhancements(self.terminal.backend_mut());
        }
        leave_tui_mode(self.terminal.backend_mut());
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        self.restore();
    }
}
