//! Type definitions for the application state.

use crate::domain::EditTarget;

/// Which input receives typed keys. Follows the editor's active target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Uncommitted text after the last token
    #[default]
    Primary,
    /// Buffer of a plain-text token under inline edit
    InlineEdit,
    /// Search field of the tag replace-popup
    TagPopup,
}

impl Focus {
    pub fn from_target(target: &EditTarget) -> Self {
        match target {
            EditTarget::None => Focus::Primary,
            EditTarget::InlineEdit { .. } => Focus::InlineEdit,
            EditTarget::TagPopup { .. } => Focus::TagPopup,
        }
    }
}
