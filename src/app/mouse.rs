//! Mouse click handling against the hit areas of the last frame.

use super::App;
use crate::domain::EditTarget;
use crate::ui::interaction::ClickAction;

/// Re-point a token action after the token at `removed` left the store.
fn shift_for_removal(action: ClickAction, removed: usize) -> Option<ClickAction> {
    let shift = |i: usize| match i.cmp(&removed) {
        std::cmp::Ordering::Less => Some(i),
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(i - 1),
    };
    match action {
        ClickAction::Token(i) => shift(i).map(ClickAction::Token),
        ClickAction::TagMenu(i) => shift(i).map(ClickAction::TagMenu),
        other => Some(other),
    }
}

impl App {
    /// Left click at terminal cell (`x`, `y`).
    ///
    /// An open popup closes when the click lands outside it and its tag's
    /// chip. An inline edit commits when the click lands anywhere but its own
    /// chip. The click is then handled as if nothing had been open.
    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        let mut action = self.hit_registry.hit_test(x, y);
        let mut changed = false;

        match self.editor.target() {
            EditTarget::TagPopup { index, .. } => {
                let inside = action.is_some_and(|a| a.is_within_popup_of(*index));
                if !inside {
                    changed |= self.editor.notify_outside_interaction();
                }
            }
            EditTarget::InlineEdit { index, buffer } => {
                let index = *index;
                if action != Some(ClickAction::Token(index)) {
                    let removes = buffer.is_blank();
                    changed |= self.editor.commit_inline_edit();
                    if removes {
                        action = action.and_then(|a| shift_for_removal(a, index));
                    }
                }
            }
            EditTarget::None => {}
        }

        if let Some(action) = action {
            tracing::trace!(?action, x, y, "click");
            changed |= self.handle_click_action(action);
        }
        if changed {
            self.sync_after_edit();
        }
        changed
    }

    fn handle_click_action(&mut self, action: ClickAction) -> bool {
        match action {
            ClickAction::Token(index) => {
                self.highlighted = Some(index);
                match self.editor.store().get(index) {
                    Some(token) if token.is_text() => {
                        self.editor.begin_inline_edit(index);
                    }
                    _ => {}
                }
                true
            }
            ClickAction::TagMenu(index) => {
                self.highlighted = Some(index);
                if self.editor.target().index() == Some(index) {
                    // Trigger toggles
                    self.editor.close_popup()
                } else {
                    self.editor.open_tag_popup(index)
                }
            }
            ClickAction::PrimaryInput => {
                self.highlighted = None;
                true
            }
            ClickAction::Suggestion(row) => {
                if !self.primary.select(row) {
                    return false;
                }
                match self.primary.selected().cloned() {
                    Some(suggestion) => {
                        self.editor.select_suggestion(&suggestion);
                        true
                    }
                    None => false,
                }
            }
            ClickAction::PopupSuggestion(row) => {
                if !self.popup.select(row) {
                    return false;
                }
                match self.popup.selected().cloned() {
                    Some(suggestion) => self.editor.select_popup_suggestion(&suggestion),
                    None => false,
                }
            }
            ClickAction::PopupDelete => self.editor.delete_popup_tag(),
            ClickAction::PopupBackground => false,
            ClickAction::Calculate => {
                self.calculate();
                true
            }
            ClickAction::Clear => {
                self.clear_formula();
                true
            }
        }
    }

    /// Mouse movement: refresh hover state. Returns true if a redraw is due.
    pub fn handle_mouse_move(&mut self, x: u16, y: u16) -> bool {
        let changed = self.hit_registry.update_hover(x, y);
        if changed {
            self.mark_dirty();
        }
        changed
    }
}
