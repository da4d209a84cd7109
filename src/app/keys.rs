//! Keyboard handling, dispatched on [`Focus`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Focus};
use crate::widgets::LineInput;

fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

/// Cursor and delete keys shared by every text field. Returns true when the
/// key was consumed.
fn edit_line(input: &mut LineInput, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if is_plain(key) => input.insert_char(c),
        KeyCode::Backspace => {
            input.backspace();
        }
        KeyCode::Delete => {
            input.delete_char();
        }
        KeyCode::Left => input.move_cursor_left(),
        KeyCode::Right => input.move_cursor_right(),
        KeyCode::Home => input.move_cursor_home(),
        KeyCode::End => input.move_cursor_end(),
        _ => return false,
    }
    true
}

impl App {
    /// Handle a key press. Returns true if the key did something.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Char('l') if ctrl => {
                tracing::info!("formula cleared");
                self.clear_formula();
                return true;
            }
            KeyCode::Char('r') if ctrl => {
                self.retry_suggestions();
                return true;
            }
            KeyCode::F(5) => {
                // Same as clicking the button: blur first
                self.editor.resolve_target();
                self.sync_after_edit();
                self.calculate();
                return true;
            }
            _ => {}
        }

        let handled = match self.focus() {
            Focus::Primary => self.handle_primary_key(&key),
            Focus::InlineEdit => self.handle_inline_key(&key),
            Focus::TagPopup => self.handle_popup_key(&key),
        };
        if handled {
            self.sync_after_edit();
        }
        handled
    }

    fn handle_primary_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Left if ctrl => self.move_highlight(-1),
            KeyCode::Right if ctrl => self.move_highlight(1),
            KeyCode::F(2) => self.activate_highlight(),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Enter => {
                let committed = self.editor.commit_uncommitted();
                if committed {
                    tracing::debug!(tokens = self.editor.store().len(), "text committed");
                }
                committed
            }
            KeyCode::Up if self.primary.is_visible() => {
                self.primary.select_prev();
                true
            }
            KeyCode::Down if self.primary.is_visible() => {
                self.primary.select_next();
                true
            }
            KeyCode::Tab if self.primary.is_visible() => {
                match self.primary.selected().cloned() {
                    Some(suggestion) => {
                        tracing::debug!(value = %suggestion.value, "suggestion selected");
                        self.editor.select_suggestion(&suggestion);
                        true
                    }
                    None => false,
                }
            }
            KeyCode::Esc => {
                self.highlighted = None;
                self.primary.dismiss();
                true
            }
            _ => edit_line(self.editor.input_mut(), key),
        }
    }

    fn handle_inline_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Tab => self.editor.commit_inline_edit(),
            KeyCode::Esc => self.editor.cancel_inline_edit(),
            _ => self
                .editor
                .inline_buffer_mut()
                .is_some_and(|buffer| edit_line(buffer, key)),
        }
    }

    fn handle_popup_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('d') if ctrl => self.editor.delete_popup_tag(),
            KeyCode::Esc => self.editor.close_popup(),
            KeyCode::Up => {
                self.popup.select_prev();
                true
            }
            KeyCode::Down => {
                self.popup.select_next();
                true
            }
            KeyCode::Enter => match self.popup.selected().cloned() {
                Some(suggestion) => self.editor.select_popup_suggestion(&suggestion),
                None => false,
            },
            _ => self
                .editor
                .popup_search_mut()
                .is_some_and(|search| edit_line(search, key)),
        }
    }

    /// Bracketed paste goes into whichever field has focus. Line breaks
    /// become spaces since every field is single-line.
    pub fn handle_paste(&mut self, text: &str) {
        let text = text.replace(['\r', '\n'], " ");
        let input = match self.focus() {
            Focus::Primary => Some(self.editor.input_mut()),
            Focus::InlineEdit => self.editor.inline_buffer_mut(),
            Focus::TagPopup => self.editor.popup_search_mut(),
        };
        if let Some(input) = input {
            input.insert_str(&text);
            self.sync_after_edit();
        }
    }

    fn move_highlight(&mut self, delta: isize) -> bool {
        let len = self.editor.store().len();
        if len == 0 {
            return false;
        }
        self.highlighted = Some(match (self.highlighted, delta < 0) {
            (None, true) => len - 1,
            (None, false) => 0,
            (Some(i), true) => i.saturating_sub(1),
            (Some(i), false) => (i + 1).min(len - 1),
        });
        true
    }

    /// F2: open the highlighted token for editing.
    fn activate_highlight(&mut self) -> bool {
        let Some(index) = self.highlighted else {
            return false;
        };
        match self.editor.store().get(index) {
            Some(token) if token.is_tag() => self.editor.open_tag_popup(index),
            Some(_) => self.editor.begin_inline_edit(index),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::MockSuggestionSource;
    use crate::domain::CalcOutcome;
    use crate::models::Token;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn test_type_commit_and_calculate() {
        let mut app = app_with(MockSuggestionSource::new());
        type_str(&mut app, "3+4");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editor.tokens(), &[Token::text("3+4")]);

        press(&mut app, KeyCode::F(5));
        assert_eq!(app.result, Some(CalcOutcome::Value(7.0)));
    }

    #[tokio::test]
    async fn test_tab_selects_highlighted_suggestion() {
        let source = MockSuggestionSource::new().with_results("re", vec![revenue(), cost()]);
        let mut app = app_with(source);
        type_str(&mut app, "2*re");
        drain(&mut app).await;

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Tab);

        assert_eq!(
            app.editor.tokens(),
            &[Token::text("2*"), revenue().to_tag()]
        );
        assert_eq!(app.editor.uncommitted_text(), "");
        assert!(!app.primary.is_visible());
    }

    #[tokio::test]
    async fn test_esc_dismisses_dropdown_until_query_changes() {
        let source = MockSuggestionSource::new()
            .with_results("re", vec![revenue()])
            .with_results("rev", vec![revenue()]);
        let mut app = app_with(source);
        type_str(&mut app, "re");
        drain(&mut app).await;
        assert!(app.primary.is_visible());

        press(&mut app, KeyCode::Esc);
        drain(&mut app).await;
        assert!(!app.primary.is_visible());
        assert_eq!(app.primary.query(), "re");

        // Tab no longer picks from the hidden list
        press(&mut app, KeyCode::Tab);
        assert!(app.editor.tokens().is_empty());
        assert_eq!(app.editor.uncommitted_text(), "re");

        type_str(&mut app, "v");
        drain(&mut app).await;
        assert!(app.primary.is_visible());
    }

    #[tokio::test]
    async fn test_backspace_on_empty_removes_last_token() {
        let mut app = app_with(MockSuggestionSource::new());
        type_str(&mut app, "1");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "2");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.editor.tokens(), &[Token::text("1")]);
    }

    #[tokio::test]
    async fn test_f2_inline_edit_roundtrip() {
        let mut app = app_with(MockSuggestionSource::new());
        type_str(&mut app, "12");
        press(&mut app, KeyCode::Enter);

        app.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(app.highlighted, Some(0));
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.focus(), Focus::InlineEdit);

        type_str(&mut app, "3");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.editor.tokens(), &[Token::text("12")]);

        press(&mut app, KeyCode::F(2));
        type_str(&mut app, "3");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editor.tokens(), &[Token::text("123")]);
        assert_eq!(app.focus(), Focus::Primary);
    }

    #[tokio::test]
    async fn test_popup_keys_replace_and_delete() {
        let source = MockSuggestionSource::new().with_results("co", vec![cost()]);
        let mut app = app_with(source);
        app.editor.select_suggestion(&revenue());
        app.highlighted = Some(0);

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.focus(), Focus::TagPopup);
        type_str(&mut app, "co");
        drain(&mut app).await;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editor.tokens(), &[cost().to_tag()]);
        assert_eq!(app.focus(), Focus::Primary);

        press(&mut app, KeyCode::F(2));
        ctrl(&mut app, 'd');
        assert!(app.editor.tokens().is_empty());
        assert_eq!(app.highlighted, None);
    }

    #[tokio::test]
    async fn test_ctrl_l_clears_and_ctrl_c_quits() {
        let mut app = app_with(MockSuggestionSource::new());
        type_str(&mut app, "1");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "2");

        ctrl(&mut app, 'l');
        assert!(app.editor.tokens().is_empty());
        assert_eq!(app.editor.uncommitted_text(), "");

        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_paste_flattens_newlines() {
        let mut app = app_with(MockSuggestionSource::new());
        app.handle_paste("1 +\n2");
        assert_eq!(app.editor.uncommitted_text(), "1 + 2");
    }
}
