//! Editing controller for the formula line.
//!
//! Owns the [`TokenStore`] plus everything transient: the uncommitted text in
//! the primary input and the single active [`EditTarget`]. Every operation is
//! synchronous; suggestion fetching is the caller's job, driven by
//! [`EditingController::current_query`] and [`EditingController::popup_query`].

use std::fmt;

use super::query;
use super::store::TokenStore;
use crate::models::{Suggestion, Token};
use crate::traits::Evaluator;
use crate::widgets::LineInput;

/// At most one token is being edited at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditTarget {
    #[default]
    None,
    /// A plain-text token being rewritten in place.
    InlineEdit { index: usize, buffer: LineInput },
    /// A tag token whose replace-popup is open.
    TagPopup { index: usize, search: LineInput },
}

impl EditTarget {
    pub fn index(&self) -> Option<usize> {
        match self {
            EditTarget::None => None,
            EditTarget::InlineEdit { index, .. } | EditTarget::TagPopup { index, .. } => {
                Some(*index)
            }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, EditTarget::None)
    }
}

/// Outcome of evaluating the linearized formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalcOutcome {
    Value(f64),
    Error,
}

impl fmt::Display for CalcOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcOutcome::Value(v) => f.write_str(&crate::eval::format_number(*v)),
            CalcOutcome::Error => f.write_str("Error"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditingController {
    store: TokenStore,
    input: LineInput,
    target: EditTarget,
}

impl EditingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: TokenStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn tokens(&self) -> &[Token] {
        self.store.tokens()
    }

    pub fn input(&self) -> &LineInput {
        &self.input
    }

    /// Direct access to the primary input for cursor movement and editing.
    pub fn input_mut(&mut self) -> &mut LineInput {
        &mut self.input
    }

    pub fn uncommitted_text(&self) -> &str {
        self.input.content()
    }

    /// Replace the uncommitted text verbatim.
    pub fn set_uncommitted_text(&mut self, text: &str) {
        self.input.set_content(text);
    }

    /// Query for the primary dropdown, derived from the uncommitted text.
    pub fn current_query(&self) -> &str {
        query::current_query(self.input.content())
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    // ---- primary input ----

    /// Enter on the primary input. Commits the whole uncommitted text as one
    /// plain-text token unless it is blank.
    pub fn commit_uncommitted(&mut self) -> bool {
        if self.input.is_blank() {
            return false;
        }
        let text = self.input.content().to_string();
        self.store.append(Token::text(text));
        self.input.clear();
        true
    }

    /// Backspace on the primary input.
    ///
    /// With text present this deletes the char before the cursor. With no
    /// text it removes the last committed token, if any.
    pub fn backspace(&mut self) -> bool {
        if !self.input.is_empty() {
            return self.input.backspace();
        }
        match self.store.len().checked_sub(1) {
            Some(last) => self.remove_token(last).is_some(),
            None => false,
        }
    }

    /// Pick a suggestion for the primary query.
    ///
    /// Text typed before the query (delimiters included) is committed first
    /// as its own plain-text token so nothing the user typed is lost.
    pub fn select_suggestion(&mut self, suggestion: &Suggestion) {
        let prefix = query::query_prefix(self.input.content());
        if !prefix.trim().is_empty() {
            let prefix = prefix.to_string();
            self.store.append(Token::text(prefix));
        }
        self.store.append(suggestion.to_tag());
        self.input.clear();
    }

    // ---- inline edit ----

    /// Open the plain-text token at `index` for editing. Tags and
    /// out-of-range indices are refused. Any other active target is resolved
    /// first.
    pub fn begin_inline_edit(&mut self, index: usize) -> bool {
        if self.target.index() == Some(index)
            && matches!(self.target, EditTarget::InlineEdit { .. })
        {
            return true;
        }
        let text = match self.store.get(index) {
            Some(token) if token.is_text() => token.value().to_string(),
            _ => return false,
        };
        let index = self.resolve_target_before(index);
        self.target = EditTarget::InlineEdit {
            index,
            buffer: LineInput::with_content(&text),
        };
        true
    }

    pub fn inline_buffer(&self) -> Option<&LineInput> {
        match &self.target {
            EditTarget::InlineEdit { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn inline_buffer_mut(&mut self) -> Option<&mut LineInput> {
        match &mut self.target {
            EditTarget::InlineEdit { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    /// Enter or blur: write the buffer back. A blank buffer removes the token
    /// rather than leaving an empty one behind.
    pub fn commit_inline_edit(&mut self) -> bool {
        let EditTarget::InlineEdit { index, buffer } = std::mem::take(&mut self.target) else {
            return false;
        };
        if buffer.is_blank() {
            self.store.remove_at(index);
        } else {
            self.store
                .replace_at(index, Token::text(buffer.content().to_string()));
        }
        true
    }

    /// Escape: drop the buffer without touching the store.
    pub fn cancel_inline_edit(&mut self) -> bool {
        if matches!(self.target, EditTarget::InlineEdit { .. }) {
            self.target = EditTarget::None;
            true
        } else {
            false
        }
    }

    // ---- tag popup ----

    /// Open the replace-popup for the tag at `index` with an empty search.
    pub fn open_tag_popup(&mut self, index: usize) -> bool {
        if !self.store.get(index).is_some_and(Token::is_tag) {
            return false;
        }
        let index = self.resolve_target_before(index);
        self.target = EditTarget::TagPopup {
            index,
            search: LineInput::new(),
        };
        true
    }

    pub fn popup_search(&self) -> Option<&LineInput> {
        match &self.target {
            EditTarget::TagPopup { search, .. } => Some(search),
            _ => None,
        }
    }

    pub fn popup_search_mut(&mut self) -> Option<&mut LineInput> {
        match &mut self.target {
            EditTarget::TagPopup { search, .. } => Some(search),
            _ => None,
        }
    }

    /// Query for the popup channel. A blank search asks for a single space
    /// so the popup opens on a broad result set.
    pub fn popup_query(&self) -> Option<String> {
        self.popup_search().map(|search| {
            if search.is_blank() {
                " ".to_string()
            } else {
                search.content().to_string()
            }
        })
    }

    /// Replace the popup's tag with `suggestion` and close the popup.
    pub fn select_popup_suggestion(&mut self, suggestion: &Suggestion) -> bool {
        let EditTarget::TagPopup { index, .. } = self.target else {
            return false;
        };
        self.target = EditTarget::None;
        tracing::debug!(index, value = %suggestion.value, "replace tag");
        self.store.replace_at(index, suggestion.to_tag()).is_some()
    }

    /// Remove the popup's tag and close the popup.
    pub fn delete_popup_tag(&mut self) -> bool {
        let EditTarget::TagPopup { index, .. } = self.target else {
            return false;
        };
        self.target = EditTarget::None;
        self.store.remove_at(index).is_some()
    }

    pub fn close_popup(&mut self) -> bool {
        if matches!(self.target, EditTarget::TagPopup { .. }) {
            self.target = EditTarget::None;
            true
        } else {
            false
        }
    }

    /// The presentation layer reports a click outside the active popup's
    /// region. Closes the popup; the store is untouched.
    pub fn notify_outside_interaction(&mut self) -> bool {
        self.close_popup()
    }

    // ---- whole-line operations ----

    /// Leave whatever target is active: commit an inline edit, close a popup.
    pub fn resolve_target(&mut self) {
        match self.target {
            EditTarget::None => {}
            EditTarget::InlineEdit { .. } => {
                self.commit_inline_edit();
            }
            EditTarget::TagPopup { .. } => {
                self.close_popup();
            }
        }
    }

    /// Resolve the active target ahead of opening a new one at `index`,
    /// returning where that token sits afterwards.
    fn resolve_target_before(&mut self, index: usize) -> usize {
        let removes_earlier = match &self.target {
            EditTarget::InlineEdit { index: open, buffer } => buffer.is_blank() && *open < index,
            _ => false,
        };
        self.resolve_target();
        if removes_earlier {
            index - 1
        } else {
            index
        }
    }

    /// Remove every token, the uncommitted text and any edit target.
    pub fn clear(&mut self) {
        self.store.clear();
        self.input.clear();
        self.target = EditTarget::None;
    }

    /// Token values (never display labels) plus the non-blank uncommitted
    /// text, joined with single spaces.
    pub fn linearize(&self) -> String {
        let mut parts: Vec<&str> = self.store.tokens().iter().map(Token::value).collect();
        if !self.input.is_blank() {
            parts.push(self.input.content());
        }
        parts.join(" ")
    }

    /// Evaluate the linearized formula. Failure detail is logged, never shown.
    pub fn calculate<E: Evaluator + ?Sized>(&self, evaluator: &E) -> CalcOutcome {
        let expression = self.linearize();
        match evaluator.evaluate(&expression) {
            Ok(value) => {
                tracing::info!(expression = %expression, value, "formula evaluated");
                CalcOutcome::Value(value)
            }
            Err(err) => {
                tracing::debug!(expression = %expression, error = %err, code = err.error_code(), "evaluation failed");
                CalcOutcome::Error
            }
        }
    }

    fn remove_token(&mut self, index: usize) -> Option<Token> {
        let removed = self.store.remove_at(index)?;
        match &mut self.target {
            EditTarget::InlineEdit { index: target, .. }
            | EditTarget::TagPopup { index: target, .. } => {
                if *target == index {
                    self.target = EditTarget::None;
                } else if *target > index {
                    *target -= 1;
                }
            }
            EditTarget::None => {}
        }
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::eval::{ArithmeticEvaluator, EvalContext};
    use crate::models::TokenKind;

    fn revenue() -> Suggestion {
        Suggestion::new("1", "Revenue", "Finance", "rev")
    }

    fn cost() -> Suggestion {
        Suggestion::new("2", "Cost", "Finance", "cost")
    }

    fn typed(text: &str) -> EditingController {
        let mut ctl = EditingController::new();
        ctl.set_uncommitted_text(text);
        ctl
    }

    fn values(ctl: &EditingController) -> Vec<&str> {
        ctl.tokens().iter().map(|t| t.value()).collect()
    }

    /// `[text "2", tag rev, text "*3"]`
    fn sample() -> EditingController {
        let mut store = TokenStore::new();
        store.append(Token::text("2"));
        store.append(revenue().to_tag());
        store.append(Token::text("*3"));
        EditingController::with_store(store)
    }

    #[test]
    fn test_current_query_follows_uncommitted_text() {
        let mut ctl = typed("12+ab");
        assert_eq!(ctl.current_query(), "ab");
        ctl.input_mut().insert_char('c');
        assert_eq!(ctl.current_query(), "abc");
        ctl.input_mut().insert_char('-');
        assert_eq!(ctl.current_query(), "");
    }

    #[test]
    fn test_enter_commits_full_text() {
        let mut ctl = typed("3+4");
        assert!(ctl.commit_uncommitted());
        assert_eq!(ctl.tokens(), &[Token::text("3+4")]);
        assert_eq!(ctl.uncommitted_text(), "");
    }

    #[test]
    fn test_enter_with_blank_text_is_noop() {
        let mut ctl = typed("   ");
        assert!(!ctl.commit_uncommitted());
        assert!(ctl.store().is_empty());
        assert_eq!(ctl.uncommitted_text(), "   ");
    }

    #[test]
    fn test_backspace_on_empty_input_removes_last_token() {
        let mut ctl = sample();
        assert!(ctl.backspace());
        assert_eq!(values(&ctl), vec!["2", "rev"]);
        assert!(ctl.tokens()[1].is_tag());
    }

    #[test]
    fn test_backspace_on_empty_sequence_is_noop() {
        let mut ctl = EditingController::new();
        assert!(!ctl.backspace());
        assert_eq!(ctl.store().len(), 0);
    }

    #[test]
    fn test_backspace_with_text_edits_text_only() {
        let mut ctl = sample();
        ctl.set_uncommitted_text("ab");
        assert!(ctl.backspace());
        assert_eq!(ctl.uncommitted_text(), "a");
        assert_eq!(ctl.store().len(), 3);
    }

    #[test]
    fn test_select_suggestion_commits_prefix_then_tag() {
        let mut ctl = typed("x+rev");
        ctl.select_suggestion(&revenue());
        assert_eq!(
            ctl.tokens(),
            &[
                Token::text("x+"),
                Token::tag("rev", Some("Revenue".to_string()))
            ]
        );
        assert_eq!(ctl.uncommitted_text(), "");
    }

    #[test]
    fn test_select_suggestion_without_prefix_adds_only_tag() {
        let mut ctl = typed("rev");
        ctl.select_suggestion(&revenue());
        assert_eq!(ctl.store().len(), 1);
        assert_eq!(ctl.tokens()[0].kind(), TokenKind::Tag);
        assert_eq!(ctl.tokens()[0].display(), Some("Revenue"));
    }

    #[test]
    fn test_select_suggestion_skips_blank_prefix() {
        let mut ctl = typed(" rev");
        ctl.select_suggestion(&revenue());
        assert_eq!(values(&ctl), vec!["rev"]);
    }

    #[test]
    fn test_inline_edit_commit_replaces_in_place() {
        let mut ctl = sample();
        assert!(ctl.begin_inline_edit(2));
        assert_eq!(ctl.inline_buffer().map(LineInput::content), Some("*3"));

        let buffer = ctl.inline_buffer_mut().unwrap();
        buffer.clear();
        buffer.insert_str("/4");
        assert!(ctl.commit_inline_edit());

        assert_eq!(values(&ctl), vec!["2", "rev", "/4"]);
        assert!(ctl.target().is_none());
    }

    #[test]
    fn test_inline_edit_cancel_leaves_store() {
        let mut ctl = sample();
        ctl.begin_inline_edit(0);
        ctl.inline_buffer_mut().unwrap().insert_char('9');
        assert!(ctl.cancel_inline_edit());
        assert_eq!(values(&ctl), vec!["2", "rev", "*3"]);
        assert!(ctl.target().is_none());
    }

    #[test]
    fn test_inline_edit_refuses_tags_and_bad_indices() {
        let mut ctl = sample();
        assert!(!ctl.begin_inline_edit(1));
        assert!(!ctl.begin_inline_edit(7));
        assert!(ctl.target().is_none());
    }

    #[test]
    fn test_blank_inline_edit_removes_token() {
        let mut ctl = sample();
        ctl.begin_inline_edit(0);
        ctl.inline_buffer_mut().unwrap().clear();
        ctl.commit_inline_edit();
        assert_eq!(values(&ctl), vec!["rev", "*3"]);
    }

    #[test]
    fn test_opening_popup_commits_inline_edit() {
        let mut ctl = sample();
        ctl.begin_inline_edit(0);
        ctl.inline_buffer_mut().unwrap().insert_char('0');
        assert!(ctl.open_tag_popup(1));
        assert_eq!(values(&ctl), vec!["20", "rev", "*3"]);
        assert!(matches!(ctl.target(), EditTarget::TagPopup { index: 1, .. }));
    }

    #[test]
    fn test_opening_popup_after_blank_inline_edit_follows_the_tag() {
        let mut ctl = sample();
        ctl.begin_inline_edit(0);
        ctl.inline_buffer_mut().unwrap().clear();
        assert!(ctl.open_tag_popup(1));
        assert_eq!(values(&ctl), vec!["rev", "*3"]);
        assert!(matches!(ctl.target(), EditTarget::TagPopup { index: 0, .. }));
    }

    #[test]
    fn test_inline_edit_closes_open_popup() {
        let mut ctl = sample();
        ctl.open_tag_popup(1);
        assert!(ctl.begin_inline_edit(2));
        assert!(matches!(ctl.target(), EditTarget::InlineEdit { index: 2, .. }));
        assert_eq!(ctl.store().len(), 3);
    }

    #[test]
    fn test_popup_query_defaults_to_space() {
        let mut ctl = sample();
        assert_eq!(ctl.popup_query(), None);
        ctl.open_tag_popup(1);
        assert_eq!(ctl.popup_query().as_deref(), Some(" "));
        ctl.popup_search_mut().unwrap().insert_str("   ");
        assert_eq!(ctl.popup_query().as_deref(), Some(" "));
        ctl.popup_search_mut().unwrap().set_content("co");
        assert_eq!(ctl.popup_query().as_deref(), Some("co"));
    }

    #[test]
    fn test_popup_reopens_with_empty_search() {
        let mut ctl = sample();
        ctl.open_tag_popup(1);
        ctl.popup_search_mut().unwrap().insert_str("co");
        ctl.close_popup();
        ctl.open_tag_popup(1);
        assert_eq!(ctl.popup_search().map(LineInput::content), Some(""));
    }

    #[test]
    fn test_popup_replace_keeps_length_and_neighbours() {
        let mut ctl = sample();
        let before = ctl.tokens().to_vec();
        ctl.open_tag_popup(1);
        assert!(ctl.select_popup_suggestion(&cost()));

        assert_eq!(ctl.store().len(), before.len());
        assert_eq!(ctl.tokens()[0], before[0]);
        assert_eq!(ctl.tokens()[2], before[2]);
        assert_eq!(ctl.tokens()[1], Token::tag("cost", Some("Cost".to_string())));
        assert!(ctl.target().is_none());
    }

    #[test]
    fn test_popup_delete_removes_exactly_target() {
        let mut ctl = sample();
        ctl.open_tag_popup(1);
        assert!(ctl.delete_popup_tag());
        assert_eq!(values(&ctl), vec!["2", "*3"]);
        assert!(ctl.target().is_none());
    }

    #[test]
    fn test_outside_interaction_closes_popup_only() {
        let mut ctl = sample();
        ctl.open_tag_popup(1);
        assert!(ctl.notify_outside_interaction());
        assert!(ctl.target().is_none());
        assert_eq!(ctl.store().len(), 3);
        assert!(!ctl.notify_outside_interaction());
    }

    #[test]
    fn test_popup_refuses_plain_text() {
        let mut ctl = sample();
        assert!(!ctl.open_tag_popup(0));
        assert!(!ctl.select_popup_suggestion(&cost()));
        assert!(!ctl.delete_popup_tag());
    }

    #[test]
    fn test_removing_target_token_drops_target() {
        let mut ctl = sample();
        ctl.begin_inline_edit(2);
        // Inline editing does not block the primary input programmatically
        ctl.backspace();
        assert!(ctl.target().is_none());
        assert_eq!(ctl.store().len(), 2);
    }

    #[test]
    fn test_linearize_uses_values() {
        assert_eq!(sample().linearize(), "2 rev *3");
    }

    #[test]
    fn test_linearize_appends_uncommitted_text() {
        let mut ctl = sample();
        ctl.set_uncommitted_text("+1");
        assert_eq!(ctl.linearize(), "2 rev *3 +1");
        ctl.set_uncommitted_text("  ");
        assert_eq!(ctl.linearize(), "2 rev *3");
    }

    #[test]
    fn test_calculate() {
        let evaluator =
            ArithmeticEvaluator::new(EvalContext::default().with_variable("rev", 5.0));
        let mut ctl = typed("3+4");
        ctl.commit_uncommitted();
        assert_eq!(ctl.calculate(&evaluator), CalcOutcome::Value(7.0));
        assert_eq!(ctl.calculate(&evaluator).to_string(), "7");

        ctl.set_uncommitted_text("*rev");
        assert_eq!(ctl.calculate(&evaluator), CalcOutcome::Value(23.0));
    }

    #[test]
    fn test_calculate_failure_is_fixed_indicator() {
        struct Failing;
        impl Evaluator for Failing {
            fn evaluate(&self, _: &str) -> Result<f64, EvalError> {
                Err(EvalError::UnexpectedEnd)
            }
        }

        let ctl = typed("3+");
        let outcome = ctl.calculate(&Failing);
        assert_eq!(outcome, CalcOutcome::Error);
        assert_eq!(outcome.to_string(), "Error");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut ctl = sample();
        ctl.set_uncommitted_text("abc");
        ctl.open_tag_popup(1);
        ctl.clear();
        assert!(ctl.store().is_empty());
        assert_eq!(ctl.uncommitted_text(), "");
        assert!(ctl.target().is_none());
    }
}
