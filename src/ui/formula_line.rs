//! Layout of the formula line: token chips followed by the primary input,
//! wrapped to the available width.
//!
//! Layout is computed separately from drawing so that hit areas, the cursor
//! and overlay anchors all come from the same positions.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::{EditTarget, EditingController};
use crate::ui::interaction::ClickAction;

/// Trigger drawn at the end of every tag chip.
pub const TAG_TRIGGER: &str = "⋮";

/// Columns between chips.
const GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    /// Committed plain-text token
    Text,
    /// Label part of a tag chip
    Tag,
    /// `⋮` part of a tag chip
    Trigger,
    /// Plain-text token open for inline edit
    Editing,
    /// Uncommitted text of the primary input
    Input,
}

/// One run of text at a column within a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub x: u16,
    pub text: String,
    pub kind: PieceKind,
    pub action: ClickAction,
    /// Keyboard highlight or the tag whose popup is open
    pub highlighted: bool,
}

impl Piece {
    pub fn width(&self) -> u16 {
        self.text.width() as u16
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaLayout {
    pub rows: Vec<Vec<Piece>>,
    /// Cursor cell (column, row) of the focused field, if it is on this line
    pub cursor: Option<(u16, u16)>,
    /// Where each token's chip starts, by token index
    pub token_origins: Vec<(u16, u16)>,
    /// Where the primary input starts
    pub input_origin: (u16, u16),
}

impl FormulaLayout {
    pub fn height(&self) -> u16 {
        self.rows.len().max(1) as u16
    }
}

/// Cut `text` to at most `max` display columns.
pub fn truncate_to_width(text: &str, max: u16) -> String {
    let mut out = String::new();
    let mut used = 0u16;
    for c in text.chars() {
        let w = c.width().unwrap_or(0) as u16;
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Drop leading characters covering at least `cols` display columns.
/// Returns the rest and how many columns were dropped.
pub fn skip_columns(text: &str, cols: u16) -> (&str, u16) {
    let mut dropped = 0u16;
    for (i, c) in text.char_indices() {
        if dropped >= cols {
            return (&text[i..], dropped);
        }
        dropped += c.width().unwrap_or(0) as u16;
    }
    ("", dropped)
}

struct RowBuilder {
    width: u16,
    rows: Vec<Vec<Piece>>,
    x: u16,
}

impl RowBuilder {
    fn new(width: u16) -> Self {
        Self {
            width: width.max(1),
            rows: vec![Vec::new()],
            x: 0,
        }
    }

    fn row(&self) -> u16 {
        (self.rows.len() - 1) as u16
    }

    /// Reserve `width` columns, wrapping first if they do not fit.
    fn reserve(&mut self, width: u16) -> (u16, u16) {
        if self.x > 0 && self.x + width > self.width {
            self.rows.push(Vec::new());
            self.x = 0;
        }
        (self.x, self.row())
    }

    fn push(&mut self, text: String, kind: PieceKind, action: ClickAction, highlighted: bool) {
        let room = self.width.saturating_sub(self.x);
        let text = truncate_to_width(&text, room);
        let width = text.width() as u16;
        if let Some(row) = self.rows.last_mut() {
            row.push(Piece {
                x: self.x,
                text,
                kind,
                action,
                highlighted,
            });
        }
        self.x += width;
    }

    fn gap(&mut self) {
        self.x = (self.x + GAP).min(self.width);
    }
}

/// Lay out `editor`'s tokens and primary input within `width` columns.
pub fn layout(editor: &EditingController, highlighted: Option<usize>, width: u16) -> FormulaLayout {
    let mut builder = RowBuilder::new(width);
    let mut token_origins = Vec::with_capacity(editor.tokens().len());
    let mut cursor = None;
    let target = editor.target();

    for (index, token) in editor.tokens().iter().enumerate() {
        let marked = highlighted == Some(index);
        match (token, target) {
            (_, EditTarget::InlineEdit { index: open, buffer }) if *open == index => {
                // Trailing cell for the cursor
                let text = format!("{} ", buffer.content());
                let origin = builder.reserve(text.width() as u16);
                token_origins.push(origin);
                let col = origin.0 + buffer.cursor_display_offset() as u16;
                cursor = Some((col.min(builder.width - 1), origin.1));
                builder.push(text, PieceKind::Editing, ClickAction::Token(index), marked);
            }
            (token, _) if token.is_tag() => {
                let open = matches!(target, EditTarget::TagPopup { index: i, .. } if *i == index);
                let label = format!(" {} ", token.label());
                let trigger = format!("{} ", TAG_TRIGGER);
                let origin = builder.reserve((label.width() + trigger.width()) as u16);
                token_origins.push(origin);
                builder.push(label, PieceKind::Tag, ClickAction::Token(index), marked || open);
                builder.push(trigger, PieceKind::Trigger, ClickAction::TagMenu(index), marked || open);
            }
            (token, _) => {
                let text = token.value().to_string();
                let origin = builder.reserve(text.width().max(1) as u16);
                token_origins.push(origin);
                builder.push(text, PieceKind::Text, ClickAction::Token(index), marked);
            }
        }
        builder.gap();
    }

    let input = editor.input();
    let input_origin = builder.reserve(input.content().width() as u16 + 1);
    // Scroll horizontally so the cursor cell stays on the row
    let room = builder.width.saturating_sub(input_origin.0).max(1);
    let cursor_col = input.cursor_display_offset() as u16;
    let overflow = (cursor_col + 1).saturating_sub(room);
    let (visible, scrolled) = skip_columns(input.content(), overflow);
    if target.is_none() {
        let col = input_origin.0 + cursor_col.saturating_sub(scrolled);
        cursor = Some((col.min(builder.width - 1), input_origin.1));
    }
    builder.push(visible.to_string(), PieceKind::Input, ClickAction::PrimaryInput, false);

    FormulaLayout {
        rows: builder.rows,
        cursor,
        token_origins,
        input_origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Suggestion;

    fn editor_with(texts: &[&str]) -> EditingController {
        let mut editor = EditingController::new();
        for text in texts {
            editor.set_uncommitted_text(text);
            editor.commit_uncommitted();
        }
        editor
    }

    #[test]
    fn test_single_row() {
        let mut editor = editor_with(&["2*"]);
        editor.select_suggestion(&Suggestion::new("1", "Revenue", "Finance", "rev"));
        editor.set_uncommitted_text("+3");

        let layout = layout(&editor, None, 80);
        assert_eq!(layout.rows.len(), 1);
        let texts: Vec<&str> = layout.rows[0].iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["2*", " Revenue ", "⋮ ", "+3"]);
        assert_eq!(layout.token_origins, vec![(0, 0), (3, 0)]);
        assert_eq!(layout.rows[0][2].action, ClickAction::TagMenu(1));
        // "2*" + gap + " Revenue ⋮ " + gap
        assert_eq!(layout.input_origin, (15, 0));
        assert_eq!(layout.cursor, Some((17, 0)));
    }

    #[test]
    fn test_wraps_chips_that_do_not_fit() {
        let editor = editor_with(&["aaaa", "bbbb", "cc"]);
        let layout = layout(&editor, None, 10);
        assert_eq!(layout.token_origins, vec![(0, 0), (5, 0), (0, 1)]);
        assert_eq!(layout.height(), 2);
    }

    #[test]
    fn test_long_chip_is_truncated() {
        let editor = editor_with(&["abcdefghijkl"]);
        let layout = layout(&editor, None, 5);
        assert_eq!(layout.rows[0][0].text, "abcde");
        assert_eq!(layout.input_origin, (0, 1));
    }

    #[test]
    fn test_inline_edit_moves_cursor_into_chip() {
        let mut editor = editor_with(&["12", "34"]);
        editor.begin_inline_edit(1);
        let layout = layout(&editor, None, 80);
        let editing = &layout.rows[0][1];
        assert_eq!(editing.kind, PieceKind::Editing);
        assert_eq!(editing.text, "34 ");
        assert_eq!(layout.cursor, Some((5, 0)));
    }

    #[test]
    fn test_highlight_and_open_popup_mark_chips() {
        let mut editor = editor_with(&["1"]);
        editor.select_suggestion(&Suggestion::new("1", "Revenue", "Finance", "rev"));
        editor.open_tag_popup(1);

        let layout = layout(&editor, Some(0), 80);
        assert!(layout.rows[0][0].highlighted);
        assert!(layout.rows[0][1].highlighted);
        assert_eq!(layout.cursor, None);
    }

    #[test]
    fn test_long_input_scrolls_to_cursor() {
        let mut editor = EditingController::new();
        editor.set_uncommitted_text("abcdefghijkl");
        let layout = layout(&editor, None, 5);
        let input = &layout.rows[0][0];
        assert_eq!(input.kind, PieceKind::Input);
        // Cursor sits after the last char, so the tail stays visible
        assert_eq!(input.text, "ijkl");
        assert_eq!(layout.cursor, Some((4, 0)));

        editor.input_mut().move_cursor_home();
        let layout = super::layout(&editor, None, 5);
        assert_eq!(layout.rows[0][0].text, "abcde");
        assert_eq!(layout.cursor, Some((0, 0)));
    }

    #[test]
    fn test_skip_columns_handles_wide_chars() {
        assert_eq!(skip_columns("日本語", 1), ("本語", 2));
        assert_eq!(skip_columns("abc", 0), ("abc", 0));
        assert_eq!(skip_columns("ab", 5), ("", 2));
    }

    #[test]
    fn test_truncate_to_width_counts_columns() {
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
