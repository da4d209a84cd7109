//! Suggestion list rendering shared by the dropdown and the tag popup, and
//! the primary dropdown itself.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIALOG_BG, COLOR_DIM, COLOR_ERROR,
    COLOR_HOVER_BG,
};
use crate::state::SuggestionFeed;
use crate::ui::interaction::{ClickAction, HitAreaRegistry};

/// Maximum visible rows in a suggestion list
pub const MAX_VISIBLE_ROWS: usize = 7;

/// Preferred dropdown width
const DROPDOWN_WIDTH: u16 = 44;

/// Lines for a suggestion list plus, per line, the result index it shows.
pub struct ListLines {
    pub lines: Vec<Line<'static>>,
    pub rows: Vec<Option<usize>>,
}

impl ListLines {
    fn push(&mut self, line: Line<'static>, row: Option<usize>) {
        self.lines.push(line);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Build the body of a suggestion list: a status line while loading or
/// after a failure, otherwise the results with `▸` on the selected row.
/// `empty_text` is shown when there is nothing else to say.
pub fn list_lines(feed: &SuggestionFeed, empty_text: Option<&str>) -> ListLines {
    let mut out = ListLines {
        lines: Vec::new(),
        rows: Vec::new(),
    };

    if feed.is_loading() {
        out.push(
            Line::from(Span::styled("  Loading...", Style::default().fg(COLOR_ACTIVE))),
            None,
        );
        return out;
    }

    if let Some(err) = feed.error() {
        let mut spans = vec![Span::styled(
            format!("  {}", err.user_message()),
            Style::default().fg(COLOR_ERROR),
        )];
        if err.is_retryable() {
            spans.push(Span::styled(
                " (Ctrl+R to retry)",
                Style::default().fg(COLOR_DIM),
            ));
        }
        out.push(Line::from(spans), None);
        return out;
    }

    let results = feed.results();
    if results.is_empty() {
        if let Some(text) = empty_text {
            out.push(
                Line::from(Span::styled(format!("  {}", text), Style::default().fg(COLOR_DIM))),
                None,
            );
        }
        return out;
    }

    let selected = feed.selected_index();
    let scroll_offset = if selected >= MAX_VISIBLE_ROWS {
        selected - MAX_VISIBLE_ROWS + 1
    } else {
        0
    };

    if scroll_offset > 0 {
        out.push(
            Line::from(Span::styled(
                format!("  {} more above", scroll_offset),
                Style::default().fg(COLOR_DIM),
            )),
            None,
        );
    }

    for (idx, suggestion) in results
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(MAX_VISIBLE_ROWS)
    {
        let mut spans = Vec::new();
        if idx == selected {
            let bold = Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD);
            spans.push(Span::styled("▸ ", bold));
            spans.push(Span::styled(suggestion.name.clone(), bold));
        } else {
            spans.push(Span::raw("  "));
            spans.push(Span::raw(suggestion.name.clone()));
        }
        if !suggestion.category.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                suggestion.category.clone(),
                Style::default().fg(COLOR_DIM),
            ));
        }
        out.push(Line::from(spans), Some(idx));
    }

    let remaining = results.len().saturating_sub(scroll_offset + MAX_VISIBLE_ROWS);
    if remaining > 0 {
        out.push(
            Line::from(Span::styled(
                format!("  {} more below", remaining),
                Style::default().fg(COLOR_DIM),
            )),
            None,
        );
    }

    out
}

/// Register one hit area per result line and tint the hovered one.
pub fn register_rows(
    frame: &mut Frame,
    registry: &mut HitAreaRegistry,
    list: &ListLines,
    inner: Rect,
    action: fn(usize) -> ClickAction,
) {
    for (offset, row) in list.rows.iter().enumerate().take(inner.height as usize) {
        let Some(row) = row else { continue };
        let rect = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
        if registry.is_hovered(rect) {
            frame
                .buffer_mut()
                .set_style(rect, Style::default().bg(COLOR_HOVER_BG));
        }
        registry.register(rect, action(*row));
    }
}

/// Dropdown under the primary input, anchored at `anchor` (the input's first
/// cell). Opens upward when there is no room below.
pub fn render_dropdown(
    frame: &mut Frame,
    feed: &SuggestionFeed,
    anchor: (u16, u16),
    registry: &mut HitAreaRegistry,
) {
    if !feed.is_visible() {
        return;
    }
    let list = list_lines(feed, None);
    if list.is_empty() {
        return;
    }

    let screen = frame.area();
    let height = (list.len() as u16 + 2).min(screen.height);
    let width = DROPDOWN_WIDTH.min(screen.width);
    let x = anchor.0.min(screen.width.saturating_sub(width));
    let below = anchor.1 + 1;
    let y = if below + height <= screen.height {
        below
    } else {
        anchor.1.saturating_sub(height)
    };
    let dialog_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, dialog_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .style(Style::default().bg(COLOR_DIALOG_BG));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    frame.render_widget(Paragraph::new(list.lines.clone()), inner);

    register_rows(frame, registry, &list, inner, ClickAction::Suggestion);
}
