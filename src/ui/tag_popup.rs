//! Replace-popup for a tag chip: search field, results, "Delete Tag".

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::suggestions::{list_lines, register_rows};
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER_FOCUS, COLOR_DIALOG_BG, COLOR_DIM, COLOR_ERROR, COLOR_HEADER,
    COLOR_HOVER_BG,
};
use crate::state::SuggestionFeed;
use crate::ui::interaction::{ClickAction, HitAreaRegistry};
use crate::widgets::LineInput;

const POPUP_WIDTH: u16 = 40;

pub const DELETE_LABEL: &str = "Delete Tag";

/// Draw the popup below `anchor` (the tag chip's first cell) and return the
/// cursor position inside its search field.
pub fn render_tag_popup(
    frame: &mut Frame,
    search: &LineInput,
    feed: &SuggestionFeed,
    anchor: (u16, u16),
    registry: &mut HitAreaRegistry,
) -> (u16, u16) {
    let list = list_lines(feed, Some("No suggestions"));
    // search + separator + list + delete, inside borders
    let content_height = 2 + list.len() as u16 + 1;

    let screen = frame.area();
    let width = POPUP_WIDTH.min(screen.width);
    let height = (content_height + 2).min(screen.height);
    let x = anchor.0.min(screen.width.saturating_sub(width));
    let below = anchor.1 + 1;
    let y = if below + height <= screen.height {
        below
    } else {
        anchor.1.saturating_sub(height)
    };
    let popup_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .title(Span::styled(
            " Replace tag ",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER_FOCUS))
        .style(Style::default().bg(COLOR_DIALOG_BG));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    registry.register(popup_area, ClickAction::PopupBackground);

    if inner.height == 0 {
        return (inner.x, inner.y);
    }

    let prompt = "Search: ";
    let search_line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(COLOR_DIM)),
        Span::styled(search.content().to_string(), Style::default().fg(COLOR_ACCENT)),
    ]);
    let separator = Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        Style::default().fg(COLOR_DIM),
    ));

    let mut lines = vec![search_line, separator];
    lines.extend(list.lines.iter().cloned());
    lines.push(Line::from(Span::styled(
        DELETE_LABEL,
        Style::default().fg(COLOR_ERROR),
    )));
    frame.render_widget(Paragraph::new(lines), inner);

    let list_area = Rect::new(
        inner.x,
        inner.y + 2,
        inner.width,
        inner.height.saturating_sub(3),
    );
    register_rows(frame, registry, &list, list_area, ClickAction::PopupSuggestion);

    let delete_y = inner.y + 2 + list.len() as u16;
    if delete_y < inner.y + inner.height {
        let delete_rect = Rect::new(inner.x, delete_y, DELETE_LABEL.len() as u16, 1);
        if registry.is_hovered(delete_rect) {
            frame
                .buffer_mut()
                .set_style(delete_rect, Style::default().bg(COLOR_HOVER_BG));
        }
        registry.register(delete_rect, ClickAction::PopupDelete);
    }

    let cursor_x = inner.x + prompt.len() as u16 + search.cursor_display_offset() as u16;
    (cursor_x.min(inner.x + inner.width.saturating_sub(1)), inner.y)
}
