//! UI rendering for the formula widget.
//!
//! One screen, top to bottom:
//! - Formula block: token chips followed by the primary input, wrapped
//! - Action line: `[ Calculate ]`, `[ Clear ]` and the last result
//! - Key hints for the focused field
//!
//! Overlays (suggestion dropdown, tag popup) are drawn last so their hit
//! areas sit on top. Every frame rebuilds the hit-area registry.

pub mod formula_line;
pub mod interaction;
mod suggestions;
mod tag_popup;
mod theme;

pub use formula_line::{layout as layout_formula, FormulaLayout, Piece, PieceKind, TAG_TRIGGER};
pub use theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_SUCCESS, COLOR_TAG_BG,
};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::domain::{CalcOutcome, EditTarget};
use interaction::{ClickAction, HitAreaRegistry};
use theme::{
    COLOR_BORDER_FOCUS, COLOR_HEADER, COLOR_HIGHLIGHT_BG, COLOR_HOVER_BG, COLOR_INPUT_BG,
    COLOR_TAG_FG, COLOR_TEXT_FG, COLOR_TRIGGER,
};

pub const CALCULATE_LABEL: &str = "[ Calculate ]";
pub const CLEAR_LABEL: &str = "[ Clear ]";
const PLACEHOLDER: &str = "Type a formula, e.g. 2 * Date";

// ============================================================================
// Main UI Rendering
// ============================================================================

pub fn render(frame: &mut Frame, app: &mut App) {
    app.hit_registry.clear();
    let area = frame.area();

    // Borders plus one column of padding on each side
    let content_width = area.width.saturating_sub(4);
    let formula = formula_line::layout(&app.editor, app.highlighted, content_width);
    let formula_height = formula.height() + 2;

    let [formula_area, actions_area, _, hints_area] = Layout::vertical([
        Constraint::Length(formula_height),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let content = render_formula_block(frame, app, &formula, formula_area);
    render_actions(frame, app, actions_area);
    render_hints(frame, app.focus(), hints_area);

    let to_screen = |(col, row): (u16, u16)| (content.x + col, content.y + row);
    let mut cursor = formula
        .cursor
        .filter(|(_, row)| *row < content.height)
        .map(to_screen);

    match app.editor.target() {
        EditTarget::TagPopup { index, search } => {
            if let Some(origin) = formula.token_origins.get(*index) {
                let anchor = to_screen(*origin);
                cursor = Some(tag_popup::render_tag_popup(
                    frame,
                    search,
                    &app.popup,
                    anchor,
                    &mut app.hit_registry,
                ));
            }
        }
        EditTarget::None => {
            suggestions::render_dropdown(
                frame,
                &app.primary,
                to_screen(formula.input_origin),
                &mut app.hit_registry,
            );
        }
        EditTarget::InlineEdit { .. } => {}
    }

    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}

/// Draw the bordered formula line and return its content area.
fn render_formula_block(frame: &mut Frame, app: &mut App, formula: &FormulaLayout, area: Rect) -> Rect {
    let border = if app.focus() == Focus::Primary {
        COLOR_BORDER_FOCUS
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .title(Span::styled(
            " Formula ",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(COLOR_INPUT_BG));
    let content = block.inner(area);
    frame.render_widget(block, area);

    for (row, pieces) in formula.rows.iter().enumerate() {
        let row = row as u16;
        if row >= content.height {
            break;
        }
        let y = content.y + row;
        for piece in pieces {
            let x = content.x + piece.x;
            let width = match piece.kind {
                // The input accepts clicks to the end of its row
                PieceKind::Input => content.width.saturating_sub(piece.x),
                _ => piece.width(),
            };
            let rect = Rect::new(x, y, width, 1);
            let mut style = piece_style(piece);
            if piece.kind != PieceKind::Input && app.hit_registry.is_hovered(rect) {
                style = style.bg(COLOR_HOVER_BG);
            }
            frame
                .buffer_mut()
                .set_stringn(x, y, &piece.text, piece.width() as usize, style);
            app.hit_registry.register(rect, piece.action);
        }
    }

    if app.editor.tokens().is_empty() && app.editor.input().is_empty() {
        let (col, row) = formula.input_origin;
        frame.buffer_mut().set_stringn(
            content.x + col,
            content.y + row,
            PLACEHOLDER,
            content.width.saturating_sub(col) as usize,
            Style::default().fg(COLOR_DIM),
        );
    }

    content
}

fn piece_style(piece: &Piece) -> Style {
    let style = match piece.kind {
        PieceKind::Text => Style::default().fg(COLOR_TEXT_FG),
        PieceKind::Tag => Style::default().fg(COLOR_TAG_FG).bg(COLOR_TAG_BG),
        PieceKind::Trigger => Style::default().fg(COLOR_TRIGGER).bg(COLOR_TAG_BG),
        PieceKind::Editing => Style::default()
            .fg(COLOR_ACCENT)
            .bg(COLOR_HIGHLIGHT_BG)
            .add_modifier(Modifier::UNDERLINED),
        PieceKind::Input => Style::default().fg(COLOR_ACCENT),
    };
    if !piece.highlighted {
        return style;
    }
    match piece.kind {
        PieceKind::Text => style.bg(COLOR_HIGHLIGHT_BG),
        _ => style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    }
}

/// `[ Calculate ]  [ Clear ]   Result: ...`
fn render_actions(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = Vec::new();
    let mut x = area.x + 1;
    spans.push(Span::raw(" "));

    for (label, action) in [(CALCULATE_LABEL, ClickAction::Calculate), (CLEAR_LABEL, ClickAction::Clear)] {
        let rect = Rect::new(x, area.y, label.len() as u16, 1).intersection(area);
        spans.push(Span::styled(label, button_style(&app.hit_registry, rect)));
        spans.push(Span::raw("  "));
        app.hit_registry.register(rect, action);
        x += label.len() as u16 + 2;
    }

    if let Some(result) = &app.result {
        spans.push(Span::raw(" "));
        spans.push(result_span(result));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn button_style(registry: &HitAreaRegistry, rect: Rect) -> Style {
    let style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    if registry.is_hovered(rect) {
        style.bg(COLOR_HOVER_BG)
    } else {
        style
    }
}

/// `Result: 7` or `Result: Error`.
pub fn result_span(result: &CalcOutcome) -> Span<'static> {
    let color = match result {
        CalcOutcome::Value(_) => COLOR_SUCCESS,
        CalcOutcome::Error => COLOR_ERROR,
    };
    Span::styled(format!("Result: {}", result), Style::default().fg(color))
}

/// Key hints for the focused field.
pub fn hint_text(focus: Focus) -> &'static str {
    match focus {
        Focus::Primary => {
            "Enter commit · Tab pick · ↑↓ choose · Ctrl+←→ token · F2 edit · F5 calculate · Ctrl+L clear · Ctrl+C quit"
        }
        Focus::InlineEdit => "Enter save · Esc cancel · Tab done · F5 calculate",
        Focus::TagPopup => "Type to search · ↑↓ choose · Enter replace · Ctrl+D delete · Esc close",
    }
}

fn render_hints(frame: &mut Frame, focus: Focus, area: Rect) {
    let line = Line::from(Span::styled(
        format!(" {}", hint_text(focus)),
        Style::default().fg(COLOR_DIM),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
