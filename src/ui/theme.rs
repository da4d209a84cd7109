//! Color theme constants for the formula widget.
//!
//! Minimal dark palette: chips stand out from the input background, the
//! accent marks focus and selection.

use ratatui::style::Color;

// ============================================================================
// Base palette
// ============================================================================

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border of the focused block
pub const COLOR_BORDER_FOCUS: Color = Color::Gray;

/// Accent color for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Title text
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for the formula line
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

/// Background for the dropdown and popup
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

// ============================================================================
// Token chips
// ============================================================================

/// Tag chip background
pub const COLOR_TAG_BG: Color = Color::Rgb(0, 90, 156);

/// Tag chip text
pub const COLOR_TAG_FG: Color = Color::White;

/// Plain-text chip text
pub const COLOR_TEXT_FG: Color = Color::Gray;

/// Chip highlighted for keyboard activation
pub const COLOR_HIGHLIGHT_BG: Color = Color::Rgb(60, 60, 80);

/// The `⋮` trigger on tag chips
pub const COLOR_TRIGGER: Color = Color::Rgb(170, 200, 230);

// ============================================================================
// Status colors
// ============================================================================

/// Loading indicator
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Successful result
pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Failed result and fetch errors
pub const COLOR_ERROR: Color = Color::Red;

/// Hover overlay for clickable regions
pub const COLOR_HOVER_BG: Color = Color::Rgb(40, 40, 60);
