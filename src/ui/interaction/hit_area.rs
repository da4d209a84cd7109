//! Clickable regions registered during rendering.
//!
//! Every frame clears the registry and re-registers what it drew, so hit
//! tests always match what is on screen. Later registrations sit on top.

use ratatui::layout::Rect;

/// What a click on a region does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Body of the token chip at this index
    Token(usize),
    /// `⋮` trigger on the tag chip at this index
    TagMenu(usize),
    /// The primary input field
    PrimaryInput,
    /// Row of the primary suggestion dropdown
    Suggestion(usize),
    /// Result row inside the tag popup
    PopupSuggestion(usize),
    /// "Delete Tag" inside the tag popup
    PopupDelete,
    /// Anywhere else inside the tag popup
    PopupBackground,
    Calculate,
    Clear,
}

impl ClickAction {
    /// Whether this click lands inside the open popup owned by tag `index`:
    /// the popup itself or the tag's own chip.
    pub fn is_within_popup_of(&self, index: usize) -> bool {
        match self {
            ClickAction::PopupSuggestion(_)
            | ClickAction::PopupDelete
            | ClickAction::PopupBackground => true,
            ClickAction::Token(i) | ClickAction::TagMenu(i) => *i == index,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HitArea {
    pub rect: Rect,
    pub action: ClickAction,
}

impl HitArea {
    pub fn new(rect: Rect, action: ClickAction) -> Self {
        Self { rect, action }
    }

    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        rect_contains(self.rect, x, y)
    }
}

fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

/// Frame-scoped click targets plus the last known pointer position.
///
/// The pointer survives [`clear`](Self::clear) so hover styling can be
/// decided while the next frame is drawn.
#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    pointer: Option<(u16, u16)>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called at the start of every frame.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, rect: Rect, action: ClickAction) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        self.areas.push(HitArea::new(rect, action));
    }

    /// Topmost action under `(x, y)`.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickAction> {
        self.areas
            .iter()
            .rev()
            .find(|area| area.contains(x, y))
            .map(|area| area.action)
    }

    /// Record the pointer. Returns true when the action under it changed.
    pub fn update_hover(&mut self, x: u16, y: u16) -> bool {
        let before = self.hovered_action();
        self.pointer = Some((x, y));
        before != self.hovered_action()
    }

    /// Whether the pointer is over `rect`.
    pub fn is_hovered(&self, rect: Rect) -> bool {
        self.pointer
            .is_some_and(|(x, y)| rect_contains(rect, x, y))
    }

    pub fn hovered_action(&self) -> Option<ClickAction> {
        let (x, y) = self.pointer?;
        self.hit_test(x, y)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
