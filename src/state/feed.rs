//! Per-channel suggestion state.
//!
//! A channel remembers the live query it is showing results for. Responses
//! carry the query they were issued for and are applied only while that
//! query is still live, so a slow stale response can never overwrite a newer
//! one regardless of arrival order.

use crate::error::NetworkError;
use crate::models::Suggestion;

/// Which list a suggestion request feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionChannel {
    /// Dropdown under the primary input
    Primary,
    /// Search results inside the tag replace-popup
    Popup,
}

impl SuggestionChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionChannel::Primary => "primary",
            SuggestionChannel::Popup => "popup",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionFeed {
    query: String,
    results: Vec<Suggestion>,
    loading: bool,
    error: Option<NetworkError>,
    selected: usize,
    // Hidden by the user until the live query changes
    dismissed: bool,
}

impl SuggestionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Suggestion] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&NetworkError> {
        self.error.as_ref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.results.get(self.selected)
    }

    /// The dropdown only shows while there is a query and something to say,
    /// and the user has not dismissed it.
    pub fn is_visible(&self) -> bool {
        !self.dismissed
            && !self.query.is_empty()
            && (self.loading || self.error.is_some() || !self.results.is_empty())
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Hide the list without forgetting the live query, so an unchanged
    /// query does not bring it straight back.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Make `query` live with no request: used for empty queries.
    pub fn idle(&mut self, query: &str) {
        self.reset();
        self.query = query.to_string();
    }

    /// Make `query` live and wait for its response.
    pub fn begin(&mut self, query: &str) {
        self.dismissed = false;
        self.query = query.to_string();
        self.results.clear();
        self.error = None;
        self.loading = true;
        self.selected = 0;
    }

    /// Make `query` live with results already at hand (cache hit).
    pub fn show(&mut self, query: &str, results: Vec<Suggestion>) {
        self.dismissed = false;
        self.fill(query, results);
    }

    fn fill(&mut self, query: &str, results: Vec<Suggestion>) {
        self.query = query.to_string();
        self.results = results;
        self.error = None;
        self.loading = false;
        self.selected = 0;
    }

    /// Apply a response for `query`. Returns false, changing nothing, when
    /// `query` is no longer live.
    pub fn accept(&mut self, query: &str, results: Vec<Suggestion>) -> bool {
        if query != self.query {
            return false;
        }
        self.fill(query, results);
        true
    }

    /// Record a failure for `query`. Stale failures are ignored like stale
    /// results.
    pub fn fail(&mut self, query: &str, error: NetworkError) -> bool {
        if query != self.query {
            return false;
        }
        self.results.clear();
        self.loading = false;
        self.error = Some(error);
        self.selected = 0;
        true
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.results.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.results.len() - 1);
        }
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.results.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }
}
