//! Handlers for messages coming back from background tasks.

use super::{App, AppMessage};

impl App {
    /// Apply one async message.
    ///
    /// Successful results are cached under their query even when stale; the
    /// feed only changes when the message's query is still live.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::SuggestionsLoaded {
                channel,
                query,
                suggestions,
            } => {
                self.cache.insert(query.clone(), suggestions.clone());
                let count = suggestions.len();
                if self.feed_mut(channel).accept(&query, suggestions) {
                    tracing::debug!(channel = channel.as_str(), query = %query, count, "suggestions loaded");
                    self.mark_dirty();
                } else {
                    tracing::debug!(channel = channel.as_str(), query = %query, "discarding stale suggestions");
                }
            }
            AppMessage::SuggestionsFailed {
                channel,
                query,
                error,
            } => {
                tracing::warn!(
                    channel = channel.as_str(),
                    query = %query,
                    code = error.error_code(),
                    error = %error,
                    "suggestion fetch failed"
                );
                if self.feed_mut(channel).fail(&query, error) {
                    self.mark_dirty();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::MockSuggestionSource;
    use crate::error::NetworkError;
    use crate::state::SuggestionChannel;

    fn loaded(query: &str) -> AppMessage {
        AppMessage::SuggestionsLoaded {
            channel: SuggestionChannel::Primary,
            query: query.to_string(),
            suggestions: vec![revenue()],
        }
    }

    #[test]
    fn test_stale_response_is_ignored_but_cached() {
        let mut app = app_with(MockSuggestionSource::new());
        app.primary.begin("rev");

        app.handle_message(loaded("re"));
        assert!(app.primary.is_loading());
        assert!(app.primary.results().is_empty());
        assert!(app.cache.get_fresh("re").is_some());
    }

    #[test]
    fn test_live_response_is_applied() {
        let mut app = app_with(MockSuggestionSource::new());
        app.primary.begin("re");
        app.needs_redraw = false;

        app.handle_message(loaded("re"));
        assert_eq!(app.primary.results(), &[revenue()]);
        assert!(app.needs_redraw);
    }

    #[test]
    fn test_failure_clears_results() {
        let mut app = app_with(MockSuggestionSource::new());
        app.primary.begin("re");

        app.handle_message(AppMessage::SuggestionsFailed {
            channel: SuggestionChannel::Primary,
            query: "re".to_string(),
            error: NetworkError::HttpStatus {
                status: 500,
                message: "boom".to_string(),
            },
        });
        assert!(app.primary.results().is_empty());
        assert!(!app.primary.is_loading());
        assert!(app.primary.error().is_some());
        assert!(app.cache.is_empty());
    }

    #[test]
    fn test_channels_are_independent() {
        let mut app = app_with(MockSuggestionSource::new());
        app.primary.begin("re");
        app.popup.begin(" ");

        app.handle_message(AppMessage::SuggestionsLoaded {
            channel: SuggestionChannel::Popup,
            query: "re".to_string(),
            suggestions: vec![cost()],
        });
        assert!(app.primary.is_loading());
        assert!(app.popup.is_loading());
    }
}
