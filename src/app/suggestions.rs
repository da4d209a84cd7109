//! Suggestion request dispatch.
//!
//! Each channel has at most one fetch in flight. A new query aborts the
//! previous task, and whatever still slips through is filtered by query in
//! [`App::handle_message`](super::App::handle_message).

use std::sync::Arc;

use super::{App, AppMessage};
use crate::state::SuggestionChannel;

impl App {
    /// Re-derive the primary query from the uncommitted text and fetch if it
    /// changed.
    pub fn refresh_primary(&mut self) {
        let query = self.editor.current_query().to_string();
        self.request(SuggestionChannel::Primary, &query, false);
    }

    /// Follow the popup search field, or drop popup results once it closed.
    pub fn sync_popup(&mut self) {
        match self.editor.popup_query() {
            Some(query) => self.request(SuggestionChannel::Popup, &query, false),
            None => {
                self.abort_fetch(SuggestionChannel::Popup);
                self.popup.reset();
            }
        }
    }

    /// Fetch the focused channel's live query again, bypassing the cache.
    pub fn retry_suggestions(&mut self) {
        let channel = match self.editor.popup_query() {
            Some(_) => SuggestionChannel::Popup,
            None => SuggestionChannel::Primary,
        };
        let query = self.feed(channel).query().to_string();
        tracing::debug!(channel = channel.as_str(), query = %query, "retry suggestions");
        self.request(channel, &query, true);
    }

    /// Make `query` live on `channel`.
    ///
    /// An unchanged query is left alone unless `force` is set. An empty query
    /// shows nothing and sends nothing. A fresh cache entry is shown
    /// directly; otherwise a fetch task is spawned, replacing any task still
    /// running for this channel.
    pub(crate) fn request(&mut self, channel: SuggestionChannel, query: &str, force: bool) {
        if !force && self.feed(channel).query() == query {
            return;
        }
        self.mark_dirty();

        if query.is_empty() {
            self.abort_fetch(channel);
            self.feed_mut(channel).idle(query);
            return;
        }

        if !force {
            if let Some(cached) = self.cache.get_fresh(query) {
                let cached = cached.to_vec();
                tracing::trace!(channel = channel.as_str(), query, "suggestion cache hit");
                self.abort_fetch(channel);
                self.feed_mut(channel).show(query, cached);
                return;
            }
        }

        self.feed_mut(channel).begin(query);
        self.spawn_fetch(channel, query.to_string());
    }

    fn spawn_fetch(&mut self, channel: SuggestionChannel, query: String) {
        self.abort_fetch(channel);

        let source = Arc::clone(&self.source);
        let tx = self.message_tx.clone();
        tracing::debug!(channel = channel.as_str(), query = %query, "fetching suggestions");

        let handle = tokio::spawn(async move {
            let message = match source.fetch(&query).await {
                Ok(suggestions) => AppMessage::SuggestionsLoaded {
                    channel,
                    query,
                    suggestions,
                },
                Err(error) => AppMessage::SuggestionsFailed {
                    channel,
                    query,
                    error,
                },
            };
            // Receiver is gone only while shutting down
            let _ = tx.send(message);
        });
        self.in_flight.insert(channel, handle);
    }

    pub(crate) fn abort_fetch(&mut self, channel: SuggestionChannel) {
        if let Some(handle) = self.in_flight.remove(&channel) {
            if !handle.is_finished() {
                tracing::trace!(channel = channel.as_str(), "aborting superseded fetch");
            }
            handle.abort();
        }
    }
}
