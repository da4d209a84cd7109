//! AppMessage enum for async communication within the application.

use crate::error::NetworkError;
use crate::models::Suggestion;
use crate::state::SuggestionChannel;

/// Messages sent back to the event loop by background tasks.
///
/// Each carries the query it was issued for; the receiver compares it with
/// the channel's live query before applying anything.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    SuggestionsLoaded {
        channel: SuggestionChannel,
        query: String,
        suggestions: Vec<Suggestion>,
    },
    SuggestionsFailed {
        channel: SuggestionChannel,
        query: String,
        error: NetworkError,
    },
}

impl AppMessage {
    pub fn channel(&self) -> SuggestionChannel {
        match self {
            AppMessage::SuggestionsLoaded { channel, .. }
            | AppMessage::SuggestionsFailed { channel, .. } => *channel,
        }
    }

    pub fn query(&self) -> &str {
        match self {
            AppMessage::SuggestionsLoaded { query, .. }
            | AppMessage::SuggestionsFailed { query, .. } => query,
        }
    }
}
