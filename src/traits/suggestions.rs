//! Suggestion source abstraction.

use async_trait::async_trait;

use crate::error::NetworkError;
use crate::models::Suggestion;

/// Anything that can turn a query into ranked suggestions.
///
/// Implementations must return an empty list for an empty query without doing
/// any work, and report transport or non-success responses as errors.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, NetworkError>;
}
