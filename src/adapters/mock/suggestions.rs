//! Scriptable suggestion source for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::http::lock;
use crate::error::NetworkError;
use crate::models::Suggestion;
use crate::traits::SuggestionSource;

#[derive(Debug, Clone)]
enum Scripted {
    Ok(Vec<Suggestion>),
    Err(NetworkError),
}

/// Mock [`SuggestionSource`] with per-query results and optional latency.
///
/// Unscripted queries return an empty list. Every call is recorded,
/// including the empty-query short circuit.
#[derive(Debug, Clone, Default)]
pub struct MockSuggestionSource {
    scripted: Arc<Mutex<HashMap<String, Scripted>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSuggestionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(self, query: &str, suggestions: Vec<Suggestion>) -> Self {
        self.set_results(query, suggestions);
        self
    }

    pub fn set_results(&self, query: &str, suggestions: Vec<Suggestion>) {
        lock(&self.scripted).insert(query.to_string(), Scripted::Ok(suggestions));
    }

    pub fn set_error(&self, query: &str, error: NetworkError) {
        lock(&self.scripted).insert(query.to_string(), Scripted::Err(error));
    }

    /// Delay the response for `query` by `delay`.
    pub fn set_delay(&self, query: &str, delay: Duration) {
        lock(&self.delays).insert(query.to_string(), delay);
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl SuggestionSource for MockSuggestionSource {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, NetworkError> {
        lock(&self.queries).push(query.to_string());
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let delay = lock(&self.delays).get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = lock(&self.scripted).get(query).cloned();
        match scripted {
            Some(Scripted::Ok(suggestions)) => Ok(suggestions),
            Some(Scripted::Err(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }
}
