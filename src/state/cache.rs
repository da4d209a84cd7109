//! Short-lived cache of suggestion responses keyed by query.
//!
//! Repeated identical queries inside the TTL are answered without a network
//! round-trip. Entries are stored whether or not the response was still
//! wanted when it arrived.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::Suggestion;

/// Default lifetime of a cached response.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Cached data with timestamp
#[derive(Debug, Clone)]
pub struct CachedSuggestions {
    pub items: Vec<Suggestion>,
    pub cached_at: Instant,
}

impl CachedSuggestions {
    pub fn new(items: Vec<Suggestion>) -> Self {
        Self {
            items,
            cached_at: Instant::now(),
        }
    }

    /// Fresh while strictly younger than `ttl`; a zero TTL is never fresh.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() < ttl
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionCache {
    ttl: Duration,
    entries: HashMap<String, CachedSuggestions>,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl SuggestionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached results for `query`, only if still fresh.
    pub fn get_fresh(&self, query: &str) -> Option<&[Suggestion]> {
        self.entries
            .get(query)
            .filter(|c| c.is_fresh(self.ttl))
            .map(|c| c.items.as_slice())
    }

    pub fn insert(&mut self, query: impl Into<String>, items: Vec<Suggestion>) {
        self.entries.insert(query.into(), CachedSuggestions::new(items));
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, c| c.is_fresh(ttl));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revenue() -> Vec<Suggestion> {
        vec![Suggestion::new("1", "Revenue", "Finance", "rev")]
    }

    #[test]
    fn test_fresh_hit() {
        let mut cache = SuggestionCache::new(Duration::from_secs(60));
        cache.insert("rev", revenue());
        assert_eq!(cache.get_fresh("rev"), Some(revenue().as_slice()));
        assert!(cache.get_fresh("cost").is_none());
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let mut cache = SuggestionCache::new(Duration::ZERO);
        cache.insert("rev", revenue());
        assert!(cache.get_fresh("rev").is_none());
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_expiry() {
        let mut cache = SuggestionCache::new(Duration::from_millis(10));
        cache.insert("rev", revenue());
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get_fresh("rev").is_none());
    }

    #[test]
    fn test_insert_overwrites() {
        let mut cache = SuggestionCache::default();
        cache.insert("rev", Vec::new());
        cache.insert("rev", revenue());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get_fresh("rev").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_empty_results_are_cached() {
        let mut cache = SuggestionCache::default();
        cache.insert("zzz", Vec::new());
        assert_eq!(cache.get_fresh("zzz"), Some(&[][..]));
    }
}
