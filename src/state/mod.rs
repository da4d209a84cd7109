//! Application state containers.
//!
//! - [`SuggestionCache`]: TTL cache of suggestion responses by query
//! - [`SuggestionFeed`]: live query, results, loading and error per [`SuggestionChannel`]

pub mod cache;
pub mod feed;

pub use cache::SuggestionCache;
pub use feed::{SuggestionChannel, SuggestionFeed};
