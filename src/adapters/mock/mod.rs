//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockSuggestionSource`] - suggestion source with scripted results, errors and delays

pub mod http;
pub mod suggestions;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use suggestions::MockSuggestionSource;
