//! Concrete implementations of trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`HttpSuggestionSource`] - autocomplete endpoint over any [`HttpClient`](crate::traits::HttpClient)
//!
//! The [`mock`] submodule provides test doubles for both seams.

pub mod http_suggestions;
pub mod mock;
pub mod reqwest_http;

pub use http_suggestions::HttpSuggestionSource;
pub use mock::{MockHttpClient, MockSuggestionSource};
pub use reqwest_http::ReqwestHttpClient;
