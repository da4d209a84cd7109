//! Trait abstractions for the widget's external collaborators.
//!
//! - [`HttpClient`] - HTTP transport used by the suggestion source
//! - [`SuggestionSource`] - query to suggestions
//! - [`Evaluator`] - formula string to number

pub mod evaluator;
pub mod http;
pub mod suggestions;

pub use evaluator::Evaluator;
pub use http::{Headers, HttpClient, HttpError, Response};
pub use suggestions::SuggestionSource;
