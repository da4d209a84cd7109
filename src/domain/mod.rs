//! Domain objects for the formula widget.
//!
//! No rendering or networking lives here; the app layer feeds these events
//! and reads their state back for display.
//!
//! ## Domain Objects
//!
//! - [`TokenStore`] - Ordered committed tokens
//! - [`EditingController`] - Uncommitted text, the single [`EditTarget`], commits and linearization
//! - [`query`] - Delimiter set and query derivation

pub mod editor;
pub mod query;
pub mod store;

pub use editor::{CalcOutcome, EditTarget, EditingController};
pub use store::TokenStore;
