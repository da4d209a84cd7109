//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use formula_tui::adapters::MockSuggestionSource;
use formula_tui::app::App;
use formula_tui::eval::{ArithmeticEvaluator, EvalContext};
use formula_tui::models::Suggestion;

pub fn revenue() -> Suggestion {
    Suggestion::new("1", "Revenue", "Finance", "rev")
}

pub fn cost() -> Suggestion {
    Suggestion::new("2", "Cost", "Finance", "cost")
}

pub fn evaluator() -> ArithmeticEvaluator {
    ArithmeticEvaluator::new(
        EvalContext::default()
            .with_variable("rev", 50.0)
            .with_variable("cost", 20.0),
    )
}

pub fn app_with(source: MockSuggestionSource) -> App {
    App::new(Arc::new(source), Box::new(evaluator()), Duration::from_secs(60))
}

/// Wait up to `timeout` for background fetches and apply every message they
/// produced.
pub async fn pump(app: &mut App, timeout: Duration) {
    let mut rx = app.message_rx.take().expect("receiver available");
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some(msg)) => app.handle_message(msg),
            Ok(None) | Err(_) => break,
        }
    }
    app.message_rx = Some(rx);
}
