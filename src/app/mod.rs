//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Focus`] - Which input receives typed keys
//! - [`AppMessage`] - Results of background suggestion fetches
//!
//! Behaviour is split across submodules by event source: `keys`, `mouse`,
//! `handlers` (async messages) and `suggestions` (request dispatch).

mod handlers;
mod keys;
mod messages;
mod mouse;
mod suggestions;
mod types;

pub use messages::AppMessage;
pub use types::Focus;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::adapters::{HttpSuggestionSource, ReqwestHttpClient};
use crate::domain::{CalcOutcome, EditingController};
use crate::error::{FormulaResult, NetworkError};
use crate::eval::ArithmeticEvaluator;
use crate::startup::AppConfig;
use crate::state::{SuggestionCache, SuggestionChannel, SuggestionFeed};
use crate::traits::{Evaluator, SuggestionSource};
use crate::ui::interaction::HitAreaRegistry;

/// Main application state
pub struct App {
    /// Token store plus uncommitted text and edit target
    pub editor: EditingController,
    /// Dropdown under the primary input
    pub primary: SuggestionFeed,
    /// Results inside the tag popup
    pub popup: SuggestionFeed,
    pub cache: SuggestionCache,
    /// Last calculation; kept until the next one
    pub result: Option<CalcOutcome>,
    /// Token highlighted for keyboard activation (Ctrl+Left/Right, F2)
    pub highlighted: Option<usize>,
    /// Clickable regions from the last frame
    pub hit_registry: HitAreaRegistry,
    /// Flag indicating whether the app should quit
    pub should_quit: bool,
    /// Set whenever visible state changes; cleared after drawing
    pub needs_redraw: bool,
    /// Receiver for async messages (taken by the event loop)
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender handed to background tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub tick_count: u64,
    source: Arc<dyn SuggestionSource>,
    evaluator: Box<dyn Evaluator + Send>,
    in_flight: HashMap<SuggestionChannel, JoinHandle<()>>,
}

impl App {
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        evaluator: Box<dyn Evaluator + Send>,
        cache_ttl: Duration,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            editor: EditingController::new(),
            primary: SuggestionFeed::new(),
            popup: SuggestionFeed::new(),
            cache: SuggestionCache::new(cache_ttl),
            result: None,
            highlighted: None,
            hit_registry: HitAreaRegistry::new(),
            should_quit: false,
            needs_redraw: true,
            message_rx: Some(message_rx),
            message_tx,
            tick_count: 0,
            source,
            evaluator,
            in_flight: HashMap::new(),
        }
    }

    /// Production wiring: reqwest-backed suggestions and the arithmetic
    /// evaluator with the configured variables.
    pub fn from_config(config: &AppConfig) -> FormulaResult<Self> {
        let client = ReqwestHttpClient::with_timeout(config.request_timeout)
            .map_err(|e| NetworkError::from_http(e, &config.suggest_url))?;
        let source = HttpSuggestionSource::new(client, config.suggest_url.clone());
        let evaluator = ArithmeticEvaluator::new(config.eval_context());
        tracing::info!(
            url = %config.suggest_url,
            ttl_secs = config.cache_ttl.as_secs(),
            variables = config.variables.len(),
            "app configured"
        );
        Ok(Self::new(
            Arc::new(source),
            Box::new(evaluator),
            config.cache_ttl,
        ))
    }

    pub fn focus(&self) -> Focus {
        Focus::from_target(self.editor.target())
    }

    pub fn feed(&self, channel: SuggestionChannel) -> &SuggestionFeed {
        match channel {
            SuggestionChannel::Primary => &self.primary,
            SuggestionChannel::Popup => &self.popup,
        }
    }

    pub(crate) fn feed_mut(&mut self, channel: SuggestionChannel) -> &mut SuggestionFeed {
        match channel {
            SuggestionChannel::Primary => &mut self.primary,
            SuggestionChannel::Popup => &mut self.popup,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Periodic housekeeping from the event loop timer.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        // Roughly once a minute at the loop's tick rate
        if self.tick_count % 240 == 0 {
            let purged = self.cache.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "expired suggestion cache entries");
            }
        }
    }

    /// Evaluate the formula and keep the outcome for display.
    pub fn calculate(&mut self) {
        let outcome = self.editor.calculate(self.evaluator.as_ref());
        self.result = Some(outcome);
        self.mark_dirty();
    }

    /// Remove all tokens, text, edit state and suggestions. The last result
    /// stays until the next calculation.
    pub fn clear_formula(&mut self) {
        self.editor.clear();
        self.highlighted = None;
        self.abort_fetch(SuggestionChannel::Primary);
        self.abort_fetch(SuggestionChannel::Popup);
        self.primary.reset();
        self.popup.reset();
        self.mark_dirty();
    }

    /// Keep the keyboard highlight on an existing token.
    pub(crate) fn clamp_highlight(&mut self) {
        let len = self.editor.store().len();
        self.highlighted = match self.highlighted {
            Some(_) if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    /// Bring suggestion channels in line with the editor after any edit.
    pub(crate) fn sync_after_edit(&mut self) {
        self.clamp_highlight();
        self.refresh_primary();
        self.sync_popup();
        self.mark_dirty();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
    }
}
