//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use crate::editor::SpanPolicy;
use crate::storage::{DEFAULT_SLOT, SlotStore};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    store: SlotStore,
    slot: String,
    span_policy: SpanPolicy,
}

impl App {
    /// Create a new application persisting to `store`.
    pub fn new(store: SlotStore) -> Self {
        Self {
            store,
            slot: DEFAULT_SLOT.to_string(),
            span_policy: SpanPolicy::default(),
        }
    }

    /// Use a storage slot other than the default.
    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Choose how autoformat triggers are removed from the text.
    #[must_use]
    pub const fn with_span_policy(mut self, policy: SpanPolicy) -> Self {
        self.span_policy = policy;
        self
    }
}
