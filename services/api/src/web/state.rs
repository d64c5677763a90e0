//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use calmind_core::ports::{InteractionJournal, InteractionStore, ReplyService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every external collaborator is an explicit trait-object handle, so tests
/// can substitute fakes for the LLM and both persistence sinks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub reply: Arc<dyn ReplyService>,
    pub store: Arc<dyn InteractionStore>,
    pub journal: Arc<dyn InteractionJournal>,
}
