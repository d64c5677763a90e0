//! crates/calmind_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;

use crate::domain::{Emotion, Interaction};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The variants keep the failure modes of the reply path distinguishable:
/// a service that was never configured, a configured service whose call
/// failed, and everything else.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Service not configured: {0}")]
    Unconfigured(String),
    #[error("Upstream service failed: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ReplyService: Send + Sync {
    /// Generates a supportive reply to the user's text, guided by the
    /// detected emotion.
    async fn generate_reply(&self, emotion: Emotion, text: &str) -> PortResult<String>;
}

#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Persists one interaction record to the durable database.
    async fn save_interaction(&self, interaction: &Interaction) -> PortResult<()>;
}

#[async_trait]
pub trait InteractionJournal: Send + Sync {
    /// Appends one interaction record to the flat-file journal.
    async fn append(&self, interaction: &Interaction) -> PortResult<()>;
}
