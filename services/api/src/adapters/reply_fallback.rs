//! services/api/src/adapters/reply_fallback.rs
//!
//! Degraded-mode implementations of the `ReplyService` port, installed at
//! startup when no AI credential is configured.

use async_trait::async_trait;
use calmind_core::{
    domain::Emotion,
    ports::{PortError, PortResult, ReplyService},
};

//=========================================================================================
// Unconfigured Adapter
//=========================================================================================

/// A `ReplyService` that reports the service as never configured.
///
/// Installed when `GEMINI_API_KEY` is absent, so the web layer can tell
/// "never configured" apart from a configured service whose call failed.
pub struct UnconfiguredReplyAdapter;

#[async_trait]
impl ReplyService for UnconfiguredReplyAdapter {
    async fn generate_reply(&self, _emotion: Emotion, _text: &str) -> PortResult<String> {
        Err(PortError::Unconfigured(
            "GEMINI_API_KEY is not set".to_string(),
        ))
    }
}

//=========================================================================================
// Canned Adapter
//=========================================================================================

/// A `ReplyService` with fixed, rule-based replies keyed by emotion.
///
/// Installed instead of [`UnconfiguredReplyAdapter`] when `CANNED_REPLIES`
/// is enabled, so the service still answers helpfully without a credential.
pub struct CannedReplyAdapter;

impl CannedReplyAdapter {
    /// The fixed reply for an emotion.
    pub fn reply_for(emotion: Emotion) -> &'static str {
        match emotion {
            Emotion::Positive => "That's wonderful! I'm glad you're feeling so positive.",
            Emotion::Negative => {
                "I hear you, and it's okay to feel down. Remember to take a moment for yourself."
            }
            Emotion::Neutral => "Thank you for sharing your thoughts. I'm here to listen anytime.",
        }
    }
}

#[async_trait]
impl ReplyService for CannedReplyAdapter {
    async fn generate_reply(&self, emotion: Emotion, _text: &str) -> PortResult<String> {
        Ok(Self::reply_for(emotion).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_adapter_reports_unconfigured() {
        let err = UnconfiguredReplyAdapter
            .generate_reply(Emotion::Neutral, "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Unconfigured(_)));
    }

    #[tokio::test]
    async fn canned_adapter_matches_the_emotion() {
        let reply = CannedReplyAdapter
            .generate_reply(Emotion::Negative, "rough day")
            .await
            .unwrap();
        assert_eq!(reply, CannedReplyAdapter::reply_for(Emotion::Negative));
        assert!(reply.contains("okay to feel down"));
    }
}
