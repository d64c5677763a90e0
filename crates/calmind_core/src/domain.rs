//! crates/calmind_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::Local;
use uuid::Uuid;

/// Timestamp rendering shared by both persistence sinks.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One of the three discrete sentiment labels derived from a polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Positive,
    Negative,
    Neutral,
}

impl Emotion {
    /// The lowercase label used on the wire and in both persistence sinks.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Positive => "positive",
            Emotion::Negative => "negative",
            Emotion::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents one user submission and its detected emotion.
///
/// Constructed once per request and immutable afterwards. Both sinks persist
/// the same record independently; they are not transactional with respect to
/// each other. Callers must validate that `text` is non-empty before
/// constructing one.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub id: Uuid,
    pub text: String,
    pub emotion: Emotion,
    /// Local wall-clock time, formatted with [`TIMESTAMP_FORMAT`] at
    /// construction time.
    pub timestamp: String,
}

impl Interaction {
    /// Creates a new record, stamping it with the current local time.
    pub fn new(text: String, emotion: Emotion) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            emotion,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_labels_are_lowercase() {
        assert_eq!(Emotion::Positive.as_str(), "positive");
        assert_eq!(Emotion::Negative.as_str(), "negative");
        assert_eq!(Emotion::Neutral.as_str(), "neutral");
    }

    #[test]
    fn interaction_stamps_fixed_format_timestamp() {
        let interaction = Interaction::new("hello".to_string(), Emotion::Neutral);
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(interaction.timestamp.len(), 19);
        assert_eq!(&interaction.timestamp[4..5], "-");
        assert_eq!(&interaction.timestamp[10..11], " ");
        assert_eq!(&interaction.timestamp[13..14], ":");
    }

    #[test]
    fn interactions_get_distinct_ids() {
        let a = Interaction::new("one".to_string(), Emotion::Positive);
        let b = Interaction::new("two".to_string(), Emotion::Positive);
        assert_ne!(a.id, b.id);
    }
}
