//! crates/calmind_core/src/sentiment.rs
//!
//! Lexicon-based sentiment scoring and the three-way emotion classifier.
//!
//! The scorer is a pure function over word tokens: each token is looked up
//! in a weighted term table, a negation token immediately before a scored
//! term flips its sign, and an intensifier amplifies it. The polarity score
//! is the mean of the matched contributions, clamped to `[-1, 1]`.

use crate::domain::Emotion;

/// Scores strictly above this classify as `Positive`.
pub const POSITIVE_THRESHOLD: f32 = 0.2;
/// Scores strictly below this classify as `Negative`.
pub const NEGATIVE_THRESHOLD: f32 = -0.2;

/// Multiplier applied to a term preceded by an intensifier token.
const INTENSIFIER_BOOST: f32 = 1.3;

//=========================================================================================
// Term Tables
//=========================================================================================

/// (token, weight) pairs for positive vocabulary. Weights are in `(0, 1]`.
const POSITIVE_TERMS: &[(&str, f32)] = &[
    ("happy", 0.8),
    ("joy", 0.8),
    ("joyful", 0.8),
    ("glad", 0.6),
    ("great", 0.8),
    ("good", 0.7),
    ("wonderful", 1.0),
    ("amazing", 0.9),
    ("excellent", 1.0),
    ("love", 0.9),
    ("loved", 0.9),
    ("like", 0.3),
    ("excited", 0.8),
    ("exciting", 0.7),
    ("calm", 0.4),
    ("peaceful", 0.5),
    ("relaxed", 0.5),
    ("grateful", 0.8),
    ("thankful", 0.8),
    ("hopeful", 0.6),
    ("hope", 0.5),
    ("proud", 0.7),
    ("fantastic", 0.9),
    ("awesome", 0.9),
    ("brilliant", 0.9),
    ("delighted", 0.9),
    ("fun", 0.6),
    ("nice", 0.6),
    ("better", 0.4),
    ("best", 0.9),
    ("beautiful", 0.8),
    ("smile", 0.5),
    ("enjoy", 0.6),
    ("enjoyed", 0.6),
    ("okay", 0.2),
    ("fine", 0.3),
    ("thrilled", 0.9),
    ("cheerful", 0.8),
    ("optimistic", 0.7),
    ("confident", 0.6),
];

/// (token, weight) pairs for negative vocabulary. Weights are in `[-1, 0)`.
const NEGATIVE_TERMS: &[(&str, f32)] = &[
    ("sad", -0.7),
    ("unhappy", -0.7),
    ("angry", -0.8),
    ("mad", -0.6),
    ("furious", -0.9),
    ("terrible", -0.9),
    ("awful", -0.9),
    ("horrible", -0.9),
    ("bad", -0.6),
    ("worst", -0.9),
    ("hate", -0.9),
    ("hated", -0.9),
    ("anxious", -0.6),
    ("anxiety", -0.6),
    ("worried", -0.6),
    ("worry", -0.5),
    ("stress", -0.6),
    ("stressed", -0.7),
    ("depressed", -0.9),
    ("depressing", -0.8),
    ("lonely", -0.7),
    ("alone", -0.4),
    ("tired", -0.4),
    ("exhausted", -0.6),
    ("afraid", -0.6),
    ("scared", -0.7),
    ("fear", -0.6),
    ("cry", -0.6),
    ("crying", -0.7),
    ("hurt", -0.6),
    ("pain", -0.6),
    ("hopeless", -0.9),
    ("miserable", -0.9),
    ("upset", -0.6),
    ("fail", -0.6),
    ("failed", -0.6),
    ("failure", -0.7),
    ("overwhelmed", -0.7),
    ("meh", -0.2),
    ("annoyed", -0.5),
    ("frustrated", -0.7),
];

/// Tokens that flip the sign of the following scored term.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nobody", "nothing", "hardly",
];

/// Tokens that amplify the following scored term.
const INTENSIFIERS: &[&str] = &["very", "so", "really", "extremely", "incredibly", "totally"];

//=========================================================================================
// Scoring
//=========================================================================================

/// Computes a polarity score in `[-1, 1]` for the text.
///
/// Returns `0.0` when no vocabulary token matches.
pub fn polarity(text: &str) -> f32 {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let mut sum = 0.0f32;
    let mut matched = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        let Some(weight) = term_weight(token) else {
            continue;
        };

        let mut contribution = weight;
        // Look back over at most two preceding tokens: an adjacent
        // intensifier amplifies, the first negator flips and ends the scan.
        for offset in 1..=2usize {
            let Some(prev) = i.checked_sub(offset).map(|j| tokens[j].as_str()) else {
                break;
            };
            if is_negator(prev) {
                contribution = -contribution;
                break;
            }
            if !is_intensifier(prev) {
                break;
            }
            contribution *= INTENSIFIER_BOOST;
        }

        sum += contribution.clamp(-1.0, 1.0);
        matched += 1;
    }

    if matched == 0 {
        return 0.0;
    }
    (sum / matched as f32).clamp(-1.0, 1.0)
}

/// Maps text to an emotion label via the fixed polarity thresholds.
///
/// Empty input is `Neutral` immediately, without scoring. Scores exactly at
/// either threshold are `Neutral`.
pub fn classify(text: &str) -> Emotion {
    if text.is_empty() {
        return Emotion::Neutral;
    }

    let score = polarity(text);
    if score > POSITIVE_THRESHOLD {
        Emotion::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Emotion::Negative
    } else {
        Emotion::Neutral
    }
}

fn term_weight(token: &str) -> Option<f32> {
    POSITIVE_TERMS
        .iter()
        .chain(NEGATIVE_TERMS)
        .find(|(term, _)| *term == token)
        .map(|(_, weight)| *weight)
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

fn is_intensifier(token: &str) -> bool {
    INTENSIFIERS.contains(&token)
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_text_classifies_positive() {
        assert_eq!(classify("I am so happy today!"), Emotion::Positive);
    }

    #[test]
    fn bleak_text_classifies_negative() {
        assert_eq!(classify("Everything feels awful and hopeless."), Emotion::Negative);
    }

    #[test]
    fn unscored_text_classifies_neutral() {
        assert_eq!(classify("The meeting is at three o'clock."), Emotion::Neutral);
        assert_eq!(polarity("The meeting is at three o'clock."), 0.0);
    }

    #[test]
    fn empty_text_is_neutral_without_scoring() {
        assert_eq!(classify(""), Emotion::Neutral);
    }

    #[test]
    fn boundary_scores_are_neutral() {
        // "okay" carries exactly the positive threshold weight, "meh" the
        // negative one; strict inequality keeps both neutral.
        assert_eq!(polarity("okay"), POSITIVE_THRESHOLD);
        assert_eq!(classify("okay"), Emotion::Neutral);
        assert_eq!(polarity("meh"), NEGATIVE_THRESHOLD);
        assert_eq!(classify("meh"), Emotion::Neutral);
    }

    #[test]
    fn score_just_past_threshold_is_positive() {
        // "like" weighs 0.3.
        assert_eq!(classify("like"), Emotion::Positive);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(polarity("happy") > 0.0);
        assert!(polarity("not happy") < 0.0);
        assert_eq!(classify("not happy"), Emotion::Negative);
        assert_eq!(classify("I don't like it."), Emotion::Negative);
    }

    #[test]
    fn intensifier_amplifies() {
        assert!(polarity("very good") > polarity("good"));
    }

    #[test]
    fn negated_intensifier_flips_the_boosted_term() {
        assert!(polarity("not very good") < 0.0);
    }

    #[test]
    fn mixed_sentiment_averages_toward_neutral() {
        assert_eq!(classify("I was happy but now I am sad."), Emotion::Neutral);
    }

    #[test]
    fn score_stays_clamped() {
        let score = polarity("so wonderful so excellent so amazing so fantastic");
        assert!(score <= 1.0);
        assert!(score > POSITIVE_THRESHOLD);
    }
}
