//! NLU service contracts & core types.
//!
//! Defines the abstract interfaces for the two cloud collaborators — the
//! conversational intent classifier and the tone analyzer — plus the typed
//! results and semantic error handling shared by their implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::character::tone::Emotion;

// ── Core Data Structures ────────────────────────────────

/// One classified intent for an utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedIntent {
    /// The raw intent label, e.g. "walk". Parsing into the closed intent
    /// set happens at dispatch time.
    pub intent: String,
    /// Classifier confidence (0.0 - 1.0).
    pub confidence: f64,
}

/// Per-emotion scores for one utterance, each in [0,1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ToneScores {
    pub anger: f64,
    pub disgust: f64,
    pub fear: f64,
    pub joy: f64,
    pub sadness: f64,
}

impl ToneScores {
    /// Scores paired with their labels, in wire order. The order matters:
    /// the dominant-tone fold breaks ties in favor of the first label.
    pub fn as_pairs(&self) -> [(Emotion, f64); 5] {
        [
            (Emotion::Anger, self.anger),
            (Emotion::Disgust, self.disgust),
            (Emotion::Fear, self.fear),
            (Emotion::Joy, self.joy),
            (Emotion::Sadness, self.sadness),
        ]
    }

    pub fn set(&mut self, emotion: Emotion, score: f64) {
        match emotion {
            Emotion::Anger => self.anger = score,
            Emotion::Disgust => self.disgust = score,
            Emotion::Fear => self.fear = score,
            Emotion::Joy => self.joy = score,
            Emotion::Sadness => self.sadness = score,
        }
    }
}

// ── Error Handling ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NluError {
    /// No usable credentials at construction time.
    ConfigError(String),
    /// Transport-level failure (network, non-success status).
    Http(String),
    /// Response arrived but did not have the expected shape.
    MalformedResponse(String),
    Unavailable(String),
}

impl fmt::Display for NluError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NluError::ConfigError(msg) => write!(f, "NLU config error: {}", msg),
            NluError::Http(msg) => write!(f, "NLU request failed: {}", msg),
            NluError::MalformedResponse(msg) => write!(f, "Malformed NLU response: {}", msg),
            NluError::Unavailable(msg) => write!(f, "NLU service unavailable: {}", msg),
        }
    }
}

impl std::error::Error for NluError {}

// ── Service Traits ─────────────────────────────────────

/// Extracts one intent per processed utterance.
///
/// `Ok(None)` means the service answered but recognized nothing — callers
/// must treat that as a no-op, not a failure.
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Unique identifier for this classifier instance.
    fn id(&self) -> String;

    /// Check if the classifier is configured and reachable.
    async fn is_available(&self) -> bool;

    async fn classify(&self, utterance: &str) -> Result<Option<ClassifiedIntent>, NluError>;
}

/// Scores the fixed emotion set for an utterance.
#[async_trait]
pub trait ToneClassifier: Send + Sync {
    fn id(&self) -> String;

    async fn is_available(&self) -> bool;

    async fn analyze(&self, utterance: &str) -> Result<ToneScores, NluError>;
}
