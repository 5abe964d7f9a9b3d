//! Tone intensity tracking and the emotion color table.
//!
//! Each analyzed utterance yields one dominant emotion. Repeating the same
//! emotion escalates a display intensity (1 = new, 2 = repeated once,
//! 3 = repeated twice), which parameterizes a per-emotion color. The tracker
//! keeps a two-slot ring of previously displayed labels — just enough to
//! tell a streak of three apart from a streak of two.

use serde::{Deserialize, Serialize};

/// Default confidence a winning tone must exceed before the color changes.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.65;

// ── Emotion set ────────────────────────────────────────────

/// The fixed emotion set the tone service scores, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Disgust,
    Fear,
    Joy,
    Sadness,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Emotion::Anger,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anger => "anger",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "anger" => Some(Emotion::Anger),
            "disgust" => Some(Emotion::Disgust),
            "fear" => Some(Emotion::Fear),
            "joy" => Some(Emotion::Joy),
            "sadness" => Some(Emotion::Sadness),
            _ => None,
        }
    }
}

/// Pick the winning tone with a left-to-right fold using strict `>`, so the
/// first label in wire order wins ties. A plain max with `>=` would pick the
/// last one instead; the strict comparison is the observed service behavior
/// and is kept as-is.
pub fn dominant_tone(scores: &[(Emotion, f64)]) -> Option<(Emotion, f64)> {
    scores
        .iter()
        .copied()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}

// ── Color ──────────────────────────────────────────────────

/// Linear RGB color, channels in [0,1] (no alpha).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn scale(self, factor: f32) -> Rgb {
        Rgb::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Largest channel value.
    pub fn max_component(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }
}

/// Display color for an emotion at a given intensity (1–3). The escalating
/// channels move in 0.2 steps; the fixed channels stay at 0.9.
pub fn emotion_color(emotion: Emotion, intensity: u8) -> Rgb {
    let i = 0.2 * intensity as f32;
    match emotion {
        Emotion::Joy => Rgb::new(i, 0.9, i),
        Emotion::Anger => Rgb::new(0.9, i, i),
        Emotion::Fear => Rgb::new(0.9, 0.9, i),
        Emotion::Sadness => Rgb::new(i, i, i),
        Emotion::Disgust => Rgb::new(0.9, i, 0.9),
    }
}

// ── Tracker ────────────────────────────────────────────────

/// Outcome of observing one analyzed utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ToneReading {
    /// Winning tone cleared the threshold; show this color.
    Confident {
        emotion: Emotion,
        score: f64,
        intensity: u8,
        color: Rgb,
    },
    /// Below threshold — report "tone not clear", change nothing.
    Inconclusive { emotion: Emotion, score: f64 },
}

/// Escalates display intensity when the same dominant emotion repeats.
#[derive(Debug, Clone)]
pub struct ToneIntensityTracker {
    /// Previously displayed labels, most recent first.
    history: [Option<Emotion>; 2],
    threshold: f32,
}

impl Default for ToneIntensityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl ToneIntensityTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            history: [None, None],
            threshold,
        }
    }

    /// Observe the winning tone of one utterance. Only a confident reading
    /// updates the display history; an inconclusive one leaves the streak
    /// intact so a follow-up clear reading still escalates.
    pub fn observe(&mut self, emotion: Emotion, score: f64) -> ToneReading {
        if score > self.threshold as f64 {
            let (intensity, color) = self.accept(emotion);
            ToneReading::Confident {
                emotion,
                score,
                intensity,
                color,
            }
        } else {
            ToneReading::Inconclusive { emotion, score }
        }
    }

    /// Record a displayed emotion and return its escalation level and color.
    pub fn accept(&mut self, emotion: Emotion) -> (u8, Rgb) {
        let intensity = if self.history[0] == Some(emotion) {
            if self.history[1] == Some(emotion) {
                3
            } else {
                2
            }
        } else {
            1
        };
        self.history = [Some(emotion), self.history[0]];
        (intensity, emotion_color(emotion, intensity))
    }

    /// Most recently displayed emotion, if any.
    pub fn last_displayed(&self) -> Option<Emotion> {
        self.history[0]
    }
}
