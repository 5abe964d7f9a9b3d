//! Per-utterance conversation pipeline.
//!
//! One analyzed utterance fans out to both cloud services: the assistant
//! yields an intent that drives the character, the tone analyzer yields
//! emotion scores that recolor it. Either leg failing kills only that leg —
//! a dead network must never stall the per-tick simulation, so everything
//! here is fire-per-utterance and errors degrade to "nothing happened".

use std::collections::VecDeque;

use serde::Serialize;

use super::interface::{ClassifiedIntent, IntentClassifier, ToneClassifier};
use crate::character::controller::CharacterController;
use crate::character::interface::{AnimationPlayer, VisibilityToggle};
use crate::character::tone::{dominant_tone, ToneIntensityTracker, ToneReading};

/// Lines of recent history kept for the debug panel.
const TRANSCRIPT_DEPTH: usize = 3;

/// What one utterance ended up doing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UtteranceOutcome {
    /// Intent the assistant recognized, if any.
    pub intent: Option<ClassifiedIntent>,
    /// Tone reading, when the analyzer produced scores.
    pub tone: Option<ToneReading>,
}

/// One line of the debug transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub text: String,
    pub timestamp: i64,
}

impl TranscriptEntry {
    fn new(text: String) -> Self {
        Self {
            text,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

pub struct ConversationPipeline {
    intents: Box<dyn IntentClassifier>,
    tones: Box<dyn ToneClassifier>,
    tracker: ToneIntensityTracker,
    recent_intents: VecDeque<TranscriptEntry>,
    recent_tones: VecDeque<TranscriptEntry>,
}

impl ConversationPipeline {
    pub fn new(
        intents: Box<dyn IntentClassifier>,
        tones: Box<dyn ToneClassifier>,
        confidence_threshold: f32,
    ) -> Self {
        Self {
            intents,
            tones,
            tracker: ToneIntensityTracker::new(confidence_threshold),
            recent_intents: VecDeque::new(),
            recent_tones: VecDeque::new(),
        }
    }

    /// Run one utterance through both services and apply the results to the
    /// character. Service failures are logged and swallowed.
    pub async fn handle_utterance<A, V>(
        &mut self,
        controller: &mut CharacterController<A, V>,
        utterance: &str,
    ) -> UtteranceOutcome
    where
        A: AnimationPlayer,
        V: VisibilityToggle,
    {
        let mut outcome = UtteranceOutcome::default();

        match self.intents.classify(utterance).await {
            Ok(Some(hit)) => {
                self.push_intent(format!("#{}", hit.intent));
                controller.dispatch(&hit.intent);
                outcome.intent = Some(hit);
            }
            Ok(None) => {
                println!("[Conversation] No intent recognized");
            }
            Err(e) => {
                eprintln!("[Conversation] Intent classification failed: {}", e);
            }
        }

        match self.tones.analyze(utterance).await {
            Ok(scores) => {
                if let Some((emotion, score)) = dominant_tone(&scores.as_pairs()) {
                    let reading = self.tracker.observe(emotion, score);
                    match &reading {
                        ToneReading::Confident {
                            emotion,
                            score,
                            intensity,
                            ..
                        } => {
                            println!(
                                "[Conversation] Tone: {} ({:.0}%) intensity {}",
                                emotion.as_str(),
                                score * 100.0,
                                intensity
                            );
                            self.push_tone(format!(
                                "{} ({:.0}%)",
                                emotion.as_str(),
                                score * 100.0
                            ));
                        }
                        ToneReading::Inconclusive { .. } => {
                            println!("[Conversation] Tone not clear");
                            self.push_tone("Tone not clear".to_string());
                        }
                    }
                    outcome.tone = Some(reading);
                }
            }
            Err(e) => {
                eprintln!("[Conversation] Tone analysis failed: {}", e);
            }
        }

        outcome
    }

    fn push_intent(&mut self, text: String) {
        push_bounded(&mut self.recent_intents, text);
    }

    fn push_tone(&mut self, text: String) {
        push_bounded(&mut self.recent_tones, text);
    }

    /// Recently recognized intents, most recent first.
    pub fn recent_intents(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.recent_intents.iter().rev()
    }

    /// Recently displayed tones, most recent first.
    pub fn recent_tones(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.recent_tones.iter().rev()
    }
}

fn push_bounded(queue: &mut VecDeque<TranscriptEntry>, text: String) {
    queue.push_back(TranscriptEntry::new(text));
    if queue.len() > TRANSCRIPT_DEPTH {
        queue.pop_front();
    }
}
