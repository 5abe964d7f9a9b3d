pub mod assistant;
pub mod config;
pub mod conversation;
pub mod interface;
pub mod tone_analyzer;

pub use assistant::AssistantIntentClassifier;
pub use config::{load_config, save_config, AssistantConfig, Credentials, NluConfig, NluServiceConfig};
pub use conversation::{ConversationPipeline, TranscriptEntry, UtteranceOutcome};
pub use interface::{ClassifiedIntent, IntentClassifier, NluError, ToneClassifier, ToneScores};
pub use tone_analyzer::ToneAnalyzerClient;
