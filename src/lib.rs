//! octo-engine — an augmented-reality virtual character interaction engine.
//!
//! A virtual octopus stands on a detected real-world plane, animated and
//! controlled through voice or text: utterances flow through cloud NLU
//! services, recognized intents drive animation and a gait-synchronized
//! walk, and the detected emotional tone recolors the character. The host
//! runtime (renderer, AR session, UI) stays behind narrow traits; this
//! crate owns the policy.
//!
//! The per-tick pieces (`character`, `ar`) are synchronous and
//! single-threaded; only the `nlu` clients are async, and their results are
//! applied back on the host's logical tick thread.

pub mod ar;
pub mod character;
pub mod config;
pub mod nlu;
pub mod utils;

pub use character::{CharacterController, Intent, LocomotionGate, Pose, ToneIntensityTracker};
pub use nlu::{ConversationPipeline, NluConfig};
