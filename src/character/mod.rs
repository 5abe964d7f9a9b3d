pub mod controller;
pub mod intent;
pub mod interface;
pub mod locomotion;
pub mod pose;
pub mod tone;

pub use controller::{CharacterController, DEFAULT_WALKING_SPEED};
pub use intent::Intent;
pub use interface::{AnimationPlayer, VisibilityToggle};
pub use locomotion::{LocomotionGate, WALK_CLIP_FRAMES};
pub use pose::Pose;
pub use tone::{
    dominant_tone, emotion_color, Emotion, Rgb, ToneIntensityTracker, ToneReading,
    DEFAULT_CONFIDENCE_THRESHOLD,
};
