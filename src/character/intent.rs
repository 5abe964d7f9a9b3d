//! Recognized intents — the closed set of commands the character answers to.

use serde::{Deserialize, Serialize};

/// One classified user intent. The wire value is an opaque string; anything
/// outside this set parses to `None` and the dispatcher no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Wave,
    Walk,
    Jump,
    Bigger,
    Smaller,
    Clockwise,
    Anticlockwise,
    Debug,
    Idle,
}

impl Intent {
    /// Case-insensitive parse. Malformed or empty tokens are not an error,
    /// just unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "wave" => Some(Self::Wave),
            "walk" => Some(Self::Walk),
            "jump" => Some(Self::Jump),
            "bigger" => Some(Self::Bigger),
            "smaller" => Some(Self::Smaller),
            "clockwise" => Some(Self::Clockwise),
            "anticlockwise" => Some(Self::Anticlockwise),
            "debug" => Some(Self::Debug),
            "idle" => Some(Self::Idle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wave => "wave",
            Self::Walk => "walk",
            Self::Jump => "jump",
            Self::Bigger => "bigger",
            Self::Smaller => "smaller",
            Self::Clockwise => "clockwise",
            Self::Anticlockwise => "anticlockwise",
            Self::Debug => "debug",
            Self::Idle => "idle",
        }
    }
}
