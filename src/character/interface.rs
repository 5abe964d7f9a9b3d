//! Collaborator contracts for the character controller.
//!
//! The host runtime owns the actual animation player, scene graph and UI;
//! the controller only talks to them through these narrow traits. Handles
//! are injected at construction — no lookup-by-name at runtime.

/// A playing, looping animation clip source.
pub trait AnimationPlayer {
    /// Normalized position within the current clip, in [0,1).
    fn normalized_phase(&self) -> f32;

    /// Transition to `clip`, blending over `blend_seconds`.
    fn cross_fade(&mut self, clip: &str, blend_seconds: f32);
}

/// Something that can be shown or hidden (the debug panel).
pub trait VisibilityToggle {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
}
