//! Character controller — maps recognized intents onto animation, locomotion
//! and pose, and runs the per-tick locomotion update.
//!
//! Collaborator handles are injected at construction. The controller is the
//! only writer of the locomotion gate and the pose; tone/color handling
//! lives in the conversation pipeline, not here.

use glam::Vec3;

use super::interface::{AnimationPlayer, VisibilityToggle};
use super::intent::Intent;
use super::locomotion::LocomotionGate;
use super::pose::Pose;

/// Default forward speed, world units per second. Matches the drag-walk
/// pacing of the default clip.
pub const DEFAULT_WALKING_SPEED: f32 = 0.05;

// Blend time for intent-triggered transitions. Anything above zero makes
// the character feel sluggish to respond, so transitions snap.
const INSTANT: f32 = 0.0;

pub struct CharacterController<A, V> {
    animator: A,
    debug_panel: V,
    gate: LocomotionGate,
    pose: Pose,
    walking_speed: f32,
}

impl<A: AnimationPlayer, V: VisibilityToggle> CharacterController<A, V> {
    pub fn new(animator: A, debug_panel: V) -> Self {
        Self::with_speed(animator, debug_panel, DEFAULT_WALKING_SPEED)
    }

    pub fn with_speed(animator: A, debug_panel: V, walking_speed: f32) -> Self {
        Self {
            animator,
            debug_panel,
            gate: LocomotionGate::new(),
            pose: Pose::default(),
            walking_speed,
        }
    }

    /// Process one classified intent string. Unrecognized or empty intents
    /// are a deliberate no-op, never an error.
    pub fn dispatch(&mut self, raw_intent: &str) {
        let Some(intent) = Intent::parse(raw_intent) else {
            println!("[Character] Unrecognized intent: {:?}", raw_intent);
            return;
        };
        println!("[Character] Intent: {}", intent.as_str());

        match intent {
            Intent::Wave => {
                self.animator.cross_fade("Wave", INSTANT);
                self.gate.stop_forward_motion();
            }
            Intent::Walk => {
                self.animator.cross_fade("Walk", INSTANT);
                self.gate.start_forward_motion();
            }
            Intent::Jump => {
                self.animator.cross_fade("Jump", INSTANT);
                self.gate.stop_forward_motion();
            }
            Intent::Bigger => self.pose.scale_by(1.2),
            Intent::Smaller => self.pose.scale_by(0.8),
            Intent::Clockwise => self.pose.rotate_yaw(90.0),
            Intent::Anticlockwise => self.pose.rotate_yaw(-90.0),
            Intent::Debug => {
                let visible = self.debug_panel.is_visible();
                self.debug_panel.set_visible(!visible);
            }
            Intent::Idle => {
                self.animator.cross_fade("Idle1", INSTANT);
                self.gate.stop_forward_motion();
            }
        }
    }

    /// Advance one simulation tick: sample the clip phase, run the gate and
    /// apply whatever translation it permits. Call every tick from the host
    /// loop, walking or not.
    pub fn update(&mut self, delta_time: f32) {
        let phase = self.animator.normalized_phase();
        let delta = self
            .gate
            .tick(delta_time, phase, self.pose.forward(), self.walking_speed);
        self.pose.translate(delta);
    }

    /// Place the character root directly (initial AR placement).
    pub fn place(&mut self, position: Vec3, yaw_degrees: f32) {
        self.pose.position = position;
        self.pose.yaw_degrees = yaw_degrees;
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn is_walking(&self) -> bool {
        self.gate.is_walking()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn debug_panel(&self) -> &V {
        &self.debug_panel
    }
}
