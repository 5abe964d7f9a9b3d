//! Gait-synchronized locomotion gate.
//!
//! In the walk clip the octopus drags itself across the floor. Translating
//! the root uniformly would make it glide, so forward motion is only
//! permitted during the "drag" portions of the cycle: frames 142–189 and
//! everything past frame 260 through the loop point. The gate samples the
//! clip's normalized phase once per simulation tick and emits a translation
//! delta only while a drag window is open.

use glam::Vec3;

/// Total frame count of the looping walk clip.
pub const WALK_CLIP_FRAMES: u32 = 321;

/// Owns the walking flag and decides, per tick, whether translation is
/// permitted. The gate never writes position itself — the caller applies
/// the returned delta to the character's pose.
#[derive(Debug, Clone, Default)]
pub struct LocomotionGate {
    walking: bool,
}

impl LocomotionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin walking in the facing direction. Idempotent.
    pub fn start_forward_motion(&mut self) {
        self.walking = true;
    }

    /// Stop any walking currently happening. Idempotent.
    pub fn stop_forward_motion(&mut self) {
        self.walking = false;
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Map a normalized clip phase in [0,1) to a discrete frame in [0,320].
    /// The clip loops, so the index wraps with the total frame count.
    pub fn frame_at(phase: f32) -> u32 {
        ((phase * WALK_CLIP_FRAMES as f32).floor() as u32) % WALK_CLIP_FRAMES
    }

    /// Whether a frame falls inside a drag window. Boundary frames 141, 190
    /// and 260 are all outside.
    fn drag_window_open(frame: u32) -> bool {
        (frame > 141 && frame < 190) || frame > 260
    }

    /// Advance one simulation tick and return the translation delta to apply.
    ///
    /// Must be called every tick regardless of whether the character is
    /// walking, so the phase check stays in lockstep with the host loop.
    /// `speed` is signed; a negative speed walks the character backwards.
    pub fn tick(&self, delta_time: f32, phase: f32, forward: Vec3, speed: f32) -> Vec3 {
        let frame = Self::frame_at(phase);
        if self.walking && Self::drag_window_open(frame) {
            // Fixed per-tick increment — never distance-based, so the clip
            // wrapping past 1.0 cannot produce a discontinuous jump.
            forward * delta_time * speed
        } else {
            Vec3::ZERO
        }
    }
}
