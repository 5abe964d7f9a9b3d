//! Root pose of the character in world space.
//!
//! The host scene graph owns the actual transform; this is the engine-side
//! value it mirrors. All mutations are deltas (translate, rotate, scale) —
//! nothing here writes absolute transforms except placement.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Yaw around the world up axis, in degrees. Accumulates without
    /// wrapping; `forward()` normalizes it implicitly.
    pub yaw_degrees: f32,
    /// Per-axis scale. Intents only ever scale uniformly, but the axes stay
    /// independent for hosts that want non-uniform placement.
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    /// Unit vector the character is facing. Yaw 0 faces +Z.
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw_degrees.to_radians()) * Vec3::Z
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Relative yaw turn. Positive is clockwise viewed from above.
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.yaw_degrees += degrees;
    }

    /// Multiply all axes by `factor`. Compounds on every call; growth is
    /// deliberately unclamped.
    pub fn scale_by(&mut self, factor: f32) {
        self.scale *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_tracks_yaw() {
        let mut pose = Pose::default();
        assert!(pose.forward().abs_diff_eq(Vec3::Z, 1e-6));
        pose.rotate_yaw(90.0);
        // Clockwise 90° from +Z faces +X (left-handed yaw, Unity convention).
        assert!(
            pose.forward().abs_diff_eq(Vec3::X, 1e-6),
            "got {}",
            pose.forward()
        );
    }

    #[test]
    fn scale_compounds_multiplicatively() {
        let mut pose = Pose::default();
        pose.scale_by(1.2);
        pose.scale_by(1.2);
        pose.scale_by(1.2);
        let expected = 1.2f32.powi(3);
        assert!((pose.scale.x - expected).abs() < 1e-6);
        assert!((pose.scale.y - expected).abs() < 1e-6);
        assert!((pose.scale.z - expected).abs() < 1e-6);
    }

    #[test]
    fn yaw_accumulates_relative_turns() {
        let mut pose = Pose::default();
        pose.rotate_yaw(90.0);
        pose.rotate_yaw(90.0);
        pose.rotate_yaw(-90.0);
        assert_eq!(pose.yaw_degrees, 90.0);
    }
}
