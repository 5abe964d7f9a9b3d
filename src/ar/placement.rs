//! Tap-to-place on detected planes.
//!
//! Before the first placement a screen-center indicator tracks the nearest
//! plane hit so the user can see where the character will land. The first
//! successful tap places the character and locks out drag-moves until that
//! touch lifts; after that, taps and drags re-place at the touched point.
//! The plane raycaster itself belongs to the host AR session — only the
//! placement policy lives here.

use glam::{Vec2, Vec3};

/// Where a screen ray met a detected plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    pub position: Vec3,
}

/// Host-owned plane raycasting (AR session).
pub trait PlaneRaycaster {
    /// Test whether a real-world plane exists at a screen position.
    fn hit_test(&self, screen_point: Vec2) -> Option<PlaneHit>;
}

/// The camera pose the placement logic needs for facing math.
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    pub position: Vec3,
    pub forward: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
}

#[derive(Debug, Clone, Copy)]
pub struct Touch {
    pub phase: TouchPhase,
    pub position: Vec2,
}

/// Pose handed to the host when the character is (re)placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedPose {
    pub position: Vec3,
    pub yaw_degrees: f32,
}

/// Yaw (degrees) that faces along `direction` flattened onto the ground
/// plane. Yaw 0 faces +Z.
pub fn yaw_facing(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z).to_degrees()
}

pub struct TapToPlace {
    screen_center: Vec2,
    turn_towards_camera: bool,
    ignore_touch_moves: bool,
    initial_placement_complete: bool,
    indicator: Option<PlacedPose>,
    placed: Option<PlacedPose>,
}

impl TapToPlace {
    pub fn new(screen_center: Vec2, turn_towards_camera: bool) -> Self {
        Self {
            screen_center,
            turn_towards_camera,
            ignore_touch_moves: false,
            initial_placement_complete: false,
            indicator: None,
            placed: None,
        }
    }

    /// Per-tick update: handle the first active touch, then refresh the
    /// placement indicator while nothing has been placed yet.
    pub fn update(
        &mut self,
        raycaster: &impl PlaneRaycaster,
        camera: &CameraView,
        touch: Option<Touch>,
    ) {
        if let Some(touch) = touch {
            match touch.phase {
                TouchPhase::Began => self.on_touch_began(raycaster, camera, touch),
                TouchPhase::Moved => self.on_touch_moved(raycaster, camera, touch),
                TouchPhase::Ended => self.ignore_touch_moves = false,
            }
        }

        if !self.initial_placement_complete {
            self.refresh_indicator(raycaster, camera);
        }
    }

    fn on_touch_began(
        &mut self,
        raycaster: &impl PlaneRaycaster,
        camera: &CameraView,
        touch: Touch,
    ) {
        // The very first placement lands at the screen center, where the
        // indicator has been showing — not at the tapped point.
        let position = if self.initial_placement_complete {
            touch.position
        } else {
            self.screen_center
        };
        let success = self.place_at(raycaster, camera, position);

        if success && !self.initial_placement_complete {
            self.ignore_touch_moves = true;
            self.initial_placement_complete = true;
        }
    }

    fn on_touch_moved(
        &mut self,
        raycaster: &impl PlaneRaycaster,
        camera: &CameraView,
        touch: Touch,
    ) {
        if self.ignore_touch_moves {
            return;
        }
        self.place_at(raycaster, camera, touch.position);
    }

    fn place_at(
        &mut self,
        raycaster: &impl PlaneRaycaster,
        camera: &CameraView,
        screen_point: Vec2,
    ) -> bool {
        let Some(hit) = raycaster.hit_test(screen_point) else {
            return false;
        };

        let yaw_degrees = if self.turn_towards_camera {
            yaw_facing(camera.position - hit.position)
        } else {
            self.placed.map(|p| p.yaw_degrees).unwrap_or(0.0)
        };

        self.placed = Some(PlacedPose {
            position: hit.position,
            yaw_degrees,
        });
        self.indicator = None;
        true
    }

    fn refresh_indicator(&mut self, raycaster: &impl PlaneRaycaster, camera: &CameraView) {
        self.indicator = raycaster.hit_test(self.screen_center).map(|hit| PlacedPose {
            position: hit.position,
            // The indicator turns with the camera, not towards it.
            yaw_degrees: yaw_facing(camera.forward),
        });
    }

    /// Indicator pose to render, or `None` while hidden.
    pub fn indicator(&self) -> Option<PlacedPose> {
        self.indicator
    }

    /// Latest placement, once the user has placed the character.
    pub fn placed(&self) -> Option<PlacedPose> {
        self.placed
    }

    pub fn initial_placement_complete(&self) -> bool {
        self.initial_placement_complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raycaster that hits a fixed plane everywhere, or nowhere.
    struct FlatFloor {
        hit: bool,
    }

    impl PlaneRaycaster for FlatFloor {
        fn hit_test(&self, screen_point: Vec2) -> Option<PlaneHit> {
            self.hit.then(|| PlaneHit {
                // Project the screen point onto a y=0 floor for test purposes.
                position: Vec3::new(screen_point.x / 100.0, 0.0, screen_point.y / 100.0),
            })
        }
    }

    fn camera() -> CameraView {
        CameraView {
            position: Vec3::new(0.0, 1.5, -2.0),
            forward: Vec3::Z,
        }
    }

    fn center() -> Vec2 {
        Vec2::new(540.0, 960.0)
    }

    #[test]
    fn indicator_tracks_center_until_placed() {
        let mut placer = TapToPlace::new(center(), true);
        placer.update(&FlatFloor { hit: true }, &camera(), None);
        let indicator = placer.indicator().expect("indicator should show on a hit");
        assert_eq!(indicator.position, Vec3::new(5.4, 0.0, 9.6));
        assert!(placer.placed().is_none());
    }

    #[test]
    fn indicator_hides_when_no_plane_found() {
        let mut placer = TapToPlace::new(center(), true);
        placer.update(&FlatFloor { hit: true }, &camera(), None);
        placer.update(&FlatFloor { hit: false }, &camera(), None);
        assert!(placer.indicator().is_none());
    }

    #[test]
    fn first_tap_places_at_screen_center() {
        let mut placer = TapToPlace::new(center(), false);
        let tap = Touch {
            phase: TouchPhase::Began,
            position: Vec2::new(100.0, 100.0),
        };
        placer.update(&FlatFloor { hit: true }, &camera(), Some(tap));

        let placed = placer.placed().expect("tap on a plane should place");
        // Center, not the tapped corner.
        assert_eq!(placed.position, Vec3::new(5.4, 0.0, 9.6));
        assert!(placer.initial_placement_complete());
        assert!(placer.indicator().is_none(), "indicator hides after placing");
    }

    #[test]
    fn moves_are_ignored_until_first_touch_ends() {
        let mut placer = TapToPlace::new(center(), false);
        let floor = FlatFloor { hit: true };
        placer.update(
            &floor,
            &camera(),
            Some(Touch {
                phase: TouchPhase::Began,
                position: center(),
            }),
        );
        let placed_at = placer.placed().unwrap().position;

        // Dragging the same touch must not move the character.
        placer.update(
            &floor,
            &camera(),
            Some(Touch {
                phase: TouchPhase::Moved,
                position: Vec2::new(10.0, 10.0),
            }),
        );
        assert_eq!(placer.placed().unwrap().position, placed_at);

        // After the touch lifts, a new drag re-places.
        placer.update(
            &floor,
            &camera(),
            Some(Touch {
                phase: TouchPhase::Ended,
                position: Vec2::new(10.0, 10.0),
            }),
        );
        placer.update(
            &floor,
            &camera(),
            Some(Touch {
                phase: TouchPhase::Moved,
                position: Vec2::new(10.0, 10.0),
            }),
        );
        assert_ne!(placer.placed().unwrap().position, placed_at);
    }

    #[test]
    fn failed_first_tap_does_not_lock_placement() {
        let mut placer = TapToPlace::new(center(), false);
        placer.update(
            &FlatFloor { hit: false },
            &camera(),
            Some(Touch {
                phase: TouchPhase::Began,
                position: center(),
            }),
        );
        assert!(placer.placed().is_none());
        assert!(!placer.initial_placement_complete());
    }

    #[test]
    fn placed_character_faces_the_camera() {
        let mut placer = TapToPlace::new(Vec2::ZERO, true);
        // Screen center (0,0) hits the origin; camera sits at -Z.
        placer.update(
            &FlatFloor { hit: true },
            &camera(),
            Some(Touch {
                phase: TouchPhase::Began,
                position: Vec2::ZERO,
            }),
        );
        let placed = placer.placed().unwrap();
        // Facing from origin towards a camera at (0, 1.5, -2) is due -Z.
        assert!((placed.yaw_degrees.abs() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn yaw_facing_cardinal_directions() {
        assert!((yaw_facing(Vec3::Z) - 0.0).abs() < 1e-6);
        assert!((yaw_facing(Vec3::X) - 90.0).abs() < 1e-6);
        assert!((yaw_facing(-Vec3::X) + 90.0).abs() < 1e-6);
    }
}
