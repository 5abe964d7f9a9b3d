pub mod light;
pub mod placement;

pub use light::{
    color_temperature_to_rgb, AmbientLightMatcher, DirectionalLightMatcher, LightEstimate,
    LightMatchSettings,
};
pub use placement::{
    yaw_facing, CameraView, PlacedPose, PlaneHit, PlaneRaycaster, TapToPlace, Touch, TouchPhase,
};
