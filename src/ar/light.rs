//! Ambient light matching from camera light estimation.
//!
//! Each camera frame may carry an average-brightness estimate and a
//! correlated color temperature. Both matchers turn those into smoothed
//! targets: `DirectionalLightMatcher` drives the key light's intensity and
//! color, `AmbientLightMatcher` drives the scene's ambient color. Estimates
//! arrive per camera frame; smoothing runs per simulation tick.

use crate::character::tone::Rgb;

/// Light estimation for one camera frame. Either field may be absent
/// depending on platform support.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightEstimate {
    /// Average scene brightness in [0,1].
    pub average_brightness: Option<f32>,
    /// Correlated color temperature, Kelvin.
    pub color_temperature: Option<f32>,
}

#[derive(Debug, Clone, Copy)]
pub struct LightMatchSettings {
    pub match_brightness: bool,
    /// How strongly estimated brightness pulls the light, 0..1.
    pub brightness_strength: f32,
    pub match_color_temperature: bool,
    /// How strongly the estimated color temperature tints the light, 0..1.
    pub color_strength: f32,
    /// Smoothing time constant in seconds; 0 snaps immediately.
    pub change_smoothing: f32,
}

impl Default for LightMatchSettings {
    fn default() -> Self {
        Self {
            match_brightness: true,
            brightness_strength: 0.5,
            match_color_temperature: true,
            color_strength: 0.5,
            change_smoothing: 0.2,
        }
    }
}

/// Approximate RGB for a black-body color temperature (Kelvin), channels in
/// [0,1]. Tanner Helland's curve fit, valid roughly 1000K–40000K.
pub fn color_temperature_to_rgb(kelvin: f32) -> Rgb {
    let t = kelvin.clamp(1000.0, 40000.0) / 100.0;

    let r = if t <= 66.0 {
        255.0
    } else {
        329.698_73 * (t - 60.0).powf(-0.133_204_76)
    };

    let g = if t <= 66.0 {
        99.470_8 * t.ln() - 161.119_57
    } else {
        288.122_16 * (t - 60.0).powf(-0.075_514_846)
    };

    let b = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_73 * (t - 10.0).ln() - 305.044_8
    };

    Rgb::new(
        (r / 255.0).clamp(0.0, 1.0),
        (g / 255.0).clamp(0.0, 1.0),
        (b / 255.0).clamp(0.0, 1.0),
    )
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Matches a directional light's intensity and color to the estimate.
pub struct DirectionalLightMatcher {
    settings: LightMatchSettings,
    initial_intensity: f32,
    initial_color: Rgb,
    target_intensity: f32,
    target_color: Rgb,
    intensity: f32,
    color: Rgb,
}

impl DirectionalLightMatcher {
    pub fn new(settings: LightMatchSettings, initial_intensity: f32, initial_color: Rgb) -> Self {
        Self {
            settings,
            initial_intensity,
            initial_color,
            target_intensity: initial_intensity,
            target_color: initial_color,
            intensity: initial_intensity,
            color: initial_color,
        }
    }

    /// Fold one camera frame's estimate into the targets.
    pub fn frame_changed(&mut self, estimate: &LightEstimate) {
        if self.settings.match_brightness {
            if let Some(brightness) = estimate.average_brightness {
                let delta = (brightness - 0.5) * 2.0 * self.settings.brightness_strength;
                self.target_intensity = (self.initial_intensity + delta).clamp(0.0, 1.0);
            }
        }
        if self.settings.match_color_temperature {
            if let Some(kelvin) = estimate.color_temperature {
                let temp_rgb = color_temperature_to_rgb(kelvin);
                self.target_color = self.initial_color.lerp(temp_rgb, self.settings.color_strength);
            }
        }
    }

    /// Ease the live values towards their targets.
    pub fn update(&mut self, delta_time: f32) {
        if self.settings.change_smoothing > 0.0 {
            // A tick longer than the smoothing window lands on the target.
            let ratio = (delta_time / self.settings.change_smoothing).min(1.0);
            self.intensity = lerp(self.intensity, self.target_intensity, ratio);
            self.color = self.color.lerp(self.target_color, ratio);
        } else {
            self.intensity = self.target_intensity;
            self.color = self.target_color;
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Matches the scene's ambient color. Unlike the directional matcher this
/// folds brightness and temperature into a single color: the temperature
/// tint is blended against white by strength, then scaled by brightness.
pub struct AmbientLightMatcher {
    settings: LightMatchSettings,
    initial_brightness: f32,
    target_color: Rgb,
    color: Rgb,
}

impl AmbientLightMatcher {
    pub fn new(settings: LightMatchSettings, initial_ambient: Rgb) -> Self {
        Self {
            settings,
            initial_brightness: initial_ambient.max_component(),
            target_color: initial_ambient,
            color: initial_ambient,
        }
    }

    pub fn frame_changed(&mut self, estimate: &LightEstimate) {
        let mut brightness = self.initial_brightness;
        let mut temp_rgb = Rgb::WHITE;

        if self.settings.match_brightness {
            if let Some(estimated) = estimate.average_brightness {
                let delta = (estimated - 0.5) * self.settings.brightness_strength;
                brightness = (self.initial_brightness + delta).clamp(0.0, 1.0);
            }
        }
        if self.settings.match_color_temperature {
            if let Some(kelvin) = estimate.color_temperature {
                temp_rgb = color_temperature_to_rgb(kelvin);
            }
        }

        let strength = self.settings.color_strength;
        let offset = Rgb::WHITE.scale(1.0 - strength);
        let tinted = Rgb::new(
            temp_rgb.r * strength + offset.r,
            temp_rgb.g * strength + offset.g,
            temp_rgb.b * strength + offset.b,
        );
        self.target_color = tinted.scale(brightness);
    }

    pub fn update(&mut self, delta_time: f32) {
        if self.settings.change_smoothing > 0.0 {
            let ratio = (delta_time / self.settings.change_smoothing).min(1.0);
            self.color = self.color.lerp(self.target_color, ratio);
        } else {
            self.color = self.target_color;
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_temperature_is_near_white() {
        let rgb = color_temperature_to_rgb(6600.0);
        assert!(rgb.r > 0.95 && rgb.g > 0.95 && rgb.b > 0.95, "got {rgb:?}");
    }

    #[test]
    fn warm_temperature_drops_blue() {
        let rgb = color_temperature_to_rgb(2000.0);
        assert!(rgb.r > rgb.b, "warm light should be red-heavy, got {rgb:?}");
        assert!(rgb.b < 0.5);
    }

    #[test]
    fn cool_temperature_keeps_blue_full() {
        let rgb = color_temperature_to_rgb(10000.0);
        assert!(
            (rgb.b - 1.0).abs() < 1e-6,
            "cool light keeps full blue, got {rgb:?}"
        );
        assert!(rgb.r < 1.0);
    }

    #[test]
    fn brightness_estimate_moves_intensity_target() {
        let mut matcher =
            DirectionalLightMatcher::new(LightMatchSettings::default(), 0.5, Rgb::WHITE);
        matcher.frame_changed(&LightEstimate {
            average_brightness: Some(1.0),
            color_temperature: None,
        });
        // (1.0 - 0.5) * 2 * 0.5 = 0.5 over the initial 0.5, clamped to 1.
        matcher.update(10.0); // huge dt with smoothing 0.2 snaps close
        assert!(matcher.intensity() > 0.9, "got {}", matcher.intensity());
    }

    #[test]
    fn dim_estimate_lowers_intensity() {
        let mut matcher =
            DirectionalLightMatcher::new(LightMatchSettings::default(), 0.8, Rgb::WHITE);
        matcher.frame_changed(&LightEstimate {
            average_brightness: Some(0.0),
            color_temperature: None,
        });
        for _ in 0..100 {
            matcher.update(0.016);
        }
        assert!(
            (matcher.intensity() - 0.3).abs() < 0.02,
            "0.8 - 0.5 = 0.3 expected, got {}",
            matcher.intensity()
        );
    }

    #[test]
    fn missing_estimates_change_nothing() {
        let mut matcher =
            DirectionalLightMatcher::new(LightMatchSettings::default(), 0.5, Rgb::WHITE);
        matcher.frame_changed(&LightEstimate::default());
        matcher.update(1.0);
        assert_eq!(matcher.intensity(), 0.5);
        assert_eq!(matcher.color(), Rgb::WHITE);
    }

    #[test]
    fn zero_smoothing_snaps_immediately() {
        let settings = LightMatchSettings {
            change_smoothing: 0.0,
            ..LightMatchSettings::default()
        };
        let mut matcher = DirectionalLightMatcher::new(settings, 0.5, Rgb::WHITE);
        matcher.frame_changed(&LightEstimate {
            average_brightness: Some(1.0),
            color_temperature: None,
        });
        matcher.update(0.016);
        assert_eq!(matcher.intensity(), 1.0);
    }

    #[test]
    fn smoothing_converges_on_target() {
        let mut matcher =
            DirectionalLightMatcher::new(LightMatchSettings::default(), 0.2, Rgb::WHITE);
        matcher.frame_changed(&LightEstimate {
            average_brightness: Some(0.9),
            color_temperature: Some(3000.0),
        });
        let mut previous_gap = f32::MAX;
        for _ in 0..50 {
            matcher.update(0.016);
            let gap = (matcher.intensity() - 0.6).abs();
            assert!(gap <= previous_gap, "smoothing must approach monotonically");
            previous_gap = gap;
        }
    }

    #[test]
    fn ambient_color_combines_tint_and_brightness() {
        let settings = LightMatchSettings {
            change_smoothing: 0.0,
            ..LightMatchSettings::default()
        };
        let mut matcher = AmbientLightMatcher::new(settings, Rgb::new(0.4, 0.4, 0.4));
        matcher.frame_changed(&LightEstimate {
            average_brightness: Some(0.5),
            color_temperature: Some(2000.0),
        });
        matcher.update(0.016);
        let color = matcher.color();
        // Warm tint: red channel must outweigh blue after the blend.
        assert!(color.r > color.b, "got {color:?}");
        // Brightness estimate 0.5 keeps the initial 0.4 overall level.
        assert!(color.r <= 0.4 + 1e-6);
    }
}
