use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit control sensitivities and limits.
pub struct ControlOptions {
    /// Keep applying drag motion for a few frames after release.
    #[schemars(title = "Inertia")]
    pub enable_damping: bool,
    /// Fraction of pending motion applied per frame when damping.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub zoom_speed: f32,
    /// Closest the camera may get to the orbit target.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest the camera may get from the orbit target.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Largest angle between the up axis and the target-to-camera offset.
    /// π/2 keeps the camera above the target's horizon.
    #[schemars(skip)]
    pub max_polar_angle: f32,
    /// Lower corner of the pan region.
    #[schemars(skip)]
    pub pan_min: Vec3,
    /// Upper corner of the pan region.
    #[schemars(skip)]
    pub pan_max: Vec3,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 10.0,
            max_distance: 200.0,
            max_polar_angle: FRAC_PI_2,
            pan_min: Vec3::new(-1000.0, 0.0, -1000.0),
            pan_max: Vec3::new(1000.0, 150.0, 1000.0),
        }
    }
}

impl ControlOptions {
    /// Check that every limit is finite and every range is ordered.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("damping_factor", self.damping_factor),
            ("rotate_speed", self.rotate_speed),
            ("pan_speed", self.pan_speed),
            ("zoom_speed", self.zoom_speed),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("max_polar_angle", self.max_polar_angle),
        ];
        if let Some((name, value)) =
            scalars.iter().find(|(_, v)| !v.is_finite())
        {
            return Err(format!("controls.{name} must be finite, got {value}"));
        }
        if !self.pan_min.is_finite() || !self.pan_max.is_finite() {
            return Err("controls.pan_min and pan_max must be finite".to_owned());
        }
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(format!(
                "controls.damping_factor must be in [0, 1], got {}",
                self.damping_factor
            ));
        }
        if self.min_distance <= 0.0 || self.min_distance > self.max_distance {
            return Err(format!(
                "controls.min_distance ({}) must be positive and at most \
                 max_distance ({})",
                self.min_distance, self.max_distance
            ));
        }
        if self.max_polar_angle <= 0.0 {
            return Err(format!(
                "controls.max_polar_angle must be positive, got {}",
                self.max_polar_angle
            ));
        }
        if !self.pan_min.cmple(self.pan_max).all() {
            return Err(format!(
                "controls.pan_min {} must not exceed pan_max {}",
                self.pan_min, self.pan_max
            ));
        }
        Ok(())
    }
}
