use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters and the start-up view.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position at start-up.
    #[schemars(with = "[f32; 3]")]
    pub position: Vec3,
    /// Orbit target at start-up.
    #[schemars(with = "[f32; 3]")]
    pub target: Vec3,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 5000.0,
            position: Vec3::new(77.0, 95.0, 105.0),
            target: Vec3::new(0.0, 2.5, -100.0),
        }
    }
}

impl CameraOptions {
    /// Check the projection parameters and start-up view.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.fovy.is_finite() && self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(format!(
                "camera.fovy must be in (0, 180) degrees, got {}",
                self.fovy
            ));
        }
        if !(self.znear.is_finite() && self.znear > 0.0)
            || !(self.zfar.is_finite() && self.zfar > self.znear)
        {
            return Err(format!(
                "camera clip planes must satisfy 0 < znear < zfar, got {} and {}",
                self.znear, self.zfar
            ));
        }
        if !self.position.is_finite() || !self.target.is_finite() {
            return Err("camera.position and target must be finite".to_owned());
        }
        Ok(())
    }
}
