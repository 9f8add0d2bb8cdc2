//! Map configuration with TOML preset support.
//!
//! Camera, control, fly-to and intro settings plus the building layout are
//! consolidated here. Options serialize to/from TOML so a campus can be
//! described in a single file.

mod buildings;
mod camera;
mod controls;
mod focus;

use std::path::Path;

pub use buildings::default_layout;
pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use focus::{FocusOptions, IntroOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CampusError;
use crate::scene::{BuildingProxy, BuildingRegistry};

/// Top-level options container. All sections use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[focus]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct CampusOptions {
    /// Projection and start-up view.
    pub camera: CameraOptions,
    /// Orbit control limits and sensitivities.
    pub controls: ControlOptions,
    /// Fly-to timing.
    pub focus: FocusOptions,
    /// Start-up flight.
    pub intro: IntroOptions,
    /// Building proxies in menu order.
    #[schemars(skip)]
    pub buildings: Vec<BuildingProxy>,
}

impl Default for CampusOptions {
    fn default() -> Self {
        Self {
            camera: CameraOptions::default(),
            controls: ControlOptions::default(),
            focus: FocusOptions::default(),
            intro: IntroOptions::default(),
            buildings: default_layout(),
        }
    }
}

impl CampusOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(CampusOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, CampusError> {
        toml::from_str(content)
            .map_err(|e| CampusError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CampusError> {
        let content = std::fs::read_to_string(path).map_err(CampusError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CampusError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CampusError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CampusError::Io)?;
        }
        std::fs::write(path, content).map_err(CampusError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Check camera and control values that the frame loop relies on.
    ///
    /// # Errors
    ///
    /// Returns [`CampusError::InvalidOptions`] naming the offending field.
    pub fn validate(&self) -> Result<(), CampusError> {
        self.camera
            .validate()
            .and_then(|()| self.controls.validate())
            .map_err(CampusError::InvalidOptions)
    }

    /// Validate the options and build the building registry, checking ids
    /// are unique and the intro building exists.
    pub fn registry(&self) -> Result<BuildingRegistry, CampusError> {
        self.validate()?;
        let registry = BuildingRegistry::new(self.buildings.iter().cloned())?;
        if let Some(intro) = &self.intro.building {
            let _ = registry.get(intro)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = CampusOptions::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = CampusOptions::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[focus]
duration_secs = 1.5
";
        let opts = CampusOptions::from_toml(toml_str).unwrap();
        assert_eq!(opts.focus.duration_secs, 1.5);
        assert_eq!(opts.focus.easing, EasingFunction::QuadraticOut);
        assert_eq!(opts.camera.fovy, 50.0);
        assert_eq!(opts.buildings.len(), 6);
    }

    #[test]
    fn custom_layout_replaces_default() {
        let toml_str = r#"
[intro]
building = "gate"

[[buildings]]
id = "gate"
position = [0.0, 0.0, 0.0]
focus_offset = [10.0, 10.0, 10.0]

[[buildings]]
id = "hall"
label = "Hall"
position = [5.0, 1.0, -20.0]
focus_offset = [0.0, 30.0, 40.0]
annotation_anchor = [5.0, 8.0, -20.0]
size = [10.0, 6.0, 12.0]
rotation_y = 0.5
"#;
        let opts = CampusOptions::from_toml(toml_str).unwrap();
        let registry = opts.registry().unwrap();
        assert_eq!(registry.len(), 2);
        let hall = registry.get("hall").unwrap();
        assert_eq!(hall.anchor(), Vec3::new(5.0, 8.0, -20.0));
        assert_eq!(registry.get("gate").unwrap().size, Vec3::ONE);
    }

    #[test]
    fn intro_must_name_a_building() {
        let mut opts = CampusOptions::default();
        opts.intro.building = Some("stadium".to_owned());
        assert!(matches!(
            opts.registry(),
            Err(CampusError::UnknownBuilding(e)) if e.id == "stadium"
        ));
    }

    fn invalid(toml_str: &str) -> bool {
        let opts = CampusOptions::from_toml(toml_str).unwrap();
        matches!(opts.registry(), Err(CampusError::InvalidOptions(_)))
    }

    #[test]
    fn inverted_distance_limits_are_rejected() {
        assert!(invalid("[controls]\nmin_distance = 300.0"));
        assert!(invalid("[controls]\nmin_distance = 0.0"));
    }

    #[test]
    fn non_finite_control_limits_are_rejected() {
        assert!(invalid("[controls]\nmax_polar_angle = nan"));
        assert!(invalid("[controls]\nmax_distance = inf"));
        assert!(invalid("[controls]\ndamping_factor = nan"));
        assert!(invalid("[controls]\npan_max = [1000.0, nan, 1000.0]"));
    }

    #[test]
    fn inverted_pan_region_is_rejected() {
        assert!(invalid("[controls]\npan_min = [0.0, 200.0, 0.0]"));
    }

    #[test]
    fn bad_projection_is_rejected() {
        assert!(invalid("[camera]\nznear = 0.0"));
        assert!(invalid("[camera]\nzfar = 0.05"));
        assert!(invalid("[camera]\nfovy = 180.0"));
    }

    #[test]
    fn default_options_are_valid() {
        assert!(CampusOptions::default().validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            CampusOptions::from_toml("[camera]\nfovy = \"wide\""),
            Err(CampusError::OptionsParse(_))
        ));
    }

    #[test]
    fn default_layout_matches_campus() {
        let registry = CampusOptions::default().registry().unwrap();
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            ["rst", "mainBldg", "lib", "lab", "mensa", "dorm"]
        );
        let lib = registry.get("lib").unwrap();
        let (position, target) = lib.destination(lib.focus_offset);
        assert!(position.abs_diff_eq(Vec3::new(-39.0, 17.6, -175.0), 1e-4));
        assert_eq!(target, lib.position);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(CampusOptions::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("focus"));
        assert!(!props.contains_key("buildings"));

        let controls = &props["controls"]["properties"];
        assert!(controls.get("damping_factor").is_some());
        assert!(controls.get("pan_min").is_none());
    }
}
