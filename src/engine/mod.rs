//! The campus map context.
//!
//! [`CampusMap`] owns the registry, camera, controllers and overlay state;
//! commands are applied in `navigation`, the per-frame update lives in
//! `frame`.

mod command;
mod frame;
mod navigation;

pub use command::MapCommand;
pub use frame::FrameReport;
use glam::{Mat4, Vec3};
pub use navigation::CommandEffect;
use web_time::{Duration, Instant};

use crate::annotation::AnnotationProjector;
use crate::camera::core::{Camera, CameraState, Viewport};
use crate::camera::focus::{secs_to_duration, FocusController};
use crate::camera::orbit::OrbitController;
use crate::error::CampusError;
use crate::loading::LoadingTracker;
use crate::options::CampusOptions;
use crate::scene::{BuildingRegistry, PickQuery, PickResolver, ProxyPicker};

/// A flight queued to start at a fixed time after start-up.
#[derive(Debug, Clone, PartialEq)]
struct ScheduledFlight {
    building: String,
    at: Instant,
    duration: Duration,
}

/// The interactive campus map.
///
/// Owns everything the frame loop touches: the building registry, the
/// camera and viewport, the fly-to and orbit controllers, hover
/// annotations, and loading state. Nothing is global, so a map can be
/// driven entirely from tests.
///
/// # Frame loop
///
/// Feed user input through [`execute`](Self::execute) as it arrives, then
/// call [`frame`](Self::frame) once per display refresh and draw with the
/// returned [`FrameReport`].
pub struct CampusMap {
    options: CampusOptions,
    registry: BuildingRegistry,
    camera: Camera,
    viewport: Viewport,
    view_proj: Mat4,
    focus: FocusController,
    orbit: OrbitController,
    annotations: AnnotationProjector,
    loading: LoadingTracker,
    picker: Box<dyn PickResolver>,
    intro: Option<ScheduledFlight>,
    /// Last camera state that passed the finiteness check.
    last_good: CameraState,
    frame_count: u64,
}

impl CampusMap {
    /// Build a map from options.
    ///
    /// # Errors
    ///
    /// Returns [`CampusError`] if camera or control values are unusable,
    /// building ids are duplicated, or the intro names an unknown building.
    pub fn new(
        options: CampusOptions,
        viewport: Viewport,
        now: Instant,
    ) -> Result<Self, CampusError> {
        let registry = options.registry()?;

        let state =
            CameraState::new(options.camera.position, options.camera.target);
        let camera = Camera {
            state,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy: options.camera.fovy,
            znear: options.camera.znear,
            zfar: options.camera.zfar,
        };
        let view_proj = camera.build_matrix();

        let intro = options.intro.building.as_ref().map(|building| {
            ScheduledFlight {
                building: building.clone(),
                at: now + secs_to_duration(options.intro.delay_secs),
                duration: secs_to_duration(options.intro.duration_secs),
            }
        });

        log::info!(
            "campus map ready: {} buildings, viewport {}x{} @{}x",
            registry.len(),
            viewport.canvas_width,
            viewport.canvas_height,
            viewport.device_pixel_ratio
        );

        Ok(Self {
            focus: FocusController::new(&options.focus),
            orbit: OrbitController::new(options.controls.clone()),
            options,
            registry,
            camera,
            viewport,
            view_proj,
            annotations: AnnotationProjector::new(),
            loading: LoadingTracker::new(),
            picker: Box::new(ProxyPicker),
            intro,
            last_good: state,
            frame_count: 0,
        })
    }

    /// Replace the built-in proxy ray caster with another picking layer.
    #[must_use]
    pub fn with_picker(mut self, picker: impl PickResolver + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Building under the given CSS-pixel pointer position, if any.
    #[must_use]
    pub fn pick(&self, x: f32, y: f32) -> Option<String> {
        self.picker.pick(
            &self.registry,
            PickQuery {
                camera: &self.camera,
                viewport: &self.viewport,
                x,
                y,
            },
        )
    }

    /// Options the map was built from.
    #[must_use]
    pub fn options(&self) -> &CampusOptions {
        &self.options
    }

    /// The building registry.
    #[must_use]
    pub fn registry(&self) -> &BuildingRegistry {
        &self.registry
    }

    /// The perspective camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current eye position and orbit target.
    #[must_use]
    pub fn camera_state(&self) -> CameraState {
        self.camera.state
    }

    /// View-projection matrix as of the last frame or resize.
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        self.view_proj
    }

    /// The drawing surface.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The fly-to controller.
    #[must_use]
    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    /// The user-drag controller.
    #[must_use]
    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    /// Hover annotation state.
    #[must_use]
    pub fn annotations(&self) -> &AnnotationProjector {
        &self.annotations
    }

    /// Asset-load tracking.
    #[must_use]
    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    /// Mutable asset-load tracking for the loader's callbacks.
    pub fn loading_mut(&mut self) -> &mut LoadingTracker {
        &mut self.loading
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
