//! Orbit-style user camera control: rotate, pan and zoom around the orbit
//! target with optional inertia, distance and polar limits, and a clamped
//! pan region.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::core::{CameraState, Viewport};
use crate::options::ControlOptions;

const EPS: f32 = 1e-6;

/// Axis-aligned region the orbit target is confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanBounds {
    /// Lower corner.
    pub min: Vec3,
    /// Upper corner.
    pub max: Vec3,
}

impl PanBounds {
    /// Clamp the orbit target into the region and shift the camera by the
    /// delta the clamp removed, so the target-to-camera offset is unchanged.
    ///
    /// Returns the removed delta (zero when the target was inside).
    pub fn clamp(&self, state: &mut CameraState) -> Vec3 {
        let clamped = state.orbit_target.clamp(self.min, self.max);
        let removed = state.orbit_target - clamped;
        state.orbit_target = clamped;
        state.position -= removed;
        removed
    }

    /// Whether the point lies inside the region (boundary included).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Accumulates user drag input and applies it to the camera once per frame.
#[derive(Debug, Clone)]
pub struct OrbitController {
    options: ControlOptions,
    /// Pending azimuth change in radians.
    theta_delta: f32,
    /// Pending polar change in radians.
    phi_delta: f32,
    /// Pending world-space target translation.
    pan_offset: Vec3,
    /// Pending multiplicative distance change.
    scale: f32,
    dragging: bool,
}

impl OrbitController {
    /// Controller with the given limits and sensitivities.
    #[must_use]
    pub fn new(options: ControlOptions) -> Self {
        Self {
            options,
            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            dragging: false,
        }
    }

    /// The configured control options.
    #[must_use]
    pub fn options(&self) -> &ControlOptions {
        &self.options
    }

    /// The pan region derived from the options.
    #[must_use]
    pub fn pan_bounds(&self) -> PanBounds {
        PanBounds {
            min: self.options.pan_min,
            max: self.options.pan_max,
        }
    }

    /// Whether a user drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Mark the start of a user drag.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Mark the end of a user drag. Inertia keeps applying afterwards.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Whether any input is still waiting to be applied.
    #[must_use]
    pub fn has_pending_motion(&self) -> bool {
        self.theta_delta.abs() > EPS
            || self.phi_delta.abs() > EPS
            || self.pan_offset.length_squared() > EPS * EPS
            || (self.scale - 1.0).abs() > EPS
    }

    /// Drop all pending input, including inertia.
    pub fn stop(&mut self) {
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }

    /// Queue a rotation from `delta` pixels of pointer movement. A drag
    /// across the full viewport height turns the camera by one revolution.
    pub fn rotate(&mut self, delta: Vec2, viewport: &Viewport) {
        let height = viewport.css_height().max(1.0);
        let k = 2.0 * PI * self.options.rotate_speed / height;
        self.theta_delta -= delta.x * k;
        self.phi_delta -= delta.y * k;
    }

    /// Queue a screen-space pan from `delta` pixels of pointer movement.
    /// One pixel moves the target by one pixel's worth of world space at
    /// the target's depth.
    pub fn pan(
        &mut self,
        delta: Vec2,
        state: &CameraState,
        fovy_degrees: f32,
        viewport: &Viewport,
    ) {
        let offset = state.offset();
        let target_distance =
            offset.length() * (fovy_degrees.to_radians() / 2.0).tan();
        let height = viewport.css_height().max(1.0);
        let per_pixel = 2.0 * target_distance / height * self.options.pan_speed;

        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        self.pan_offset += -right * (delta.x * per_pixel) + up * (delta.y * per_pixel);
    }

    /// Queue a zoom step (positive = zoom in).
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 - delta * self.options.zoom_speed * 0.05).clamp(0.1, 10.0);
        self.scale *= factor;
    }

    /// Apply pending input to `state`. With damping enabled only a fraction
    /// of the pending motion is applied and the rest decays over later
    /// frames.
    ///
    /// Returns `true` if the camera changed; in that case the pan clamp has
    /// already been applied.
    pub fn update(&mut self, state: &mut CameraState) -> bool {
        if !self.has_pending_motion() {
            self.stop();
            return false;
        }

        let before = *state;
        let factor = if self.options.enable_damping {
            self.options.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        let offset = state.offset();
        let mut radius = offset.length().max(EPS);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.theta_delta * factor;
        phi += self.phi_delta * factor;
        // min/max, not clamp: never panics on inverted or NaN limits.
        phi = phi
            .min(self.options.max_polar_angle.clamp(EPS, PI - EPS))
            .max(EPS);

        radius = (radius * self.scale)
            .min(self.options.max_distance)
            .max(self.options.min_distance);

        state.orbit_target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        state.position = state.orbit_target + new_offset;

        if self.options.enable_damping {
            self.theta_delta *= 1.0 - factor;
            self.phi_delta *= 1.0 - factor;
            self.pan_offset *= 1.0 - factor;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let changed = state.position.distance_squared(before.position) > EPS
            || state.orbit_target.distance_squared(before.orbit_target) > EPS;
        if changed {
            let removed = self.pan_bounds().clamp(state);
            if removed != Vec3::ZERO {
                log::debug!("pan clamped by {removed}");
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undamped() -> ControlOptions {
        ControlOptions {
            enable_damping: false,
            ..ControlOptions::default()
        }
    }

    fn bounds() -> PanBounds {
        PanBounds {
            min: Vec3::new(-1000.0, 0.0, -1000.0),
            max: Vec3::new(1000.0, 150.0, 1000.0),
        }
    }

    #[test]
    fn clamp_inside_is_noop() {
        let mut state = CameraState::new(Vec3::new(10.0, 60.0, 10.0), Vec3::new(0.0, 50.0, 0.0));
        let before = state;
        assert_eq!(bounds().clamp(&mut state), Vec3::ZERO);
        assert_eq!(state, before);
    }

    #[test]
    fn clamp_preserves_offset_on_every_axis() {
        let cases = [
            Vec3::new(1200.0, 20.0, 0.0),
            Vec3::new(0.0, -30.0, 0.0),
            Vec3::new(0.0, 400.0, -1500.0),
            Vec3::new(-2000.0, 151.0, 2000.0),
        ];
        for target in cases {
            let offset = Vec3::new(40.0, 25.0, -30.0);
            let mut state = CameraState::new(target + offset, target);
            let removed = bounds().clamp(&mut state);

            assert!(bounds().contains(state.orbit_target), "{target}");
            assert_eq!(state.orbit_target + removed, target);
            assert!((state.offset() - offset).length() < 1e-3, "{target}");
        }
    }

    #[test]
    fn pan_past_boundary_is_clamped() {
        let mut orbit = OrbitController::new(undamped());
        let mut state = CameraState::new(Vec3::new(990.0, 50.0, 40.0), Vec3::new(990.0, 10.0, 0.0));
        let offset = state.offset();
        // Push the target far along +x through the pending pan offset.
        orbit.pan_offset = Vec3::new(100.0, 0.0, 0.0);
        assert!(orbit.update(&mut state));
        assert_eq!(state.orbit_target.x, 1000.0);
        assert!((state.offset() - offset).length() < 1e-3);
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let mut orbit = OrbitController::new(undamped());
        let mut state = CameraState::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);

        for _ in 0..200 {
            orbit.zoom(5.0);
            let _ = orbit.update(&mut state);
        }
        assert!((state.offset().length() - 10.0).abs() < 1e-3);

        for _ in 0..200 {
            orbit.zoom(-5.0);
            let _ = orbit.update(&mut state);
        }
        assert!((state.offset().length() - 200.0).abs() < 1e-2);
    }

    #[test]
    fn polar_angle_never_drops_below_horizon() {
        let mut orbit = OrbitController::new(undamped());
        let mut state = CameraState::new(Vec3::new(0.0, 50.0, 50.0), Vec3::new(0.0, 10.0, 0.0));
        let vp = Viewport::default();
        orbit.rotate(Vec2::new(0.0, -2000.0), &vp);
        let _ = orbit.update(&mut state);
        assert!(state.position.y >= state.orbit_target.y - 1e-3);
    }

    #[test]
    fn idle_update_leaves_state_bit_exact() {
        let mut orbit = OrbitController::new(ControlOptions::default());
        let mut state = CameraState::new(Vec3::new(-37.0, 17.6, -175.0), Vec3::new(-14.0, 2.6, -130.0));
        let before = state;
        assert!(!orbit.update(&mut state));
        assert_eq!(state, before);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut orbit = OrbitController::new(ControlOptions::default());
        let mut state = CameraState::new(Vec3::new(0.0, 50.0, 100.0), Vec3::ZERO);
        orbit.rotate(Vec2::new(100.0, 0.0), &Viewport::default());

        assert!(orbit.update(&mut state));
        assert!(orbit.has_pending_motion());
        orbit.stop();
        assert!(!orbit.has_pending_motion());
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut orbit = OrbitController::new(undamped());
        let mut state = CameraState::new(Vec3::new(0.0, 50.0, 100.0), Vec3::new(0.0, 10.0, 0.0));
        let offset = state.offset();
        orbit.pan(Vec2::new(30.0, 0.0), &state, 50.0, &Viewport::default());
        assert!(orbit.update(&mut state));
        assert!(state.orbit_target.x < 0.0);
        assert!((state.offset() - offset).length() < 1e-3);
    }

    #[test]
    fn inverted_limits_do_not_panic() {
        let mut orbit = OrbitController::new(ControlOptions {
            min_distance: 300.0,
            max_polar_angle: f32::NAN,
            ..undamped()
        });
        let mut state = CameraState::new(Vec3::new(0.0, 50.0, 100.0), Vec3::ZERO);
        orbit.rotate(Vec2::new(40.0, 10.0), &Viewport::default());
        assert!(orbit.update(&mut state));
        assert!(state.is_finite());
        assert!((state.offset().length() - 300.0).abs() < 1e-2);
    }
}
