//! Camera fly-to toward a building.
//!
//! A focus request computes `destination = position + offset` and
//! `destination_target = position`, then interpolates the camera over a
//! fixed duration. Progress is advanced explicitly from the frame loop, so
//! the flight composes with the rest of the per-frame update order.

use glam::Vec3;
use web_time::{Duration, Instant};

use super::core::CameraState;
use crate::error::UnknownBuildingError;
use crate::options::FocusOptions;
use crate::scene::BuildingRegistry;
use crate::util::easing::EasingFunction;

/// Linear interpolation between two Vec3 positions.
#[inline]
fn lerp_vec3(t: f32, start: Vec3, end: Vec3) -> Vec3 {
    start + (end - start) * t
}

/// One in-progress camera interpolation.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    building: String,
    start_time: Instant,
    duration: Duration,
    easing: EasingFunction,
    start_position: Vec3,
    destination: CameraState,
}

impl Flight {
    /// Building the flight is heading to.
    #[must_use]
    pub fn building(&self) -> &str {
        &self.building
    }

    /// Final camera state.
    #[must_use]
    pub fn destination(&self) -> CameraState {
        self.destination
    }

    /// Normalized progress (0.0 to 1.0).
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);
        if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    /// Camera state at `now`. The orbit target is pinned to the
    /// destination target for the whole flight.
    #[must_use]
    pub fn sample(&self, now: Instant) -> CameraState {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.destination;
        }
        let eased = self.easing.evaluate(t);
        CameraState {
            position: lerp_vec3(eased, self.start_position, self.destination.position),
            orbit_target: self.destination.orbit_target,
        }
    }
}

/// Drives at most one fly-to at a time. A new request replaces the
/// in-flight one and restarts timing.
#[derive(Debug, Clone)]
pub struct FocusController {
    duration: Duration,
    easing: EasingFunction,
    flight: Option<Flight>,
}

/// Seconds to a `Duration`, mapping negative or non-finite input to zero.
pub(crate) fn secs_to_duration(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::ZERO)
}

impl FocusController {
    /// Controller with the configured flight duration and easing.
    #[must_use]
    pub fn new(options: &FocusOptions) -> Self {
        Self {
            duration: secs_to_duration(options.duration_secs),
            easing: options.easing,
            flight: None,
        }
    }

    /// Default flight duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Fly to a building using its authored focus offset.
    ///
    /// Returns the destination camera state. On an unknown id nothing
    /// changes, including any flight already in progress.
    pub fn focus(
        &mut self,
        registry: &BuildingRegistry,
        id: &str,
        current: &CameraState,
        now: Instant,
    ) -> Result<CameraState, UnknownBuildingError> {
        let offset = registry.get(id)?.focus_offset;
        self.focus_with_offset(registry, id, offset, current, now)
    }

    /// Fly to a building using an explicit camera offset.
    pub fn focus_with_offset(
        &mut self,
        registry: &BuildingRegistry,
        id: &str,
        offset: Vec3,
        current: &CameraState,
        now: Instant,
    ) -> Result<CameraState, UnknownBuildingError> {
        self.start(registry, id, offset, self.duration, current, now)
    }

    /// Fly to a building with its authored offset over a custom duration.
    pub fn focus_over(
        &mut self,
        registry: &BuildingRegistry,
        id: &str,
        duration: Duration,
        current: &CameraState,
        now: Instant,
    ) -> Result<CameraState, UnknownBuildingError> {
        let offset = registry.get(id)?.focus_offset;
        self.start(registry, id, offset, duration, current, now)
    }

    fn start(
        &mut self,
        registry: &BuildingRegistry,
        id: &str,
        offset: Vec3,
        duration: Duration,
        current: &CameraState,
        now: Instant,
    ) -> Result<CameraState, UnknownBuildingError> {
        let building = registry.get(id)?;
        let (position, orbit_target) = building.destination(offset);
        let destination = CameraState::new(position, orbit_target);

        if let Some(previous) = self.flight.take() {
            log::debug!(
                "focus '{}' replaces flight to '{}'",
                id,
                previous.building
            );
        }
        log::info!("focus '{id}': camera -> {position}, target -> {orbit_target}");

        self.flight = Some(Flight {
            building: building.id.clone(),
            start_time: now,
            duration,
            easing: self.easing,
            start_position: current.position,
            destination,
        });
        Ok(destination)
    }

    /// Drop the current flight where it is. Returns the building it was
    /// heading to.
    pub fn cancel(&mut self) -> Option<String> {
        self.flight.take().map(|f| f.building)
    }

    /// Whether a flight is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.flight.is_some()
    }

    /// The in-progress flight, if any.
    #[must_use]
    pub fn flight(&self) -> Option<&Flight> {
        self.flight.as_ref()
    }

    /// Advance the flight and write the camera state.
    ///
    /// At progress 1 the state is set exactly to the destination and the
    /// controller becomes idle. Returns `true` if the state was written.
    pub fn update(&mut self, now: Instant, state: &mut CameraState) -> bool {
        let Some(flight) = &self.flight else {
            return false;
        };
        *state = flight.sample(now);
        if flight.progress(now) >= 1.0 {
            log::debug!("arrived at '{}'", flight.building);
            self.flight = None;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::BuildingProxy;

    fn registry() -> BuildingRegistry {
        let proxy = |id: &str, position: Vec3, focus_offset: Vec3| BuildingProxy {
            id: id.to_owned(),
            label: String::new(),
            position,
            focus_offset,
            annotation_anchor: None,
            size: Vec3::ONE,
            rotation_y: 0.0,
        };
        BuildingRegistry::new([
            proxy("mainBldg", Vec3::new(-35.0, 10.0, -40.5), Vec3::new(10.0, 20.0, 50.0)),
            proxy("lib", Vec3::new(-14.0, 2.6, -130.0), Vec3::new(-25.0, 15.0, -45.0)),
            proxy("dorm", Vec3::new(3.5, 12.15, -220.0), Vec3::new(25.0, 20.0, 55.0)),
        ])
        .unwrap()
    }

    fn start_state() -> CameraState {
        CameraState::new(Vec3::new(77.0, 95.0, 105.0), Vec3::new(0.0, 2.5, -100.0))
    }

    #[test]
    fn every_building_lands_exactly() {
        let registry = registry();
        for building in registry.iter() {
            let mut focus = FocusController::new(&FocusOptions::default());
            let mut state = start_state();
            let t0 = Instant::now();
            let _ = focus.focus(&registry, &building.id, &state, t0).unwrap();

            let mut now = t0;
            while focus.is_active() {
                now += Duration::from_millis(16);
                let _ = focus.update(now, &mut state);
            }

            assert_eq!(state.position, building.position + building.focus_offset);
            assert_eq!(state.orbit_target, building.position);
            assert!(now - t0 >= Duration::from_secs(2));
        }
    }

    #[test]
    fn target_is_pinned_mid_flight() {
        let registry = registry();
        let mut focus = FocusController::new(&FocusOptions::default());
        let mut state = start_state();
        let t0 = Instant::now();
        let _ = focus.focus(&registry, "lib", &state, t0).unwrap();

        assert!(focus.update(t0 + Duration::from_millis(500), &mut state));
        assert_eq!(state.orbit_target, Vec3::new(-14.0, 2.6, -130.0));
        assert_ne!(state.position, start_state().position);
        assert_ne!(state.position, Vec3::new(-39.0, 17.6, -175.0));
        assert!(focus.is_active());
    }

    #[test]
    fn second_focus_replaces_first() {
        let registry = registry();
        let mut focus = FocusController::new(&FocusOptions::default());
        let mut state = start_state();
        let t0 = Instant::now();
        let first = focus.focus(&registry, "lib", &state, t0).unwrap();

        let t1 = t0 + Duration::from_millis(100);
        let _ = focus.update(t1, &mut state);
        let second = focus.focus(&registry, "dorm", &state, t1).unwrap();

        // Timing restarts at t1: still in flight at t0 + 2s.
        let _ = focus.update(t0 + Duration::from_secs(2), &mut state);
        assert!(focus.is_active());

        let mut now = t1;
        while focus.is_active() {
            now += Duration::from_millis(16);
            let _ = focus.update(now, &mut state);
            assert_ne!(state, first);
        }
        assert_eq!(state, second);
    }

    #[test]
    fn unknown_building_changes_nothing() {
        let registry = registry();
        let mut focus = FocusController::new(&FocusOptions::default());
        let state = start_state();
        let t0 = Instant::now();
        let _ = focus.focus(&registry, "lib", &state, t0).unwrap();

        let err = focus.focus(&registry, "doesNotExist", &state, t0).unwrap_err();
        assert_eq!(err.id, "doesNotExist");
        assert_eq!(focus.flight().unwrap().building(), "lib");
        assert_eq!(state, start_state());
    }

    #[test]
    fn explicit_offset_overrides_authored_one() {
        let registry = registry();
        let mut focus = FocusController::new(&FocusOptions::default());
        let dest = focus
            .focus_with_offset(&registry, "lib", Vec3::new(0.0, 50.0, 0.0), &start_state(), Instant::now())
            .unwrap();
        assert_eq!(dest.position, Vec3::new(-14.0, 52.6, -130.0));
        assert_eq!(dest.orbit_target, Vec3::new(-14.0, 2.6, -130.0));
    }

    #[test]
    fn zero_duration_snaps_on_first_update() {
        let registry = registry();
        let mut focus = FocusController::new(&FocusOptions {
            duration_secs: 0.0,
            ..FocusOptions::default()
        });
        let mut state = start_state();
        let t0 = Instant::now();
        let dest = focus.focus(&registry, "dorm", &state, t0).unwrap();
        assert!(focus.update(t0, &mut state));
        assert_eq!(state, dest);
        assert!(!focus.is_active());
    }

    #[test]
    fn cancel_leaves_camera_mid_flight() {
        let registry = registry();
        let mut focus = FocusController::new(&FocusOptions::default());
        let mut state = start_state();
        let t0 = Instant::now();
        let _ = focus.focus(&registry, "mainBldg", &state, t0).unwrap();
        let _ = focus.update(t0 + Duration::from_millis(300), &mut state);
        let frozen = state;

        assert_eq!(focus.cancel().as_deref(), Some("mainBldg"));
        assert!(!focus.update(t0 + Duration::from_secs(5), &mut state));
        assert_eq!(state, frozen);
    }

    #[test]
    fn negative_duration_is_zero() {
        assert_eq!(secs_to_duration(-1.0), Duration::ZERO);
        assert_eq!(secs_to_duration(f32::NAN), Duration::ZERO);
        assert_eq!(secs_to_duration(2.0), Duration::from_secs(2));
    }
}
