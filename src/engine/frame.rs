//! Per-frame update for CampusMap
//!
//! Order within a frame: camera projection refresh and scheduled flights,
//! then camera controls (flight or user drag), then the view-projection
//! rebuild and annotation reprojection. The draw call happens after
//! [`CampusMap::frame`] returns, so nothing is ever projected with a stale
//! transform.

use serde::Serialize;
use web_time::Instant;

use super::CampusMap;
use crate::annotation::{AnnotationPlacement, CursorStyle};
use crate::camera::core::CameraState;
use crate::loading::LoadingScreen;

/// Everything the page needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frame sequence number, starting at 1.
    pub frame: u64,
    /// Camera state to render with.
    pub camera: CameraState,
    /// Column-major view-projection matrix.
    pub view_proj: [f32; 16],
    /// Building the camera is flying to, if any.
    pub flying_to: Option<String>,
    /// Visible annotations and where to place them.
    pub annotations: Vec<AnnotationPlacement>,
    /// Cursor implied by the hover state.
    pub cursor: CursorStyle,
    /// Loading overlay state.
    pub loading_screen: LoadingScreen,
    /// Description of a fault recovered from this frame.
    pub fault: Option<String>,
}

impl CampusMap {
    /// Run one frame.
    ///
    /// Never fails: a fault (such as a non-finite camera) is logged, the
    /// last good camera state is restored, and the frame completes so the
    /// next one can be scheduled.
    pub fn frame(&mut self, now: Instant) -> FrameReport {
        self.frame_count += 1;

        // 1. Projection and scheduled flights.
        self.camera.aspect = self.viewport.aspect();
        self.start_due_intro(now);

        // 2. Controls. A flight and a user drag never both write.
        let mut state = self.camera.state;
        if !self.focus.update(now, &mut state) {
            let _ = self.orbit.update(&mut state);
        }

        let fault = if state.is_finite() {
            self.last_good = state;
            None
        } else {
            let msg = format!(
                "non-finite camera (position {}, target {})",
                state.position, state.orbit_target
            );
            log::error!("frame {}: {msg}; restoring last good state", self.frame_count);
            state = self.last_good;
            let _ = self.focus.cancel();
            self.orbit.stop();
            Some(msg)
        };
        self.camera.state = state;

        // 3. Matrices, then annotations.
        self.view_proj = self.camera.build_matrix();
        self.annotations
            .reproject_all(&self.registry, &self.view_proj, &self.viewport);

        FrameReport {
            frame: self.frame_count,
            camera: self.camera.state,
            view_proj: self.view_proj.to_cols_array(),
            flying_to: self.focus.flight().map(|f| f.building().to_owned()),
            annotations: self.annotations.placements(&self.registry),
            cursor: self.annotations.cursor(),
            loading_screen: self.loading.screen(),
            fault,
        }
    }

    fn start_due_intro(&mut self, now: Instant) {
        let Some(intro) = self.intro.take_if(|intro| now >= intro.at) else {
            return;
        };
        match self.focus.focus_over(
            &self.registry,
            &intro.building,
            intro.duration,
            &self.camera.state,
            now,
        ) {
            Ok(_) => self.orbit.stop(),
            Err(e) => log::error!("intro flight: {e}"),
        }
    }
}
