//! Command dispatch for CampusMap

use web_time::Instant;

use super::{CampusMap, MapCommand};
use crate::annotation::CursorStyle;
use crate::camera::core::{CameraState, Viewport};
use crate::error::{CampusError, UnknownBuildingError};

/// What a command changed that the page may need to act on right away.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CommandEffect {
    /// Destination of a flight the command started.
    pub destination: Option<CameraState>,
    /// Cursor to switch to.
    pub cursor: Option<CursorStyle>,
}

impl CampusMap {
    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns [`CampusError::UnknownBuilding`] if the command names a
    /// building that is not registered. Nothing changes in that case.
    pub fn execute(
        &mut self,
        command: MapCommand,
        now: Instant,
    ) -> Result<CommandEffect, CampusError> {
        let mut effect = CommandEffect::default();
        match command {
            MapCommand::NavigateTo { id } | MapCommand::Click { id } => {
                effect.destination = Some(self.navigate_to(&id, now)?);
            }
            MapCommand::HoverEnter { id } => {
                effect.cursor = Some(self.annotations.on_hover_enter(
                    &self.registry,
                    &id,
                    &self.view_proj,
                    &self.viewport,
                )?);
            }
            MapCommand::HoverExit { id } => {
                effect.cursor =
                    Some(self.annotations.on_hover_exit(&self.registry, &id)?);
            }
            MapCommand::DragStart => {
                self.interrupt_flight();
                self.orbit.begin_drag();
            }
            MapCommand::DragEnd => self.orbit.end_drag(),
            MapCommand::Rotate { delta } => {
                self.interrupt_flight();
                self.orbit.rotate(delta, &self.viewport);
            }
            MapCommand::Pan { delta } => {
                self.interrupt_flight();
                self.orbit.pan(
                    delta,
                    &self.camera.state,
                    self.camera.fovy,
                    &self.viewport,
                );
            }
            MapCommand::Zoom { delta } => {
                self.interrupt_flight();
                self.orbit.zoom(delta);
            }
            MapCommand::Resize {
                width,
                height,
                device_pixel_ratio,
            } => self.resize(Viewport::new(width, height, device_pixel_ratio)),
        }
        Ok(effect)
    }

    /// Fly to a building with its authored offset.
    ///
    /// Menu entries and scene clicks both land here. Pending drag inertia is
    /// dropped so it cannot fight the flight, and a pending intro is
    /// skipped.
    pub fn navigate_to(
        &mut self,
        id: &str,
        now: Instant,
    ) -> Result<CameraState, UnknownBuildingError> {
        let destination =
            self.focus
                .focus(&self.registry, id, &self.camera.state, now)?;
        self.orbit.stop();
        if self.intro.take().is_some() {
            log::debug!("intro skipped by navigation to '{id}'");
        }
        Ok(destination)
    }

    /// Update the camera aspect and projection for a new surface size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        self.view_proj = self.camera.build_matrix();
    }

    /// User camera input overrides any flight in progress.
    fn interrupt_flight(&mut self) {
        if let Some(building) = self.focus.cancel() {
            log::debug!("flight to '{building}' interrupted by user input");
        }
        if self.intro.take().is_some() {
            log::debug!("intro skipped by user input");
        }
    }
}
