//! Hover annotations: per-building overlay visibility and screen placement.
//!
//! Visible annotations are re-projected every frame so they follow the
//! camera, including during a fly-to.

use glam::Mat4;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::camera::core::{project_to_screen, ScreenPoint, Viewport};
use crate::error::UnknownBuildingError;
use crate::scene::BuildingRegistry;

/// Pointer cursor the page should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    /// Browser default (`auto`).
    #[default]
    Default,
    /// Interactive hand (`pointer`).
    Pointer,
}

impl CursorStyle {
    /// CSS `cursor` value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "auto",
            Self::Pointer => "pointer",
        }
    }
}

/// Overlay state of one building's annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AnnotationState {
    /// Whether the overlay element is shown.
    pub visible: bool,
    /// Last projected CSS-pixel position (`left`, `top`).
    pub screen: ScreenPoint,
}

/// A visible annotation ready to be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationPlacement {
    /// Building the annotation belongs to.
    pub building: String,
    /// Where to put the overlay element.
    pub screen: ScreenPoint,
}

/// Tracks hover annotations for every building.
#[derive(Debug, Clone, Default)]
pub struct AnnotationProjector {
    states: FxHashMap<String, AnnotationState>,
}

impl AnnotationProjector {
    /// Projector with every annotation hidden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a building's annotation and place it immediately.
    ///
    /// Returns the cursor the page should switch to.
    pub fn on_hover_enter(
        &mut self,
        registry: &BuildingRegistry,
        id: &str,
        view_proj: &Mat4,
        viewport: &Viewport,
    ) -> Result<CursorStyle, UnknownBuildingError> {
        let building = registry.get(id)?;
        let screen = project_to_screen(view_proj, building.anchor(), viewport);
        let _ = self.states.insert(
            building.id.clone(),
            AnnotationState {
                visible: true,
                screen,
            },
        );
        Ok(CursorStyle::Pointer)
    }

    /// Hide a building's annotation. Hiding an already hidden annotation is
    /// a no-op.
    ///
    /// Returns the cursor the page should show: the default cursor unless
    /// another annotation is still visible.
    pub fn on_hover_exit(
        &mut self,
        registry: &BuildingRegistry,
        id: &str,
    ) -> Result<CursorStyle, UnknownBuildingError> {
        let building = registry.get(id)?;
        if let Some(state) = self.states.get_mut(&building.id) {
            state.visible = false;
        }
        Ok(self.cursor())
    }

    /// Re-place every visible annotation for the current camera.
    pub fn reproject_all(
        &mut self,
        registry: &BuildingRegistry,
        view_proj: &Mat4,
        viewport: &Viewport,
    ) {
        for (id, state) in &mut self.states {
            if !state.visible {
                continue;
            }
            match registry.get(id) {
                Ok(building) => {
                    state.screen =
                        project_to_screen(view_proj, building.anchor(), viewport);
                }
                Err(e) => {
                    log::warn!("dropping annotation: {e}");
                    state.visible = false;
                }
            }
        }
    }

    /// Current state of one annotation (hidden if never hovered).
    #[must_use]
    pub fn state(&self, id: &str) -> AnnotationState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Whether any annotation is visible.
    #[must_use]
    pub fn any_visible(&self) -> bool {
        self.states.values().any(|s| s.visible)
    }

    /// Cursor implied by the current hover state.
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        if self.any_visible() {
            CursorStyle::Pointer
        } else {
            CursorStyle::Default
        }
    }

    /// Visible annotations in registry order.
    #[must_use]
    pub fn placements(&self, registry: &BuildingRegistry) -> Vec<AnnotationPlacement> {
        registry
            .ids()
            .filter_map(|id| {
                let state = self.states.get(id)?;
                state.visible.then(|| AnnotationPlacement {
                    building: id.to_owned(),
                    screen: state.screen,
                })
            })
            .collect()
    }
}
