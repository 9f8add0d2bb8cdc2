//! The map's complete interactive vocabulary.
//!
//! Every user-facing operation (menu buttons, pick results from the
//! interaction layer, pointer drags, window resizes) is represented as a
//! `MapCommand`. Consumers construct commands and pass them to
//! [`CampusMap::execute`](super::CampusMap::execute).

use glam::Vec2;
use serde::Deserialize;

/// A discrete or parameterized operation the map can perform.
///
/// The map never cares *how* a command was triggered: a menu click on
/// "lib" and a scene click on the "lib" proxy resolve through the same
/// registry lookup and produce the same flight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapCommand {
    // ── Navigation ──────────────────────────────────────────────────
    /// Menu request to fly to a building.
    NavigateTo {
        /// Building id from the menu entry.
        id: String,
    },

    /// The picking layer reported a click on a building proxy.
    Click {
        /// Building id resolved by picking.
        id: String,
    },

    // ── Hover ───────────────────────────────────────────────────────
    /// The pointer entered a building proxy.
    HoverEnter {
        /// Building id resolved by picking.
        id: String,
    },

    /// The pointer left a building proxy.
    HoverExit {
        /// Building id resolved by picking.
        id: String,
    },

    // ── Camera drag ─────────────────────────────────────────────────
    /// A user drag started. Cancels any flight in progress.
    DragStart,

    /// A user drag ended.
    DragEnd,

    /// Rotate the camera by `delta` pixels of pointer movement.
    Rotate {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of pointer movement.
    Pan {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Surface ─────────────────────────────────────────────────────
    /// The canvas changed size.
    Resize {
        /// New canvas width in physical pixels.
        width: f32,
        /// New canvas height in physical pixels.
        height: f32,
        /// Device pixel ratio.
        device_pixel_ratio: f32,
    },
}

impl MapCommand {
    /// Building id carried by the command, if any.
    #[must_use]
    pub fn building(&self) -> Option<&str> {
        match self {
            Self::NavigateTo { id }
            | Self::Click { id }
            | Self::HoverEnter { id }
            | Self::HoverExit { id } => Some(id),
            _ => None,
        }
    }
}
