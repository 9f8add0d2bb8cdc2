use serde::Deserialize;

/// Platform-agnostic pointer events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`MapCommand`](crate::engine::MapCommand) values.
///
/// # Example
///
/// ```ignore
/// let hit = map.pick(x, y);
/// for cmd in input.handle_event(InputEvent::CursorMoved { x, y }, hit) {
///     map.execute(cmd, now)?;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Cursor moved to absolute position.
    CursorMoved {
        /// Horizontal position in CSS pixels.
        x: f32,
        /// Vertical position in CSS pixels.
        y: f32,
    },
    /// Cursor left the canvas.
    CursorLeft,
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount (positive = zoom in, negative = zoom out).
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}
