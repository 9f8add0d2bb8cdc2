//! Converts raw pointer events into map commands.
//!
//! The `InputProcessor` owns all transient pointer state (position, drag
//! detection, modifier keys, current hover) and sits between the page's
//! event listeners and [`CampusMap::execute`](crate::CampusMap::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::MapCommand;

/// Pointer travel (CSS pixels) after which a press becomes a drag.
const DRAG_THRESHOLD: f32 = 3.0;

/// Converts raw pointer events into [`MapCommand`]s.
///
/// Each call takes `hit`, the building currently under the pointer as
/// resolved by the picking layer.
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    mouse_pos: Vec2,
    /// Button held and where it went down.
    pressed: Option<(MouseButton, Vec2)>,
    dragging: bool,
    shift_pressed: bool,
    hovered: Option<String>,
}

impl InputProcessor {
    /// Create a new processor with no button held and nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in CSS pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Vec2 {
        self.mouse_pos
    }

    /// Whether the current press has turned into a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Building currently under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Process a raw input event and return the resulting commands.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        hit: Option<String>,
    ) -> Vec<MapCommand> {
        let mut commands = Vec::new();
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y), &mut commands);
                self.update_hover(hit, &mut commands);
            }
            InputEvent::CursorLeft => {
                self.end_press(&mut commands);
                self.update_hover(None, &mut commands);
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    if self.pressed.is_none() {
                        self.pressed = Some((button, self.mouse_pos));
                    }
                } else if self.pressed.is_some_and(|(b, _)| b == button) {
                    let was_drag = self.dragging;
                    self.end_press(&mut commands);
                    if !was_drag && button == MouseButton::Left {
                        if let Some(id) = hit {
                            commands.push(MapCommand::Click { id });
                        }
                    }
                }
            }
            InputEvent::Scroll { delta } => {
                commands.push(MapCommand::Zoom { delta });
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
            }
        }
        commands
    }

    fn handle_cursor_moved(&mut self, pos: Vec2, commands: &mut Vec<MapCommand>) {
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;

        let Some((button, down_at)) = self.pressed else {
            return;
        };
        if !self.dragging {
            if pos.distance(down_at) <= DRAG_THRESHOLD {
                return;
            }
            self.dragging = true;
            commands.push(MapCommand::DragStart);
        }

        let pan = button != MouseButton::Left || self.shift_pressed;
        commands.push(if pan {
            MapCommand::Pan { delta }
        } else {
            MapCommand::Rotate { delta }
        });
    }

    fn end_press(&mut self, commands: &mut Vec<MapCommand>) {
        if self.dragging {
            commands.push(MapCommand::DragEnd);
        }
        self.pressed = None;
        self.dragging = false;
    }

    fn update_hover(&mut self, hit: Option<String>, commands: &mut Vec<MapCommand>) {
        if self.hovered == hit {
            return;
        }
        if let Some(id) = self.hovered.take() {
            commands.push(MapCommand::HoverExit { id });
        }
        if let Some(id) = hit {
            commands.push(MapCommand::HoverEnter { id: id.clone() });
            self.hovered = Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn button(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    fn lib() -> Option<String> {
        Some("lib".to_owned())
    }

    #[test]
    fn click_without_drag_selects_building() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(100.0, 100.0), lib());
        assert!(input.handle_event(button(true), lib()).is_empty());
        let cmds = input.handle_event(button(false), lib());
        assert_eq!(cmds, vec![MapCommand::Click { id: "lib".to_owned() }]);
    }

    #[test]
    fn drag_rotates_and_suppresses_click() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(100.0, 100.0), lib());
        let _ = input.handle_event(button(true), lib());

        // Within the threshold: nothing yet.
        assert!(input.handle_event(moved(101.0, 101.0), lib()).is_empty());

        let cmds = input.handle_event(moved(120.0, 101.0), lib());
        assert_eq!(
            cmds,
            vec![
                MapCommand::DragStart,
                MapCommand::Rotate {
                    delta: Vec2::new(19.0, 0.0)
                },
            ]
        );
        assert!(input.is_dragging());

        let cmds = input.handle_event(button(false), lib());
        assert_eq!(cmds, vec![MapCommand::DragEnd]);
    }

    #[test]
    fn shift_or_right_button_pans() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::ModifiersChanged { shift: true }, None);
        let _ = input.handle_event(button(true), None);
        let cmds = input.handle_event(moved(10.0, 0.0), None);
        assert_eq!(cmds[1], MapCommand::Pan { delta: Vec2::new(10.0, 0.0) });
        let _ = input.handle_event(button(false), None);

        let _ = input.handle_event(InputEvent::ModifiersChanged { shift: false }, None);
        let _ = input.handle_event(
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true,
            },
            None,
        );
        let cmds = input.handle_event(moved(10.0, 10.0), None);
        assert_eq!(cmds[1], MapCommand::Pan { delta: Vec2::new(0.0, 10.0) });
    }

    #[test]
    fn hover_transitions() {
        let mut input = InputProcessor::new();
        let cmds = input.handle_event(moved(1.0, 1.0), lib());
        assert_eq!(cmds, vec![MapCommand::HoverEnter { id: "lib".to_owned() }]);

        assert!(input.handle_event(moved(2.0, 1.0), lib()).is_empty());

        let cmds = input.handle_event(moved(3.0, 1.0), Some("lab".to_owned()));
        assert_eq!(
            cmds,
            vec![
                MapCommand::HoverExit { id: "lib".to_owned() },
                MapCommand::HoverEnter { id: "lab".to_owned() },
            ]
        );

        let cmds = input.handle_event(InputEvent::CursorLeft, None);
        assert_eq!(cmds, vec![MapCommand::HoverExit { id: "lab".to_owned() }]);
        assert_eq!(input.hovered(), None);
    }

    #[test]
    fn scroll_zooms() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 1.5 }, None),
            vec![MapCommand::Zoom { delta: 1.5 }]
        );
    }

    #[test]
    fn dom_button_codes() {
        assert_eq!(MouseButton::from_dom(0), MouseButton::Left);
        assert_eq!(MouseButton::from_dom(1), MouseButton::Middle);
        assert_eq!(MouseButton::from_dom(2), MouseButton::Right);
    }
}
