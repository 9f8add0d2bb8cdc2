//! Input handling: pointer event types and the processor that converts raw
//! page events into map commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into map commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::InputProcessor;
