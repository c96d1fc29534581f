//! Input event types decoupled from any windowing backend.
//!
//! Hosts translate their native events (GLFW, SDL, X11, ...) into
//! [`InputEvent`]s and feed them through the `Interface::process_*` entry
//! points; the rest of the toolkit never depends on a windowing crate.

// ---------------------------------------------------------------------------
// MouseButton
// ---------------------------------------------------------------------------

/// Mouse button, decoupled from the host backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// An input event routed through hit-testing to the widget under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The pointer moved to an absolute surface position.
    PointerMoved { x: i32, y: i32 },
    /// A mouse button was pressed or released at a surface position.
    PointerButton {
        button: MouseButton,
        pressed: bool,
        x: i32,
        y: i32,
    },
    /// Scroll input at a surface position, in pixels.
    Scroll { x: i32, y: i32, dx: i32, dy: i32 },
}

impl InputEvent {
    /// The surface position the event occurred at.
    pub fn position(&self) -> (i32, i32) {
        match *self {
            InputEvent::PointerMoved { x, y } => (x, y),
            InputEvent::PointerButton { x, y, .. } => (x, y),
            InputEvent::Scroll { x, y, .. } => (x, y),
        }
    }
}
