/// Input event types the session understands.
/// Pointer coordinates are viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A press ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The window was resized.
    Resize { width: f32, height: f32 },
    /// The page scroll offset changed.
    Scroll { x: f32, y: f32 },
    /// The aim control was laid out at a new client rect.
    CueBounds { left: f32, top: f32, width: f32, height: f32 },
    /// A custom event from the page UI (menu buttons, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Custom event kinds sent by the page.
pub mod custom {
    /// Open or close the new-game menu.
    pub const TOGGLE_NEW_MENU: u32 = 1;
    /// Close the game-over menu.
    pub const DISMISS_OVER_MENU: u32 = 2;
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them on the next tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
