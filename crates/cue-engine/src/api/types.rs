use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier attached to an outgoing request. The host echoes it back with
/// the response so late answers to abandoned requests can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u32);

/// Launch velocity sent to the server. Created once per shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotVelocity {
    pub x: f32,
    pub y: f32,
}

/// Bounding rect of the aim control in viewport (client) coordinates,
/// as reported by `getBoundingClientRect()` on the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CueBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CueBounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Whether a client-space point falls on the control.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.top + self.height
    }

    /// Anchor point: the rect center shifted by the page scroll offset.
    /// `x` is the anchor's left, `y` its top.
    pub fn anchor(&self, scroll: Vec2) -> Vec2 {
        Vec2::new(
            self.left + self.width / 2.0 + scroll.x,
            self.top + self.height / 2.0 + scroll.y,
        )
    }
}

/// Size of the browser viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// DOM id of the label node for this seat.
    pub fn node_id(self) -> &'static str {
        match self {
            PlayerSlot::One => "p1",
            PlayerSlot::Two => "p2",
        }
    }
}
