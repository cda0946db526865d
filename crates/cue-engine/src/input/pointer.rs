use glam::Vec2;

/// Latest pointer coordinate in viewport space.
/// Overwritten on every move; the session redraws the reticle right after.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    pos: Vec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }
}
