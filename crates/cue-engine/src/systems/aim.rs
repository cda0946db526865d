//! Aim vector solver.
//!
//! Turns the anchor (center of the aim control) and the tracked pointer into a
//! bounded aim offset. The offset is an absolute point in the same space as the
//! anchor, never farther than `max_distance` along the aim ray.

use glam::Vec2;

use crate::api::config::ClampMode;

/// Clamped aim point plus the unclamped full-reach point along the aim ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimOffset {
    /// Clamped aim point.
    pub pos: Vec2,
    /// Point at exactly `max_distance` from the anchor along the ray.
    pub max: Vec2,
}

/// Solve the aim offset for a pointer relative to an anchor.
pub fn solve_aim(anchor: Vec2, pointer: Vec2, max_distance: f32, mode: ClampMode) -> AimOffset {
    let delta = pointer - anchor;
    let angle = delta.y.atan2(delta.x);
    let max = anchor + max_distance * Vec2::new(angle.cos(), angle.sin());

    let pos = match mode {
        ClampMode::AxisProjection => Vec2::new(
            if delta.x.abs() < (max.x - anchor.x).abs() { pointer.x } else { max.x },
            if delta.y.abs() < (max.y - anchor.y).abs() { pointer.y } else { max.y },
        ),
        ClampMode::Radial => {
            let len = delta.length();
            if len <= max_distance {
                pointer
            } else {
                anchor + delta * (max_distance / len)
            }
        }
    };

    AimOffset { pos, max }
}
