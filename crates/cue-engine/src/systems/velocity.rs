use glam::Vec2;

use crate::api::types::ShotVelocity;
use crate::systems::aim::AimOffset;

/// Map the aim offset at release into a launch velocity.
///
/// Slingshot semantics: the ball travels away from the pull, with speed
/// linear in the pull fraction. Note the page's vertical axis feeds the
/// server's `x` and the horizontal axis its (negated) `y`.
pub fn launch_velocity(anchor: Vec2, offset: &AimOffset, max_distance: f32, max_speed: f32) -> ShotVelocity {
    ShotVelocity {
        x: (anchor.y - offset.pos.y) / max_distance * max_speed,
        y: -(anchor.x - offset.pos.x) / max_distance * max_speed,
    }
}
