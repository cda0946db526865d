use glam::Vec2;

use crate::api::types::Viewport;
use crate::renderer::surface::{DrawSurface, ReticleStroke};
use crate::systems::aim::AimOffset;

/// Red-channel intensity of the reticle: the pull on each axis as a
/// percentage of reach, scaled by 2 and summed. Not clamped to 255.
pub fn intensity(anchor: Vec2, offset: Vec2, max_distance: f32) -> f32 {
    (anchor.y - offset.y).abs() / max_distance * 200.0
        + (anchor.x - offset.x).abs() / max_distance * 200.0
}

/// Resize the surface to the viewport and draw the guide line from the
/// anchor to the aim offset. The line is drawn even when not charging,
/// just fully transparent.
pub fn draw_reticle(
    surface: &mut DrawSurface,
    viewport: Viewport,
    anchor: Vec2,
    aim: &AimOffset,
    charging: bool,
    max_distance: f32,
    width: f32,
) -> ReticleStroke {
    surface.resize(viewport);

    let stroke = ReticleStroke {
        from: anchor,
        to: aim.pos,
        intensity: intensity(anchor, aim.pos, max_distance),
        opacity: if charging { 1.0 } else { 0.0 },
        width,
    };
    surface.draw(stroke);
    stroke
}
