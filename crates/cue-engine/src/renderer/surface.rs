use glam::Vec2;

use crate::api::types::Viewport;
#[cfg(feature = "vectors")]
use crate::systems::vector::{VectorColor, VectorState};

/// One drawn reticle segment and its style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReticleStroke {
    pub from: Vec2,
    pub to: Vec2,
    /// Red channel on a 0-255 scale. Not clamped: long diagonal pulls exceed 255.
    pub intensity: f32,
    /// 1 while charging, 0 otherwise.
    pub opacity: f32,
    pub width: f32,
}

impl ReticleStroke {
    /// CSS colour string for a Canvas2D `strokeStyle`.
    pub fn css_color(&self) -> String {
        format!("rgba({}, 0, 0, {})", self.intensity, self.opacity)
    }

    #[cfg(feature = "vectors")]
    pub fn color(&self) -> VectorColor {
        VectorColor::from_css_red(self.intensity, self.opacity)
    }
}

/// The full-viewport overlay the reticle is drawn on.
///
/// Mirrors canvas semantics: resizing discards whatever was drawn.
pub struct DrawSurface {
    viewport: Viewport,
    stroke: Option<ReticleStroke>,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
}

impl DrawSurface {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            stroke: None,
            #[cfg(feature = "vectors")]
            vectors: VectorState::new(),
        }
    }

    /// Match the surface to the viewport and clear it.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stroke = None;
        #[cfg(feature = "vectors")]
        self.vectors.clear();
    }

    /// Draw a stroke on top of the current content.
    pub fn draw(&mut self, stroke: ReticleStroke) {
        #[cfg(feature = "vectors")]
        self.vectors.stroke_segment(stroke.from, stroke.to, stroke.width, stroke.color());
        self.stroke = Some(stroke);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The most recent stroke since the last resize.
    pub fn stroke(&self) -> Option<&ReticleStroke> {
        self.stroke.as_ref()
    }

    #[cfg(feature = "vectors")]
    pub fn vertices(&self) -> &[f32] {
        self.vectors.as_slice()
    }

    #[cfg(feature = "vectors")]
    pub fn vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vertex_count(&self) -> usize {
        self.vectors.vertex_count()
    }
}

impl Default for DrawSurface {
    fn default() -> Self {
        Self::new()
    }
}
