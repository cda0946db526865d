pub mod surface;

pub use surface::{DrawSurface, ReticleStroke};
