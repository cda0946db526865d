pub mod aim;
pub mod playback;
pub mod reticle;
pub mod sync;
pub mod velocity;
#[cfg(feature = "vectors")]
pub mod vector;
