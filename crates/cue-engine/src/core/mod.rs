pub mod scene;
pub mod session;
pub mod time;
