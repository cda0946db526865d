pub mod ball;
pub mod menu;
pub mod player;
