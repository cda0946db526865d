pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{
    ClampMode, ClientConfig, ReleaseTrigger,
    CUE_BALL_ID, FRAME_RATE, MAX_DISTANCE, MAX_SPEED, MOTION_RATE,
};
pub use api::error::{NewGameError, ShotError};
pub use api::types::{CueBounds, PlayerSlot, RequestId, ShotVelocity, Viewport};
pub use bridge::commands::{HostMessage, HostRequest, LegendItem, Notice, NoticeKind, RequestBody, VisualCommand};
pub use bridge::protocol::{NewGameRequest, NewGameResult, ShotResult};
pub use components::ball::{BallDef, BallGroup, BallId, BALLS};
pub use components::menu::{MenuState, NewGameForm};
pub use components::player::{player_label, Players};
pub use core::scene::Scene;
pub use core::session::{ShotPhase, ShotSession};
pub use core::time::{Timeline, TimerId};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::surface::{DrawSurface, ReticleStroke};
pub use systems::aim::{solve_aim, AimOffset};
pub use systems::velocity::launch_velocity;
pub use systems::playback::{CycleAction, FrameCue};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex, VectorColor};
