use serde::{Deserialize, Serialize};

/// Cadence between consecutive replay frames, in milliseconds.
pub const FRAME_RATE: f64 = 10.0;
/// Hold multiplier: a frame stays active for `FRAME_RATE * MOTION_RATE` ms.
pub const MOTION_RATE: f64 = 1.25;
/// Launch speed at full pull, per axis.
pub const MAX_SPEED: f32 = 3000.0;
/// Reach of the aim control in CSS pixels.
pub const MAX_DISTANCE: f32 = 200.0;

/// Identifier of the cue ball node. Never hidden by the post-shot sync.
pub const CUE_BALL_ID: &str = "ball-0";

/// How the aim offset is bounded by `MAX_DISTANCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Each axis is clamped against the axis projection of the full-reach point.
    #[default]
    AxisProjection,
    /// True circular reach limit around the anchor.
    Radial,
}

/// Which pointer action ends a charging session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseTrigger {
    /// The next press anywhere outside the aim control fires the shot.
    #[default]
    NextPress,
    /// Lifting the pointer fires the shot.
    PointerUp,
}

/// Runtime configuration, provided by the host page at init.
///
/// The replay and aim constants above are a fixed contract with the server
/// and are not part of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Aim clamp algorithm (default: axis projection).
    pub clamp_mode: ClampMode,
    /// Release gesture (default: next press).
    pub release_trigger: ReleaseTrigger,
    /// How long a shot request may stay unanswered, in milliseconds (default: 10 000).
    pub shot_timeout_ms: f64,
    /// Reticle stroke width in CSS pixels (default: 3).
    pub reticle_width: f32,
    /// Console log level for the wasm bridge (default: "info").
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            clamp_mode: ClampMode::default(),
            release_trigger: ReleaseTrigger::default(),
            shot_timeout_ms: 10_000.0,
            reticle_width: 3.0,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Hold duration of a non-final frame in milliseconds.
    pub fn frame_hold_ms(&self) -> f64 {
        FRAME_RATE * MOTION_RATE
    }
}
