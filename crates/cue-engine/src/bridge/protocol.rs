//! Wire format of the two table endpoints.
//!
//! Responses are decoded leniently: every field may be absent, and the
//! table markup is accepted under both `markup` and the older `svg` key.
//! Classification into success or failure happens after decoding.

use serde::{Deserialize, Serialize};

use crate::api::error::{NewGameError, ShotError};

/// Shot endpoint. Body: [`ShotVelocity`](crate::api::types::ShotVelocity).
pub const SHOOT_PATH: &str = "/api/table/shoot";
/// New-game endpoint. Body: [`NewGameRequest`].
pub const NEW_GAME_PATH: &str = "/api/table/new";

/// Body of a new-game request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub game: String,
    pub p1: String,
    pub p2: String,
}

/// Raw shot response as sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct ShotResponse {
    #[serde(alias = "svg")]
    pub markup: Option<String>,
    pub current: Option<String>,
    pub low: Option<String>,
    #[serde(default)]
    pub balls: Vec<String>,
    /// Seconds.
    #[serde(default)]
    pub elapsed: f64,
    #[serde(default = "default_ongoing")]
    pub ongoing: bool,
    #[serde(default)]
    pub frames: Vec<String>,
}

fn default_ongoing() -> bool {
    true
}

/// A well-formed shot outcome. Immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotResult {
    /// Table markup holding one node per frame.
    pub markup: String,
    /// Frame node ids in replay order.
    pub frames: Vec<String>,
    /// Server-side duration of the shot, seconds.
    pub elapsed_secs: f64,
    /// False once the game has been decided.
    pub ongoing: bool,
    /// Player to shoot next, or the winner when the game is over.
    pub current: String,
    /// Player holding the low group, once assigned.
    pub low: Option<String>,
    /// Ball node ids sunk by this shot.
    pub balls: Vec<String>,
}

impl ShotResult {
    /// Elapsed time on the timeline's unit (ms). Negative values clamp to 0.
    pub fn elapsed_ms(&self) -> f64 {
        (self.elapsed_secs * 1000.0).max(0.0)
    }
}

impl TryFrom<ShotResponse> for ShotResult {
    type Error = ShotError;

    fn try_from(resp: ShotResponse) -> Result<Self, Self::Error> {
        let markup = resp.markup.ok_or(ShotError::Rejected)?;
        let current = resp.current.ok_or(ShotError::MissingField("current"))?;
        Ok(ShotResult {
            markup,
            frames: resp.frames,
            elapsed_secs: resp.elapsed,
            ongoing: resp.ongoing,
            current,
            low: assigned(resp.low),
            balls: resp.balls,
        })
    }
}

/// Decode and classify a shot response body.
pub fn decode_shot_result(json: &str) -> Result<ShotResult, ShotError> {
    let resp: ShotResponse = serde_json::from_str(json)?;
    resp.try_into()
}

/// Raw new-game response.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGameResponse {
    #[serde(alias = "svg")]
    pub markup: Option<String>,
    pub current: Option<String>,
    pub low: Option<String>,
}

/// A freshly racked table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGameResult {
    pub markup: String,
    /// Player who breaks. Absent if the server did not say.
    pub current: Option<String>,
    pub low: Option<String>,
}

/// Decode and classify a new-game response body.
pub fn decode_new_game(json: &str) -> Result<NewGameResult, NewGameError> {
    let resp: NewGameResponse = serde_json::from_str(json)?;
    let markup = resp.markup.ok_or(NewGameError::MissingMarkup)?;
    Ok(NewGameResult {
        markup,
        current: resp.current,
        low: assigned(resp.low),
    })
}

/// An empty group owner means groups are not assigned yet.
fn assigned(low: Option<String>) -> Option<String> {
    low.filter(|name| !name.is_empty())
}
