use thiserror::Error;

use crate::api::types::RequestId;

/// Reasons a shot cycle can end early. None of them are fatal to the session.
#[derive(Debug, Error)]
pub enum ShotError {
    #[error("no shot is being charged")]
    NotCharging,
    #[error("a shot request is still awaiting its result")]
    AwaitingResult,
    #[error("the game is over; start a new game to keep playing")]
    GameOver,
    #[error("the aim control is not on the page")]
    NoAimControl,
    #[error("the server rejected the shot")]
    Rejected,
    #[error("shot response is missing `{0}`")]
    MissingField(&'static str),
    #[error("failed to decode shot response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no shot result after {waited_ms} ms")]
    Timeout { waited_ms: f64 },
    #[error("response to request {got:?} does not match a pending shot")]
    StaleResponse { got: RequestId },
}

/// Reasons a new game is not started.
#[derive(Debug, Error)]
pub enum NewGameError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error("both players have the same name")]
    DuplicatePlayers,
    #[error("failed to decode new-game response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("new-game response has no table markup")]
    MissingMarkup,
    #[error("response to request {got:?} does not match a pending new game")]
    StaleResponse { got: RequestId },
}
