//! Messages from the engine to the host page.
//!
//! The engine performs no I/O. Each tick the host drains a list of
//! [`HostMessage`]s: HTTP requests to send, DOM updates to apply and
//! notices to show the user. Serialized as JSON objects tagged by `type`.

use serde::Serialize;

use crate::api::types::{RequestId, ShotVelocity};
use crate::bridge::protocol::{NewGameRequest, NEW_GAME_PATH, SHOOT_PATH};

/// A DOM mutation on a node the host owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum VisualCommand {
    /// Replace the table markup.
    LoadTable { markup: String },
    /// Add or remove the `active` class on a frame node.
    SetFrameActive { id: String, active: bool },
    /// Hide every node carrying the ball's class.
    HideBall { id: String },
    /// Un-hide the whole ball legend.
    ShowAllBalls,
    /// Set the text of a player label node.
    SetLabel { node: &'static str, text: String },
    /// Write the banner text.
    ShowWinner { text: String },
    SetMenu { new_game_open: bool, game_over_open: bool },
    /// Fill the ball legend, in display order.
    BuildLegend { entries: Vec<LegendItem> },
}

/// One item of the ball legend list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegendItem {
    Swatch { id: String, colour: &'static str },
    /// Divider between the low and high groups.
    Separator,
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestBody {
    Shot(ShotVelocity),
    NewGame(NewGameRequest),
}

/// An HTTP request the host should perform and answer with the same id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostRequest {
    pub id: RequestId,
    pub method: &'static str,
    pub path: &'static str,
    pub body: RequestBody,
}

impl HostRequest {
    pub fn shoot(id: RequestId, velocity: ShotVelocity) -> Self {
        Self { id, method: "POST", path: SHOOT_PATH, body: RequestBody::Shot(velocity) }
    }

    pub fn new_game(id: RequestId, req: NewGameRequest) -> Self {
        Self { id, method: "POST", path: NEW_GAME_PATH, body: RequestBody::NewGame(req) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// A shot could not be started or sent.
    ShotRefused,
    /// The server answered without a usable result.
    ShotFailed,
    /// The server did not answer in time.
    ShotTimeout,
    /// The new-game form did not validate.
    NewGameInvalid,
    /// The server answered the new-game request without a table.
    NewGameFailed,
}

/// A user-facing message about a failed operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, err: &impl std::fmt::Display) -> Self {
        Self { kind, message: err.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    Request(HostRequest),
    Visual(VisualCommand),
    Notice(Notice),
}
