use crate::api::error::NewGameError;
use crate::bridge::protocol::NewGameRequest;
use crate::components::player::Players;

/// Contents of the new-game form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGameForm {
    pub game: String,
    pub p1: String,
    pub p2: String,
}

impl NewGameForm {
    pub fn new(game: impl Into<String>, p1: impl Into<String>, p2: impl Into<String>) -> Self {
        Self { game: game.into(), p1: p1.into(), p2: p2.into() }
    }

    /// Check the form and build the request body.
    ///
    /// Every field must be non-blank after trimming and the two player
    /// names must differ.
    pub fn validate(&self) -> Result<NewGameRequest, NewGameError> {
        let game = self.game.trim();
        let p1 = self.p1.trim();
        let p2 = self.p2.trim();

        if p1.is_empty() {
            return Err(NewGameError::Blank("player 1"));
        }
        if p2.is_empty() {
            return Err(NewGameError::Blank("player 2"));
        }
        if game.is_empty() {
            return Err(NewGameError::Blank("game name"));
        }
        if p1 == p2 {
            return Err(NewGameError::DuplicatePlayers);
        }

        Ok(NewGameRequest {
            game: game.to_string(),
            p1: p1.to_string(),
            p2: p2.to_string(),
        })
    }
}

impl From<&NewGameRequest> for Players {
    fn from(req: &NewGameRequest) -> Self {
        Players::new(req.p1.clone(), req.p2.clone())
    }
}

/// Open/closed state of the page's two overlay menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub new_game_open: bool,
    pub game_over_open: bool,
}
