use crate::api::types::PlayerSlot;

/// Names of the two players of the current game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Players {
    pub p1: String,
    pub p2: String,
}

impl Players {
    pub fn new(p1: impl Into<String>, p2: impl Into<String>) -> Self {
        Self { p1: p1.into(), p2: p2.into() }
    }

    pub fn name(&self, slot: PlayerSlot) -> &str {
        match slot {
            PlayerSlot::One => &self.p1,
            PlayerSlot::Two => &self.p2,
        }
    }
}

/// Display string for a player: name, group marker once groups are
/// assigned, and a turn marker for the player to shoot.
///
/// `"Ann [LOW] [TURN]"`, `"Bob [HIGH]"`, or just `"Ann"` before the break.
pub fn player_label(player: &str, current: &str, low: Option<&str>) -> String {
    let mut label = player.to_string();
    if let Some(low) = low.filter(|low| !low.is_empty()) {
        label.push_str(if low == player { " [LOW]" } else { " [HIGH]" });
    }
    if current == player {
        label.push_str(" [TURN]");
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_groups_yet() {
        assert_eq!(player_label("Ann", "Ann", None), "Ann [TURN]");
        assert_eq!(player_label("Bob", "Ann", None), "Bob");
    }

    #[test]
    fn with_groups() {
        assert_eq!(player_label("Ann", "Bob", Some("Ann")), "Ann [LOW]");
        assert_eq!(player_label("Bob", "Bob", Some("Ann")), "Bob [HIGH] [TURN]");
        assert_eq!(player_label("Bob", "Bob", Some("")), "Bob [TURN]");
        assert_eq!(player_label("Ann", "Bob", Some("")), "Ann");
    }

    #[test]
    fn name_by_slot() {
        let players = Players::new("Ann", "Bob");
        assert_eq!(players.name(PlayerSlot::One), "Ann");
        assert_eq!(players.name(PlayerSlot::Two), "Bob");
    }
}
