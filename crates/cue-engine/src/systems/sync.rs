use crate::api::types::PlayerSlot;
use crate::bridge::protocol::ShotResult;
use crate::components::player::{player_label, Players};
use crate::core::scene::Scene;
use crate::core::time::Timeline;
use crate::systems::playback::CycleAction;

/// Schedule the post-shot UI update at the server-reported elapsed time,
/// followed by the winner banner when the game has been decided.
pub fn schedule_sync(result: &ShotResult, timeline: &mut Timeline<CycleAction>) {
    let at = timeline.now() + result.elapsed_ms();
    timeline.schedule_at(at, CycleAction::SyncUi);
    if !result.ongoing {
        timeline.schedule_at(at, CycleAction::RevealWinner);
    }
}

/// Rewrite both player labels and hide the legend swatches of the sunk
/// balls. Returns how many swatches were hidden.
pub fn apply_sync(result: &ShotResult, players: Option<&Players>, scene: &mut Scene) -> usize {
    match players {
        Some(players) => {
            for slot in PlayerSlot::ALL {
                let label = player_label(players.name(slot), &result.current, result.low.as_deref());
                scene.set_label(slot, label);
            }
        }
        None => log::debug!("no players known, labels left as they are"),
    }

    let mut hidden = 0;
    for id in &result.balls {
        if scene.hide_ball(id) {
            hidden += 1;
        }
    }
    hidden
}

pub fn winner_text(winner: &str) -> String {
    format!("{} has won!", winner)
}

pub fn reveal_winner(result: &ShotResult, scene: &mut Scene) {
    log::info!("game over, {} wins", result.current);
    scene.show_winner(winner_text(&result.current));
}
