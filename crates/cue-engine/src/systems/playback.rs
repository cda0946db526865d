//! Frame replay.
//!
//! A shot comes back as an ordered list of frame nodes. Frame `i` is shown at
//! `i * frame_rate` and hidden again `frame_rate * motion_rate` later, so each
//! frame overlaps the start of the next one slightly. The last frame is never
//! hidden: it is the resting table until the markup is replaced.

use crate::core::scene::Scene;
use crate::core::time::Timeline;

/// A deferred action of one shot cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleAction {
    ShowFrame(String),
    HideFrame(String),
    /// Post-shot labels and ball legend.
    SyncUi,
    /// Game-over banner.
    RevealWinner,
}

/// When one frame is shown and hidden, relative to the cycle start (ms).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCue {
    pub id: String,
    pub show_at: f64,
    /// `None` for the final frame.
    pub hide_at: Option<f64>,
}

pub fn plan_frames(frames: &[String], frame_rate: f64, motion_rate: f64) -> Vec<FrameCue> {
    let last = frames.len().saturating_sub(1);
    frames
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let show_at = i as f64 * frame_rate;
            FrameCue {
                id: id.clone(),
                show_at,
                hide_at: (i != last).then(|| show_at + frame_rate * motion_rate),
            }
        })
        .collect()
}

/// Start a replay on the timeline. The first frame is shown right away,
/// everything else is scheduled relative to the timeline's current time.
/// Returns the number of timers scheduled.
pub fn start_playback(
    cues: &[FrameCue],
    timeline: &mut Timeline<CycleAction>,
    scene: &mut Scene,
) -> usize {
    let start = timeline.now();
    let mut scheduled = 0;

    for (i, cue) in cues.iter().enumerate() {
        if i == 0 {
            scene.set_frame_active(&cue.id, true);
        } else {
            timeline.schedule_at(start + cue.show_at, CycleAction::ShowFrame(cue.id.clone()));
            scheduled += 1;
        }
        if let Some(hide_at) = cue.hide_at {
            timeline.schedule_at(start + hide_at, CycleAction::HideFrame(cue.id.clone()));
            scheduled += 1;
        }
    }

    scheduled
}
