//! The shot session: one controller owning all aim/replay state.
//!
//! ```text
//! Idle ──press on cue──▶ Charging ──release──▶ AwaitingResult ──result──▶ Animating ──timers done──▶ Settled
//!   ▲                                             │ rejected / malformed / timeout                     │
//!   └─────────────────────────────────────────────┘                           press on cue (fast-forward)
//! ```
//!
//! A new charge is refused while a request is in flight. Every deferred
//! action of a cycle lives on one [`Timeline`], so frame toggles and the
//! post-shot sync share a clock and can be flushed or cancelled together.

use glam::Vec2;

use crate::api::config::{ClientConfig, ReleaseTrigger, MAX_DISTANCE, MAX_SPEED, FRAME_RATE, MOTION_RATE};
use crate::api::error::{NewGameError, ShotError};
use crate::api::types::{CueBounds, PlayerSlot, RequestId, ShotVelocity, Viewport};
use crate::bridge::commands::{HostMessage, HostRequest, Notice, NoticeKind};
use crate::bridge::protocol::{decode_new_game, decode_shot_result, NewGameRequest, ShotResult};
use crate::components::menu::NewGameForm;
use crate::components::player::{player_label, Players};
use crate::core::scene::Scene;
use crate::core::time::Timeline;
use crate::input::pointer::PointerTracker;
use crate::input::queue::{custom, InputEvent};
use crate::renderer::surface::{DrawSurface, ReticleStroke};
use crate::systems::aim::{solve_aim, AimOffset};
use crate::systems::playback::{plan_frames, start_playback, CycleAction};
use crate::systems::reticle::draw_reticle;
use crate::systems::sync::{apply_sync, reveal_winner, schedule_sync};
use crate::systems::velocity::launch_velocity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotPhase {
    Idle,
    Charging,
    AwaitingResult,
    Animating,
    Settled,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    id: RequestId,
    waited_ms: f64,
}

pub struct ShotSession {
    config: ClientConfig,
    phase: ShotPhase,
    pointer: PointerTracker,
    cue: Option<CueBounds>,
    scroll: Vec2,
    viewport: Viewport,
    surface: DrawSurface,
    scene: Scene,
    timeline: Timeline<CycleAction>,
    cycle: Option<ShotResult>,
    in_flight: Option<InFlight>,
    players: Option<Players>,
    pending_game: Option<(RequestId, NewGameRequest)>,
    game_over: bool,
    outbox: Vec<HostMessage>,
    next_request: u32,
}

impl ShotSession {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            phase: ShotPhase::Idle,
            pointer: PointerTracker::new(),
            cue: None,
            scroll: Vec2::ZERO,
            viewport: Viewport::default(),
            surface: DrawSurface::new(),
            scene: Scene::new(),
            timeline: Timeline::new(),
            cycle: None,
            in_flight: None,
            players: None,
            pending_game: None,
            game_over: false,
            outbox: Vec::new(),
            next_request: 1,
        }
    }

    // -- Input --

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer_moved(Vec2::new(x, y)),
            InputEvent::PointerDown { x, y } => self.pointer_down(Vec2::new(x, y)),
            InputEvent::PointerUp { x, y } => self.pointer_up(Vec2::new(x, y)),
            InputEvent::Resize { width, height } => self.resize(Viewport::new(width, height)),
            InputEvent::Scroll { x, y } => {
                self.scroll = Vec2::new(x, y);
                self.redraw_reticle();
            }
            InputEvent::CueBounds { left, top, width, height } => {
                self.cue = Some(CueBounds::new(left, top, width, height));
                self.redraw_reticle();
            }
            InputEvent::Custom { kind, .. } => match kind {
                custom::TOGGLE_NEW_MENU => self.scene.toggle_new_game_menu(),
                custom::DISMISS_OVER_MENU => self.scene.dismiss_game_over(),
                other => log::debug!("ignoring custom event {}", other),
            },
        }
    }

    pub fn pointer_moved(&mut self, pos: Vec2) {
        self.pointer.update(pos);
        self.redraw_reticle();
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.pointer.update(pos);
        let on_cue = self.cue.is_some_and(|cue| cue.contains(pos));

        if on_cue {
            if self.phase != ShotPhase::Charging {
                if let Err(err) = self.begin_charge() {
                    log::warn!("charge refused: {}", err);
                    self.notify(NoticeKind::ShotRefused, &err);
                }
            }
        } else if self.phase == ShotPhase::Charging
            && self.config.release_trigger == ReleaseTrigger::NextPress
        {
            self.release_and_notify();
        }
        self.redraw_reticle();
    }

    pub fn pointer_up(&mut self, pos: Vec2) {
        self.pointer.update(pos);
        if self.phase == ShotPhase::Charging
            && self.config.release_trigger == ReleaseTrigger::PointerUp
        {
            self.release_and_notify();
        }
        self.redraw_reticle();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.redraw_reticle();
    }

    pub fn set_cue_bounds(&mut self, cue: Option<CueBounds>) {
        self.cue = cue;
        self.redraw_reticle();
    }

    // -- Shot lifecycle --

    /// Open a charging session.
    pub fn begin_charge(&mut self) -> Result<(), ShotError> {
        match self.phase {
            ShotPhase::Charging => return Ok(()),
            ShotPhase::AwaitingResult => return Err(ShotError::AwaitingResult),
            ShotPhase::Animating => self.fast_forward(),
            ShotPhase::Idle | ShotPhase::Settled => {}
        }
        if self.game_over {
            return Err(ShotError::GameOver);
        }
        if self.cue.is_none() {
            return Err(ShotError::NoAimControl);
        }

        self.phase = ShotPhase::Charging;
        log::info!("charging");
        self.redraw_reticle();
        Ok(())
    }

    /// Close the charging session and send the shot.
    pub fn release(&mut self) -> Result<RequestId, ShotError> {
        if self.phase != ShotPhase::Charging {
            return Err(ShotError::NotCharging);
        }
        self.phase = ShotPhase::Idle;

        let (anchor, aim) = match self.aim() {
            Some(v) => v,
            None => {
                self.redraw_reticle();
                return Err(ShotError::NoAimControl);
            }
        };
        let velocity = launch_velocity(anchor, &aim, MAX_DISTANCE, MAX_SPEED);
        let id = self.send_shot(velocity);
        self.redraw_reticle();
        Ok(id)
    }

    fn release_and_notify(&mut self) {
        if let Err(err) = self.release() {
            log::warn!("shot not sent: {}", err);
            self.notify(NoticeKind::ShotRefused, &err);
        }
    }

    fn send_shot(&mut self, velocity: ShotVelocity) -> RequestId {
        let id = self.next_request_id();
        log::info!("shot {:?}: velocity ({}, {})", id, velocity.x, velocity.y);
        self.outbox.push(HostMessage::Request(HostRequest::shoot(id, velocity)));
        self.in_flight = Some(InFlight { id, waited_ms: 0.0 });
        self.phase = ShotPhase::AwaitingResult;
        id
    }

    /// Feed the body of a shot response. Responses to anything but the
    /// request currently in flight are ignored.
    pub fn deliver_shot_response(&mut self, id: RequestId, json: &str) -> Result<(), ShotError> {
        match self.in_flight {
            Some(pending) if pending.id == id => self.in_flight = None,
            _ => {
                log::warn!("dropping stale shot response {:?}", id);
                return Err(ShotError::StaleResponse { got: id });
            }
        }

        match decode_shot_result(json) {
            Ok(result) => {
                self.begin_cycle(result);
                Ok(())
            }
            Err(err) => {
                log::warn!("shot {:?} failed: {}", id, err);
                self.phase = ShotPhase::Idle;
                self.notify(NoticeKind::ShotFailed, &err);
                Err(err)
            }
        }
    }

    fn begin_cycle(&mut self, result: ShotResult) {
        log::info!(
            "replaying {} frames over {} ms",
            result.frames.len(),
            result.elapsed_ms()
        );
        self.timeline.reset();
        self.scene.load_table(&result.markup, &result.frames);
        let cues = plan_frames(&result.frames, FRAME_RATE, MOTION_RATE);
        start_playback(&cues, &mut self.timeline, &mut self.scene);
        schedule_sync(&result, &mut self.timeline);
        self.cycle = Some(result);
        self.phase = ShotPhase::Animating;
        self.redraw_reticle();
    }

    /// Advance the session clock by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        if let Some(pending) = self.in_flight.as_mut() {
            pending.waited_ms += dt_ms;
            if pending.waited_ms >= self.config.shot_timeout_ms {
                let err = ShotError::Timeout { waited_ms: pending.waited_ms };
                log::warn!("shot {:?}: {}", pending.id, err);
                self.in_flight = None;
                self.phase = ShotPhase::Idle;
                self.notify(NoticeKind::ShotTimeout, &err);
            }
        }

        if self.phase == ShotPhase::Animating {
            for action in self.timeline.advance(dt_ms) {
                self.apply(action);
            }
            if self.timeline.is_empty() {
                self.phase = ShotPhase::Settled;
                log::info!("cycle settled");
            }
        }
    }

    /// Run every outstanding action of the current cycle immediately.
    fn fast_forward(&mut self) {
        let actions = self.timeline.flush();
        log::debug!("fast-forwarding {} pending actions", actions.len());
        for action in actions {
            self.apply(action);
        }
        self.phase = ShotPhase::Settled;
    }

    fn apply(&mut self, action: CycleAction) {
        match action {
            CycleAction::ShowFrame(id) => {
                self.scene.set_frame_active(&id, true);
            }
            CycleAction::HideFrame(id) => {
                self.scene.set_frame_active(&id, false);
            }
            CycleAction::SyncUi => {
                if let Some(result) = &self.cycle {
                    apply_sync(result, self.players.as_ref(), &mut self.scene);
                }
            }
            CycleAction::RevealWinner => {
                if let Some(result) = &self.cycle {
                    reveal_winner(result, &mut self.scene);
                    self.game_over = true;
                }
            }
        }
    }

    // -- New game --

    /// Validate the form and, if it passes, ask the host to create the game.
    pub fn start_new_game(&mut self, form: &NewGameForm) -> Result<RequestId, NewGameError> {
        let req = match form.validate() {
            Ok(req) => req,
            Err(err) => {
                log::info!("new game not started: {}", err);
                self.notify(NoticeKind::NewGameInvalid, &err);
                return Err(err);
            }
        };

        let id = self.next_request_id();
        log::info!("new game {:?}: {} vs {}", req.game, req.p1, req.p2);
        self.outbox.push(HostMessage::Request(HostRequest::new_game(id, req.clone())));
        self.pending_game = Some((id, req));
        Ok(id)
    }

    pub fn deliver_new_game_response(&mut self, id: RequestId, json: &str) -> Result<(), NewGameError> {
        let req = match self.pending_game.take() {
            Some((pending, req)) if pending == id => req,
            other => {
                self.pending_game = other;
                log::warn!("dropping stale new-game response {:?}", id);
                return Err(NewGameError::StaleResponse { got: id });
            }
        };

        let table = match decode_new_game(json) {
            Ok(table) => table,
            Err(err) => {
                log::warn!("new game failed: {}", err);
                self.notify(NoticeKind::NewGameFailed, &err);
                return Err(err);
            }
        };

        let cancelled = self.timeline.cancel_all();
        if cancelled > 0 {
            log::debug!("cancelled {} pending actions of the previous table", cancelled);
        }
        self.timeline.reset();
        self.cycle = None;
        self.in_flight = None;
        self.game_over = false;
        self.phase = ShotPhase::Idle;

        let players = Players::from(&req);
        self.scene.load_table(&table.markup, &[]);
        let current = table.current.as_deref().unwrap_or_default();
        for slot in PlayerSlot::ALL {
            let label = player_label(players.name(slot), current, table.low.as_deref());
            self.scene.set_label(slot, label);
        }
        self.scene.show_all_balls();
        self.scene.close_new_game_menu();
        self.scene.dismiss_game_over();
        self.players = Some(players);
        self.redraw_reticle();
        Ok(())
    }

    // -- Rendering --

    fn aim(&self) -> Option<(Vec2, AimOffset)> {
        let anchor = self.cue?.anchor(self.scroll);
        let aim = solve_aim(anchor, self.pointer.position(), MAX_DISTANCE, self.config.clamp_mode);
        Some((anchor, aim))
    }

    /// Recompute and redraw the reticle. Does nothing while the aim
    /// control is not on the page.
    pub fn redraw_reticle(&mut self) -> Option<ReticleStroke> {
        let (anchor, aim) = self.aim()?;
        Some(draw_reticle(
            &mut self.surface,
            self.viewport,
            anchor,
            &aim,
            self.phase == ShotPhase::Charging,
            MAX_DISTANCE,
            self.config.reticle_width,
        ))
    }

    // -- Host plumbing --

    fn next_request_id(&mut self) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        id
    }

    fn notify(&mut self, kind: NoticeKind, err: &impl std::fmt::Display) {
        self.outbox.push(HostMessage::Notice(Notice::new(kind, err)));
    }

    /// Take everything the host should act on: DOM updates first, then
    /// requests and notices, each group in production order.
    pub fn drain_messages(&mut self) -> Vec<HostMessage> {
        let mut messages: Vec<HostMessage> = self
            .scene
            .drain_commands()
            .into_iter()
            .map(HostMessage::Visual)
            .collect();
        messages.append(&mut self.outbox);
        messages
    }

    // -- Accessors --

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    pub fn is_charging(&self) -> bool {
        self.phase == ShotPhase::Charging
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &DrawSurface {
        &self.surface
    }

    pub fn reticle(&self) -> Option<&ReticleStroke> {
        self.surface.stroke()
    }

    pub fn players(&self) -> Option<&Players> {
        self.players.as_ref()
    }

    /// Pending deferred actions of the current cycle.
    pub fn pending_actions(&self) -> usize {
        self.timeline.len()
    }

    /// Current pointer position.
    pub fn pointer(&self) -> Vec2 {
        self.pointer.position()
    }
}

impl Default for ShotSession {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::ClampMode;
    use crate::bridge::commands::{RequestBody, VisualCommand};

    /// Session with an 800x600 viewport and the cue control centered on (100, 100).
    fn session_with(config: ClientConfig) -> ShotSession {
        let mut s = ShotSession::new(config);
        s.handle_input(InputEvent::Resize { width: 800.0, height: 600.0 });
        s.handle_input(InputEvent::CueBounds { left: 90.0, top: 90.0, width: 20.0, height: 20.0 });
        s
    }

    fn session() -> ShotSession {
        session_with(ClientConfig::default())
    }

    fn requests(s: &mut ShotSession) -> Vec<HostRequest> {
        s.drain_messages()
            .into_iter()
            .filter_map(|m| match m {
                HostMessage::Request(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn notices(messages: &[HostMessage]) -> Vec<NoticeKind> {
        messages
            .iter()
            .filter_map(|m| match m {
                HostMessage::Notice(n) => Some(n.kind),
                _ => None,
            })
            .collect()
    }

    /// Press the cue, drag to `to`, press elsewhere. Returns the shot request.
    fn shoot(s: &mut ShotSession, to: Vec2) -> HostRequest {
        s.pointer_down(Vec2::new(100.0, 100.0));
        assert!(s.is_charging());
        s.pointer_moved(to);
        s.pointer_down(to);
        let mut reqs = requests(s);
        assert_eq!(reqs.len(), 1, "expected exactly one request");
        reqs.remove(0)
    }

    fn velocity(req: &HostRequest) -> ShotVelocity {
        match &req.body {
            RequestBody::Shot(v) => *v,
            other => panic!("not a shot body: {:?}", other),
        }
    }

    fn shot_json(frames: &[&str], elapsed: f64, ongoing: bool, balls: &[&str]) -> String {
        serde_json::json!({
            "svg": "table.svg",
            "current": "Bob",
            "low": "Ann",
            "elapsed": elapsed,
            "ongoing": ongoing,
            "frames": frames,
            "balls": balls,
        })
        .to_string()
    }

    fn with_players(s: &mut ShotSession) {
        let id = s.start_new_game(&NewGameForm::new("g", "Ann", "Bob")).unwrap();
        s.deliver_new_game_response(id, r#"{ "svg": "table.svg", "current": "Ann", "low": null }"#)
            .unwrap();
        s.drain_messages();
    }

    #[test]
    fn short_pull_sends_scaled_velocity() {
        let mut s = session();
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        assert_eq!(req.path, "/api/table/shoot");
        assert_eq!(req.method, "POST");
        assert_eq!(velocity(&req), ShotVelocity { x: 0.0, y: 750.0 });
        assert_eq!(s.phase(), ShotPhase::AwaitingResult);
    }

    #[test]
    fn saturated_pull_caps_speed() {
        let mut s = session();
        let v = velocity(&shoot(&mut s, Vec2::new(100.0, 500.0)));
        assert!((v.x + 3000.0).abs() < 0.01, "x was {}", v.x);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn press_outside_cue_does_not_charge() {
        let mut s = session();
        s.pointer_down(Vec2::new(400.0, 400.0));
        assert_eq!(s.phase(), ShotPhase::Idle);
        assert!(requests(&mut s).is_empty());
    }

    #[test]
    fn pressing_cue_again_keeps_charging() {
        let mut s = session();
        s.pointer_down(Vec2::new(100.0, 100.0));
        s.pointer_down(Vec2::new(105.0, 100.0));
        assert!(s.is_charging());
        assert!(requests(&mut s).is_empty());
    }

    #[test]
    fn pointer_up_trigger() {
        let mut s = session_with(ClientConfig {
            release_trigger: ReleaseTrigger::PointerUp,
            ..ClientConfig::default()
        });
        s.pointer_down(Vec2::new(100.0, 100.0));
        s.pointer_moved(Vec2::new(150.0, 100.0));
        s.pointer_down(Vec2::new(300.0, 300.0));
        assert!(s.is_charging(), "next press must not release in pointer-up mode");
        s.pointer_up(Vec2::new(150.0, 100.0));
        let reqs = requests(&mut s);
        assert_eq!(velocity(&reqs[0]), ShotVelocity { x: 0.0, y: 750.0 });
    }

    #[test]
    fn reticle_visible_only_while_charging() {
        let mut s = session();
        s.pointer_moved(Vec2::new(150.0, 100.0));
        assert_eq!(s.reticle().unwrap().opacity, 0.0);
        s.pointer_down(Vec2::new(100.0, 100.0));
        s.pointer_moved(Vec2::new(150.0, 100.0));
        let stroke = *s.reticle().unwrap();
        assert_eq!(stroke.opacity, 1.0);
        assert_eq!(stroke.from, Vec2::new(100.0, 100.0));
        assert_eq!(stroke.to, Vec2::new(150.0, 100.0));
        assert_eq!(stroke.intensity, 50.0);
        s.pointer_down(Vec2::new(150.0, 100.0));
        assert_eq!(s.reticle().unwrap().opacity, 0.0);
    }

    #[test]
    fn every_pointer_update_redraws() {
        let mut s = session();
        s.pointer_moved(Vec2::new(150.0, 100.0));
        s.pointer_down(Vec2::new(120.0, 100.0));
        assert_eq!(s.phase(), ShotPhase::Idle);
        assert_eq!(s.reticle().unwrap().to, Vec2::new(120.0, 100.0));
        s.pointer_up(Vec2::new(130.0, 100.0));
        assert_eq!(s.reticle().unwrap().to, Vec2::new(130.0, 100.0));
        #[cfg(feature = "vectors")]
        assert!(s.surface().vertex_count() > 0);
    }

    #[test]
    fn legend_is_first_message() {
        let mut s = ShotSession::default();
        let messages = s.drain_messages();
        let Some(HostMessage::Visual(VisualCommand::BuildLegend { entries })) = messages.first() else {
            panic!("expected legend first, got {:?}", messages);
        };
        assert_eq!(entries.len(), 17);
        let json = serde_json::to_string(&messages).unwrap();
        assert!(json.contains("YELLOW"));
        assert!(json.contains("SANDYBROWN"));
    }

    #[test]
    fn resize_redraw_is_idempotent() {
        let mut s = session();
        s.pointer_down(Vec2::new(100.0, 100.0));
        s.pointer_moved(Vec2::new(180.0, 20.0));
        s.resize(Viewport::new(1024.0, 768.0));
        let first = *s.reticle().unwrap();
        s.resize(Viewport::new(1024.0, 768.0));
        let second = *s.reticle().unwrap();
        assert_eq!(first, second);
        assert_eq!(s.surface().viewport(), Viewport::new(1024.0, 768.0));
    }

    #[test]
    fn anchor_follows_scroll() {
        let mut s = session();
        s.handle_input(InputEvent::Scroll { x: 0.0, y: 50.0 });
        assert_eq!(s.reticle().unwrap().from, Vec2::new(100.0, 150.0));
    }

    #[test]
    fn no_reticle_without_aim_control() {
        let mut s = ShotSession::default();
        s.pointer_moved(Vec2::new(10.0, 10.0));
        assert!(s.reticle().is_none());
        assert!(matches!(s.begin_charge(), Err(ShotError::NoAimControl)));
    }

    #[test]
    fn radial_mode_is_honoured() {
        let mut s = session_with(ClientConfig { clamp_mode: ClampMode::Radial, ..ClientConfig::default() });
        let v = velocity(&shoot(&mut s, Vec2::new(100.0, 900.0)));
        assert!((v.x + 3000.0).abs() < 0.01);
    }

    #[test]
    fn frames_replay_on_cadence() {
        let mut s = session();
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        s.deliver_shot_response(req.id, &shot_json(&["f0", "f1", "f2"], 1.0, true, &[]))
            .unwrap();
        assert_eq!(s.phase(), ShotPhase::Animating);

        let active = |s: &ShotSession| s.scene().active_frames().map(String::from).collect::<Vec<_>>();
        assert_eq!(active(&s), vec!["f0"]);
        s.tick(10.0);
        assert_eq!(active(&s), vec!["f0", "f1"]);
        s.tick(2.5);
        assert_eq!(active(&s), vec!["f1"]);
        s.tick(7.5);
        assert_eq!(active(&s), vec!["f1", "f2"]);
        s.tick(2.5);
        assert_eq!(active(&s), vec!["f2"]);
        s.tick(2000.0);
        assert_eq!(active(&s), vec!["f2"]);
        assert_eq!(s.phase(), ShotPhase::Settled);
    }

    #[test]
    fn ui_sync_waits_for_elapsed() {
        let mut s = session();
        with_players(&mut s);
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        s.deliver_shot_response(req.id, &shot_json(&["f0"], 0.5, true, &["ball-0", "ball-3"]))
            .unwrap();

        s.tick(499.0);
        assert_eq!(s.scene().label(PlayerSlot::One), "Ann [TURN]");
        assert_eq!(s.phase(), ShotPhase::Animating);

        s.tick(1.0);
        assert_eq!(s.scene().label(PlayerSlot::One), "Ann [LOW]");
        assert_eq!(s.scene().label(PlayerSlot::Two), "Bob [HIGH] [TURN]");
        let legend = s.scene().legend();
        assert!(legend.iter().any(|e| e.ball.number() == 3 && e.hidden));
        assert_eq!(legend.iter().filter(|e| e.hidden).count(), 1);
        assert_eq!(s.phase(), ShotPhase::Settled);
    }

    #[test]
    fn missing_markup_aborts_cycle() {
        let mut s = session();
        with_players(&mut s);
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));

        let err = s.deliver_shot_response(req.id, r#"{ "svg": null }"#).unwrap_err();
        assert!(matches!(err, ShotError::Rejected));
        assert_eq!(s.phase(), ShotPhase::Idle);
        assert_eq!(s.pending_actions(), 0);

        let messages = s.drain_messages();
        assert!(!messages.iter().any(|m| matches!(m, HostMessage::Visual(VisualCommand::LoadTable { .. }))));
        assert!(!messages.iter().any(|m| matches!(m, HostMessage::Visual(VisualCommand::SetLabel { .. }))));
        assert!(!messages.iter().any(|m| matches!(m, HostMessage::Visual(VisualCommand::HideBall { .. }))));
        assert_eq!(notices(&messages), vec![NoticeKind::ShotFailed]);

        s.tick(10_000.0);
        assert!(s.drain_messages().is_empty());
        assert!(s.begin_charge().is_ok());
    }

    #[test]
    fn charge_refused_while_awaiting_result() {
        let mut s = session();
        shoot(&mut s, Vec2::new(150.0, 100.0));
        s.pointer_down(Vec2::new(100.0, 100.0));
        assert_eq!(s.phase(), ShotPhase::AwaitingResult);
        assert_eq!(notices(&s.drain_messages()), vec![NoticeKind::ShotRefused]);
        assert!(matches!(s.begin_charge(), Err(ShotError::AwaitingResult)));
    }

    #[test]
    fn timeout_recovers_and_late_reply_is_stale() {
        let mut s = session();
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        s.tick(9_999.0);
        assert_eq!(s.phase(), ShotPhase::AwaitingResult);
        s.tick(1.0);
        assert_eq!(s.phase(), ShotPhase::Idle);
        assert_eq!(notices(&s.drain_messages()), vec![NoticeKind::ShotTimeout]);

        let late = s.deliver_shot_response(req.id, &shot_json(&["f0"], 0.1, true, &[]));
        assert!(matches!(late, Err(ShotError::StaleResponse { .. })));
        assert!(s.scene().markup().is_none());
        assert!(s.begin_charge().is_ok());
    }

    #[test]
    fn malformed_body_is_reported() {
        let mut s = session();
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        let err = s.deliver_shot_response(req.id, "Internal Server Error").unwrap_err();
        assert!(matches!(err, ShotError::Malformed(_)));
        assert_eq!(s.phase(), ShotPhase::Idle);
    }

    #[test]
    fn new_charge_fast_forwards_running_cycle() {
        let mut s = session();
        with_players(&mut s);
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        s.deliver_shot_response(req.id, &shot_json(&["f0", "f1", "f2"], 3.0, true, &["ball-9"]))
            .unwrap();
        s.tick(5.0);

        s.pointer_down(Vec2::new(100.0, 100.0));
        assert!(s.is_charging());
        assert_eq!(s.pending_actions(), 0);
        assert_eq!(s.scene().active_frames().collect::<Vec<_>>(), vec!["f2"]);
        assert_eq!(s.scene().label(PlayerSlot::Two), "Bob [HIGH] [TURN]");
    }

    #[test]
    fn finished_game_reveals_winner_and_blocks_shots() {
        let mut s = session();
        with_players(&mut s);
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        s.deliver_shot_response(req.id, &shot_json(&["f0", "f1"], 0.2, false, &["ball-8"]))
            .unwrap();
        s.tick(199.0);
        assert!(s.scene().banner().is_none());
        s.tick(1.0);
        assert_eq!(s.scene().banner(), Some("Bob has won!"));
        assert!(s.scene().menus().game_over_open);
        assert!(s.is_game_over());
        assert!(matches!(s.begin_charge(), Err(ShotError::GameOver)));
    }

    #[test]
    fn new_game_cancels_pending_cycle() {
        let mut s = session();
        with_players(&mut s);
        let req = shoot(&mut s, Vec2::new(150.0, 100.0));
        s.deliver_shot_response(req.id, &shot_json(&["f0", "f1", "f2"], 2.0, false, &["ball-5"]))
            .unwrap();
        s.tick(1.0);

        let id = s.start_new_game(&NewGameForm::new("rematch", "Ann", "Bob")).unwrap();
        s.deliver_new_game_response(id, r#"{ "markup": "fresh.svg", "current": "Bob", "low": null }"#)
            .unwrap();
        assert_eq!(s.pending_actions(), 0);
        assert_eq!(s.phase(), ShotPhase::Idle);
        assert_eq!(s.scene().markup(), Some("fresh.svg"));

        s.tick(5_000.0);
        assert!(s.scene().banner().is_none());
        assert!(!s.scene().legend().iter().any(|e| e.hidden));
        assert_eq!(s.scene().label(PlayerSlot::Two), "Bob [TURN]");
    }

    #[test]
    fn invalid_new_game_sends_nothing() {
        let mut s = session();
        s.handle_input(InputEvent::Custom { kind: custom::TOGGLE_NEW_MENU, a: 0.0, b: 0.0, c: 0.0 });
        s.drain_messages();
        let menus = s.scene().menus();

        let err = s.start_new_game(&NewGameForm::new("g", "", "Bob")).unwrap_err();
        assert!(matches!(err, NewGameError::Blank(_)));
        let messages = s.drain_messages();
        assert!(!messages.iter().any(|m| matches!(m, HostMessage::Request(_))));
        assert_eq!(notices(&messages), vec![NoticeKind::NewGameInvalid]);
        assert_eq!(s.scene().menus(), menus);
        assert!(s.players().is_none());
    }

    #[test]
    fn new_game_loads_table_and_closes_menu() {
        let mut s = session();
        s.handle_input(InputEvent::Custom { kind: custom::TOGGLE_NEW_MENU, a: 0.0, b: 0.0, c: 0.0 });
        let id = s.start_new_game(&NewGameForm::new("g", "Ann", "Bob")).unwrap();
        let reqs = requests(&mut s);
        assert_eq!(reqs[0].path, "/api/table/new");
        assert_eq!(reqs[0].id, id);

        s.deliver_new_game_response(id, r#"{ "svg": "table.svg", "current": "Ann", "low": null }"#)
            .unwrap();
        assert!(!s.scene().menus().new_game_open);
        assert_eq!(s.scene().label(PlayerSlot::One), "Ann [TURN]");
        assert_eq!(s.scene().label(PlayerSlot::Two), "Bob");
        assert_eq!(s.players(), Some(&Players::new("Ann", "Bob")));
    }

    #[test]
    fn stale_new_game_response_keeps_pending() {
        let mut s = session();
        let id = s.start_new_game(&NewGameForm::new("g", "Ann", "Bob")).unwrap();
        let stale = s.deliver_new_game_response(RequestId(id.0 + 100), r#"{ "svg": "x" }"#);
        assert!(matches!(stale, Err(NewGameError::StaleResponse { .. })));
        assert!(s.deliver_new_game_response(id, r#"{ "svg": "x" }"#).is_ok());
    }

    #[test]
    fn request_ids_are_unique() {
        let mut s = session();
        let a = shoot(&mut s, Vec2::new(150.0, 100.0)).id;
        s.deliver_shot_response(a, &shot_json(&["f0"], 0.0, true, &[])).unwrap();
        s.tick(1.0);
        let b = shoot(&mut s, Vec2::new(150.0, 100.0)).id;
        assert_ne!(a, b);
    }
}
