use crate::api::types::PlayerSlot;
use crate::bridge::commands::{LegendItem, VisualCommand};
use crate::components::ball::{BallGroup, BallId};
use crate::components::menu::MenuState;

/// A replay frame node inside the current table markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameNode {
    pub id: String,
    pub active: bool,
}

/// A swatch in the ball legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub ball: BallId,
    pub hidden: bool,
}

/// Mirror of the page nodes the replay touches.
///
/// The host owns the real DOM. Every effective mutation here queues one
/// [`VisualCommand`] for the host to apply. Mutations addressed to a node
/// that does not exist (for example a frame of a table that has since been
/// replaced) are no-ops and return `false`.
pub struct Scene {
    markup: Option<String>,
    frames: Vec<FrameNode>,
    legend: Vec<LegendEntry>,
    labels: [String; 2],
    banner: Option<String>,
    menus: MenuState,
    commands: Vec<VisualCommand>,
}

/// Legend items for balls 1 to 15. The eight ball closes the low group,
/// then a separator, then the eight ball again to open the high group.
pub fn legend_layout() -> Vec<LegendItem> {
    let mut items = Vec::with_capacity(17);
    for ball in BallId::object_balls() {
        let swatch = LegendItem::Swatch { id: ball.to_string(), colour: ball.def().colour };
        if ball.def().group == BallGroup::Eight {
            items.push(swatch.clone());
            items.push(LegendItem::Separator);
        }
        items.push(swatch);
    }
    items
}

impl Scene {
    /// An empty table. The legend layout is queued as the first command.
    pub fn new() -> Self {
        let mut commands = Vec::with_capacity(64);
        commands.push(VisualCommand::BuildLegend { entries: legend_layout() });
        Self {
            markup: None,
            frames: Vec::new(),
            legend: BallId::object_balls()
                .map(|ball| LegendEntry { ball, hidden: false })
                .collect(),
            labels: [String::new(), String::new()],
            banner: None,
            menus: MenuState::default(),
            commands,
        }
    }

    /// Replace the table. Frame nodes of the previous table cease to exist.
    pub fn load_table(&mut self, markup: &str, frame_ids: &[String]) {
        self.markup = Some(markup.to_string());
        self.frames = frame_ids
            .iter()
            .map(|id| FrameNode { id: id.clone(), active: false })
            .collect();
        self.commands.push(VisualCommand::LoadTable { markup: markup.to_string() });
    }

    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    pub fn frame(&self, id: &str) -> Option<&FrameNode> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// Ids of the frames currently shown.
    pub fn active_frames(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().filter(|f| f.active).map(|f| f.id.as_str())
    }

    pub fn set_frame_active(&mut self, id: &str, active: bool) -> bool {
        let Some(frame) = self.frames.iter_mut().find(|f| f.id == id) else {
            log::debug!("frame {} not in current table", id);
            return false;
        };
        if frame.active != active {
            frame.active = active;
            self.commands.push(VisualCommand::SetFrameActive { id: id.to_string(), active });
        }
        true
    }

    /// Hide a ball's legend swatch. The cue ball is never hidden.
    pub fn hide_ball(&mut self, id: &str) -> bool {
        let Some(ball) = BallId::parse(id) else {
            log::debug!("unknown ball id {}", id);
            return false;
        };
        if ball.is_cue() {
            return false;
        }
        let Some(entry) = self.legend.iter_mut().find(|e| e.ball == ball) else {
            return false;
        };
        if !entry.hidden {
            entry.hidden = true;
            self.commands.push(VisualCommand::HideBall { id: ball.to_string() });
        }
        true
    }

    pub fn show_all_balls(&mut self) {
        for entry in &mut self.legend {
            entry.hidden = false;
        }
        self.commands.push(VisualCommand::ShowAllBalls);
    }

    pub fn is_ball_hidden(&self, ball: BallId) -> bool {
        self.legend.iter().any(|e| e.ball == ball && e.hidden)
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn set_label(&mut self, slot: PlayerSlot, text: String) {
        let idx = match slot {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        };
        if self.labels[idx] != text {
            self.labels[idx] = text.clone();
            self.commands.push(VisualCommand::SetLabel { node: slot.node_id(), text });
        }
    }

    pub fn label(&self, slot: PlayerSlot) -> &str {
        match slot {
            PlayerSlot::One => &self.labels[0],
            PlayerSlot::Two => &self.labels[1],
        }
    }

    /// Write the banner and open the game-over menu.
    pub fn show_winner(&mut self, text: String) {
        self.banner = Some(text.clone());
        self.commands.push(VisualCommand::ShowWinner { text });
        self.set_menus(MenuState { game_over_open: true, ..self.menus });
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn menus(&self) -> MenuState {
        self.menus
    }

    pub fn toggle_new_game_menu(&mut self) {
        self.set_menus(MenuState { new_game_open: !self.menus.new_game_open, ..self.menus });
    }

    pub fn close_new_game_menu(&mut self) {
        self.set_menus(MenuState { new_game_open: false, ..self.menus });
    }

    pub fn dismiss_game_over(&mut self) {
        self.set_menus(MenuState { game_over_open: false, ..self.menus });
    }

    fn set_menus(&mut self, menus: MenuState) {
        if self.menus != menus {
            self.menus = menus;
            self.commands.push(VisualCommand::SetMenu {
                new_game_open: menus.new_game_open,
                game_over_open: menus.game_over_open,
            });
        }
    }

    /// Take the queued commands, in the order they were produced.
    pub fn drain_commands(&mut self) -> Vec<VisualCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
