use cue_engine::{
    ClientConfig, HostMessage, InputEvent, InputQueue, NewGameError, NewGameForm, RequestId,
    ShotError, ShotSession,
};

/// Wires the shot session to the page.
///
/// Pointer and layout events are queued by the exports and applied on the
/// next tick, in arrival order. Responses and form submissions are applied
/// immediately, after flushing whatever input is still queued.
pub struct ClientRunner {
    session: ShotSession,
    input: InputQueue,
}

impl ClientRunner {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            session: ShotSession::new(config),
            input: InputQueue::new(),
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    fn flush_input(&mut self) {
        for event in self.input.drain() {
            self.session.handle_input(event);
        }
    }

    /// Apply queued input, then advance timers by `dt_ms`.
    pub fn tick(&mut self, dt_ms: f64) {
        self.flush_input();
        self.session.tick(dt_ms);
    }

    /// Submit the new-game form. Returns the request id to answer, if one was sent.
    pub fn new_game(&mut self, game: &str, p1: &str, p2: &str) -> Option<RequestId> {
        self.flush_input();
        self.session.start_new_game(&NewGameForm::new(game, p1, p2)).ok()
    }

    pub fn deliver_shot(&mut self, id: u32, body: &str) -> Result<(), ShotError> {
        self.flush_input();
        self.session.deliver_shot_response(RequestId(id), body)
    }

    pub fn deliver_new_game(&mut self, id: u32, body: &str) -> Result<(), NewGameError> {
        self.flush_input();
        self.session.deliver_new_game_response(RequestId(id), body)
    }

    pub fn take_messages(&mut self) -> Vec<HostMessage> {
        self.session.drain_messages()
    }

    /// Drained messages as a JSON array.
    pub fn take_messages_json(&mut self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.take_messages())
    }

    pub fn session(&self) -> &ShotSession {
        &self.session
    }

    // ---- Reticle accessors ----

    pub fn reticle_color(&self) -> Option<String> {
        self.session.reticle().map(|stroke| stroke.css_color())
    }

    /// `[from.x, from.y, to.x, to.y, width]` of the last drawn reticle.
    pub fn reticle_line(&self) -> Option<[f32; 5]> {
        self.session
            .reticle()
            .map(|s| [s.from.x, s.from.y, s.to.x, s.to.y, s.width])
    }

    pub fn surface_width(&self) -> f32 {
        self.session.surface().viewport().width
    }

    pub fn surface_height(&self) -> f32 {
        self.session.surface().viewport().height
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices(&self) -> &[f32] {
        self.session.surface().vertices()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.session.surface().vertices_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.session.surface().vertex_count() as u32
    }
}
