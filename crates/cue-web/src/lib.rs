//! `#[wasm_bindgen]` exports for the cue client.
//!
//! The page owns the DOM, the canvas and `fetch`. Each animation frame it
//! calls [`client_tick`], then [`client_take_messages`] and acts on every
//! message: requests are sent and answered through [`client_deliver_shot`]
//! or [`client_deliver_new_game`] with the same id, visual commands are
//! applied to the page, notices are shown to the user.

pub mod runner;

pub use runner::ClientRunner;

use std::cell::RefCell;
use std::str::FromStr;

use cue_engine::{ClientConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<ClientRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut ClientRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::warn_1(&"cue client not initialized; call client_init() first".into());
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

/// Initialize the client. `config_json` may be empty or any subset of
/// [`ClientConfig`]'s fields.
#[wasm_bindgen]
pub fn client_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let parsed = if config_json.trim().is_empty() {
        Ok(ClientConfig::default())
    } else {
        ClientConfig::from_json(config_json)
    };
    let level = parsed
        .as_ref()
        .ok()
        .and_then(|c| log::Level::from_str(&c.log_level).ok())
        .unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);

    let config = parsed.map_err(|err| {
        log::error!("invalid client config: {}", err);
        JsValue::from_str(&err.to_string())
    })?;
    log::info!(
        "cue client: clamp {:?}, release on {:?}",
        config.clamp_mode,
        config.release_trigger
    );

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(ClientRunner::new(config));
    });
    Ok(())
}

/// Advance the client by `dt` milliseconds.
#[wasm_bindgen]
pub fn client_tick(dt: f64) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

#[wasm_bindgen]
pub fn client_pointer_down(x: f32, y: f32) {
    push(InputEvent::PointerDown { x, y });
}

#[wasm_bindgen]
pub fn client_pointer_up(x: f32, y: f32) {
    push(InputEvent::PointerUp { x, y });
}

#[wasm_bindgen]
pub fn client_pointer_move(x: f32, y: f32) {
    push(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn client_resize(width: f32, height: f32) {
    push(InputEvent::Resize { width, height });
}

#[wasm_bindgen]
pub fn client_scroll(x: f32, y: f32) {
    push(InputEvent::Scroll { x, y });
}

/// Report the aim control's client rect (`getBoundingClientRect()`).
#[wasm_bindgen]
pub fn client_cue_bounds(left: f32, top: f32, width: f32, height: f32) {
    push(InputEvent::CueBounds { left, top, width, height });
}

#[wasm_bindgen]
pub fn client_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    push(InputEvent::Custom { kind, a, b, c });
}

// ---- Requests and responses ----

/// Submit the new-game form. Returns the request id, or `undefined` when
/// the form was rejected (a notice explains why).
#[wasm_bindgen]
pub fn client_new_game(game: &str, p1: &str, p2: &str) -> Option<u32> {
    with_runner(|r| r.new_game(game, p1, p2).map(|id| id.0)).flatten()
}

/// Hand over the body of a shot response. Returns whether it was accepted.
#[wasm_bindgen]
pub fn client_deliver_shot(id: u32, body: &str) -> bool {
    with_runner(|r| r.deliver_shot(id, body).is_ok()).unwrap_or(false)
}

/// Hand over the body of a new-game response. Returns whether it was accepted.
#[wasm_bindgen]
pub fn client_deliver_new_game(id: u32, body: &str) -> bool {
    with_runner(|r| r.deliver_new_game(id, body).is_ok()).unwrap_or(false)
}

/// Drain pending host messages as a JSON array.
#[wasm_bindgen]
pub fn client_take_messages() -> String {
    with_runner(|r| match r.take_messages_json() {
        Ok(json) => json,
        Err(err) => {
            log::error!("failed to encode host messages: {}", err);
            "[]".to_string()
        }
    })
    .unwrap_or_else(|| "[]".to_string())
}

// ---- Reticle ----

/// `strokeStyle` for the reticle, or `undefined` before the first draw.
#[wasm_bindgen]
pub fn client_reticle_color() -> Option<String> {
    with_runner(|r| r.reticle_color()).flatten()
}

/// `[from.x, from.y, to.x, to.y, width]`, or `undefined` before the first draw.
#[wasm_bindgen]
pub fn client_reticle_line() -> Option<Vec<f32>> {
    with_runner(|r| r.reticle_line().map(|line| line.to_vec())).flatten()
}

#[wasm_bindgen]
pub fn client_surface_width() -> f32 {
    with_runner(|r| r.surface_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn client_surface_height() -> f32 {
    with_runner(|r| r.surface_height()).unwrap_or(0.0)
}

// ---- Vector accessors (only when vectors feature is enabled) ----

/// Copy of the tessellated reticle: 6 floats per vertex (x, y, r, g, b, a).
#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn client_vector_vertices() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.vector_vertices()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn client_vector_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vector_vertices_ptr()).unwrap_or(std::ptr::null())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn client_vector_vertex_count() -> u32 {
    with_runner(|r| r.vector_vertex_count()).unwrap_or(0)
}
