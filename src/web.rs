//! Browser surface
//!
//! Exposes one game session to JavaScript. The page owns the canvas, the
//! key/click listeners and the `requestAnimationFrame` loop; it calls
//! `frame()` once per refresh and reads state back for drawing.

use wasm_bindgen::prelude::*;

use crate::driver::{Cadence, FrameDriver};
use crate::highscores::HighScores;
use crate::sim::{GameSession, Obstacle};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Flappy Sim (web) starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession,
    driver: FrameDriver,
    high_scores: HighScores,
    last_score: Option<u32>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        log::info!("Started new game with seed: {}", seed);
        WebGame {
            session: GameSession::new(seed, Tuning::load()),
            driver: FrameDriver::new(Cadence::PerRefresh),
            high_scores: HighScores::load(),
            last_score: None,
        }
    }

    /// Space/click: flap, or start when stopped
    pub fn request_impulse(&mut self) {
        self.driver.request_impulse();
    }

    pub fn request_start(&mut self) {
        self.driver.request_start();
    }

    pub fn request_reset(&mut self) {
        self.driver.request_reset();
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.driver.set_idle_mode(idle);
    }

    /// Advance one host frame. Returns false once the page can stop
    /// scheduling frames. Demo crashes are not reported or recorded.
    pub fn frame(&mut self, dt: f32) -> bool {
        let report = self.driver.frame(&mut self.session, dt);
        if let Some(over) = report.player_game_over() {
            self.last_score = Some(over.score);
            if self.high_scores.record(&over, js_sys::Date::now()).is_some() {
                self.high_scores.save();
            }
        }
        report.keep_running
    }

    /// Final score of the run that just ended, taken once
    pub fn take_final_score(&mut self) -> Option<u32> {
        self.last_score.take()
    }

    pub fn running(&self) -> bool {
        self.session.is_running()
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn best_score(&self) -> u32 {
        self.high_scores.best().map(|e| e.score).unwrap_or(0)
    }

    pub fn frames(&self) -> f64 {
        self.session.frames as f64
    }

    pub fn actor_x(&self) -> f32 {
        self.session.actor.pos.x
    }

    pub fn actor_y(&self) -> f32 {
        self.session.actor.pos.y
    }

    pub fn actor_width(&self) -> f32 {
        self.session.actor.size.x
    }

    pub fn actor_height(&self) -> f32 {
        self.session.actor.size.y
    }

    pub fn obstacle_width(&self) -> f32 {
        self.session.field.width
    }

    pub fn obstacle_gap(&self) -> f32 {
        self.session.field.gap
    }

    /// Live obstacles as flat `[x, y, height, ...]` triples in screen order
    pub fn obstacles(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self
            .session
            .field
            .iter()
            .flat_map(|o: &Obstacle| [o.x, o.y, o.height])
            .collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Full state as JSON for debugging overlays
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
