//! Flappy Sim - simulation core for a side-scrolling avoidance game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacles, judge, session)
//! - `driver`: Frame cadence that feeds ticks into a session
//! - `tuning`: Data-driven game balance and canvas geometry
//! - `highscores`: Final score leaderboard
//! - `web`: wasm-bindgen surface for the browser host (wasm32 only)

pub mod driver;
pub mod highscores;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{Cadence, FrameDriver, FrameReport};
pub use highscores::{HighScores, ScoreStoreError};
pub use tuning::{GapBound, ScoringRule, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep when running at a fixed cadence (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest host frame the fixed cadence will try to catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Ground strip at the bottom of the canvas; its top edge is the floor line
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 34.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;
    /// Spawn height measured up from canvas mid-line
    pub const ACTOR_START_LIFT: f32 = 10.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Velocity set by a flap (pixels/tick, negative is up)
    pub const IMPULSE: f32 = -5.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 300.0;
    pub const OBSTACLE_GAP: f32 = 150.0;
    /// Base vertical offset; spawn offsets are uniform in (2 * base, base]
    pub const OBSTACLE_MAX_Y_POS: f32 = -150.0;
    /// Horizontal scroll speed (pixels/tick)
    pub const OBSTACLE_SPEED: f32 = 2.0;
    /// Ticks between obstacle spawns
    pub const SPAWN_INTERVAL: u64 = 100;
}
