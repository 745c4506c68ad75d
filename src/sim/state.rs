//! Game session state and lifecycle
//!
//! One `GameSession` holds everything a run needs. Reset reinitializes it in
//! place rather than building a new one.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::{Obstacle, ObstacleField};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initial state, and the state after a terminal collision
    #[default]
    Stopped,
    /// Ticks advance the simulation
    Running,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Floor,
    /// Hit the obstacle with this id
    Obstacle { id: u32 },
}

/// Reported once when a run ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub score: u32,
    /// Frames simulated before the run ended (including the fatal one)
    pub frames: u64,
    pub cause: DeathCause,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Reset,
    Flapped,
    /// Actor bumped the ceiling
    Ceiling,
    Spawned { id: u32 },
    /// Obstacle left the screen
    Pruned { id: u32 },
    /// Score went up
    Scored { score: u32 },
    GameOver(GameOver),
}

/// Serializable view of all gameplay state
///
/// Excludes the RNG so two snapshots compare equal whenever everything a
/// renderer can see is equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub frames: u64,
    pub actor: Actor,
    pub obstacles: Vec<Obstacle>,
    pub obstacle_gap: f32,
    pub obstacle_width: f32,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the spawn RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Points this run
    pub score: u32,
    /// Simulation tick counter (animation clock and spawn trigger)
    pub frames: u64,
    pub actor: Actor,
    pub field: ObstacleField,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Create a stopped session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            actor: Actor::new(&tuning),
            field: ObstacleField::new(&tuning),
            tuning,
            phase: GamePhase::Stopped,
            score: 0,
            frames: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Stopped -> Running. Does not reset anything from a previous run.
    pub fn request_start(&mut self) -> bool {
        if self.is_running() {
            log::debug!("Start ignored: already running");
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Session started (frame {}, score {})", self.frames, self.score);
        true
    }

    /// Flap while running; while stopped this starts the session instead
    pub fn request_impulse(&mut self) -> GameEvent {
        if self.is_running() {
            self.actor.apply_impulse();
            GameEvent::Flapped
        } else {
            log::debug!("Impulse while stopped: starting session");
            self.request_start();
            GameEvent::Started
        }
    }

    /// Back to the initial stopped state, from any phase
    pub fn request_reset(&mut self) {
        self.phase = GamePhase::Stopped;
        self.score = 0;
        self.frames = 0;
        self.actor.reset();
        self.field.reset();
        log::info!("Session reset");
    }

    /// Stop the run and build the report
    pub(crate) fn end_run(&mut self, cause: DeathCause) -> GameOver {
        self.phase = GamePhase::Stopped;
        let report = GameOver {
            score: self.score,
            frames: self.frames,
            cause,
        };
        log::info!("Game over after {} frames ({:?}), score: {}", report.frames, cause, report.score);
        report
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            score: self.score,
            frames: self.frames,
            actor: self.actor.clone(),
            obstacles: self.field.iter().cloned().collect(),
            obstacle_gap: self.field.gap,
            obstacle_width: self.field.width,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(0, Tuning::default())
    }
}
