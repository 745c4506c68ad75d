//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod obstacle;
pub mod pilot;
pub mod state;
pub mod tick;

pub use actor::{Actor, Contact};
pub use collision::{Verdict, judge, overlaps_horizontally};
pub use obstacle::{FieldAdvance, Obstacle, ObstacleField};
pub use state::{DeathCause, GameEvent, GameOver, GamePhase, GameSession, SessionSnapshot};
pub use tick::{TickInput, TickOutcome, tick};
