//! Data-driven game balance
//!
//! Every physics and layout constant the simulation reads lives here so a
//! host can override them from JSON without recompiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Which events award a point
///
/// The browser game awarded a point when an obstacle scrolled off the left
/// edge and again on the single tick the actor's left edge lined up with the
/// obstacle's left edge, so most obstacles counted twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// One point when an obstacle is pruned off-screen
    #[default]
    OffscreenPrune,
    /// One point on the exact left-edge alignment tick
    EdgeAlignment,
    /// Both of the above (legacy double scoring)
    Both,
}

impl ScoringRule {
    pub fn counts_prune(&self) -> bool {
        matches!(self, ScoringRule::OffscreenPrune | ScoringRule::Both)
    }

    pub fn counts_alignment(&self) -> bool {
        matches!(self, ScoringRule::EdgeAlignment | ScoringRule::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringRule::OffscreenPrune => "offscreen_prune",
            ScoringRule::EdgeAlignment => "edge_alignment",
            ScoringRule::Both => "both",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "offscreen_prune" | "prune" => Some(ScoringRule::OffscreenPrune),
            "edge_alignment" | "align" => Some(ScoringRule::EdgeAlignment),
            "both" | "legacy" => Some(ScoringRule::Both),
            _ => None,
        }
    }
}

/// Which band the judge treats as the open gap
///
/// The browser game drew the upper barrier from its random offset but tested
/// the actor against the raw barrier height, so the band it judged sat at a
/// fixed height regardless of where the gap was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GapBound {
    /// The drawn gap, starting at the upper barrier's lower edge
    #[default]
    Drawn,
    /// A fixed band starting at the barrier height (legacy feel)
    BarrierHeight,
}

impl GapBound {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapBound::Drawn => "drawn",
            GapBound::BarrierHeight => "barrier_height",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drawn" => Some(GapBound::Drawn),
            "barrier_height" | "legacy" => Some(GapBound::BarrierHeight),
            _ => None,
        }
    }
}

/// Errors from loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance and canvas geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ground_height: f32,

    // === Actor ===
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    pub actor_start_lift: f32,
    pub gravity: f32,
    pub impulse: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_gap: f32,
    pub obstacle_max_y_pos: f32,
    pub obstacle_speed: f32,
    pub spawn_interval: u64,

    // === Judging ===
    pub scoring: ScoringRule,
    pub gap_bound: GapBound,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ground_height: GROUND_HEIGHT,

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            actor_start_lift: ACTOR_START_LIFT,
            gravity: GRAVITY,
            impulse: IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_max_y_pos: OBSTACLE_MAX_Y_POS,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL,

            scoring: ScoringRule::default(),
            gap_bound: GapBound::default(),
        }
    }
}

impl Tuning {
    /// Y coordinate of the floor line (top of the ground strip)
    pub fn floor_y(&self) -> f32 {
        self.canvas_height - self.ground_height
    }

    /// Initial actor y (top edge)
    pub fn actor_start_y(&self) -> f32 {
        self.canvas_height / 2.0 - self.actor_start_lift
    }

    /// Highest and lowest top edge the judged gap can have over the spawn
    /// window
    pub fn gap_top_range(&self) -> (f32, f32) {
        match self.gap_bound {
            GapBound::Drawn => (
                2.0 * self.obstacle_max_y_pos + self.obstacle_height,
                self.obstacle_max_y_pos + self.obstacle_height,
            ),
            GapBound::BarrierHeight => (self.obstacle_height, self.obstacle_height),
        }
    }

    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("obstacle_gap", self.obstacle_gap),
            ("obstacle_speed", self.obstacle_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, "must be a positive number");
            }
        }

        if !(self.ground_height.is_finite() && self.ground_height >= 0.0) {
            return invalid("ground_height", "must be zero or positive");
        }
        if self.spawn_interval == 0 {
            return invalid("spawn_interval", "must be at least one tick");
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return invalid("gravity", "must be zero or positive");
        }
        if !(self.impulse.is_finite() && self.impulse < 0.0) {
            return invalid("impulse", "must be negative (upward)");
        }
        if !(self.obstacle_max_y_pos.is_finite() && self.obstacle_max_y_pos < 0.0) {
            return invalid("obstacle_max_y_pos", "must be negative (above the canvas)");
        }

        let start_y = self.actor_start_y();
        if !start_y.is_finite() || start_y < 0.0 || start_y + self.actor_height > self.floor_y() {
            return invalid("actor_start_lift", "actor must start between ceiling and floor");
        }

        // Every spawn must leave a band the actor fits through inside the canvas
        if self.obstacle_gap < self.actor_height {
            return invalid("obstacle_gap", "actor does not fit through the gap");
        }
        let (highest, lowest) = self.gap_top_range();
        if highest + self.obstacle_gap < self.actor_height {
            return invalid("obstacle_max_y_pos", "spawn window can put the gap above the canvas");
        }
        if lowest + self.actor_height > self.floor_y() {
            return invalid("obstacle_max_y_pos", "spawn window can put the gap below the floor");
        }

        Ok(())
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }
}
