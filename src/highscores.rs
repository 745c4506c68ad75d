//! Leaderboard of finished runs
//!
//! Keeps the ten best game overs, ranked by score and then by how long the
//! run lasted. Persisted to LocalStorage on the web and to a JSON file
//! natively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{DeathCause, GameOver};

/// Runs kept on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// Errors from reading or writing a native score file
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Frames survived, including the fatal one
    pub frames: u64,
    /// What ended the run
    pub cause: DeathCause,
    /// Unix timestamp (ms) when the run ended
    pub timestamp: f64,
}

impl HighScoreEntry {
    fn from_game_over(over: &GameOver, timestamp: f64) -> Self {
        Self {
            score: over.score,
            frames: over.frames,
            cause: over.cause,
            timestamp,
        }
    }

    /// Ranking key: higher score first, longer run breaks ties
    fn rank_key(&self) -> (u32, u64) {
        (self.score, self.frames)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// Best first
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Put a finished run on the board, returning its 1-based rank.
    ///
    /// Scoreless runs are never kept. A run that only ties an existing entry
    /// ranks below it.
    pub fn record(&mut self, over: &GameOver, timestamp: f64) -> Option<usize> {
        if over.score == 0 {
            return None;
        }

        let entry = HighScoreEntry::from_game_over(over, timestamp);
        let key = entry.rank_key();
        let pos = self.entries.partition_point(|e| e.rank_key() >= key);
        if pos >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!(
            "New high score #{}: {} ({} frames, {:?})",
            pos + 1,
            over.score,
            over.frames,
            over.cause
        );
        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored board, restoring rank order and the size limit
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.retain(|e| e.score > 0);
        scores.entries.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load the board from LocalStorage (WASM only); a corrupt board is
    /// dropped
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|json| Self::from_json(&json)) {
            Some(Ok(scores)) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Some(Err(e)) => {
                log::warn!("Discarding stored high scores: {}", e);
                Self::new()
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the board to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high scores not saved");
            return;
        };
        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to write high scores to LocalStorage");
                }
            }
            Err(e) => log::warn!("Failed to encode high scores: {}", e),
        }
    }

    /// Load from a file; a missing file is an empty board
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ScoreStoreError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let scores = Self::from_json(&json)?;
                log::info!("Loaded {} high scores from {}", scores.entries.len(), path.display());
                Ok(scores)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ScoreStoreError> {
        std::fs::write(path, self.to_json()?)?;
        log::debug!("High scores saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over(score: u32, frames: u64) -> GameOver {
        GameOver {
            score,
            frames,
            cause: DeathCause::Floor,
        }
    }

    #[test]
    fn test_scoreless_run_not_kept() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(&over(0, 5000), 1.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_ranks_by_score_then_frames() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(&over(5, 900), 1.0), Some(1));
        assert_eq!(scores.record(&over(9, 1300), 2.0), Some(1));
        // Same score, longer run ranks higher
        assert_eq!(scores.record(&over(5, 1000), 3.0), Some(2));
        // Exact tie goes below the existing entry
        assert_eq!(scores.record(&over(5, 1000), 4.0), Some(3));

        let order: Vec<(u32, u64)> = scores.entries.iter().map(HighScoreEntry::rank_key).collect();
        assert_eq!(order, vec![(9, 1300), (5, 1000), (5, 1000), (5, 900)]);
        assert_eq!(scores.entries[1].timestamp, 3.0);
        assert_eq!(scores.best().map(|e| e.score), Some(9));
    }

    #[test]
    fn test_full_board_trims() {
        let mut scores = HighScores::new();
        for score in 1..=MAX_HIGH_SCORES as u32 {
            scores.record(&over(score, 100), 0.0);
        }
        // Ties the lowest entry, so it would land past the end
        assert_eq!(scores.record(&over(1, 100), 0.0), None);
        assert_eq!(scores.record(&over(11, 100), 0.0), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(2));
    }

    #[test]
    fn test_keeps_death_cause() {
        let mut scores = HighScores::new();
        let report = GameOver {
            score: 3,
            frames: 640,
            cause: DeathCause::Obstacle { id: 4 },
        };
        assert_eq!(scores.record(&report, 10.0), Some(1));
        assert_eq!(scores.entries[0].cause, DeathCause::Obstacle { id: 4 });
        assert_eq!(scores.entries[0].frames, 640);
    }

    #[test]
    fn test_from_json_restores_order() {
        let json = r#"{"entries":[
            {"score":2,"frames":10,"cause":"Floor","timestamp":0.0},
            {"score":0,"frames":99,"cause":"Floor","timestamp":0.0},
            {"score":8,"frames":40,"cause":{"Obstacle":{"id":3}},"timestamp":0.0}
        ]}"#;
        let scores = HighScores::from_json(json).unwrap();
        assert_eq!(scores.entries.len(), 2);
        assert_eq!(scores.best().map(|e| e.cause), Some(DeathCause::Obstacle { id: 3 }));
        assert_eq!(HighScores::from_json(&scores.to_json().unwrap()).unwrap(), scores);
    }
}
