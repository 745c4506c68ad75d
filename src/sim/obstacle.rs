//! Obstacle spawning, scrolling and pruning
//!
//! Obstacles are kept in spawn order. All of them scroll at the same speed,
//! so spawn order is also screen order and the oldest obstacle is always the
//! first to leave the left edge.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::{GapBound, Tuning};

/// A top/bottom barrier pair with a fixed gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Top of the upper barrier (negative: starts above the canvas)
    pub y: f32,
    pub width: f32,
    /// Height of the upper barrier
    pub height: f32,
}

impl Obstacle {
    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Lower bound of the upper barrier (top of the gap)
    pub fn gap_top(&self) -> f32 {
        self.y + self.height
    }

    /// Upper bound of the lower barrier (bottom of the gap)
    pub fn gap_bottom(&self, gap: f32) -> f32 {
        self.gap_top() + gap
    }

    /// The band the judge treats as open, as (top, bottom)
    pub fn judged_gap(&self, gap: f32, bound: GapBound) -> (f32, f32) {
        match bound {
            GapBound::Drawn => (self.gap_top(), self.gap_bottom(gap)),
            GapBound::BarrierHeight => (self.height, self.height + gap),
        }
    }

    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// What happened to the field during one advance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAdvance {
    /// Id of the obstacle spawned this tick
    pub spawned: Option<u32>,
    /// Ids of obstacles that left the screen this tick, oldest first
    pub pruned: Vec<u32>,
}

/// The scrolling obstacle course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Live obstacles in spawn order
    pub obstacles: VecDeque<Obstacle>,
    /// Vertical gap between barriers
    pub gap: f32,
    pub width: f32,
    pub height: f32,
    /// Base offset for spawn placement
    pub max_y_pos: f32,
    /// Pixels per tick
    pub speed: f32,
    pub spawn_interval: u64,
    /// Spawn x (right edge of canvas)
    pub spawn_x: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            obstacles: VecDeque::new(),
            gap: tuning.obstacle_gap,
            width: tuning.obstacle_width,
            height: tuning.obstacle_height,
            max_y_pos: tuning.obstacle_max_y_pos,
            speed: tuning.obstacle_speed,
            spawn_interval: tuning.spawn_interval,
            spawn_x: tuning.canvas_width,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Append an obstacle at an explicit position, returning its id
    pub fn spawn_at(&mut self, x: f32, y: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push_back(Obstacle {
            id,
            x,
            y,
            width: self.width,
            height: self.height,
        });
        id
    }

    /// Draw a spawn offset: uniform in (2 * max_y_pos, max_y_pos]
    pub fn random_offset<R: Rng>(&self, rng: &mut R) -> f32 {
        self.max_y_pos * (rng.random::<f32>() + 1.0)
    }

    /// Spawn on schedule, scroll everything left, then prune off-screen
    /// obstacles from the head
    pub fn advance<R: Rng>(&mut self, frame_index: u64, rng: &mut R) -> FieldAdvance {
        let mut result = FieldAdvance::default();

        if frame_index % self.spawn_interval == 0 {
            let y = self.random_offset(rng);
            let id = self.spawn_at(self.spawn_x, y);
            log::debug!("Spawned obstacle {} at frame {} (y={:.1})", id, frame_index, y);
            result.spawned = Some(id);
        }

        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }

        while self.obstacles.front().is_some_and(Obstacle::is_offscreen) {
            if let Some(gone) = self.obstacles.pop_front() {
                log::debug!("Pruned obstacle {} at frame {}", gone.id, frame_index);
                result.pruned.push(gone.id);
            }
        }

        result
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.next_id = 1;
    }
}
