//! Actor vs obstacle judging
//!
//! Axis-aligned tests only: the actor is a box, each obstacle is a pair of
//! boxes with an open band between them.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::Obstacle;
use crate::tuning::GapBound;

/// Outcome of judging the actor against one obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Not touching this obstacle
    Clear,
    /// Inside the gap, still flying through
    Threading,
    /// Inside the gap on the tick the actor's left edge lines up with the
    /// obstacle's left edge
    Aligned,
    /// Hit the upper or lower barrier
    Collision,
}

impl Verdict {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Verdict::Collision)
    }
}

/// True when the actor's horizontal extent overlaps the obstacle's
#[inline]
pub fn overlaps_horizontally(actor: &Actor, obstacle: &Obstacle) -> bool {
    actor.right() > obstacle.left() && actor.left() < obstacle.right()
}

/// Judge the actor against a single obstacle with the given gap height
pub fn judge(actor: &Actor, obstacle: &Obstacle, gap: f32, bound: GapBound) -> Verdict {
    if !overlaps_horizontally(actor, obstacle) {
        return Verdict::Clear;
    }

    let (top, bottom) = obstacle.judged_gap(gap, bound);
    if actor.top() < top || actor.bottom() > bottom {
        return Verdict::Collision;
    }

    // Exact equality: with integral scroll steps this fires on one tick only
    if actor.left() == obstacle.left() {
        Verdict::Aligned
    } else {
        Verdict::Threading
    }
}
