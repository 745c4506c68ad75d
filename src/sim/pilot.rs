//! Demo autopilot
//!
//! Flaps whenever the actor sinks below a line near the bottom of the next
//! gap. Good enough to keep the demo alive for a long time, not perfect.

use super::state::GameSession;

/// How far above the lower barrier the pilot tries to keep the actor's
/// bottom edge
const GAP_MARGIN: f32 = 20.0;
/// Cruise line (relative to the floor) when no obstacle is ahead
const CRUISE_ABOVE_FLOOR: f32 = 200.0;
/// Fraction of the impulse velocity below which the pilot flaps again
const REFLAP_FRACTION: f32 = 0.5;

/// Target line for the actor's bottom edge
pub fn target_line(state: &GameSession) -> f32 {
    let actor_left = state.actor.left();
    state
        .field
        .iter()
        .find(|o| o.right() > actor_left)
        .map(|o| o.judged_gap(state.field.gap, state.tuning.gap_bound).1 - GAP_MARGIN)
        .unwrap_or(state.tuning.floor_y() - CRUISE_ABOVE_FLOOR)
}

/// Whether the pilot would flap this tick
///
/// Re-flaps once the climb has slowed to half the impulse, so the actor can
/// gain height quickly when the next gap is much higher.
pub fn wants_impulse(state: &GameSession) -> bool {
    let actor = &state.actor;
    actor.velocity > actor.impulse * REFLAP_FRACTION && actor.bottom() > target_line(state)
}
