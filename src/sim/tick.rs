//! Per-frame simulation tick
//!
//! Core game loop step: apply pending requests, integrate the actor, advance
//! the obstacle field, then judge the actor against every live obstacle.

use super::actor::Contact;
use super::collision::{Verdict, judge};
use super::pilot;
use super::state::{DeathCause, GameEvent, GameOver, GamePhase, GameSession};

/// Requests gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (click/tap/space); starts the session when stopped
    pub impulse: bool,
    /// Start button
    pub start: bool,
    /// Reset button
    pub reset: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn impulse() -> Self {
        Self {
            impulse: true,
            ..Default::default()
        }
    }

    /// Drop one-shot requests after they have been applied
    pub fn clear_one_shots(&mut self) {
        self.impulse = false;
        self.start = false;
        self.reset = false;
    }
}

/// Everything a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Whether the simulation actually advanced
    pub advanced: bool,
    pub events: Vec<GameEvent>,
    pub game_over: Option<GameOver>,
}

impl TickOutcome {
    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Apply requests queued by the input collaborator
fn apply_input(state: &mut GameSession, input: &TickInput, outcome: &mut TickOutcome) {
    if input.reset {
        state.request_reset();
        outcome.push(GameEvent::Reset);
    }

    let mut impulse = input.impulse;
    if input.idle_mode {
        if !state.is_running() {
            // Demo restarts from scratch after a crash
            if state.frames > 0 {
                state.request_reset();
                outcome.push(GameEvent::Reset);
            }
            impulse = true;
        } else if pilot::wants_impulse(state) {
            impulse = true;
        }
    }

    if input.start && state.request_start() {
        outcome.push(GameEvent::Started);
    } else if impulse {
        outcome.push(state.request_impulse());
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut GameSession, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    apply_input(state, input, &mut outcome);

    if state.phase != GamePhase::Running {
        return outcome;
    }
    outcome.advanced = true;

    let frame_index = state.frames;
    let rule = state.tuning.scoring;

    match state.actor.integrate(state.tuning.floor_y()) {
        Contact::Floor => {
            state.frames += 1;
            let report = state.end_run(DeathCause::Floor);
            outcome.push(GameEvent::GameOver(report));
            outcome.game_over = Some(report);
            return outcome;
        }
        Contact::Ceiling => outcome.push(GameEvent::Ceiling),
        Contact::None => {}
    }

    let step = state.field.advance(frame_index, &mut state.rng);
    if let Some(id) = step.spawned {
        outcome.push(GameEvent::Spawned { id });
    }
    for id in step.pruned {
        outcome.push(GameEvent::Pruned { id });
        if rule.counts_prune() {
            state.score += 1;
            outcome.push(GameEvent::Scored { score: state.score });
        }
    }

    let gap = state.field.gap;
    let bound = state.tuning.gap_bound;
    let mut fatal = None;
    for obstacle in state.field.iter() {
        match judge(&state.actor, obstacle, gap, bound) {
            Verdict::Collision => {
                fatal = Some(obstacle.id);
                break;
            }
            Verdict::Aligned if rule.counts_alignment() => {
                state.score += 1;
                outcome.push(GameEvent::Scored { score: state.score });
            }
            _ => {}
        }
    }

    state.frames += 1;

    if let Some(id) = fatal {
        let report = state.end_run(DeathCause::Obstacle { id });
        outcome.push(GameEvent::GameOver(report));
        outcome.game_over = Some(report);
    }

    outcome
}
