//! The player body
//!
//! Fixed horizontal position, vertical motion under constant gravity, and a
//! flap impulse that overwrites the current velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// What the actor touched during an integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Free flight
    None,
    /// Hit the top of the canvas; clamped and stopped, not fatal
    Ceiling,
    /// Bottom edge reached the floor line; clamped, fatal to the session
    Floor,
}

/// The player's bird
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner (x never changes)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub velocity: f32,
    pub gravity: f32,
    /// Velocity set by a flap
    pub impulse: f32,
    start_y: f32,
}

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        let start_y = tuning.actor_start_y();
        Self {
            pos: Vec2::new(tuning.actor_x, start_y),
            size: Vec2::new(tuning.actor_width, tuning.actor_height),
            velocity: 0.0,
            gravity: tuning.gravity,
            impulse: tuning.impulse,
            start_y,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Advance one tick of gravity, clamping to the floor and ceiling
    ///
    /// Floor contact is reported, not acted on: the session decides that it
    /// ends the run.
    pub fn integrate(&mut self, floor_y: f32) -> Contact {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;

        if self.bottom() >= floor_y {
            self.pos.y = floor_y - self.size.y;
            return Contact::Floor;
        }

        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
            return Contact::Ceiling;
        }

        Contact::None
    }

    /// Flap: velocity becomes the impulse regardless of current motion
    pub fn apply_impulse(&mut self) {
        self.velocity = self.impulse;
    }

    pub fn reset(&mut self) {
        self.pos.y = self.start_y;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_integration() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        assert_eq!(actor.pos, Vec2::new(50.0, 290.0));

        assert_eq!(actor.integrate(tuning.floor_y()), Contact::None);
        assert_eq!(actor.velocity, 0.25);
        assert_eq!(actor.pos.y, 290.25);

        assert_eq!(actor.integrate(tuning.floor_y()), Contact::None);
        assert_eq!(actor.velocity, 0.5);
        assert_eq!(actor.pos.y, 290.75);
        assert_eq!(actor.pos.x, 50.0);
    }

    #[test]
    fn test_ceiling_clamps_and_stops() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.pos.y = 2.0;
        actor.velocity = -5.0;

        assert_eq!(actor.integrate(tuning.floor_y()), Contact::Ceiling);
        assert_eq!(actor.pos.y, 0.0);
        assert_eq!(actor.velocity, 0.0);

        // Landing exactly on zero also counts as a ceiling touch
        actor.pos.y = 4.75;
        actor.velocity = -5.0;
        assert_eq!(actor.integrate(tuning.floor_y()), Contact::Ceiling);
        assert_eq!(actor.velocity, 0.0);
    }

    #[test]
    fn test_floor_clamps_to_contact() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.pos.y = 495.0;
        actor.velocity = 3.0;

        assert_eq!(actor.integrate(tuning.floor_y()), Contact::Floor);
        assert_eq!(actor.pos.y, tuning.floor_y() - actor.size.y);
        assert_eq!(actor.bottom(), tuning.floor_y());
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.velocity = 7.5;
        actor.apply_impulse();
        assert_eq!(actor.velocity, -5.0);

        actor.velocity = -20.0;
        actor.apply_impulse();
        assert_eq!(actor.velocity, -5.0);
    }

    #[test]
    fn test_reset_restores_start() {
        let tuning = Tuning::default();
        let mut actor = Actor::new(&tuning);
        actor.pos.y = 12.0;
        actor.velocity = 4.0;
        actor.reset();
        assert_eq!(actor, Actor::new(&tuning));
    }
}
