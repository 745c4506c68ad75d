//! Frame driver
//!
//! Turns host frames (one per display refresh) into simulation ticks and
//! tells the host when it can stop scheduling frames.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameOver, GameSession, TickInput, tick};

/// How host frames map to ticks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cadence {
    /// Exactly one tick per host frame, whatever the refresh rate
    #[default]
    PerRefresh,
    /// Fixed-rate ticks from elapsed time
    Fixed { dt: f32 },
}

/// Result of one host frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Simulation ticks that advanced the session
    pub ticks: u32,
    pub events: Vec<GameEvent>,
    pub game_over: Option<GameOver>,
    /// False once the session has stopped; the host may halt its loop until
    /// the next start request
    pub keep_running: bool,
    /// The run that ended was flown by the autopilot
    pub demo: bool,
}

impl FrameReport {
    /// Game over of a run the player flew; demo crashes are left out
    pub fn player_game_over(&self) -> Option<GameOver> {
        self.game_over.filter(|_| !self.demo)
    }
}

/// Feeds ticks into a session at the chosen cadence
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    pub cadence: Cadence,
    accumulator: f32,
    /// Inputs waiting for the next tick
    pending: TickInput,
}

impl FrameDriver {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            accumulator: 0.0,
            pending: TickInput::default(),
        }
    }

    /// Queue a flap (or start, if stopped)
    pub fn request_impulse(&mut self) {
        self.pending.impulse = true;
    }

    pub fn request_start(&mut self) {
        self.pending.start = true;
    }

    pub fn request_reset(&mut self) {
        self.pending.reset = true;
        self.accumulator = 0.0;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.pending.idle_mode = idle;
    }

    /// True while a request is waiting for the next tick
    pub fn has_pending_requests(&self) -> bool {
        self.pending.impulse || self.pending.start || self.pending.reset
    }

    /// Run the ticks owed for a host frame that took `dt` seconds
    pub fn frame(&mut self, session: &mut GameSession, dt: f32) -> FrameReport {
        let mut report = FrameReport::default();

        let steps = match self.cadence {
            Cadence::PerRefresh => 1,
            Cadence::Fixed { dt: step } => {
                // NaN would poison the accumulator for good
                let dt = if dt.is_finite() { dt } else { 0.0 };
                self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
                let mut steps = 0;
                while self.accumulator >= step && steps < MAX_SUBSTEPS {
                    self.accumulator -= step;
                    steps += 1;
                }
                if steps == MAX_SUBSTEPS {
                    // Drop the backlog rather than spiral
                    self.accumulator = 0.0;
                }
                steps
            }
        };

        for _ in 0..steps {
            let input = self.pending.clone();
            let outcome = tick(session, &input);
            // Clear one-shot inputs after processing
            self.pending.clear_one_shots();

            if outcome.advanced {
                report.ticks += 1;
            }
            report.events.extend(outcome.events);
            if let Some(over) = outcome.game_over {
                report.game_over = Some(over);
                report.demo = input.idle_mode;
                self.accumulator = 0.0;
                break;
            }
            if !session.is_running() && !input.idle_mode {
                break;
            }
        }

        report.keep_running = session.is_running() || self.pending.idle_mode;
        report
    }
}

/// Default fixed step for hosts that want refresh-rate independence
pub fn default_fixed() -> Cadence {
    Cadence::Fixed { dt: SIM_DT }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    #[test]
    fn test_per_refresh_one_tick_per_frame() {
        let mut session = GameSession::new(1, Tuning::default());
        let mut driver = FrameDriver::new(Cadence::PerRefresh);

        // Stopped: nothing happens and the host may idle
        let report = driver.frame(&mut session, 0.5);
        assert_eq!(report.ticks, 0);
        assert!(!report.keep_running);

        driver.request_start();
        let report = driver.frame(&mut session, 0.5);
        assert_eq!(report.ticks, 1);
        assert!(report.keep_running);
        assert_eq!(session.frames, 1);

        // dt does not matter
        driver.frame(&mut session, 0.0001);
        assert_eq!(session.frames, 2);
    }

    #[test]
    fn test_fixed_accumulates() {
        let mut session = GameSession::new(1, Tuning::default());
        let mut driver = FrameDriver::new(Cadence::Fixed { dt: 0.01 });
        session.request_start();

        // 2.5 steps worth in two frames
        let a = driver.frame(&mut session, 0.015);
        let b = driver.frame(&mut session, 0.0101);
        assert_eq!(a.ticks + b.ticks, 2);
        assert_eq!(session.frames, 2);
    }

    #[test]
    fn test_fixed_caps_substeps() {
        let mut session = GameSession::new(1, Tuning::default());
        let mut driver = FrameDriver::new(Cadence::Fixed { dt: 0.001 });
        session.request_start();

        let report = driver.frame(&mut session, 5.0);
        assert_eq!(report.ticks, MAX_SUBSTEPS);
    }

    #[test]
    fn test_fixed_ignores_non_finite_dt() {
        let mut session = GameSession::new(1, Tuning::default());
        let mut driver = FrameDriver::new(default_fixed());
        session.request_start();

        assert_eq!(driver.frame(&mut session, f32::NAN).ticks, 0);
        assert_eq!(driver.frame(&mut session, f32::INFINITY).ticks, 0);
        // Still ticks once real time arrives
        let report = driver.frame(&mut session, SIM_DT * 1.5);
        assert_eq!(report.ticks, 1);
        assert_eq!(session.frames, 1);
    }

    #[test]
    fn test_requests_wait_for_next_tick() {
        let mut session = GameSession::new(1, Tuning::default());
        let mut driver = FrameDriver::new(default_fixed());

        driver.request_impulse();
        let report = driver.frame(&mut session, 0.0);
        assert!(report.events.is_empty());
        assert!(driver.has_pending_requests());
        assert_eq!(session.phase, GamePhase::Stopped);

        let report = driver.frame(&mut session, SIM_DT * 1.5);
        assert_eq!(report.events[0], GameEvent::Started);
        assert_eq!(session.phase, GamePhase::Running);
        assert!(!driver.has_pending_requests());
    }

    #[test]
    fn test_halts_after_game_over() {
        let mut session = GameSession::new(1, Tuning::default());
        let mut driver = FrameDriver::new(Cadence::PerRefresh);
        driver.request_start();

        let mut last = FrameReport::default();
        for _ in 0..100 {
            last = driver.frame(&mut session, SIM_DT);
            if last.game_over.is_some() {
                break;
            }
        }
        assert!(last.game_over.is_some());
        assert!(!last.keep_running);

        // Reset puts everything back and still does not run
        driver.request_reset();
        let report = driver.frame(&mut session, SIM_DT);
        assert_eq!(report.events, vec![GameEvent::Reset]);
        assert_eq!(session.frames, 0);
        assert!(!report.keep_running);
    }

    fn run_to_game_over(driver: &mut FrameDriver, session: &mut GameSession) -> FrameReport {
        for _ in 0..100_000 {
            let report = driver.frame(session, SIM_DT);
            if report.game_over.is_some() {
                return report;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_player_game_over_only_for_player_runs() {
        let mut session = GameSession::new(1, Tuning::default());
        let mut driver = FrameDriver::new(Cadence::PerRefresh);
        driver.request_start();
        let report = run_to_game_over(&mut driver, &mut session);
        assert!(!report.demo);
        assert_eq!(report.player_game_over(), report.game_over);

        // Gravity outweighs every flap, so the autopilot sinks to the floor
        let tuning = Tuning {
            gravity: 10.0,
            ..Default::default()
        };
        let mut session = GameSession::new(1, tuning);
        let mut driver = FrameDriver::new(Cadence::PerRefresh);
        driver.set_idle_mode(true);
        let report = run_to_game_over(&mut driver, &mut session);
        assert!(report.demo);
        assert!(report.game_over.is_some());
        assert_eq!(report.player_game_over(), None);
    }
}
