//! Flappy Sim entry point
//!
//! Native builds run a headless, autopiloted session and print the result.
//! The browser build is driven from JavaScript through `flappy_sim::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use flappy_sim::sim::{GameEvent, GameSession};
    use flappy_sim::{Cadence, FrameDriver, HighScores, Tuning};

    /// Frame limit when none is given (five minutes at 60 Hz)
    const DEFAULT_FRAME_LIMIT: u64 = 5 * 60 * 60;

    #[derive(Debug, Default)]
    struct Args {
        seed: Option<u64>,
        frames: Option<u64>,
        tuning: Option<PathBuf>,
        scores: Option<PathBuf>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args::default();
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let mut value = || iter.next().ok_or_else(|| format!("missing value for {}", flag));
            match flag.as_str() {
                "--seed" => {
                    let v = value()?;
                    args.seed = Some(v.parse().map_err(|_| format!("invalid seed: {}", v))?);
                }
                "--frames" => {
                    let v = value()?;
                    args.frames = Some(v.parse().map_err(|_| format!("invalid frame count: {}", v))?);
                }
                "--tuning" => args.tuning = Some(PathBuf::from(value()?)),
                "--scores" => args.scores = Some(PathBuf::from(value()?)),
                "-h" | "--help" => {
                    return Err(
                        "usage: flappy-sim [--seed N] [--frames N] [--tuning FILE] [--scores FILE]"
                            .to_string(),
                    );
                }
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(args)
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    pub fn run() -> Result<(), String> {
        let args = parse_args()?;

        let tuning = match &args.tuning {
            Some(path) => Tuning::load_from(path).map_err(|e| e.to_string())?,
            None => Tuning::default(),
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        let limit = args.frames.unwrap_or(DEFAULT_FRAME_LIMIT);
        log::info!("Seed {}, scoring {}, frame limit {}", seed, tuning.scoring.as_str(), limit);

        let mut session = GameSession::new(seed, tuning);
        let mut driver = FrameDriver::new(Cadence::PerRefresh);
        driver.request_start();
        driver.set_idle_mode(true);

        let mut game_over = None;
        while session.frames < limit {
            let report = driver.frame(&mut session, flappy_sim::consts::SIM_DT);
            for event in &report.events {
                if let GameEvent::Scored { score } = event {
                    log::debug!("Score {} at frame {}", score, session.frames);
                }
            }
            if let Some(over) = report.game_over {
                game_over = Some(over);
                break;
            }
        }

        let Some(over) = game_over else {
            // Only finished runs go on the board
            println!("Survived {} frames, score: {}", session.frames, session.score);
            return Ok(());
        };
        println!("Game over! Your score: {} ({} frames, {:?})", over.score, over.frames, over.cause);

        if let Some(path) = &args.scores {
            let mut scores = HighScores::load_from(path).map_err(|e| e.to_string())?;
            if let Some(rank) = scores.record(&over, now_ms()) {
                println!("New high score! Rank #{}", rank);
                scores.save_to(path).map_err(|e| e.to_string())?;
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy Sim (native) starting...");

    if let Err(e) = native::run() {
        eprintln!("{}", e);
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flappy_sim::web::start, this is just to satisfy the compiler
}
