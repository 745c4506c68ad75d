//! Invariants that must hold for any input sequence

use std::collections::HashMap;

use flappy_sim::sim::{GameEvent, GameSession, TickInput, tick};
use flappy_sim::Tuning;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn actor_stays_in_bounds(seed in any::<u64>(), flaps in prop::collection::vec(any::<bool>(), 1..600)) {
        let mut session = GameSession::new(seed, Tuning::default());
        session.request_start();
        let max_y = session.tuning.floor_y() - session.actor.size.y;

        for flap in flaps {
            let input = TickInput { impulse: flap, ..Default::default() };
            let outcome = tick(&mut session, &input);
            if !outcome.advanced {
                break;
            }
            prop_assert!(session.actor.pos.y >= 0.0);
            prop_assert!(session.actor.pos.y <= max_y);
            if outcome.events.contains(&GameEvent::Ceiling) {
                prop_assert_eq!(session.actor.velocity, 0.0);
                prop_assert_eq!(session.actor.pos.y, 0.0);
            }
            if outcome.game_over.is_some() {
                break;
            }
        }
    }

    #[test]
    fn obstacles_scroll_and_prune_exactly_once(seed in any::<u64>(), ticks in 1usize..1500) {
        // Weightless actor inside a huge gap never dies, so the field runs freely
        let tuning = Tuning {
            gravity: 0.0,
            obstacle_gap: 2000.0,
            ..Default::default()
        };
        let mut session = GameSession::new(seed, tuning);
        session.actor.pos.y = 400.0;
        session.field.height = 0.0;
        session.request_start();

        let speed = session.field.speed;
        let mut pruned_ids = Vec::new();
        let mut spawned = 0u64;

        for _ in 0..ticks {
            let before: HashMap<u32, f32> = session.field.iter().map(|o| (o.id, o.x)).collect();
            let outcome = tick(&mut session, &TickInput::default());
            prop_assert!(outcome.game_over.is_none());

            for event in &outcome.events {
                match event {
                    GameEvent::Spawned { .. } => spawned += 1,
                    GameEvent::Pruned { id } => {
                        prop_assert!(!pruned_ids.contains(id));
                        if let Some(x) = before.get(id) {
                            prop_assert!(x - speed + session.field.width <= 0.0);
                        }
                        pruned_ids.push(*id);
                    }
                    _ => {}
                }
            }

            let mut last_x = f32::NEG_INFINITY;
            for obstacle in session.field.iter() {
                prop_assert!(obstacle.right() > 0.0);
                prop_assert!(obstacle.x >= last_x);
                last_x = obstacle.x;
                if let Some(x) = before.get(&obstacle.id) {
                    prop_assert_eq!(obstacle.x, x - speed);
                }
            }
        }

        let expected_spawns = (ticks as u64).div_ceil(session.field.spawn_interval);
        prop_assert_eq!(spawned, expected_spawns);
        prop_assert_eq!(session.score as usize, pruned_ids.len());
    }
}
