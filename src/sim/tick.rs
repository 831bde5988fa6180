//! Frame-stepped simulation tick
//!
//! Core game loop that advances every subsystem once per frame in a fixed
//! order. The driver calls `step` with the real time elapsed since the last
//! frame and drains the returned events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use super::{combat, effects, enemy, invariants, player, projectile, wave};

/// Input commands for a single tick
///
/// Vectors are expected in [-1, 1] per axis; use `sanitized` when the source
/// is not already trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Discrete direction keys (no dead zone)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Movement stick
    pub movement: Vec2,
    /// Aim stick; past the dead zone it also auto-fires
    pub aim: Vec2,
    /// Fire button
    pub fire: bool,
    /// Discrete rotation keys
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Restart (only honored after game over)
    pub restart: bool,
}

impl TickInput {
    /// Replace non-finite components with zero and clamp to [-1, 1]
    pub fn sanitized(&self) -> Self {
        Self {
            movement: clamp_axis(self.movement),
            aim: clamp_axis(self.aim),
            ..*self
        }
    }
}

fn clamp_axis(v: Vec2) -> Vec2 {
    let clean = |c: f32| if c.is_finite() { c.clamp(-1.0, 1.0) } else { 0.0 };
    Vec2::new(clean(v.x), clean(v.y))
}

/// Events produced by one step, in the order they happened
pub type FrameEvents = Vec<GameEvent>;

/// Advance the game by one frame of `elapsed_ms` real time
///
/// Non-finite, negative or zero elapsed time is a zero-length tick.
pub fn step(state: &mut GameState, input: &TickInput, elapsed_ms: f32) -> FrameEvents {
    let mut events = FrameEvents::new();

    if input.restart && state.is_game_over() {
        let seed = state.seed;
        restart(state, None);
        events.push(GameEvent::Restarted { seed });
        return events;
    }

    let elapsed_ms = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
        elapsed_ms
    } else {
        0.0
    };
    let dt = elapsed_ms / 1000.0;
    state.clock_ms += elapsed_ms as f64;
    state.time_ticks += 1;

    if state.is_game_over() {
        // Frozen: only cosmetic effects keep running
        effects::update_explosions(state, dt);
    } else {
        enemy::spawn_enemies(state);
        player::update_player(state, input, dt, &mut events);
        projectile::update_bullets(state, dt);
        enemy::update_enemies(state, dt);
        effects::update_explosions(state, dt);

        let combat_start = events.len();
        combat::resolve_bullet_hits(state, &mut events);
        combat::resolve_player_contact(state, &mut events);
        effects::emit_kill_feedback(state, &events[combat_start..]);

        wave::update_wave(state, &mut events);
    }

    effects::update_shake(state, elapsed_ms);

    debug_assert_eq!(invariants::check(state), Ok(()));

    events
}

/// Reset to the initial state, keeping the tuning
///
/// Reuses the run's seed unless a new one is given.
pub fn restart(state: &mut GameState, seed: Option<u64>) {
    let seed = seed.unwrap_or(state.seed);
    let tuning = std::mem::take(&mut state.tuning);
    *state = GameState::with_tuning(seed, tuning);
    log::info!("Game restarted (seed {})", seed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EnemyKind, GamePhase, KillCause};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const FRAME_MS: f32 = 16.0;

    fn arena_center(state: &GameState) -> Vec2 {
        state.arena_size() / 2.0
    }

    #[test]
    fn test_contact_kill_scenario() {
        let mut state = GameState::new(12345);
        let center = arena_center(&state);
        assert_eq!(state.player.pos, center);

        // Adjacent and overlapping
        let enemy_id = state.spawn_enemy_at(EnemyKind::Normal, center + Vec2::new(15.0, 0.0));

        let events = step(&mut state, &TickInput::default(), FRAME_MS);

        assert_eq!(state.player.hp, 90);
        assert_eq!(state.score, 50);
        assert!(state.enemies.is_empty());
        assert_eq!(state.total_kills, 1);
        assert_eq!(state.explosions.len(), 1);

        let killed_at = events
            .iter()
            .find_map(|e| match e {
                GameEvent::EnemyKilled { id, pos, cause, points, .. } => {
                    assert_eq!(*id, enemy_id);
                    assert_eq!(*cause, KillCause::Contact);
                    assert_eq!(*points, 50);
                    Some(*pos)
                }
                _ => None,
            })
            .expect("kill event");
        assert_eq!(state.explosions[0].origin, killed_at);
        assert!(killed_at.distance(center + Vec2::new(15.0, 0.0)) < 2.0);
        assert!(events.contains(&GameEvent::PlayerDamaged { damage: 10, hp: 90 }));
    }

    #[test]
    fn test_wave_completes_then_advances() {
        let mut state = GameState::new(7);
        state.wave.spawned = 8;
        state.wave.killed = 8;

        let events = step(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase(), GamePhase::WaveComplete);
        assert!(events.contains(&GameEvent::WaveComplete { wave: 1 }));

        // Not yet
        step(&mut state, &TickInput::default(), 2000.0);
        assert_eq!(state.wave.number, 1);

        let events = step(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.wave.number, 2);
        assert_eq!(state.wave.quota, 12);
        assert_eq!(state.wave.spawned, 0);
        assert_eq!(state.wave.killed, 0);
        assert!(events.contains(&GameEvent::WaveStarted { wave: 2, quota: 12 }));
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut state = GameState::new(1);
        state.player.hp = 10;
        let center = arena_center(&state);
        state.spawn_enemy_at(EnemyKind::Tank, center);

        let events = step(&mut state, &TickInput::default(), FRAME_MS);
        assert!(state.is_game_over());
        assert_eq!(state.player.hp, 0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));

        // Nothing moves any more, input is ignored
        let player_pos = state.player.pos;
        let enemy_pos = state.enemies[0].pos;
        let input = TickInput {
            right: true,
            fire: true,
            ..Default::default()
        };
        let events = step(&mut state, &input, 500.0);
        assert!(events.is_empty());
        assert_eq!(state.player.pos, player_pos);
        assert_eq!(state.enemies[0].pos, enemy_pos);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.hp, 0);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(99);
        // Play a while with auto-fire so there is something to reset
        let input = TickInput {
            aim: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        for _ in 0..600 {
            step(&mut state, &input, FRAME_MS);
        }
        state.score = 1234;
        state.wave.number = 4;
        state.player.hp = 0;
        state.wave.phase = GamePhase::GameOver;

        let events = step(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            FRAME_MS,
        );
        assert_eq!(events, vec![GameEvent::Restarted { seed: 99 }]);

        let fresh = GameState::new(99);
        assert_eq!(state.score, 0);
        assert_eq!(state.wave.number, 1);
        assert_eq!(state.wave.quota, fresh.wave.quota);
        assert_eq!(state.player.hp, state.player.max_hp);
        assert_eq!(state.player.pos, fresh.player.pos);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.explosions.is_empty());
        assert_eq!(state.clock_ms, 0.0);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = GameState::new(5);
        state.score = 10;
        let events = step(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            FRAME_MS,
        );
        assert!(events.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_bad_elapsed_is_zero_tick() {
        let mut state = GameState::new(3);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        let start = state.player.pos;
        for elapsed in [0.0, -16.0, f32::NAN, f32::INFINITY] {
            step(&mut state, &input, elapsed);
        }
        assert_eq!(state.player.pos, start);
        assert_eq!(state.clock_ms, 0.0);
    }

    #[test]
    fn test_first_spawn_after_spawn_rate() {
        let mut state = GameState::new(42);
        for _ in 0..50 {
            step(&mut state, &TickInput::default(), FRAME_MS);
        }
        // 800 ms elapsed exactly: still waiting
        assert_eq!(state.wave.spawned, 0);
        step(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.wave.spawned, 1);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                aim: Vec2::new(0.5, 0.5),
                ..Default::default()
            },
            TickInput {
                left: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..900 {
            let input = &inputs[i % inputs.len()];
            let e1 = step(&mut state1, input, FRAME_MS);
            let e2 = step(&mut state2, input, FRAME_MS);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    #[test]
    fn test_sanitized_input() {
        let input = TickInput {
            movement: Vec2::new(f32::NAN, 3.0),
            aim: Vec2::new(f32::NEG_INFINITY, -0.5),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(input.movement, Vec2::new(0.0, 1.0));
        assert_eq!(input.aim, Vec2::new(0.0, -0.5));
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            any::<[bool; 7]>(),
            (-1.0f32..1.0, -1.0f32..1.0),
            (-1.0f32..1.0, -1.0f32..1.0),
        )
            .prop_map(|(keys, (mx, my), (ax, ay))| TickInput {
                up: keys[0],
                down: keys[1],
                left: keys[2],
                right: keys[3],
                fire: keys[4],
                rotate_left: keys[5],
                rotate_right: keys[6],
                movement: Vec2::new(mx, my),
                aim: Vec2::new(ax, ay),
                restart: false,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn hp_stays_in_range(
            seed in any::<u64>(),
            inputs in proptest::collection::vec((arb_input(), 0.0f32..100.0), 1..400),
        ) {
            let mut tuning = Tuning::default();
            tuning.waves.max_simultaneous_spawn = 4;
            let mut state = GameState::with_tuning(seed, tuning);
            for (input, elapsed) in &inputs {
                prop_assert!(state.player.hp >= 0 && state.player.hp <= state.player.max_hp);
                step(&mut state, input, *elapsed);
                prop_assert!(state.player.hp >= 0 && state.player.hp <= state.player.max_hp);
                prop_assert!(state.enemies.iter().all(|e| e.hp > 0));
                prop_assert!(state.wave.spawned <= state.wave.quota);
            }
        }
    }
}
