//! Runtime invariant checks
//!
//! Run after every step in debug builds and from property tests.

use super::state::{GamePhase, GameState};
use crate::error::RuleCode;

/// Slack for float positions sitting exactly on the arena edge
const BOUNDS_EPSILON: f32 = 1e-3;

/// Verify the state is consistent; returns the first broken rule
pub fn check(state: &GameState) -> Result<(), RuleCode> {
    let player = &state.player;
    if player.hp < 0 || player.hp > player.max_hp {
        return Err(RuleCode::PlayerHpRange);
    }

    let half = player.size / 2.0;
    let arena = state.arena_size();
    let inside = player.pos.x >= half.x - BOUNDS_EPSILON
        && player.pos.y >= half.y - BOUNDS_EPSILON
        && player.pos.x <= arena.x - half.x + BOUNDS_EPSILON
        && player.pos.y <= arena.y - half.y + BOUNDS_EPSILON;
    if !inside {
        return Err(RuleCode::PlayerBounds);
    }

    if !(0.0..360.0).contains(&player.angle) {
        return Err(RuleCode::PlayerAngleRange);
    }

    let wave = &state.wave;
    if wave.number == 0 {
        return Err(RuleCode::WaveNumberNonZero);
    }
    if wave.spawned > wave.quota {
        return Err(RuleCode::WaveSpawnedWithinQuota);
    }
    if wave.spawn_cap == 0 || wave.spawn_cap > state.tuning.waves.max_simultaneous_spawn {
        return Err(RuleCode::WaveSpawnCapRange);
    }

    if state.enemies.iter().any(|e| e.hp <= 0) {
        return Err(RuleCode::EnemyHpPositive);
    }
    if state.explosions.iter().any(|e| e.particles.is_empty()) {
        return Err(RuleCode::ExplosionNonEmpty);
    }

    let game_over = wave.phase == GamePhase::GameOver;
    if game_over != (player.hp == 0) {
        return Err(RuleCode::GameOverHasZeroHp);
    }

    Ok(())
}
