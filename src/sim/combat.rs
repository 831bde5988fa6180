//! Collision and combat resolution
//!
//! Bullets damage enemies, enemies ram the player. All HP, score and kill
//! bookkeeping happens here; visual feedback is left to the events.

use super::state::{GameEvent, GamePhase, GameState, KillCause};

/// Damage a bullet or a ramming deals to an enemy
const HIT_DAMAGE: i32 = 1;

/// Resolve bullet/enemy overlaps
///
/// Each bullet hits at most one enemy (the first it overlaps) and is consumed.
pub fn resolve_bullet_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut i = 0;
    while i < state.bullets.len() {
        let bullet_box = state.bullets[i].aabb();
        let Some(target) = state
            .enemies
            .iter()
            .position(|enemy| enemy.aabb().overlaps(&bullet_box))
        else {
            i += 1;
            continue;
        };

        state.bullets.remove(i);
        state.enemies[target].hp -= HIT_DAMAGE;
        if state.enemies[target].hp <= 0 {
            let points = state.enemies[target].score;
            kill_enemy(state, target, points, KillCause::Bullet, events);
        }
    }
}

/// Resolve player/enemy contact
///
/// At most one hit per tick, and none while the player is still inside the
/// invulnerability window of the previous hit.
pub fn resolve_player_contact(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let now = state.clock_ms;
    if !state.player.can_take_damage(now) {
        return;
    }

    let player_box = state.player.aabb();
    let Some(target) = state
        .enemies
        .iter()
        .position(|enemy| enemy.aabb().overlaps(&player_box))
    else {
        return;
    };

    let damage = state.tuning.player.contact_damage;
    state.player.hp -= damage;
    state.player.last_damage_ms = Some(now);
    events.push(GameEvent::PlayerDamaged {
        damage,
        hp: state.player.hp.max(0),
    });

    state.enemies[target].hp -= HIT_DAMAGE;
    if state.enemies[target].hp <= 0 {
        // Ramming only pays half
        let points = state.enemies[target].score / 2;
        kill_enemy(state, target, points, KillCause::Contact, events);
    }

    if state.player.hp <= 0 {
        state.player.hp = 0;
        state.wave.phase = GamePhase::GameOver;
        log::info!(
            "Game over on wave {} with score {} ({} kills)",
            state.wave.number,
            state.score,
            state.total_kills
        );
        events.push(GameEvent::GameOver {
            score: state.score,
            wave: state.wave.number,
        });
    }
}

/// Remove a dead enemy and credit the kill
fn kill_enemy(
    state: &mut GameState,
    index: usize,
    points: u32,
    cause: KillCause,
    events: &mut Vec<GameEvent>,
) {
    let enemy = state.enemies.remove(index);
    state.score += points as u64;
    state.total_kills += 1;
    state.wave.killed += 1;

    log::debug!(
        "Killed {} #{} ({:?}) for {} points",
        enemy.kind.as_str(),
        enemy.id,
        cause,
        points
    );
    events.push(GameEvent::EnemyKilled {
        id: enemy.id,
        kind: enemy.kind,
        pos: enemy.pos,
        points,
        cause,
    });
}
