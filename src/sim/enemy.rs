//! Enemy spawning and pursuit AI

use glam::Vec2;
use rand::Rng;

use super::collision::outside_arena;
use super::state::{Enemy, EnemyKind, GamePhase, GameState};

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Center position for a box of `size` just outside this edge
    ///
    /// `t` in [0, 1) picks the point along the edge.
    pub fn spawn_point(self, t: f32, size: Vec2, arena: Vec2) -> Vec2 {
        let half = size / 2.0;
        match self {
            Edge::Top => Vec2::new(t * arena.x, -half.y),
            Edge::Right => Vec2::new(arena.x + half.x, t * arena.y),
            Edge::Bottom => Vec2::new(t * arena.x, arena.y + half.y),
            Edge::Left => Vec2::new(-half.x, t * arena.y),
        }
    }
}

/// Run the spawn timer; spawns a batch when the wave still needs enemies
pub fn spawn_enemies(state: &mut GameState) {
    let now = state.clock_ms;
    let wave = &state.wave;
    if wave.phase != GamePhase::Playing
        || wave.spawned >= wave.quota
        || now - wave.last_spawn_ms <= state.tuning.spawn.spawn_rate_ms
    {
        return;
    }

    let remaining = wave.quota - wave.spawned;
    let batch = state.rng.random_range(1..=wave.spawn_cap.max(1)).min(remaining);
    for _ in 0..batch {
        spawn_random_enemy(state);
    }
    state.wave.spawned += batch;
    state.wave.last_spawn_ms = now;
}

/// Spawn one enemy of a random kind on a random edge
fn spawn_random_enemy(state: &mut GameState) {
    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];
    let edge = Edge::ALL[state.rng.random_range(0..Edge::ALL.len())];
    let t: f32 = state.rng.random();

    let template = kind.template(&state.tuning.enemies);
    let size = Vec2::new(template.width, template.height);
    let pos = edge.spawn_point(t, size, state.arena_size());
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(id, kind, &template, pos));

    log::debug!(
        "Spawned {} #{} at ({:.0}, {:.0}) from {:?}",
        kind.as_str(),
        id,
        pos.x,
        pos.y,
        edge
    );
}

/// Move every enemy straight toward the player and drop strays
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        let to_player = target - enemy.pos;
        let distance = to_player.length();
        if distance > 0.0 {
            enemy.pos += to_player / distance * enemy.speed * dt;
        }
    }

    let arena = state.arena_size();
    let margin = state.tuning.spawn.cull_margin;
    let before = state.enemies.len();
    state.enemies.retain(|e| !outside_arena(e.pos, arena, margin));
    let culled = (before - state.enemies.len()) as u32;
    if culled > 0 {
        // Culled enemies go back into the quota so the wave can still finish
        state.wave.spawned = state.wave.spawned.saturating_sub(culled);
        log::debug!("Culled {} enemies outside the arena", culled);
    }
}
