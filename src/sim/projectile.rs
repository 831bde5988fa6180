//! Bullet movement

use super::collision::outside_arena;
use super::state::GameState;

/// Advance bullets in a straight line and drop those that left the arena
pub fn update_bullets(state: &mut GameState, dt: f32) {
    let arena = state.arena_size();
    state.bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel * dt;
        !outside_arena(bullet.pos, arena, 0.0)
    });
}
