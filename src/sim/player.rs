//! Player controller
//!
//! Applies one tick of input to the player's orientation, weapon and
//! position. The player is frozen once the game is over.

use glam::Vec2;

use super::state::{Bullet, GameEvent, GameState};
use super::tick::TickInput;
use crate::{degrees_from_vector, normalize_degrees};

/// Apply input to the player for one tick of `dt` seconds
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    if state.is_game_over() {
        return;
    }

    let move_dead_zone = state.tuning.player.move_dead_zone;
    let aim_dead_zone = state.tuning.player.aim_dead_zone;

    // Orientation: aim stick snaps and auto-fires, otherwise rotate keys
    if input.aim.length() > aim_dead_zone {
        state.player.angle = degrees_from_vector(input.aim);
        try_fire(state, events);
    } else {
        let rotation = state.player.rotation_speed * dt;
        if input.rotate_left {
            state.player.angle -= rotation;
        }
        if input.rotate_right {
            state.player.angle += rotation;
        }
    }
    state.player.angle = normalize_degrees(state.player.angle);

    if input.fire {
        try_fire(state, events);
    }

    // Keys and stick add up independently per axis
    let move_distance = state.player.speed * dt;
    let mut delta = Vec2::ZERO;
    if input.up {
        delta.y -= move_distance;
    }
    if input.down {
        delta.y += move_distance;
    }
    if input.left {
        delta.x -= move_distance;
    }
    if input.right {
        delta.x += move_distance;
    }
    if input.movement.x.abs() > move_dead_zone {
        delta.x += input.movement.x * move_distance;
    }
    if input.movement.y.abs() > move_dead_zone {
        delta.y += input.movement.y * move_distance;
    }

    let arena = state.arena_size();
    let player = &mut state.player;
    player.pos = clamp_to_arena(player.pos + delta, player.size, arena);
}

/// Keep a box of `size` centered at `pos` fully inside the arena
pub fn clamp_to_arena(pos: Vec2, size: Vec2, arena: Vec2) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        pos.x.min(arena.x - half.x).max(half.x),
        pos.y.min(arena.y - half.y).max(half.y),
    )
}

/// Fire one bullet along the player's heading if the cooldown allows
///
/// Returns whether a shot was fired.
pub fn try_fire(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let now = state.clock_ms;
    if !state.player.can_fire(now) {
        return false;
    }

    let pos = state.player.pos;
    let vel = state.player.heading() * state.tuning.bullet.speed;
    let size = Vec2::new(state.tuning.bullet.width, state.tuning.bullet.height);
    let id = state.next_entity_id();
    state.bullets.push(Bullet { id, pos, size, vel });
    state.player.last_shot_ms = Some(now);

    log::trace!("Shot fired at ({:.1}, {:.1}) angle {:.1}", pos.x, pos.y, state.player.angle);
    events.push(GameEvent::ShotFired { pos, vel });
    true
}
