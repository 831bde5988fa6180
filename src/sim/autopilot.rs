//! Idle/demo autopilot
//!
//! Produces the input a simple bot would give: aim at the nearest enemy
//! (which auto-fires), back away when it gets close, otherwise drift back
//! toward the middle of the arena.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;

/// Enemies closer than this make the bot retreat (px)
const RETREAT_DISTANCE: f32 = 150.0;
/// No drifting while this close to the center (px)
const CENTER_SLACK: f32 = 40.0;

/// Input for the next step
pub fn idle_input(state: &GameState) -> TickInput {
    if state.is_game_over() {
        return TickInput {
            restart: true,
            ..Default::default()
        };
    }

    let me = state.player.pos;
    let Some(target) = state.nearest_enemy(me) else {
        return TickInput {
            movement: toward_center(state),
            ..Default::default()
        };
    };

    let to_enemy = target.pos - me;
    let aim = to_enemy.normalize_or_zero();
    let movement = if to_enemy.length() < RETREAT_DISTANCE {
        // Back off and sidestep so the bot doesn't pin itself in a corner
        let away = -aim;
        (away + away.perp() * 0.5).normalize_or_zero()
    } else {
        toward_center(state)
    };

    TickInput {
        movement,
        aim,
        ..Default::default()
    }
}

fn toward_center(state: &GameState) -> Vec2 {
    let offset = state.arena_size() / 2.0 - state.player.pos;
    if offset.length() <= CENTER_SLACK {
        Vec2::ZERO
    } else {
        offset.normalize()
    }
}
