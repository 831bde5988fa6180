//! Input boundary
//!
//! Collects raw device state between frames (held keys, virtual sticks,
//! key presses) and turns it into one clean `TickInput` per step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, TickInput};

/// Bound keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    RotateLeft,
    RotateRight,
    Fire,
    Restart,
}

impl Key {
    /// Map a DOM-style key code (`KeyboardEvent.code`) to a binding
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Up),
            "KeyS" => Some(Self::Down),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            "ArrowLeft" => Some(Self::RotateLeft),
            "ArrowRight" => Some(Self::RotateRight),
            "Space" => Some(Self::Fire),
            "KeyR" => Some(Self::Restart),
            _ => None,
        }
    }
}

/// Device state accumulated since the last step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Virtual movement stick, may be unclamped or NaN
    pub movement: Vec2,
    /// Virtual aim stick
    pub aim: Vec2,
    /// Fire presses since the last step
    pub fire_pressed: bool,
    /// Restart presses since the last step
    pub restart_pressed: bool,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::RotateLeft => self.rotate_left = true,
            Key::RotateRight => self.rotate_right = true,
            Key::Fire => self.fire_pressed = true,
            Key::Restart => self.restart_pressed = true,
        }
    }

    /// Presses are latched until the next step, so releasing them is a no-op
    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::RotateLeft => self.rotate_left = false,
            Key::RotateRight => self.rotate_right = false,
            Key::Fire | Key::Restart => {}
        }
    }

    pub fn set_movement(&mut self, x: f32, y: f32) {
        self.movement = Vec2::new(x, y);
    }

    pub fn set_aim(&mut self, x: f32, y: f32) {
        self.aim = Vec2::new(x, y);
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for one step without touching the latches
    pub fn peek(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            movement: self.movement,
            aim: self.aim,
            fire: self.fire_pressed,
            rotate_left: self.rotate_left,
            rotate_right: self.rotate_right,
            restart: self.restart_pressed,
        }
        .sanitized()
    }

    /// Sanitized input for the next step; clears the one-shot presses
    pub fn into_tick_input(&mut self) -> TickInput {
        let input = self.peek();
        self.fire_pressed = false;
        self.restart_pressed = false;
        input
    }

    /// React to what the last step did
    ///
    /// Game over zeroes both sticks so a touch that was held at the moment of
    /// death does not carry into the next run.
    pub fn apply_events(&mut self, events: &[GameEvent]) {
        if events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
            self.movement = Vec2::ZERO;
            self.aim = Vec2::ZERO;
            log::debug!("Virtual sticks reset after game over");
        }
    }
}
