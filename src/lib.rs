//! Wave Shooter - top-down wave survival shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (player, enemies, bullets, waves, effects)
//! - `input`: Input boundary (raw device state -> clean per-tick input)
//! - `snapshot`: Read-only views for renderers
//! - `audio`: Sound cue mapping for game events
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod input;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use error::{ConfigError, RuleCode};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 220.0; // px/s
    pub const PLAYER_ROTATION_SPEED: f32 = 180.0; // deg/s
    pub const PLAYER_MAX_HP: i32 = 100;
    /// HP lost per enemy contact
    pub const CONTACT_DAMAGE: i32 = 10;
    /// Invulnerability window after a hit (ms)
    pub const DAMAGE_INTERVAL_MS: f64 = 500.0;
    /// Minimum time between shots (ms)
    pub const SHOT_COOLDOWN_MS: f64 = 150.0;

    /// Input dead zones
    pub const MOVE_DEAD_ZONE: f32 = 0.1;
    pub const AIM_DEAD_ZONE: f32 = 0.2;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 800.0;
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 8.0;

    /// Spawning
    pub const SPAWN_RATE_MS: f64 = 800.0;
    /// Enemies further than this outside the arena are dropped
    pub const CULL_MARGIN: f32 = 100.0;

    /// Waves
    pub const BASE_WAVE_QUOTA: f32 = 8.0;
    pub const WAVE_QUOTA_GROWTH: f32 = 1.5;
    pub const MAX_SIMULTANEOUS_SPAWN: u32 = 4;
    pub const NEXT_WAVE_DELAY_MS: f64 = 3000.0;

    /// Explosions
    pub const SPARK_COUNT: usize = 8;
    pub const SMOKE_COUNT: usize = 4;
    pub const PARTICLE_SPEED: f32 = 150.0;
    pub const PARTICLE_LIFETIME: f32 = 0.8; // seconds
    pub const PARTICLE_SIZE: f32 = 3.0;
    /// Upward acceleration applied to smoke (px/s²)
    pub const SMOKE_LIFT: f32 = 50.0;
    /// Per-tick horizontal damping for smoke
    pub const SMOKE_DRAG: f32 = 0.995;

    /// Screen shake pulse on kills
    pub const SHAKE_INTENSITY: f32 = 6.0;
    pub const SHAKE_DURATION_MS: f32 = 150.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit heading for an orientation in degrees (0° = +x, 90° = +y)
#[inline]
pub fn heading_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Orientation in degrees for a direction vector, normalized to [0, 360)
#[inline]
pub fn degrees_from_vector(dir: Vec2) -> f32 {
    normalize_degrees(dir.y.atan2(dir.x).to_degrees())
}
