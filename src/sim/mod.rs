//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick::step`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each entity store)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod combat;
pub mod effects;
pub mod enemy;
pub mod invariants;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::Aabb;
pub use state::{
    Bullet, Enemy, EnemyKind, Explosion, GameEvent, GamePhase, GameState, KillCause, Particle,
    ParticleKind, Player, ScreenShake, WaveState,
};
pub use tick::{FrameEvents, TickInput, restart, step};
