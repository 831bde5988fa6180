//! Read-only frame views for renderers
//!
//! Flattens `GameState` into plain per-entity records (positions as
//! `[f32; 2]`, colors as `0xRRGGBB`) that a renderer can upload or a
//! headless driver can serialize. Nothing here mutates the simulation.

use serde::Serialize;

use crate::sim::{EnemyKind, GamePhase, GameState, ParticleKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    /// Degrees in [0, 360)
    pub angle: f32,
    /// Unit facing vector, same one bullets fly along
    pub heading: [f32; 2],
    pub hp: i32,
    pub max_hp: i32,
    pub hp_ratio: f32,
    /// Draw the damage flash this frame
    pub flashing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletView {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub vel: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: u32,
    pub hp: i32,
    /// Health bar fill in [0, 1]
    pub hp_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: [f32; 2],
    pub size: f32,
    pub color: u32,
    /// Fade in [0, 1]
    pub alpha: f32,
    pub smoke: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveView {
    pub number: u32,
    pub quota: u32,
    pub spawned: u32,
    pub killed: u32,
    pub phase: GamePhase,
    /// Countdown for the "next wave" banner
    pub next_wave_in_ms: Option<f64>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub arena: [f32; 2],
    pub clock_ms: f64,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub enemies: Vec<EnemyView>,
    pub particles: Vec<ParticleView>,
    pub wave: WaveView,
    pub score: u64,
    pub total_kills: u32,
    /// Camera offset to apply this frame
    pub shake_offset: [f32; 2],
    pub game_over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let now = state.clock_ms;
        let player = &state.player;

        let particles = state
            .explosions
            .iter()
            .flat_map(|e| &e.particles)
            .map(|p| ParticleView {
                pos: p.pos.to_array(),
                size: p.size,
                color: p.color,
                alpha: p.alpha(),
                smoke: p.kind == ParticleKind::Smoke,
            })
            .collect();

        Self {
            arena: state.arena_size().to_array(),
            clock_ms: now,
            player: PlayerView {
                pos: player.pos.to_array(),
                size: player.size.to_array(),
                angle: player.angle,
                heading: player.heading().to_array(),
                hp: player.hp,
                max_hp: player.max_hp,
                hp_ratio: player.hp_ratio(),
                flashing: player.is_flashing(now),
            },
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos.to_array(),
                    size: b.size.to_array(),
                    vel: b.vel.to_array(),
                })
                .collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    kind: e.kind,
                    pos: e.pos.to_array(),
                    size: e.size.to_array(),
                    color: e.color,
                    hp: e.hp,
                    hp_ratio: e.hp_ratio(),
                })
                .collect(),
            particles,
            wave: WaveView {
                number: state.wave.number,
                quota: state.wave.quota,
                spawned: state.wave.spawned,
                killed: state.wave.killed,
                phase: state.wave.phase,
                next_wave_in_ms: state
                    .wave
                    .next_wave_in_ms(now, state.tuning.waves.next_wave_delay_ms),
            },
            score: state.score,
            total_kills: state.total_kills,
            shake_offset: state.shake.offset.to_array(),
            game_over: state.is_game_over(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
