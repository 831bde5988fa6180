//! Game state and core simulation types
//!
//! Everything the simulation reads or writes between steps lives in
//! `GameState`. Entities never hold references to one another.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::heading_from_degrees;
use crate::tuning::{EnemyTable, EnemyTemplate, PlayerTuning, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Enemies spawn and fight
    Playing,
    /// Wave quota cleared, waiting for the next wave
    WaveComplete,
    /// Player died; only a restart leaves this phase
    GameOver,
}

/// Why an enemy died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillCause {
    /// Shot down (full score)
    Bullet,
    /// Rammed the player (half score)
    Contact,
}

/// Things that happened during a step, drained by audio/render collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired {
        pos: Vec2,
        vel: Vec2,
    },
    EnemyKilled {
        id: u32,
        kind: EnemyKind,
        pos: Vec2,
        points: u32,
        cause: KillCause,
    },
    PlayerDamaged {
        damage: i32,
        hp: i32,
    },
    WaveComplete {
        wave: u32,
    },
    WaveStarted {
        wave: u32,
        quota: u32,
    },
    GameOver {
        score: u64,
        wave: u32,
    },
    Restarted {
        seed: u64,
    },
}

/// The player-controlled unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Box center
    pub pos: Vec2,
    pub size: Vec2,
    /// Orientation in degrees, always within [0, 360)
    pub angle: f32,
    pub speed: f32,
    pub rotation_speed: f32,
    pub max_hp: i32,
    pub hp: i32,
    /// Clock time of the last hit taken (None until first hit)
    pub last_damage_ms: Option<f64>,
    pub damage_interval_ms: f64,
    /// Clock time of the last successful shot (None until first shot)
    pub last_shot_ms: Option<f64>,
    pub shot_cooldown_ms: f64,
}

/// How long the damage flash lasts and how fast it blinks (ms)
const DAMAGE_FLASH_MS: f64 = 200.0;
const DAMAGE_FLASH_BLINK_MS: f64 = 50.0;

impl Player {
    /// Player centered in the arena, facing +x, at full health
    pub fn new(tuning: &PlayerTuning, arena_size: Vec2) -> Self {
        Self {
            pos: arena_size / 2.0,
            size: Vec2::splat(tuning.size),
            angle: 0.0,
            speed: tuning.speed,
            rotation_speed: tuning.rotation_speed,
            max_hp: tuning.max_hp,
            hp: tuning.max_hp,
            last_damage_ms: None,
            damage_interval_ms: tuning.damage_interval_ms,
            last_shot_ms: None,
            shot_cooldown_ms: tuning.shot_cooldown_ms,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Unit facing direction; bullets and the facing indicator both use this
    pub fn heading(&self) -> Vec2 {
        heading_from_degrees(self.angle)
    }

    /// Whether the invulnerability window since the last hit has passed
    pub fn can_take_damage(&self, now_ms: f64) -> bool {
        match self.last_damage_ms {
            None => true,
            Some(last) => now_ms - last > self.damage_interval_ms,
        }
    }

    /// Whether the weapon cooldown since the last shot has passed
    pub fn can_fire(&self, now_ms: f64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms - last > self.shot_cooldown_ms,
        }
    }

    /// Damage flash: blinks for a short time after each hit
    pub fn is_flashing(&self, now_ms: f64) -> bool {
        match self.last_damage_ms {
            None => false,
            Some(last) => {
                let since = now_ms - last;
                since < DAMAGE_FLASH_MS && (since / DAMAGE_FLASH_BLINK_MS).floor() as i64 % 2 == 0
            }
        }
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    Tank,
    Fast,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Tank, EnemyKind::Fast];

    /// Resolve this variant's parameters
    pub fn template(self, table: &EnemyTable) -> EnemyTemplate {
        match self {
            EnemyKind::Normal => table.normal,
            EnemyKind::Tank => table.tank,
            EnemyKind::Fast => table.fast,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "normal",
            EnemyKind::Tank => "tank",
            EnemyKind::Fast => "fast",
        }
    }
}

/// An enemy instance; template values are copied in at spawn time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub color: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub score: u32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, template: &EnemyTemplate, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: Vec2::new(template.width, template.height),
            speed: template.speed,
            color: template.color,
            hp: template.hp,
            max_hp: template.hp,
            score: template.score,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    pub fn hp_ratio(&self) -> f32 {
        (self.hp.max(0) as f32 / self.max_hp.max(1) as f32).min(1.0)
    }
}

/// Particle kinds; only velocity decay differs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Spark,
    /// Slows sideways and rises
    Smoke,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime (seconds)
    pub life: f32,
    /// Lifetime at birth (seconds)
    pub max_life: f32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Remaining life in [0, 1] for fading
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// A burst of particles; dropped once every particle has died
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub origin: Vec2,
    pub particles: Vec<Particle>,
}

/// Wave progression counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveState {
    /// 1-based wave number
    pub number: u32,
    /// Enemies this wave must spawn and kill
    pub quota: u32,
    pub spawned: u32,
    pub killed: u32,
    /// Max enemies per spawn attempt
    pub spawn_cap: u32,
    pub phase: GamePhase,
    /// Clock time the wave was cleared
    pub completed_at_ms: Option<f64>,
    /// Clock time of the last spawn attempt
    pub last_spawn_ms: f64,
}

/// Cosmetic camera shake, decaying linearly to zero
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    pub intensity: f32,
    pub remaining_ms: f32,
    pub duration_ms: f32,
    /// Current jitter offset for the camera
    pub offset: Vec2,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Game balance this run uses
    pub tuning: Tuning,
    /// Simulation clock (ms since start/restart)
    pub clock_ms: f64,
    /// Simulation step counter
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub wave: WaveState,
    pub score: u64,
    /// Kills across all waves
    pub total_kills: u32,
    pub shake: ScreenShake,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game with the given balance
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(&tuning.player, Vec2::new(tuning.arena.width, tuning.arena.height));
        let wave = WaveState::first(&tuning);
        Self {
            seed,
            tuning,
            clock_ms: 0.0,
            time_ticks: 0,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            wave,
            score: 0,
            total_kills: 0,
            shake: ScreenShake::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> GamePhase {
        self.wave.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.wave.phase == GamePhase::GameOver
    }

    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.tuning.arena.width, self.tuning.arena.height)
    }

    /// Nearest living enemy to a point (recomputed on every call)
    pub fn nearest_enemy(&self, point: Vec2) -> Option<&Enemy> {
        self.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(point)
                .partial_cmp(&b.pos.distance_squared(point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Place an enemy directly (tests and scripted scenarios)
    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let template = kind.template(&self.tuning.enemies);
        self.enemies.push(Enemy::new(id, kind, &template, pos));
        id
    }
}
