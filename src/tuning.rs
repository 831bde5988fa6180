//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes from a `Tuning`.
//! Defaults mirror `crate::consts`; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Arena dimensions (same units as all positions and speeds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Player movement, health and weapon parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Square box edge length
    pub size: f32,
    /// Movement speed (px/s)
    pub speed: f32,
    /// Keyboard rotation speed (deg/s)
    pub rotation_speed: f32,
    pub max_hp: i32,
    /// HP lost per enemy contact
    pub contact_damage: i32,
    pub damage_interval_ms: f64,
    pub shot_cooldown_ms: f64,
    /// Per-axis dead zone for the movement stick
    pub move_dead_zone: f32,
    /// Magnitude dead zone for the aim stick
    pub aim_dead_zone: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            rotation_speed: PLAYER_ROTATION_SPEED,
            max_hp: PLAYER_MAX_HP,
            contact_damage: CONTACT_DAMAGE,
            damage_interval_ms: DAMAGE_INTERVAL_MS,
            shot_cooldown_ms: SHOT_COOLDOWN_MS,
            move_dead_zone: MOVE_DEAD_ZONE,
            aim_dead_zone: AIM_DEAD_ZONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            speed: BULLET_SPEED,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
        }
    }
}

/// Immutable per-variant enemy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    /// Pursuit speed (px/s)
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub hp: i32,
    pub score: u32,
}

/// Template for each enemy variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub normal: EnemyTemplate,
    pub tank: EnemyTemplate,
    pub fast: EnemyTemplate,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            normal: EnemyTemplate {
                speed: 90.0,
                width: 22.0,
                height: 22.0,
                color: 0xff4444,
                hp: 1,
                score: 100,
            },
            tank: EnemyTemplate {
                speed: 60.0,
                width: 32.0,
                height: 32.0,
                color: 0x8b0000,
                hp: 5,
                score: 250,
            },
            fast: EnemyTemplate {
                speed: 150.0,
                width: 16.0,
                height: 16.0,
                color: 0xff69b4,
                hp: 1,
                score: 150,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Minimum time between spawn attempts (ms)
    pub spawn_rate_ms: f64,
    /// Distance outside the arena beyond which enemies are culled
    pub cull_margin: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            spawn_rate_ms: SPAWN_RATE_MS,
            cull_margin: CULL_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Quota of wave 1
    pub base_quota: f32,
    /// Quota multiplier per wave
    pub quota_growth: f32,
    pub max_simultaneous_spawn: u32,
    pub next_wave_delay_ms: f64,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_quota: BASE_WAVE_QUOTA,
            quota_growth: WAVE_QUOTA_GROWTH,
            max_simultaneous_spawn: MAX_SIMULTANEOUS_SPAWN,
            next_wave_delay_ms: NEXT_WAVE_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    pub spark_count: usize,
    pub smoke_count: usize,
    pub particle_speed: f32,
    /// Base particle lifetime (seconds)
    pub particle_lifetime: f32,
    pub particle_size: f32,
    pub smoke_lift: f32,
    pub smoke_drag: f32,
    pub smoke_color: u32,
    /// Spark palette (0xRRGGBB)
    pub spark_colors: Vec<u32>,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            spark_count: SPARK_COUNT,
            smoke_count: SMOKE_COUNT,
            particle_speed: PARTICLE_SPEED,
            particle_lifetime: PARTICLE_LIFETIME,
            particle_size: PARTICLE_SIZE,
            smoke_lift: SMOKE_LIFT,
            smoke_drag: SMOKE_DRAG,
            smoke_color: 0x666666,
            spark_colors: vec![0xff6600, 0xff9900, 0xffcc00, 0xff3300, 0xffff00],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeTuning {
    pub intensity: f32,
    pub duration_ms: f32,
}

impl Default for ShakeTuning {
    fn default() -> Self {
        Self {
            intensity: SHAKE_INTENSITY,
            duration_ms: SHAKE_DURATION_MS,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub enemies: EnemyTable,
    pub spawn: SpawnTuning,
    pub waves: WaveTuning,
    pub explosion: ExplosionTuning,
    pub shake: ShakeTuning,
}

impl Tuning {
    /// Default balance for a custom arena size
    pub fn with_arena(width: f32, height: f32) -> Self {
        let mut tuning = Self::default();
        tuning.arena = ArenaTuning { width, height };
        tuning
    }

    /// Parse and validate tuning from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and greater than zero",
                })
            }
        }
        fn non_negative(value: f64, field: &'static str) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and not negative",
                })
            }
        }

        positive(self.arena.width, "arena.width")?;
        positive(self.arena.height, "arena.height")?;
        positive(self.player.size, "player.size")?;
        if self.player.size > self.arena.width || self.player.size > self.arena.height {
            return Err(ConfigError::Invalid {
                field: "player.size",
                reason: "player must fit inside the arena",
            });
        }
        non_negative(self.player.speed as f64, "player.speed")?;
        non_negative(self.player.rotation_speed as f64, "player.rotation_speed")?;
        if self.player.max_hp <= 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_hp",
                reason: "must be greater than zero",
            });
        }
        if self.player.contact_damage < 0 {
            return Err(ConfigError::Invalid {
                field: "player.contact_damage",
                reason: "must not be negative",
            });
        }
        non_negative(self.player.damage_interval_ms, "player.damage_interval_ms")?;
        non_negative(self.player.shot_cooldown_ms, "player.shot_cooldown_ms")?;

        non_negative(self.bullet.speed as f64, "bullet.speed")?;
        positive(self.bullet.width, "bullet.width")?;
        positive(self.bullet.height, "bullet.height")?;

        for (field, template) in [
            ("enemies.normal", &self.enemies.normal),
            ("enemies.tank", &self.enemies.tank),
            ("enemies.fast", &self.enemies.fast),
        ] {
            positive(template.width, field)?;
            positive(template.height, field)?;
            non_negative(template.speed as f64, field)?;
            if template.hp <= 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "hp must be greater than zero",
                });
            }
        }

        non_negative(self.spawn.spawn_rate_ms, "spawn.spawn_rate_ms")?;
        non_negative(self.spawn.cull_margin as f64, "spawn.cull_margin")?;

        if !(self.waves.base_quota.is_finite() && self.waves.base_quota >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "waves.base_quota",
                reason: "must be at least one enemy",
            });
        }
        if !(self.waves.quota_growth.is_finite() && self.waves.quota_growth >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "waves.quota_growth",
                reason: "waves must not shrink",
            });
        }
        if self.waves.max_simultaneous_spawn == 0 {
            return Err(ConfigError::Invalid {
                field: "waves.max_simultaneous_spawn",
                reason: "must be at least one",
            });
        }
        non_negative(self.waves.next_wave_delay_ms, "waves.next_wave_delay_ms")?;

        if self.explosion.spark_count + self.explosion.smoke_count == 0 {
            return Err(ConfigError::Invalid {
                field: "explosion.spark_count",
                reason: "an explosion needs at least one particle",
            });
        }
        if self.explosion.spark_count > 0 && self.explosion.spark_colors.is_empty() {
            return Err(ConfigError::Invalid {
                field: "explosion.spark_colors",
                reason: "palette must not be empty",
            });
        }
        positive(self.explosion.particle_lifetime, "explosion.particle_lifetime")?;
        non_negative(self.shake.duration_ms as f64, "shake.duration_ms")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
        assert_eq!(Tuning::default().arena.width, ARENA_WIDTH);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "arena": { "width": 1024 }, "player": { "max_hp": 50 } }"#)
            .expect("valid tuning");
        assert_eq!(tuning.arena.width, 1024.0);
        assert_eq!(tuning.arena.height, ARENA_HEIGHT);
        assert_eq!(tuning.player.max_hp, 50);
        assert_eq!(tuning.player.speed, PLAYER_SPEED);
        assert_eq!(tuning.enemies.tank.hp, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "arena": { "width": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "arena.width", .. }));

        let err = Tuning::from_json(r#"{ "waves": { "max_simultaneous_spawn": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "waves.max_simultaneous_spawn", .. }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse tuning JSON"));
    }

    #[test]
    fn test_roundtrip_json() {
        let tuning = Tuning::with_arena(640.0, 480.0);
        let json = serde_json::to_string(&tuning).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }
}
