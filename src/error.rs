//! Error types
//!
//! The simulation itself cannot fail; errors only come from loading
//! configuration or from invariant checks in test/debug builds.

use std::fmt;

/// Invariants the simulation must hold after every step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    PlayerHpRange,
    PlayerBounds,
    PlayerAngleRange,
    WaveNumberNonZero,
    WaveSpawnedWithinQuota,
    WaveSpawnCapRange,
    EnemyHpPositive,
    ExplosionNonEmpty,
    GameOverHasZeroHp,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerHpRange => write!(f, "PLAYER_HP_RANGE"),
            Self::PlayerBounds => write!(f, "PLAYER_BOUNDS"),
            Self::PlayerAngleRange => write!(f, "PLAYER_ANGLE_RANGE"),
            Self::WaveNumberNonZero => write!(f, "WAVE_NUMBER_NONZERO"),
            Self::WaveSpawnedWithinQuota => write!(f, "WAVE_SPAWNED_WITHIN_QUOTA"),
            Self::WaveSpawnCapRange => write!(f, "WAVE_SPAWN_CAP_RANGE"),
            Self::EnemyHpPositive => write!(f, "ENEMY_HP_POSITIVE"),
            Self::ExplosionNonEmpty => write!(f, "EXPLOSION_NON_EMPTY"),
            Self::GameOverHasZeroHp => write!(f, "GAME_OVER_HAS_ZERO_HP"),
        }
    }
}

impl std::error::Error for RuleCode {}

/// Failure to load or validate a `Tuning` file
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "failed to parse tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
