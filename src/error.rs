//! Error types for Bubble Arena.
//!
//! The simulation itself never fails; the only reportable errors come from
//! building or loading a configuration.

use std::fmt;

/// Errors raised while validating or loading simulation settings.
#[derive(Debug)]
pub enum ConfigError {
    /// A length or speed that must be positive and finite was not.
    NonPositive { field: &'static str, value: f64 },
    /// A coordinate was NaN or infinite.
    NonFinite { field: &'static str },
    /// Particle radius is not smaller than the arena radius.
    ParticleTooLarge { particle_radius: f64, arena_radius: f64 },
    /// Population cap cannot hold the initial seeds.
    CapBelowSeedCount { max_particles: usize, seed_count: usize },
    /// A cooldown debounce must suppress for at least one tick.
    ZeroCooldown,
    /// An explicitly supplied seed does not fit inside the arena.
    SeedOutsideArena { index: usize },
    /// Failed to read or write a settings file.
    Io(std::io::Error),
    /// Settings file is not valid JSON for `Settings`.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive and finite, got {}", field, value)
            }
            ConfigError::NonFinite { field } => write!(f, "{} must be finite", field),
            ConfigError::ParticleTooLarge {
                particle_radius,
                arena_radius,
            } => write!(
                f,
                "particle radius {} must be smaller than arena radius {}",
                particle_radius, arena_radius
            ),
            ConfigError::CapBelowSeedCount {
                max_particles,
                seed_count,
            } => write!(
                f,
                "max_particles ({}) must be at least seed_count ({})",
                max_particles, seed_count
            ),
            ConfigError::ZeroCooldown => write!(f, "cooldown debounce must be at least 1 tick"),
            ConfigError::SeedOutsideArena { index } => {
                write!(f, "seed {} is not contained in the arena", index)
            }
            ConfigError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
