//! Simulation settings and variant presets
//!
//! Persisted as JSON. Validation is the only place a configuration can be
//! rejected; once a `PopulationManager` exists, ticking never fails.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::geometry::Arena;
use crate::sim::spawn::{DebouncePolicy, Lineage};

/// The two spawning rule sets the simulation ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Every bubble can spawn; pairs are debounced within a single tick
    Open,
    /// Only seeds can spawn; pairs cool down for several ticks
    #[default]
    Lineage,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Open => "Open",
            Variant::Lineage => "Lineage",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" | "frame-local" => Some(Variant::Open),
            "lineage" | "cooldown" => Some(Variant::Lineage),
            _ => None,
        }
    }

    pub fn debounce(&self) -> DebouncePolicy {
        match self {
            Variant::Open => DebouncePolicy::FrameLocal,
            Variant::Lineage => DebouncePolicy::Cooldown(COLLISION_COOLDOWN),
        }
    }

    pub fn lineage(&self) -> Lineage {
        match self {
            Variant::Open => Lineage::Open,
            Variant::Lineage => Lineage::SingleGeneration,
        }
    }

    /// Minimum channel value for random colors (open variant avoids near-black)
    pub fn color_floor(&self) -> u8 {
        match self {
            Variant::Open => 50,
            Variant::Lineage => 0,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_center: (f64, f64),
    pub arena_radius: f64,
    /// Shared radius of every bubble
    pub particle_radius: f64,

    // === Population ===
    pub seed_count: usize,
    pub max_particles: usize,
    /// Speed of seeds and children (displacement per tick)
    pub speed: f64,

    // === Spawning ===
    pub debounce: DebouncePolicy,
    pub lineage: Lineage,
    pub color_floor: u8,

    /// Seed for the simulation RNG
    pub rng_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl Settings {
    /// Settings matching a variant preset, with the default arena
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            arena_center: ARENA_CENTER,
            arena_radius: ARENA_RADIUS,
            particle_radius: PARTICLE_RADIUS,
            seed_count: SEED_COUNT,
            max_particles: MAX_PARTICLES,
            speed: SPEED,
            debounce: variant.debounce(),
            lineage: variant.lineage(),
            color_floor: variant.color_floor(),
            rng_seed: 0,
        }
    }

    /// Apply a variant's spawning rules, keeping arena and population sizes
    pub fn apply_variant(&mut self, variant: Variant) {
        self.debounce = variant.debounce();
        self.lineage = variant.lineage();
        self.color_floor = variant.color_floor();
    }

    /// Resize the arena and re-derive the particle radius from it
    pub fn with_arena_radius(mut self, radius: f64) -> Self {
        self.arena_radius = radius;
        self.particle_radius = (radius / PARTICLE_RADIUS_DIVISOR).floor();
        self
    }

    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    pub fn arena(&self) -> Arena {
        Arena::new(
            DVec2::new(self.arena_center.0, self.arena_center.1),
            self.arena_radius,
        )
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("arena_radius", self.arena_radius),
            ("particle_radius", self.particle_radius),
            ("speed", self.speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.arena_center.0.is_finite() && self.arena_center.1.is_finite()) {
            return Err(ConfigError::NonFinite {
                field: "arena_center",
            });
        }
        if self.particle_radius >= self.arena_radius {
            return Err(ConfigError::ParticleTooLarge {
                particle_radius: self.particle_radius,
                arena_radius: self.arena_radius,
            });
        }
        if self.max_particles < self.seed_count {
            return Err(ConfigError::CapBelowSeedCount {
                max_particles: self.max_particles,
                seed_count: self.seed_count,
            });
        }
        if self.debounce == DebouncePolicy::Cooldown(0) {
            return Err(ConfigError::ZeroCooldown);
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lineage_variant() {
        let s = Settings::default();
        assert_eq!(s.debounce, DebouncePolicy::Cooldown(10));
        assert_eq!(s.lineage, Lineage::SingleGeneration);
        assert_eq!(s.particle_radius, 13.0);
        assert_eq!(s.max_particles, 100);
        assert_eq!(s.seed_count, 2);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("OPEN"), Some(Variant::Open));
        assert_eq!(Variant::from_str("cooldown"), Some(Variant::Lineage));
        assert_eq!(Variant::from_str("snake"), None);
        assert_eq!(Variant::from_str(Variant::Open.as_str()), Some(Variant::Open));
    }

    #[test]
    fn test_open_variant() {
        let s = Settings::from_variant(Variant::Open);
        assert_eq!(s.debounce, DebouncePolicy::FrameLocal);
        assert_eq!(s.lineage, Lineage::Open);
        assert_eq!(s.color_floor, 50);
    }

    #[test]
    fn test_with_arena_radius_rederives_particle_radius() {
        let s = Settings::default().with_arena_radius(300.0);
        assert_eq!(s.particle_radius, 20.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut s = Settings::default();
        s.arena_radius = 0.0;
        assert!(matches!(
            s.validate(),
            Err(ConfigError::NonPositive {
                field: "arena_radius",
                ..
            })
        ));

        let mut s = Settings::default();
        s.speed = f64::NAN;
        assert!(matches!(s.validate(), Err(ConfigError::NonPositive { field: "speed", .. })));

        let mut s = Settings::default();
        s.particle_radius = 250.0;
        assert!(matches!(s.validate(), Err(ConfigError::ParticleTooLarge { .. })));

        let mut s = Settings::default();
        s.max_particles = 1;
        assert!(matches!(s.validate(), Err(ConfigError::CapBelowSeedCount { .. })));

        let mut s = Settings::default();
        s.arena_center = (f64::INFINITY, 0.0);
        assert!(matches!(s.validate(), Err(ConfigError::NonFinite { .. })));

        let mut s = Settings::default();
        s.debounce = DebouncePolicy::Cooldown(0);
        assert!(matches!(s.validate(), Err(ConfigError::ZeroCooldown)));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "max_particles": 40, "debounce": "FrameLocal" }"#)
            .unwrap();
        assert_eq!(s.max_particles, 40);
        assert_eq!(s.debounce, DebouncePolicy::FrameLocal);
        assert_eq!(s.arena_radius, 200.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("bubble_arena_settings_{}.json", std::process::id()));
        let mut s = Settings::from_variant(Variant::Open).with_seed(77);
        s.max_particles = 12;
        s.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/bubble_arena.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
