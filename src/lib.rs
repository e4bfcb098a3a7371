//! Bubble Arena - a bounded bubble population inside a circular arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, containment, collisions, spawning)
//! - `settings`: Simulation configuration and variant presets
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{Settings, Variant};
pub use sim::{PopulationManager, SimEvent};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed tick rate of the external frame clock
    pub const TICK_RATE: u32 = 60;

    /// Screen the arena was laid out on
    pub const SCREEN_WIDTH: f64 = 600.0;
    pub const SCREEN_HEIGHT: f64 = 600.0;

    /// Arena defaults - centered on screen, a third of its width
    pub const ARENA_CENTER: (f64, f64) = (SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    pub const ARENA_RADIUS: f64 = 200.0;

    /// Particle radius is the arena radius over this divisor (rounded down)
    pub const PARTICLE_RADIUS_DIVISOR: f64 = 15.0;
    pub const PARTICLE_RADIUS: f64 = 13.0;

    /// Speed of seeds and spawned particles (displacement per tick)
    pub const SPEED: f64 = 5.0;

    /// Population defaults
    pub const SEED_COUNT: usize = 2;
    pub const MAX_PARTICLES: usize = 100;

    /// Ticks a pair stays suppressed after spawning
    pub const COLLISION_COOLDOWN: u32 = 10;

    /// Floating-point slack allowed on the containment boundary
    pub const CONTAINMENT_EPSILON: f64 = 1e-9;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
