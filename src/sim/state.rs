//! Particle entity and random construction helpers

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::geometry::Arena;
use crate::polar_to_cartesian;

/// Stable identity of a particle, assigned at creation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticleId(pub u32);

/// Cosmetic particle color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Random color with every channel in `floor..=255`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, floor: u8) -> Self {
        Self {
            r: rng.random_range(floor..=u8::MAX),
            g: rng.random_range(floor..=u8::MAX),
            b: rng.random_range(floor..=u8::MAX),
        }
    }
}

/// A bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub id: ParticleId,
    pub pos: DVec2,
    /// Displacement per tick
    pub vel: DVec2,
    pub color: Rgb,
    /// Whether this particle may take part in spawning a child
    pub can_spawn: bool,
}

impl Particle {
    pub fn new(id: ParticleId, pos: DVec2, vel: DVec2, color: Rgb, can_spawn: bool) -> Self {
        Self {
            id,
            pos,
            vel,
            color,
            can_spawn,
        }
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// Velocity of magnitude `speed` in a uniformly random direction
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f64) -> DVec2 {
    polar_to_cartesian(speed, rng.random_range(0.0..TAU))
}

/// Uniform angle and uniform offset in `[0, R - r]` from the center.
///
/// Not area-uniform: seeds cluster toward the middle, which gives the two
/// initial bubbles a fair chance of meeting early.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, particle_radius: f64) -> DVec2 {
    let theta = rng.random_range(0.0..TAU);
    let offset = rng.random_range(0.0..=arena.max_offset(particle_radius));
    arena.center + polar_to_cartesian(offset, theta)
}
