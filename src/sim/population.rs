//! Population manager
//!
//! Owns the bubbles, the debounce state and the RNG, and advances all of
//! them one tick at a time.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::overlapping_pairs;
use super::containment::{WallContact, advance};
use super::geometry::Arena;
use super::spawn::{PairKey, SpawnDecision, SpawnPolicy};
use super::state::{Particle, ParticleId, Rgb, random_position, random_velocity};
use crate::consts::CONTAINMENT_EPSILON;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Something observable that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Particle reflected off the arena wall
    WallBounce { id: ParticleId },
    /// Particle had no wall normal and was moved to the rim
    Relocated { id: ParticleId },
    /// A colliding pair produced a child
    Spawned {
        parents: (ParticleId, ParticleId),
        child: ParticleId,
        pos: DVec2,
    },
    /// Population reached the cap this tick
    Saturated { population: usize },
}

/// Running totals since initialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub ticks: u64,
    pub spawned: u64,
    pub wall_contacts: u64,
    /// Tick on which the cap was first reached
    pub saturated_at: Option<u64>,
}

/// The simulation: bubbles, spawn policy, and deterministic RNG
#[derive(Debug, Clone)]
pub struct PopulationManager {
    settings: Settings,
    arena: Arena,
    /// Live bubbles in creation order
    particles: Vec<Particle>,
    spawner: SpawnPolicy,
    rng: Pcg32,
    next_id: u32,
    events: Vec<SimEvent>,
    stats: PopulationStats,
}

impl PopulationManager {
    /// Validate `settings` and place `seed_count` random seeds
    pub fn initialize(settings: Settings) -> Result<Self, ConfigError> {
        let mut manager = Self::empty(settings)?;

        for _ in 0..manager.settings.seed_count {
            let pos = random_position(
                &mut manager.rng,
                &manager.arena,
                manager.settings.particle_radius,
            );
            let vel = random_velocity(&mut manager.rng, manager.settings.speed);
            manager.push_seed(pos, vel);
        }

        log::info!(
            "Simulation initialized: seed={}, seeds={}, cap={}, debounce={:?}, lineage={:?}",
            manager.settings.rng_seed,
            manager.particles.len(),
            manager.settings.max_particles,
            manager.settings.debounce,
            manager.settings.lineage,
        );
        Ok(manager)
    }

    /// Build from caller-placed `(position, velocity)` seeds.
    ///
    /// `settings.seed_count` is ignored; the cap must still hold every seed.
    pub fn from_seeds(
        mut settings: Settings,
        seeds: impl IntoIterator<Item = (DVec2, DVec2)>,
    ) -> Result<Self, ConfigError> {
        let seeds: Vec<_> = seeds.into_iter().collect();
        settings.seed_count = seeds.len();
        let mut manager = Self::empty(settings)?;

        for (index, (pos, vel)) in seeds.into_iter().enumerate() {
            if !manager
                .arena
                .contains(pos, manager.settings.particle_radius, CONTAINMENT_EPSILON)
            {
                return Err(ConfigError::SeedOutsideArena { index });
            }
            manager.push_seed(pos, vel);
        }
        Ok(manager)
    }

    fn empty(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            arena: settings.arena(),
            particles: Vec::with_capacity(settings.max_particles),
            spawner: SpawnPolicy::new(
                settings.debounce,
                settings.lineage,
                settings.speed,
                settings.color_floor,
            ),
            rng: Pcg32::seed_from_u64(settings.rng_seed),
            next_id: 1,
            events: Vec::new(),
            stats: PopulationStats::default(),
            settings,
        })
    }

    /// Allocate a new particle ID
    fn next_particle_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_seed(&mut self, pos: DVec2, vel: DVec2) {
        let id = self.next_particle_id();
        let color = Rgb::random(&mut self.rng, self.settings.color_floor);
        self.particles.push(Particle::new(id, pos, vel, color, true));
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) {
        self.events.clear();
        self.stats.ticks += 1;
        let radius = self.settings.particle_radius;

        // Move and contain every particle before any collision test
        for particle in &mut self.particles {
            match advance(particle, &self.arena, radius, &mut self.rng) {
                WallContact::None => {}
                WallContact::Reflected => {
                    log::trace!("Particle {:?} bounced at {:?}", particle.id, particle.pos);
                    self.stats.wall_contacts += 1;
                    self.events.push(SimEvent::WallBounce { id: particle.id });
                }
                WallContact::Relocated => {
                    log::trace!("Particle {:?} relocated to rim", particle.id);
                    self.stats.wall_contacts += 1;
                    self.events.push(SimEvent::Relocated { id: particle.id });
                }
            }
        }

        // Pairs come from the post-containment, pre-spawn set; children are
        // staged and only appended once every pair has been considered.
        let pairs = overlapping_pairs(&self.particles, radius);
        let mut staged: Vec<Particle> = Vec::new();
        for (i, j) in pairs {
            let (a, b) = (&self.particles[i], &self.particles[j]);
            let population = self.particles.len() + staged.len();
            match self
                .spawner
                .decide(a, b, population, self.settings.max_particles)
            {
                SpawnDecision::Emit => {
                    // Field-level borrow; `next_particle_id` would lock all of self
                    let id = ParticleId(self.next_id);
                    self.next_id += 1;
                    let child = self.spawner.child(a, b, id, &mut self.rng);
                    log::debug!(
                        "Pair ({:?}, {:?}) spawned {:?} at {:?}",
                        a.id,
                        b.id,
                        child.id,
                        child.pos
                    );
                    self.events.push(SimEvent::Spawned {
                        parents: (a.id, b.id),
                        child: child.id,
                        pos: child.pos,
                    });
                    staged.push(child);
                }
                SpawnDecision::Suppressed
                | SpawnDecision::CapReached
                | SpawnDecision::Ineligible => {}
            }
        }

        let was_saturated = self.is_saturated();
        self.stats.spawned += staged.len() as u64;
        self.particles.extend(staged);

        if !was_saturated && self.is_saturated() {
            log::info!(
                "Population cap of {} reached at tick {}",
                self.settings.max_particles,
                self.stats.ticks
            );
            self.stats.saturated_at = Some(self.stats.ticks);
            self.events.push(SimEvent::Saturated {
                population: self.particles.len(),
            });
        }

        self.spawner.end_tick();
    }

    /// Run `n` ticks
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Read-only snapshot of the bubbles, in creation order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_saturated(&self) -> bool {
        self.particles.len() >= self.settings.max_particles
    }

    /// Events recorded by the most recent tick
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn stats(&self) -> &PopulationStats {
        &self.stats
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn particle_radius(&self) -> f64 {
        self.settings.particle_radius
    }

    /// Whether the pair `(a, b)` is currently barred from spawning
    pub fn is_suppressed(&self, a: ParticleId, b: ParticleId) -> bool {
        self.spawner.debounce().is_suppressed(PairKey::new(a, b))
    }

    /// Number of pairs currently barred from spawning
    pub fn suppressed_pairs(&self) -> usize {
        self.spawner.debounce().len()
    }
}
