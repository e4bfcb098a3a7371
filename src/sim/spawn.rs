//! Spawn policy and collision debounce
//!
//! Every overlapping pair is a spawn candidate. A candidate emits a child
//! only when its pair is not suppressed, the population (including children
//! already staged this tick) is under the cap, and the lineage rule allows
//! both parents to spawn.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::state::{Particle, ParticleId, Rgb, random_velocity};

/// How long a pair stays suppressed after it spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebouncePolicy {
    /// Suppression cleared at the end of every tick
    FrameLocal,
    /// Suppression lasts this many ticks, whether or not the pair keeps overlapping
    Cooldown(u32),
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        DebouncePolicy::Cooldown(crate::consts::COLLISION_COOLDOWN)
    }
}

/// Which particles may spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lineage {
    /// Every particle is eligible, children included
    Open,
    /// Only seeds are eligible; children are born with `can_spawn = false`
    #[default]
    SingleGeneration,
}

impl Lineage {
    #[inline]
    pub fn child_can_spawn(self) -> bool {
        matches!(self, Lineage::Open)
    }

    /// Whether a pair with these members may produce a child
    #[inline]
    pub fn allows(self, a: &Particle, b: &Particle) -> bool {
        match self {
            Lineage::Open => true,
            Lineage::SingleGeneration => a.can_spawn && b.can_spawn,
        }
    }
}

/// Unordered pair of particle identities (smaller id first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(ParticleId, ParticleId);

impl PairKey {
    pub fn new(a: ParticleId, b: ParticleId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn ids(&self) -> (ParticleId, ParticleId) {
        (self.0, self.1)
    }
}

/// Suppressed pairs and the ticks each has left
#[derive(Debug, Clone)]
pub struct DebounceState {
    policy: DebouncePolicy,
    remaining: BTreeMap<PairKey, u32>,
}

impl DebounceState {
    pub fn new(policy: DebouncePolicy) -> Self {
        Self {
            policy,
            remaining: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    pub fn is_suppressed(&self, key: PairKey) -> bool {
        self.remaining.contains_key(&key)
    }

    /// Ticks left before `key` may spawn again (0 if not suppressed)
    pub fn remaining(&self, key: PairKey) -> u32 {
        self.remaining.get(&key).copied().unwrap_or(0)
    }

    pub fn suppress(&mut self, key: PairKey) {
        let ticks = match self.policy {
            DebouncePolicy::FrameLocal => 1,
            DebouncePolicy::Cooldown(ticks) => ticks,
        };
        self.remaining.insert(key, ticks);
    }

    /// End-of-tick bookkeeping
    pub fn advance(&mut self) {
        match self.policy {
            DebouncePolicy::FrameLocal => self.remaining.clear(),
            DebouncePolicy::Cooldown(_) => self.remaining.retain(|_, ticks| {
                *ticks = ticks.saturating_sub(1);
                *ticks > 0
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Outcome for one overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnDecision {
    /// Emit a child; the pair is now suppressed
    Emit,
    /// Pair spawned recently
    Suppressed,
    /// Population (with staged children) is at the cap
    CapReached,
    /// Lineage rule forbids these parents
    Ineligible,
}

/// Decides spawn-or-suppress for overlapping pairs and builds children
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    debounce: DebounceState,
    lineage: Lineage,
    speed: f64,
    color_floor: u8,
}

impl SpawnPolicy {
    pub fn new(debounce: DebouncePolicy, lineage: Lineage, speed: f64, color_floor: u8) -> Self {
        Self {
            debounce: DebounceState::new(debounce),
            lineage,
            speed,
            color_floor,
        }
    }

    pub fn debounce(&self) -> &DebounceState {
        &self.debounce
    }

    pub fn lineage(&self) -> Lineage {
        self.lineage
    }

    /// Decide for the pair `(a, b)` given the population counted so far
    /// this tick. Marks the pair suppressed on `Emit`.
    pub fn decide(
        &mut self,
        a: &Particle,
        b: &Particle,
        population: usize,
        max_particles: usize,
    ) -> SpawnDecision {
        let key = PairKey::new(a.id, b.id);
        if self.debounce.is_suppressed(key) {
            return SpawnDecision::Suppressed;
        }
        if population >= max_particles {
            return SpawnDecision::CapReached;
        }
        if !self.lineage.allows(a, b) {
            return SpawnDecision::Ineligible;
        }
        self.debounce.suppress(key);
        SpawnDecision::Emit
    }

    /// Child of `a` and `b`: at their midpoint, random heading at fixed speed
    pub fn child<R: Rng + ?Sized>(
        &self,
        a: &Particle,
        b: &Particle,
        id: ParticleId,
        rng: &mut R,
    ) -> Particle {
        let pos: DVec2 = (a.pos + b.pos) * 0.5;
        let vel = random_velocity(rng, self.speed);
        let color = Rgb::random(rng, self.color_floor);
        Particle::new(id, pos, vel, color, self.lineage.child_can_spawn())
    }

    /// End-of-tick debounce bookkeeping
    pub fn end_tick(&mut self) {
        self.debounce.advance();
    }
}
