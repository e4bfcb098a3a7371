//! Deterministic simulation module
//!
//! All bubble logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (by creation order, pairs ascending)
//! - No rendering or platform dependencies

pub mod collision;
pub mod containment;
pub mod geometry;
pub mod population;
pub mod spawn;
pub mod state;

pub use collision::{IndexPair, overlapping_pairs};
pub use containment::{WallContact, advance};
pub use geometry::{Arena, circles_overlap, reflect};
pub use population::{PopulationManager, PopulationStats, SimEvent};
pub use spawn::{DebouncePolicy, DebounceState, Lineage, PairKey, SpawnDecision, SpawnPolicy};
pub use state::{Particle, ParticleId, Rgb};
