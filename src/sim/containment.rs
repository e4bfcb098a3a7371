//! Boundary containment
//!
//! One Euler step per tick, then a single reflect-and-correct against the
//! arena wall. Not an iterative solver: a particle is small next to the
//! arena and moves only a few units per tick.

use rand::Rng;
use std::f64::consts::TAU;

use super::geometry::{Arena, reflect};
use super::state::Particle;

/// What happened at the wall during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    /// Particle stayed clear of the wall
    None,
    /// Velocity reflected and position pushed back inside
    Reflected,
    /// Normal was undefined; particle moved to a random rim point
    Relocated,
}

/// Advance `particle` by one tick and keep it inside `arena`.
///
/// The wall normal is taken after the move, and velocity is reflected
/// against it before the position is corrected along the same normal.
pub fn advance<R: Rng + ?Sized>(
    particle: &mut Particle,
    arena: &Arena,
    particle_radius: f64,
    rng: &mut R,
) -> WallContact {
    particle.pos += particle.vel;

    if !arena.penetrates_wall(particle.pos, particle_radius) {
        return WallContact::None;
    }

    let Some(normal) = arena.wall_normal(particle.pos) else {
        let theta = rng.random_range(0.0..TAU);
        particle.pos = arena.rim_point(theta, particle_radius);
        return WallContact::Relocated;
    };

    particle.vel = reflect(particle.vel, normal);
    if let Some(corrected) = arena.correct_penetration(particle.pos, particle_radius) {
        particle.pos = corrected;
    }
    WallContact::Reflected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CONTAINMENT_EPSILON;
    use crate::polar_to_cartesian;
    use crate::sim::state::{ParticleId, Rgb};
    use glam::DVec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const R: f64 = 13.0;

    fn arena() -> Arena {
        Arena::new(DVec2::new(300.0, 300.0), 200.0)
    }

    fn particle(pos: DVec2, vel: DVec2) -> Particle {
        Particle::new(ParticleId(1), pos, vel, Rgb::new(255, 255, 255), true)
    }

    #[test]
    fn test_free_flight() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = particle(DVec2::new(300.0, 300.0), DVec2::new(3.0, -4.0));
        let contact = advance(&mut p, &arena(), R, &mut rng);
        assert_eq!(contact, WallContact::None);
        assert_eq!(p.pos, DVec2::new(303.0, 296.0));
        assert_eq!(p.vel, DVec2::new(3.0, -4.0));
    }

    #[test]
    fn test_outward_launch_reflects_inward() {
        let arena = arena();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = particle(arena.center, DVec2::new(5.0, 0.0));

        let mut bounced_at = None;
        for tick in 1..=100 {
            let contact = advance(&mut p, &arena, R, &mut rng);
            assert!(arena.contains(p.pos, R, CONTAINMENT_EPSILON));
            if contact == WallContact::Reflected {
                bounced_at = Some(tick);
                break;
            }
        }

        // 5 * 38 + 13 = 203 > 200 is the first penetration
        assert_eq!(bounced_at, Some(38));
        assert!((p.vel - DVec2::new(-5.0, 0.0)).length() < 1e-12);
        assert!((p.pos - DVec2::new(487.0, 300.0)).length() < 1e-9);

        // Next step moves back toward the center
        advance(&mut p, &arena, R, &mut rng);
        assert!((p.pos - DVec2::new(482.0, 300.0)).length() < 1e-9);
    }

    #[test]
    fn test_degenerate_center_relocates_to_rim() {
        // Particle radius larger than the arena forces penetration at the center
        let arena = Arena::new(DVec2::ZERO, 10.0);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut p = particle(DVec2::ZERO, DVec2::ZERO);
        let contact = advance(&mut p, &arena, 4.0, &mut rng);
        assert_eq!(contact, WallContact::None);

        let mut big = particle(DVec2::ZERO, DVec2::ZERO);
        let contact = advance(&mut big, &arena, 12.0, &mut rng);
        assert_eq!(contact, WallContact::Relocated);
        assert!((arena.distance_from_center(big.pos) - 2.0).abs() < 1e-9);
        assert_eq!(big.vel, DVec2::ZERO);
    }

    proptest! {
        #[test]
        fn containment_holds_for_any_step(
            offset in 0.0_f64..187.0,
            theta in 0.0_f64..TAU,
            speed in 0.0_f64..20.0,
            heading in 0.0_f64..TAU,
        ) {
            let arena = arena();
            let mut rng = Pcg32::seed_from_u64(5);
            let mut p = particle(
                arena.center + polar_to_cartesian(offset, theta),
                polar_to_cartesian(speed, heading),
            );
            for _ in 0..50 {
                advance(&mut p, &arena, R, &mut rng);
                prop_assert!(arena.contains(p.pos, R, CONTAINMENT_EPSILON));
                prop_assert!((p.vel.length() - speed).abs() < 1e-9);
            }
        }
    }
}
