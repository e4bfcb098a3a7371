//! Pairwise collision detection
//!
//! Plain O(n²) scan over unique unordered pairs. The population is capped
//! at around a hundred bubbles, so a spatial index would not pay for itself.

use super::geometry::circles_overlap;
use super::state::Particle;

/// Indices `(i, j)` with `i < j` into the particle slice of one tick
pub type IndexPair = (usize, usize);

/// All overlapping pairs in ascending `(i, j)` order.
///
/// Must run on a snapshot taken after every particle finished its
/// move-and-contain step and before any spawned child is appended.
pub fn overlapping_pairs(particles: &[Particle], particle_radius: f64) -> Vec<IndexPair> {
    let mut pairs = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            if circles_overlap(a.pos, b.pos, particle_radius) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Number of unique unordered pairs among `n` particles
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ParticleId, Rgb};
    use glam::DVec2;

    fn at(id: u32, x: f64, y: f64) -> Particle {
        Particle::new(ParticleId(id), DVec2::new(x, y), DVec2::ZERO, Rgb::new(0, 0, 0), true)
    }

    #[test]
    fn test_no_particles_no_pairs() {
        assert!(overlapping_pairs(&[], 13.0).is_empty());
        assert!(overlapping_pairs(&[at(1, 0.0, 0.0)], 13.0).is_empty());
    }

    #[test]
    fn test_pairs_are_ascending_and_unique() {
        // 0, 1, 2 are mutually overlapping; 3 is far away
        let particles = vec![
            at(1, 0.0, 0.0),
            at(2, 10.0, 0.0),
            at(3, 5.0, 5.0),
            at(4, 200.0, 200.0),
        ];
        let pairs = overlapping_pairs(&particles, 13.0);
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_touching_is_not_overlapping() {
        let particles = vec![at(1, 0.0, 0.0), at(2, 26.0, 0.0)];
        assert!(overlapping_pairs(&particles, 13.0).is_empty());
    }

    #[test]
    fn test_exhaustive_against_pair_count() {
        // Everything stacked on one point overlaps with everything else
        let particles: Vec<_> = (0..12).map(|i| at(i, 1.0, 1.0)).collect();
        let pairs = overlapping_pairs(&particles, 13.0);
        assert_eq!(pairs.len(), pair_count(particles.len()));
        assert!(pairs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(100), 4950);
    }
}
