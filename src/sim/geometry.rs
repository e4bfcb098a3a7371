//! Arena geometry
//!
//! Pure helpers for the circular arena wall and circle-circle overlap.
//! Nothing here touches particles or randomness.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// The static circular boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub center: DVec2,
    pub radius: f64,
}

impl Arena {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Euclidean distance from `p` to the arena center
    #[inline]
    pub fn distance_from_center(&self, p: DVec2) -> f64 {
        (p - self.center).length()
    }

    /// True iff a circle of `particle_radius` at `p` pokes through the wall
    #[inline]
    pub fn penetrates_wall(&self, p: DVec2, particle_radius: f64) -> bool {
        self.distance_from_center(p) + particle_radius > self.radius
    }

    /// Distance from the center at which a particle touches the wall
    #[inline]
    pub fn max_offset(&self, particle_radius: f64) -> f64 {
        self.radius - particle_radius
    }

    /// Unit vector from the center toward `p`.
    ///
    /// `None` when `p` sits exactly on the center, where the direction is
    /// undefined.
    pub fn wall_normal(&self, p: DVec2) -> Option<DVec2> {
        let offset = p - self.center;
        let len = offset.length();
        if len == 0.0 {
            None
        } else {
            Some(offset / len)
        }
    }

    /// Push a penetrating particle back along the center->particle direction
    /// by exactly the overlap `(distance + particle_radius) - R`.
    ///
    /// Points that do not penetrate come back unchanged. Returns `None` only
    /// for a penetrating point with no defined normal; the caller relocates
    /// it with [`Arena::rim_point`].
    pub fn correct_penetration(&self, p: DVec2, particle_radius: f64) -> Option<DVec2> {
        if !self.penetrates_wall(p, particle_radius) {
            return Some(p);
        }
        let normal = self.wall_normal(p)?;
        // Equivalent to p - normal * overlap, without accumulating the
        // subtraction error.
        Some(self.center + normal * self.max_offset(particle_radius))
    }

    /// Point at the maximal valid radius in direction `theta`
    pub fn rim_point(&self, theta: f64, particle_radius: f64) -> DVec2 {
        self.center + polar_to_cartesian(self.max_offset(particle_radius), theta)
    }

    /// Whether a circle at `p` satisfies the containment invariant within `epsilon`
    pub fn contains(&self, p: DVec2, particle_radius: f64, epsilon: f64) -> bool {
        self.distance_from_center(p) + particle_radius <= self.radius + epsilon
    }
}

/// Reflect velocity off a surface with unit normal `normal`
///
/// Standard specular reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// True iff two circles of `particle_radius` strictly overlap
#[inline]
pub fn circles_overlap(a: DVec2, b: DVec2, particle_radius: f64) -> bool {
    a.distance(b) < 2.0 * particle_radius
}
