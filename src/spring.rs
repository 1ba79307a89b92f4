//! Damped Hookean springs between two particles of the grid.

use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Role a spring plays in the cloth topology.
///
/// The kind only selects the stiffness/damping pair at build time; the
/// force law is the same for all three. Renderers use it for filtering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Axis-adjacent neighbours.
    Structural,
    /// Diagonal neighbours within a cell.
    Shear,
    /// Skip-one neighbours along an axis.
    Bend,
}

impl SpringKind {
    pub const ALL: [SpringKind; 3] = [SpringKind::Structural, SpringKind::Shear, SpringKind::Bend];
}

/// Stiffness and damping for one spring kind.
///
/// `damping` multiplies the relative velocity along the spring, so a
/// negative value resists motion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringParams<F: Float> {
    pub stiffness: F,
    pub damping: F,
}

impl<F: Float> SpringParams<F> {
    pub fn new(stiffness: F, damping: F) -> Self {
        SpringParams { stiffness, damping }
    }
}

/// Spring between particles `a` and `b`, addressed by grid index.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub damping: F,
    pub kind: SpringKind,
}

impl<F: Float> Spring<F> {
    /// Spring whose rest length is the current distance between `a` and `b`.
    ///
    /// # Panics
    /// If `a == b`, either index is out of range, or the particles coincide.
    pub fn between(
        a: usize,
        b: usize,
        particles: &[Particle<F>],
        params: SpringParams<F>,
        kind: SpringKind,
    ) -> Self {
        let count = particles.len();
        assert!(a != b, "spring endpoints must differ (both {a})");
        assert!(a < count && b < count, "spring ({a}, {b}) out of range (count: {count})");
        let rest_length = particles[a].position.distance(particles[b].position);
        assert!(rest_length > F::zero(), "spring ({a}, {b}) has zero rest length");
        Spring {
            a,
            b,
            rest_length,
            stiffness: params.stiffness,
            damping: params.damping,
            kind,
        }
    }

    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].position.distance(particles[self.b].position)
    }

    /// Current length over rest length.
    pub fn stretch_ratio(&self, particles: &[Particle<F>]) -> F {
        self.length(particles) / self.rest_length
    }

    /// Force acting on `a` (and, negated, on `b`).
    ///
    /// Returns `None` when the endpoints coincide, since the direction
    /// is undefined there.
    pub fn force(&self, particles: &[Particle<F>]) -> Option<Vec3<F>> {
        let pa = &particles[self.a];
        let pb = &particles[self.b];
        let delta = pa.position - pb.position;
        let rel_vel = pa.velocity - pb.velocity;
        let dist = delta.length();
        if dist.is_near_zero(F::from_f32(1e-12)) {
            return None;
        }

        let stretch = -self.stiffness * (dist - self.rest_length);
        let damp = self.damping * rel_vel.dot(delta) / dist;
        Some(delta.scale((stretch + damp) / dist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec as AllocVec;

    fn pair(dx: f32) -> AllocVec<Particle<f32>> {
        alloc::vec![
            Particle::new(Vec3::new(0.0, 0.0, 0.0)),
            Particle::new(Vec3::new(dx, 0.0, 0.0)),
        ]
    }

    #[test]
    fn rest_length_from_initial_positions() {
        let particles = pair(2.5);
        let s = Spring::between(0, 1, &particles, SpringParams::new(10.0, 0.0), SpringKind::Structural);
        assert!((s.rest_length - 2.5).abs() < 1e-6);
        assert_eq!(s.force(&particles), Some(Vec3::zero()));
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let mut particles = pair(1.0);
        let s = Spring::between(0, 1, &particles, SpringParams::new(10.0, 0.0), SpringKind::Structural);
        particles[1].position.x = 1.5;
        let f = s.force(&particles).unwrap();
        // a sits at the origin, b is at +x: force on a must point toward b.
        assert!((f.x - 5.0).abs() < 1e-5, "force on a = {:?}", f);
    }

    #[test]
    fn damping_opposes_separation() {
        let mut particles = pair(1.0);
        let s = Spring::between(0, 1, &particles, SpringParams::new(0.0, -2.0), SpringKind::Shear);
        particles[1].velocity = Vec3::new(1.0, 0.0, 0.0);
        let f = s.force(&particles).unwrap();
        assert!(f.x > 0.0);
    }

    #[test]
    fn coincident_endpoints_give_no_force() {
        let mut particles = pair(1.0);
        let s = Spring::between(0, 1, &particles, SpringParams::new(10.0, -1.0), SpringKind::Bend);
        particles[1].position = particles[0].position;
        assert_eq!(s.force(&particles), None);
    }

    #[test]
    #[should_panic(expected = "endpoints must differ")]
    fn self_spring_panics() {
        let particles = pair(1.0);
        Spring::between(1, 1, &particles, SpringParams::new(1.0, 0.0), SpringKind::Structural);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn dangling_index_panics() {
        let particles = pair(1.0);
        Spring::between(0, 2, &particles, SpringParams::new(1.0, 0.0), SpringKind::Structural);
    }
}
