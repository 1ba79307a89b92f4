//! Cloth particles: explicit position and velocity plus a per-step force.

use crate::float::Float;
use crate::vec::Vec3;

/// A point mass of the cloth.
///
/// All particles share one global mass, held by the simulation config.
/// `force` is rebuilt from zero every step. A `fixed` particle ignores
/// simulation forces but can still be moved from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub force: Vec3<F>,
    pub fixed: bool,
}

impl<F: Float> Particle<F> {
    /// A free particle at rest.
    pub fn new(position: Vec3<F>) -> Self {
        Particle {
            position,
            velocity: Vec3::zero(),
            force: Vec3::zero(),
            fixed: false,
        }
    }

    /// An anchored particle at rest.
    pub fn fixed(position: Vec3<F>) -> Self {
        Particle { fixed: true, ..Particle::new(position) }
    }

    pub fn clear_force(&mut self) {
        self.force = Vec3::zero();
    }

    /// Accumulate a force unless the particle is fixed.
    pub fn apply_force(&mut self, force: Vec3<F>) {
        if !self.fixed {
            self.force += force;
        }
    }

    /// Teleport the particle. Velocity is left alone.
    pub fn move_to(&mut self, position: Vec3<F>) {
        self.position = position;
    }

    pub fn clear_velocity(&mut self) {
        self.velocity = Vec3::zero();
    }

    pub fn speed(&self) -> F {
        self.velocity.length()
    }
}
