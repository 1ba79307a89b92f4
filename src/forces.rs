//! Force accumulation: gravity, global velocity damping, and spring forces.

use crate::float::Float;
use crate::grid::ParticleGrid;
use crate::network::SpringNetwork;
use crate::vec::Vec3;

/// Rebuild every particle's force from scratch.
///
/// First pass: reset, add `gravity` to free particles, add
/// `damping * velocity` to all particles. Second pass: add each spring's
/// force to `a` and subtract it from `b`, skipping fixed endpoints.
///
/// Springs whose endpoints coincide contribute nothing this step.
/// Returns how many springs were skipped that way.
pub fn compute_forces<F: Float>(
    grid: &mut ParticleGrid<F>,
    network: &SpringNetwork<F>,
    gravity: Vec3<F>,
    damping: F,
) -> usize {
    for p in grid.particles_mut() {
        p.clear_force();
        p.apply_force(gravity);
        p.force += p.velocity.scale(damping);
    }

    let mut degenerate = 0;
    let particles = grid.particles_mut();
    for (i, spring) in network.springs().iter().enumerate() {
        let Some(force) = spring.force(particles) else {
            log::trace!("spring {i} ({}, {}) collapsed, no force this step", spring.a, spring.b);
            degenerate += 1;
            continue;
        };
        particles[spring.a].apply_force(force);
        particles[spring.b].apply_force(-force);
    }
    degenerate
}
