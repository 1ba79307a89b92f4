//! Stretch limiting by dynamic inverse on velocities.
//!
//! For each overstretched spring, half the excess length is fed back into
//! the endpoint velocities along the spring axis. Positions are not
//! touched here; they follow on the next integration. A single pass only
//! reduces the overstretch, repeated steps keep it bounded.

use crate::float::Float;
use crate::grid::ParticleGrid;
use crate::network::SpringNetwork;

/// Apply one relaxation pass over every spring, in declaration order.
///
/// Returns how many springs were corrected.
pub fn limit_stretch<F: Float>(grid: &mut ParticleGrid<F>, network: &SpringNetwork<F>) -> usize {
    let particles = grid.particles_mut();
    let mut corrected = 0;

    for spring in network.springs() {
        let delta = particles[spring.a].position - particles[spring.b].position;
        let dist = delta.length();
        if dist <= spring.rest_length {
            continue;
        }

        let excess = (dist - spring.rest_length) * F::half();
        let correction = delta.scale(excess / dist);

        match (particles[spring.a].fixed, particles[spring.b].fixed) {
            (false, false) => {
                particles[spring.a].velocity -= correction;
                particles[spring.b].velocity += correction;
            }
            (true, false) => particles[spring.b].velocity += correction,
            (false, true) => particles[spring.a].velocity -= correction,
            (true, true) => continue,
        }
        corrected += 1;
    }
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Anchors, GridLayout};
    use crate::spring::{SpringKind, SpringParams};
    use crate::vec::Vec3;

    fn setup(anchors: Anchors) -> (ParticleGrid<f32>, SpringNetwork<f32>) {
        let grid = ParticleGrid::initialize(&GridLayout::new(1, 1, 1.0), &anchors).unwrap();
        let mut net = SpringNetwork::new();
        net.connect(&grid, 0, 1, SpringParams::new(1.0, 0.0), SpringKind::Structural);
        (grid, net)
    }

    #[test]
    fn both_free_split_the_correction() {
        let (mut grid, net) = setup(Anchors::None);
        grid.set_external_position(1, Vec3::new(1.4, 0.0, 0.0));
        assert_eq!(limit_stretch(&mut grid, &net), 1);
        // excess = 0.2, a moves toward +x, b toward -x
        assert!((grid.velocity_of(0).x - 0.2).abs() < 1e-6);
        assert!((grid.velocity_of(1).x + 0.2).abs() < 1e-6);
        // positions are left for the integrator
        assert_eq!(grid.position_of(1), Vec3::new(1.4, 0.0, 0.0));
    }

    #[test]
    fn fixed_endpoint_is_never_corrected() {
        let (mut grid, net) = setup(Anchors::Indices(alloc::vec![0]));
        grid.set_external_position(1, Vec3::new(1.4, 0.0, 0.0));
        limit_stretch(&mut grid, &net);
        assert_eq!(grid.velocity_of(0), Vec3::zero());
        assert!((grid.velocity_of(1).x + 0.2).abs() < 1e-6);

        let (mut grid, net) = setup(Anchors::Indices(alloc::vec![1]));
        grid.set_external_position(0, Vec3::new(-0.4, 0.0, 0.0));
        limit_stretch(&mut grid, &net);
        assert!((grid.velocity_of(0).x - 0.2).abs() < 1e-6);
        assert_eq!(grid.velocity_of(1), Vec3::zero());
    }

    #[test]
    fn both_fixed_is_left_alone() {
        let (mut grid, net) = setup(Anchors::Indices(alloc::vec![0, 1]));
        grid.set_external_position(1, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(limit_stretch(&mut grid, &net), 0);
        assert_eq!(grid.velocity_of(1), Vec3::zero());
    }

    #[test]
    fn compressed_springs_are_ignored() {
        let (mut grid, net) = setup(Anchors::None);
        grid.set_external_position(1, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(limit_stretch(&mut grid, &net), 0);
        assert_eq!(grid.velocity_of(0), Vec3::zero());
    }
}
