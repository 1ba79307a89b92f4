//! Collision response against a static ellipsoid and a ground plane.

use crate::error::ClothError;
use crate::float::Float;
use crate::grid::ParticleGrid;
use crate::particle::Particle;
use crate::vec::{Mat3, Vec3};

/// Local-space margin added when pushing a particle out of the ellipsoid,
/// so round-off cannot leave it a hair inside the unit sphere.
const CONTACT_SKIN: f32 = 1e-4;

/// A unit sphere under a rotation, non-uniform scale, and translation.
///
/// World point `p` maps to local `inverse * (p - center)`; it is inside
/// when the local point lies within distance 1 of the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid<F: Float> {
    center: Vec3<F>,
    basis: Mat3<F>,
    inverse: Mat3<F>,
}

impl<F: Float> Ellipsoid<F> {
    /// Ellipsoid with semi-axes `radii`, rotated by `rotation`, centred at `center`.
    pub fn new(center: Vec3<F>, rotation: Mat3<F>, radii: Vec3<F>) -> Result<Self, ClothError> {
        Self::from_basis(center, rotation.mul_mat3(&Mat3::from_diagonal(radii)))
    }

    /// Ellipsoid under a pure rotation with positive semi-axes.
    ///
    /// The inverse is `diag(1 / radii) * rotation^T`, so no singular case
    /// exists. `rotation` must be orthonormal.
    ///
    /// # Panics
    ///
    /// Panics if any radius is not positive and finite.
    pub fn oriented(center: Vec3<F>, rotation: Mat3<F>, radii: Vec3<F>) -> Self {
        let positive = |r: F| r > F::zero() && r.is_finite();
        assert!(
            positive(radii.x) && positive(radii.y) && positive(radii.z),
            "ellipsoid radii must be positive, got {:?}",
            radii,
        );
        let one = F::one();
        let inv_radii = Vec3::new(one / radii.x, one / radii.y, one / radii.z);
        Ellipsoid {
            center,
            basis: rotation.mul_mat3(&Mat3::from_diagonal(radii)),
            inverse: Mat3::from_diagonal(inv_radii).mul_mat3(&rotation.transpose()),
        }
    }

    /// Ellipsoid from an arbitrary linear map of the unit sphere.
    pub fn from_basis(center: Vec3<F>, basis: Mat3<F>) -> Result<Self, ClothError> {
        let inverse = basis.inverse().ok_or(ClothError::DegenerateObstacle)?;
        Ok(Ellipsoid { center, basis, inverse })
    }

    pub fn sphere(center: Vec3<F>, radius: F) -> Result<Self, ClothError> {
        Self::new(center, Mat3::identity(), Vec3::splat(radius))
    }

    pub fn center(&self) -> Vec3<F> { self.center }
    pub fn basis(&self) -> &Mat3<F> { &self.basis }

    pub fn to_local(&self, point: Vec3<F>) -> Vec3<F> {
        self.inverse.mul_vec3(point - self.center)
    }

    /// Distance from the centre in unit-sphere space; below 1 means inside.
    pub fn local_distance(&self, point: Vec3<F>) -> F {
        self.to_local(point).length()
    }

    pub fn contains(&self, point: Vec3<F>) -> bool {
        self.local_distance(point) < F::one()
    }

    /// World-space displacement that moves `point` onto the surface, or
    /// `None` if it is already outside.
    ///
    /// The push is radial in local space and mapped back through the
    /// forward basis, so the corrected point lands on the surface even
    /// under non-uniform scale.
    pub fn penetration(&self, point: Vec3<F>) -> Option<Vec3<F>> {
        let local = self.to_local(point);
        let dist = local.length();
        if dist >= F::one() {
            return None;
        }
        let target = F::one() + F::from_f32(CONTACT_SKIN);
        let dir = local
            .try_normalize(F::from_f32(1e-12))
            .unwrap_or_else(Vec3::unit_y);
        let local_push = dir.scale(target - dist);
        Some(self.basis.mul_vec3(local_push))
    }

    /// Push a penetrating particle to the surface and stop it dead.
    pub fn resolve(&self, particle: &mut Particle<F>) -> bool {
        match self.penetration(particle.position) {
            Some(push) => {
                particle.position += push;
                particle.clear_velocity();
                true
            }
            None => false,
        }
    }
}

/// Horizontal floor at `height`.
///
/// Particles below it are lifted onto it and lose their downward
/// velocity; horizontal velocity is kept.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundPlane<F: Float> {
    pub height: F,
}

impl<F: Float> GroundPlane<F> {
    pub fn new(height: F) -> Self {
        GroundPlane { height }
    }

    pub fn resolve(&self, particle: &mut Particle<F>) -> bool {
        if particle.position.y >= self.height {
            return false;
        }
        particle.position.y = self.height;
        particle.velocity.y = particle.velocity.y.max(F::zero());
        true
    }
}

/// Resolve every free particle against the obstacle, then the ground.
///
/// Fixed particles are skipped: an anchor stays where it was put even if
/// it sits inside the obstacle or below the ground.
///
/// Returns the number of contacts.
pub fn resolve_collisions<F: Float>(
    grid: &mut ParticleGrid<F>,
    obstacle: Option<&Ellipsoid<F>>,
    ground: Option<&GroundPlane<F>>,
) -> usize {
    let mut contacts = 0;
    for p in grid.particles_mut().iter_mut().filter(|p| !p.fixed) {
        if let Some(ellipsoid) = obstacle {
            contacts += usize::from(ellipsoid.resolve(p));
        }
        if let Some(ground) = ground {
            contacts += usize::from(ground.resolve(p));
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tilted() -> Ellipsoid<f32> {
        let rot = Mat3::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), core::f32::consts::FRAC_PI_4);
        Ellipsoid::new(Vec3::new(0.0, 2.0, 0.0), rot, Vec3::new(2.0, 1.0, 1.5)).unwrap()
    }

    #[test]
    fn point_inside_is_pushed_to_surface() {
        let e = tilted();
        let mut p = Particle::new(Vec3::new(0.3, 2.2, 0.1));
        p.velocity = Vec3::new(0.0, -1.0, 0.0);
        assert!(e.contains(p.position));
        assert!(e.resolve(&mut p));
        let d = e.local_distance(p.position);
        assert!(d >= 1.0 && d < 1.001, "local distance after push = {d}");
        assert_eq!(p.velocity, Vec3::zero());
    }

    #[test]
    fn point_outside_is_untouched() {
        let e = tilted();
        let mut p = Particle::new(Vec3::new(0.0, 10.0, 0.0));
        p.velocity = Vec3::new(1.0, 0.0, 0.0);
        assert!(!e.resolve(&mut p));
        assert_eq!(p.position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(p.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn point_at_centre_escapes_along_local_up() {
        let e = Ellipsoid::sphere(Vec3::new(1.0, 1.0, 1.0), 0.5f32).unwrap();
        let mut p = Particle::new(Vec3::new(1.0, 1.0, 1.0));
        assert!(e.resolve(&mut p));
        assert!((p.position.y - 1.50005).abs() < 1e-4);
    }

    #[test]
    fn oriented_matches_general_inverse() {
        let rot = Mat3::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), core::f32::consts::FRAC_PI_4);
        let fast = Ellipsoid::oriented(Vec3::new(0.0, 2.0, 0.0), rot, Vec3::new(2.0, 1.0, 1.5));
        let general = tilted();
        for p in [Vec3::new(0.3, 2.2, 0.1), Vec3::new(-1.5, 0.4, 1.0), Vec3::new(4.0, 2.0, -2.0)] {
            let (a, b) = (fast.to_local(p), general.to_local(p));
            assert!(a.distance(b) < 1e-5, "{a:?} vs {b:?}");
        }
    }

    #[test]
    #[should_panic(expected = "radii must be positive")]
    fn oriented_rejects_zero_radius() {
        Ellipsoid::oriented(Vec3::zero(), Mat3::identity(), Vec3::new(1.0f32, 0.0, 1.0));
    }

    #[test]
    fn anchored_particles_are_not_pushed_out() {
        let e = Ellipsoid::sphere(Vec3::zero(), 10.0f64).unwrap();
        let ground = GroundPlane::new(5.0);
        let layout = crate::grid::GridLayout::new(1, 1, 1.0);
        let mut grid = ParticleGrid::initialize(&layout, &crate::grid::Anchors::Indices(alloc::vec![0])).unwrap();
        let before = grid.position_of(0);

        let contacts = resolve_collisions(&mut grid, Some(&e), Some(&ground));
        assert_eq!(grid.position_of(0), before);
        // Each free particle is pushed out of the sphere, then lifted onto the ground.
        assert_eq!(contacts, 6);
        for i in 1..4 {
            let p = grid.position_of(i);
            assert!(e.local_distance(p) >= 1.0);
            assert_eq!(p.y, 5.0);
        }
    }

    #[test]
    fn flat_ellipsoid_is_rejected() {
        let err = Ellipsoid::new(Vec3::zero(), Mat3::identity(), Vec3::new(1.0f32, 0.0, 1.0));
        assert_eq!(err.unwrap_err(), ClothError::DegenerateObstacle);
    }

    #[test]
    fn ground_lifts_and_stops_falling() {
        let ground = GroundPlane::new(0.0f32);
        let mut p = Particle::new(Vec3::new(0.0, -0.2, 0.0));
        p.velocity = Vec3::new(0.5, -3.0, 0.0);
        assert!(ground.resolve(&mut p));
        assert_eq!(p.position.y, 0.0);
        assert_eq!(p.velocity, Vec3::new(0.5, 0.0, 0.0));
    }
}
