//! Configuration for a cloth simulation.

use crate::collision::{Ellipsoid, GroundPlane};
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::{Anchors, GridLayout, Plane};
use crate::integrator::Integration;
use crate::network::NetworkParams;
use crate::spring::SpringParams;
use crate::vec::{Mat3, Vec3};

/// Order of the two post-integration passes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PassOrder {
    /// Forces, integrate, collide, limit stretch.
    ///
    /// Limiter corrections may leave a particle slightly inside the
    /// obstacle; the next step's collision pass pushes it back out.
    #[default]
    CollideThenLimit,
    /// Forces, integrate, limit stretch, collide.
    ///
    /// No penetration survives a step, but contact zeroes the limiter's
    /// velocity correction for touching particles.
    LimitThenCollide,
}

/// Everything needed to build a [`Cloth`](crate::cloth::Cloth).
///
/// # Builder Pattern
/// ```
/// use drape::config::ClothConfig;
/// use drape::grid::{Anchors, GridLayout};
/// use drape::vec::Vec3;
///
/// let config: ClothConfig<f32> = ClothConfig::hanging()
///     .with_layout(GridLayout::new(10, 10, 0.2))
///     .with_anchors(Anchors::TopCorners)
///     .with_gravity(Vec3::new(0.0, -0.00981, 0.0))
///     .with_fixed_step(1.0 / 240.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ClothConfig<F: Float> {
    pub layout: GridLayout<F>,
    pub anchors: Anchors,
    /// Mass shared by every particle.
    pub particle_mass: F,
    pub gravity: Vec3<F>,
    /// Global velocity damping coefficient. Negative values resist motion.
    pub damping: F,
    pub springs: NetworkParams<F>,
    pub integration: Integration,
    pub pass_order: PassOrder,
    /// Run the dynamic-inverse pass each step.
    pub stretch_limiting: bool,
    pub obstacle: Option<Ellipsoid<F>>,
    pub ground: Option<GroundPlane<F>>,
    /// Simulation time advanced per pipeline invocation, in seconds.
    pub fixed_step: F,
    /// Most steps a single `advance` call may run. `None` is unbounded.
    pub max_steps_per_advance: Option<usize>,
}

impl<F: Float> ClothConfig<F> {
    /// A 4x4 sheet of 20x20 cells held by its two top corners.
    pub fn hanging() -> Self {
        let f = F::from_f32;
        ClothConfig {
            layout: GridLayout::new(20, 20, f(0.2))
                .with_origin(Vec3::new(f(-2.0), f(5.0), F::zero()))
                .with_plane(Plane::Xz),
            anchors: Anchors::TopCorners,
            particle_mass: f(0.5),
            gravity: Vec3::new(F::zero(), f(-0.00981), F::zero()),
            damping: f(-0.0125),
            springs: NetworkParams {
                structural: SpringParams::new(f(50.75), f(-0.25)),
                shear: SpringParams::new(f(50.75), f(-0.25)),
                bend: SpringParams::new(f(50.95), f(-0.25)),
            },
            integration: Integration::SymplecticEuler,
            pass_order: PassOrder::CollideThenLimit,
            stretch_limiting: true,
            obstacle: None,
            ground: Some(GroundPlane::new(F::zero())),
            fixed_step: f(1.0 / 60.0),
            max_steps_per_advance: Some(8),
        }
    }

    /// The same sheet, unanchored, falling onto a tilted ellipsoid.
    pub fn draped() -> Self {
        let f = F::from_f32;
        let tilt = Mat3::from_axis_angle(Vec3::new(F::zero(), F::zero(), F::one()), f(0.785_398_2));
        let obstacle = Ellipsoid::oriented(
            Vec3::new(F::zero(), f(2.0), f(2.0)),
            tilt,
            Vec3::new(f(1.2), f(0.8), f(1.0)),
        );
        ClothConfig {
            anchors: Anchors::None,
            obstacle: Some(obstacle),
            ..Self::hanging()
        }
    }

    pub fn with_layout(mut self, layout: GridLayout<F>) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_springs(mut self, springs: NetworkParams<F>) -> Self {
        self.springs = springs;
        self
    }

    pub fn with_integration(mut self, integration: Integration) -> Self {
        self.integration = integration;
        self
    }

    pub fn with_pass_order(mut self, pass_order: PassOrder) -> Self {
        self.pass_order = pass_order;
        self
    }

    pub fn with_stretch_limiting(mut self, enabled: bool) -> Self {
        self.stretch_limiting = enabled;
        self
    }

    pub fn with_obstacle(mut self, obstacle: Option<Ellipsoid<F>>) -> Self {
        self.obstacle = obstacle;
        self
    }

    pub fn with_ground(mut self, ground: Option<GroundPlane<F>>) -> Self {
        self.ground = ground;
        self
    }

    pub fn with_fixed_step(mut self, step: F) -> Self {
        self.fixed_step = step;
        self
    }

    pub fn with_max_steps_per_advance(mut self, max: Option<usize>) -> Self {
        self.max_steps_per_advance = max;
        self
    }

    /// Check the scalar parameters and anchor indices.
    pub fn validate(&self) -> Result<(), ClothError> {
        if self.layout.rows == 0 || self.layout.cols == 0 {
            return Err(ClothError::InvalidGridDimensions);
        }
        if !(self.layout.spacing > F::zero()) || !self.layout.spacing.is_finite() {
            return Err(ClothError::InvalidSpacing);
        }
        let count = self.layout.particle_count();
        if let Some(&index) = self.anchors.indices(self.layout.cols).iter().find(|&&i| i >= count) {
            return Err(ClothError::AnchorOutOfBounds { index, count });
        }
        self.validate_dynamics()
    }

    /// Check only the parameters the step pipeline divides by.
    ///
    /// Layout and anchors are not looked at, so this is the check for a
    /// hand-built grid.
    pub fn validate_dynamics(&self) -> Result<(), ClothError> {
        if !(self.particle_mass > F::zero()) || !self.particle_mass.is_finite() {
            return Err(ClothError::InvalidMass);
        }
        if !(self.fixed_step > F::zero()) || !self.fixed_step.is_finite() {
            return Err(ClothError::InvalidTimeStep);
        }
        Ok(())
    }
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::hanging()
    }
}
