//! The simulation context: grid, springs, obstacles, and the step pipeline.

use crate::collision::{resolve_collisions, Ellipsoid, GroundPlane};
use crate::config::{ClothConfig, PassOrder};
use crate::error::ClothError;
use crate::float::Float;
use crate::forces::compute_forces;
use crate::grid::ParticleGrid;
use crate::integrator::{integrate, Integration};
use crate::limiter::limit_stretch;
use crate::network::SpringNetwork;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::scheduler::FixedStepScheduler;
use crate::spring::SpringKind;
use crate::vec::Vec3;

/// A mass-spring cloth and everything needed to step it.
///
/// Callers feed measured frame time to [`advance`](Self::advance) and read
/// positions back for drawing. Mouse interaction goes through
/// [`set_external_position`](Self::set_external_position) between calls.
#[derive(Clone, Debug)]
pub struct Cloth<F: Float> {
    grid: ParticleGrid<F>,
    network: SpringNetwork<F>,
    scheduler: FixedStepScheduler<F>,
    obstacle: Option<Ellipsoid<F>>,
    ground: Option<GroundPlane<F>>,
    gravity: Vec3<F>,
    damping: F,
    mass: F,
    integration: Integration,
    pass_order: PassOrder,
    stretch_limiting: bool,
}

impl<F: Float> Cloth<F> {
    /// Validate `config`, lay out the grid, then build springs from the
    /// rest positions.
    pub fn new(config: ClothConfig<F>) -> Result<Self, ClothError> {
        config.validate()?;
        let grid = ParticleGrid::initialize(&config.layout, &config.anchors)?;
        let network = SpringNetwork::build(&grid, &config.springs);
        Self::from_parts(grid, network, config)
    }

    /// Assemble a cloth from a hand-built grid and network.
    ///
    /// Layout and anchors in `config` are ignored; the physical
    /// parameters, obstacles, and timing are taken from it and checked
    /// with [`ClothConfig::validate_dynamics`].
    pub fn from_parts(
        grid: ParticleGrid<F>,
        network: SpringNetwork<F>,
        config: ClothConfig<F>,
    ) -> Result<Self, ClothError> {
        config.validate_dynamics()?;
        let scheduler = FixedStepScheduler::new(config.fixed_step)?
            .with_max_steps(config.max_steps_per_advance);
        log::info!(
            "cloth ready: {} particles ({}x{}), {} springs, obstacle: {}",
            grid.particle_count(),
            grid.particle_rows(),
            grid.particle_cols(),
            network.len(),
            config.obstacle.is_some(),
        );
        Ok(Cloth {
            grid,
            network,
            scheduler,
            obstacle: config.obstacle,
            ground: config.ground,
            gravity: config.gravity,
            damping: config.damping,
            mass: config.particle_mass,
            integration: config.integration,
            pass_order: config.pass_order,
            stretch_limiting: config.stretch_limiting,
        })
    }

    /// Consume `elapsed` wall time, running whole fixed steps.
    ///
    /// Returns the number of steps run.
    pub fn advance(&mut self, elapsed: F) -> usize {
        self.advance_observed(elapsed, &mut NoOpStepObserver)
    }

    pub fn advance_observed<O: StepObserver>(&mut self, elapsed: F, observer: &mut O) -> usize {
        let steps = self.scheduler.advance(elapsed);
        for _ in 0..steps {
            self.step_observed(observer);
        }
        steps
    }

    /// Run exactly one pipeline invocation, bypassing the accumulator.
    pub fn step(&mut self) {
        self.step_observed(&mut NoOpStepObserver);
    }

    pub fn step_observed<O: StepObserver>(&mut self, observer: &mut O) {
        let dt = self.scheduler.step();

        let degenerate = compute_forces(&mut self.grid, &self.network, self.gravity, self.damping);
        observer.on_forces(degenerate);

        integrate(&mut self.grid, dt, self.mass, self.integration);
        observer.on_integrate();

        match self.pass_order {
            PassOrder::CollideThenLimit => {
                self.collide(observer);
                self.limit(observer);
            }
            PassOrder::LimitThenCollide => {
                self.limit(observer);
                self.collide(observer);
            }
        }

        observer.on_step_complete();
    }

    fn collide<O: StepObserver>(&mut self, observer: &mut O) {
        let contacts = resolve_collisions(&mut self.grid, self.obstacle.as_ref(), self.ground.as_ref());
        observer.on_collisions(contacts);
    }

    fn limit<O: StepObserver>(&mut self, observer: &mut O) {
        if self.stretch_limiting {
            let corrected = limit_stretch(&mut self.grid, &self.network);
            observer.on_stretch_limit(corrected);
        }
    }

    /// Move a particle from outside the simulation, e.g. while dragging.
    pub fn set_external_position(&mut self, index: usize, position: Vec3<F>) {
        self.grid.set_external_position(index, position);
    }

    pub fn clear_velocity(&mut self, index: usize) {
        self.grid.clear_velocity(index);
    }

    /// Anchor or release a particle at runtime.
    pub fn set_fixed(&mut self, index: usize, fixed: bool) {
        self.grid.set_fixed(index, fixed);
    }

    /// Nearest particle within `tolerance` of `point`, for picking.
    pub fn pick_nearest(&self, point: Vec3<F>, tolerance: F) -> Option<usize> {
        self.grid.pick_nearest(point, tolerance)
    }

    /// Back to the initial shape, at rest, with an empty accumulator.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.scheduler.reset();
    }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3<F>> + '_ {
        self.grid.positions()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Vec3<F>, Vec3<F>, SpringKind)> + '_ {
        self.network.segments(&self.grid)
    }

    pub fn segments_of(&self, kind: SpringKind) -> impl Iterator<Item = (Vec3<F>, Vec3<F>)> + '_ {
        self.network.segments_of(&self.grid, kind)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.grid.triangles()
    }

    pub fn max_stretch_ratio(&self) -> F {
        self.network.max_stretch_ratio(&self.grid)
    }

    /// Sum of particle speeds.
    pub fn total_speed(&self) -> F {
        self.grid.particles().iter().fold(F::zero(), |acc, p| acc + p.speed())
    }

    pub fn kinetic_energy(&self) -> F {
        let half_m = self.mass * F::half();
        self.grid
            .particles()
            .iter()
            .fold(F::zero(), |acc, p| acc + half_m * p.velocity.length_sq())
    }

    pub fn grid(&self) -> &ParticleGrid<F> { &self.grid }
    pub fn network(&self) -> &SpringNetwork<F> { &self.network }
    pub fn scheduler(&self) -> &FixedStepScheduler<F> { &self.scheduler }
    pub fn obstacle(&self) -> Option<&Ellipsoid<F>> { self.obstacle.as_ref() }
    pub fn ground(&self) -> Option<&GroundPlane<F>> { self.ground.as_ref() }
    pub fn particle_count(&self) -> usize { self.grid.particle_count() }
    pub fn spring_count(&self) -> usize { self.network.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Anchors, GridLayout};
    use crate::observer::StepCounter;

    fn small() -> ClothConfig<f32> {
        ClothConfig::hanging().with_layout(GridLayout::new(6, 6, 0.2).with_origin(Vec3::new(0.0, 3.0, 0.0)))
    }

    #[test]
    fn builds_grid_and_network() {
        let cloth = Cloth::new(small()).unwrap();
        assert_eq!(cloth.particle_count(), 49);
        // 2*7*6 structural + 2*6*6 shear + 2*7*5 bend
        assert_eq!(cloth.spring_count(), 84 + 72 + 70);
    }

    #[test]
    fn invalid_config_is_reported() {
        let err = Cloth::new(small().with_mass(-1.0)).unwrap_err();
        assert_eq!(err, ClothError::InvalidMass);
    }

    #[test]
    fn every_stage_runs_once_per_step() {
        let mut cloth = Cloth::new(small()).unwrap();
        let mut counter = StepCounter::default();
        let dt = cloth.scheduler().step();
        assert_eq!(cloth.advance_observed(dt * 3.0 + dt * 0.5, &mut counter), 3);
        assert_eq!(counter.steps, 3);
    }

    #[test]
    fn disabled_limiter_is_not_reported() {
        struct LimitProbe(usize);
        impl StepObserver for LimitProbe {
            fn on_stretch_limit(&mut self, _corrected: usize) { self.0 += 1; }
        }
        let mut cloth = Cloth::new(small().with_stretch_limiting(false)).unwrap();
        let mut probe = LimitProbe(0);
        cloth.step_observed(&mut probe);
        assert_eq!(probe.0, 0);
    }

    #[test]
    fn reset_returns_to_rest() {
        let mut cloth = Cloth::new(small().with_anchors(Anchors::None)).unwrap();
        for _ in 0..30 {
            cloth.step();
        }
        assert!(cloth.total_speed() > 0.0);
        cloth.reset();
        assert_eq!(cloth.total_speed(), 0.0);
        assert_eq!(cloth.grid().position_of(10), cloth.grid().rest_position(10));
    }
}
