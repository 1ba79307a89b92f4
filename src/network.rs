//! Spring network: structural, shear, and bend springs over a particle grid.

use crate::float::Float;
use crate::grid::ParticleGrid;
use crate::spring::{Spring, SpringKind, SpringParams};
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// One stiffness/damping pair per spring kind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NetworkParams<F: Float> {
    pub structural: SpringParams<F>,
    pub shear: SpringParams<F>,
    pub bend: SpringParams<F>,
}

impl<F: Float> NetworkParams<F> {
    /// Same pair for every kind.
    pub fn uniform(params: SpringParams<F>) -> Self {
        NetworkParams { structural: params, shear: params, bend: params }
    }

    pub fn for_kind(&self, kind: SpringKind) -> SpringParams<F> {
        match kind {
            SpringKind::Structural => self.structural,
            SpringKind::Shear => self.shear,
            SpringKind::Bend => self.bend,
        }
    }
}

/// The static set of springs tying a [`ParticleGrid`] together.
#[derive(Clone, Debug, Default)]
pub struct SpringNetwork<F: Float> {
    springs: AllocVec<Spring<F>>,
}

impl<F: Float> SpringNetwork<F> {
    /// An empty network, for hand-built topologies.
    pub fn new() -> Self {
        SpringNetwork { springs: AllocVec::new() }
    }

    /// Enumerate every structural, shear, and bend spring of `grid`.
    ///
    /// Rest lengths are read from the grid's current positions, so this
    /// must run while the grid is still in its rest configuration.
    ///
    /// With `R` x `C` particles the network holds:
    /// - Structural: `R*(C-1) + (R-1)*C` springs, one per axis-adjacent pair
    /// - Shear: `2*(R-1)*(C-1)`, both diagonals of every cell
    /// - Bend: `R*(C-2) + (R-2)*C`, every skip-one pair. The last of these
    ///   in each row and column joins the final two particles to the
    ///   rest of the line.
    pub fn build(grid: &ParticleGrid<F>, params: &NetworkParams<F>) -> Self {
        let rows = grid.particle_rows();
        let cols = grid.particle_cols();
        let mut network = SpringNetwork::new();

        // Structural: horizontal (col, col+1)
        for row in 0..rows {
            for col in 0..cols.saturating_sub(1) {
                let a = grid.index(row, col);
                network.connect(grid, a, a + 1, params.structural, SpringKind::Structural);
            }
        }

        // Structural: vertical (row, row+1)
        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols {
                let a = grid.index(row, col);
                network.connect(grid, a, a + cols, params.structural, SpringKind::Structural);
            }
        }

        // Shear: both diagonals of each cell
        for row in 0..rows.saturating_sub(1) {
            for col in 0..cols.saturating_sub(1) {
                let tl = grid.index(row, col);
                let tr = tl + 1;
                let bl = tl + cols;
                let br = bl + 1;
                network.connect(grid, tl, br, params.shear, SpringKind::Shear);
                network.connect(grid, tr, bl, params.shear, SpringKind::Shear);
            }
        }

        // Bend: skip-one horizontal
        for row in 0..rows {
            for col in 0..cols.saturating_sub(2) {
                let a = grid.index(row, col);
                network.connect(grid, a, a + 2, params.bend, SpringKind::Bend);
            }
        }

        // Bend: skip-one vertical
        for row in 0..rows.saturating_sub(2) {
            for col in 0..cols {
                let a = grid.index(row, col);
                network.connect(grid, a, a + 2 * cols, params.bend, SpringKind::Bend);
            }
        }

        log::debug!(
            "spring network built: {} structural, {} shear, {} bend",
            network.count_of(SpringKind::Structural),
            network.count_of(SpringKind::Shear),
            network.count_of(SpringKind::Bend),
        );
        network
    }

    /// Add a spring between `a` and `b` at their current distance.
    ///
    /// # Panics
    /// See [`Spring::between`].
    pub fn connect(
        &mut self,
        grid: &ParticleGrid<F>,
        a: usize,
        b: usize,
        params: SpringParams<F>,
        kind: SpringKind,
    ) -> usize {
        let idx = self.springs.len();
        self.springs.push(Spring::between(a, b, grid.particles(), params, kind));
        idx
    }

    pub fn springs(&self) -> &[Spring<F>] { &self.springs }
    pub fn spring(&self, index: usize) -> &Spring<F> { &self.springs[index] }
    pub fn len(&self) -> usize { self.springs.len() }
    pub fn is_empty(&self) -> bool { self.springs.is_empty() }

    pub fn count_of(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }

    /// Endpoint positions and kind of every spring, for line rendering.
    pub fn segments<'a>(
        &'a self,
        grid: &'a ParticleGrid<F>,
    ) -> impl Iterator<Item = (Vec3<F>, Vec3<F>, SpringKind)> + 'a {
        self.springs
            .iter()
            .map(move |s| (grid.position_of(s.a), grid.position_of(s.b), s.kind))
    }

    pub fn segments_of<'a>(
        &'a self,
        grid: &'a ParticleGrid<F>,
        kind: SpringKind,
    ) -> impl Iterator<Item = (Vec3<F>, Vec3<F>)> + 'a {
        self.segments(grid)
            .filter(move |&(_, _, k)| k == kind)
            .map(|(a, b, _)| (a, b))
    }

    /// Largest current length / rest length over all springs.
    pub fn max_stretch_ratio(&self, grid: &ParticleGrid<F>) -> F {
        self.springs
            .iter()
            .map(|s| s.stretch_ratio(grid.particles()))
            .fold(F::zero(), F::max)
    }
}
