//! Particle grid: the flattened 2D lattice that owns all particle state.

use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Plane the lattice is laid out in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Plane {
    /// Vertical curtain: columns along +X, rows hang along -Y.
    Xy,
    /// Horizontal sheet: columns along +X, rows along +Z.
    #[default]
    Xz,
}

/// Lattice dimensions, measured in cells.
///
/// A layout with `rows` x `cols` cells holds `(rows + 1) * (cols + 1)`
/// particles.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout<F: Float> {
    pub rows: usize,
    pub cols: usize,
    pub spacing: F,
    pub origin: Vec3<F>,
    pub plane: Plane,
}

impl<F: Float> GridLayout<F> {
    pub fn new(rows: usize, cols: usize, spacing: F) -> Self {
        GridLayout { rows, cols, spacing, origin: Vec3::zero(), plane: Plane::default() }
    }

    pub fn with_origin(mut self, origin: Vec3<F>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.plane = plane;
        self
    }

    pub fn particle_rows(&self) -> usize { self.rows + 1 }
    pub fn particle_cols(&self) -> usize { self.cols + 1 }
    pub fn particle_count(&self) -> usize { self.particle_rows() * self.particle_cols() }

    /// Rest position of the particle at (`row`, `col`).
    pub fn position_at(&self, row: usize, col: usize) -> Vec3<F> {
        let u = F::from_usize(col) * self.spacing;
        let v = F::from_usize(row) * self.spacing;
        let offset = match self.plane {
            Plane::Xy => Vec3::new(u, -v, F::zero()),
            Plane::Xz => Vec3::new(u, F::zero(), v),
        };
        self.origin + offset
    }
}

/// Which particles start out fixed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Anchors {
    /// Draped cloth: nothing is pinned.
    #[default]
    None,
    /// Both corners of the first row: indices `0` and `cols`.
    TopCorners,
    /// Explicit particle indices.
    Indices(AllocVec<usize>),
}

impl Anchors {
    /// Resolve to particle indices for a layout with `cols` cells per row.
    pub fn indices(&self, cols: usize) -> AllocVec<usize> {
        match self {
            Anchors::None => AllocVec::new(),
            Anchors::TopCorners => alloc::vec![0, cols],
            Anchors::Indices(indices) => indices.clone(),
        }
    }
}

/// All particles of a cloth, stored row-major.
///
/// Particle at (`row`, `col`) has index `row * particle_cols + col`.
/// Particles are created once and never removed, so indices stay valid
/// for the lifetime of the grid.
#[derive(Clone, Debug)]
pub struct ParticleGrid<F: Float> {
    particles: AllocVec<Particle<F>>,
    rest_positions: AllocVec<Vec3<F>>,
    anchors: AllocVec<usize>,
    rows: usize,
    cols: usize,
}

impl<F: Float> ParticleGrid<F> {
    /// Lay out `(rows + 1) * (cols + 1)` particles at rest on a planar lattice.
    pub fn initialize(layout: &GridLayout<F>, anchors: &Anchors) -> Result<Self, ClothError> {
        if layout.rows == 0 || layout.cols == 0 {
            return Err(ClothError::InvalidGridDimensions);
        }
        if !(layout.spacing > F::zero()) || !layout.spacing.is_finite() {
            return Err(ClothError::InvalidSpacing);
        }

        let rows = layout.particle_rows();
        let cols = layout.particle_cols();
        let count = rows * cols;
        let anchors = anchors.indices(layout.cols);
        if let Some(&index) = anchors.iter().find(|&&i| i >= count) {
            return Err(ClothError::AnchorOutOfBounds { index, count });
        }

        let mut particles = AllocVec::with_capacity(count);
        for row in 0..rows {
            for col in 0..cols {
                particles.push(Particle::new(layout.position_at(row, col)));
            }
        }
        for &index in &anchors {
            particles[index].fixed = true;
        }
        let rest_positions = particles.iter().map(|p| p.position).collect();

        Ok(ParticleGrid { particles, rest_positions, anchors, rows, cols })
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "grid cell ({row}, {col}) out of range");
        row * self.cols + col
    }

    pub fn particle(&self, index: usize) -> &Particle<F> { &self.particles[index] }
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> { &mut self.particles[index] }
    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn particles_mut(&mut self) -> &mut [Particle<F>] { &mut self.particles }

    pub fn position_of(&self, index: usize) -> Vec3<F> { self.particles[index].position }
    pub fn velocity_of(&self, index: usize) -> Vec3<F> { self.particles[index].velocity }
    pub fn is_fixed(&self, index: usize) -> bool { self.particles[index].fixed }

    pub fn positions(&self) -> impl ExactSizeIterator<Item = Vec3<F>> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    /// Move a particle from outside the simulation (e.g. mouse drag).
    ///
    /// Works on fixed particles too; velocity is untouched.
    pub fn set_external_position(&mut self, index: usize, position: Vec3<F>) {
        self.particles[index].move_to(position);
    }

    pub fn clear_velocity(&mut self, index: usize) {
        self.particles[index].clear_velocity();
    }

    pub fn set_fixed(&mut self, index: usize, fixed: bool) {
        let p = &mut self.particles[index];
        p.fixed = fixed;
        if fixed {
            p.clear_velocity();
        }
    }

    /// Index of the particle closest to `point`, if any lies within `tolerance`.
    pub fn pick_nearest(&self, point: Vec3<F>, tolerance: F) -> Option<usize> {
        let limit = tolerance * tolerance;
        let mut best: Option<(usize, F)> = None;
        for (i, p) in self.particles.iter().enumerate() {
            let d = p.position.distance_sq(point);
            if d > limit {
                continue;
            }
            match best {
                Some((_, best_d)) if best_d <= d => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Two triangles per cell, wound consistently, for surface rendering.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        (0..self.rows - 1).flat_map(move |row| {
            (0..self.cols - 1).flat_map(move |col| {
                let tl = row * self.cols + col;
                let tr = tl + 1;
                let bl = tl + self.cols;
                let br = bl + 1;
                [[tl, bl, tr], [tr, bl, br]]
            })
        })
    }

    /// Put every particle back at its initial position, at rest, with
    /// the initial anchors.
    pub fn reset(&mut self) {
        for (p, &rest) in self.particles.iter_mut().zip(self.rest_positions.iter()) {
            *p = Particle::new(rest);
        }
        for &index in &self.anchors {
            self.particles[index].fixed = true;
        }
    }

    pub fn rest_position(&self, index: usize) -> Vec3<F> { self.rest_positions[index] }
    pub fn particle_rows(&self) -> usize { self.rows }
    pub fn particle_cols(&self) -> usize { self.cols }
    pub fn particle_count(&self) -> usize { self.particles.len() }
}
