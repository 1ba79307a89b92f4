//! Error types for cloth construction.
//!
//! Only configuration problems are reported as errors. Broken topology
//! (self-springs, dangling indices) is a programming error and panics.

use thiserror::Error;

/// Errors raised while validating a configuration or building a cloth.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClothError {
    /// Grid must have at least one cell along each axis.
    #[error("grid must have at least one cell along each axis")]
    InvalidGridDimensions,
    /// Spacing between neighbouring particles must be positive and finite.
    #[error("particle spacing must be positive and finite")]
    InvalidSpacing,
    /// Mass must be positive and finite.
    #[error("particle mass must be positive and finite")]
    InvalidMass,
    /// The fixed step must be positive and finite.
    #[error("fixed time step must be positive and finite")]
    InvalidTimeStep,
    /// An anchor index does not name a particle.
    #[error("anchor index {index} out of bounds (count: {count})")]
    AnchorOutOfBounds { index: usize, count: usize },
    /// The obstacle transform cannot be inverted.
    #[error("obstacle transform is singular")]
    DegenerateObstacle,
}
