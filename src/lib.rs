//! Real-time mass-spring cloth simulation.
//!
//! `drape` models cloth as a grid of particles tied together by damped
//! springs. Each fixed step accumulates gravity, damping, and spring
//! forces, integrates with explicit Euler, resolves contact with an
//! ellipsoid and a ground plane, and relaxes overstretched springs with a
//! velocity-space dynamic inverse. Rendering and input are left to the
//! caller: read positions out, push dragged particles in.
//!
//! # Features
//!
//! - **Grid topology**: structural, shear, and bend springs with per-kind constants
//! - **Fixed-step scheduling**: frame-rate independent with carried remainder
//! - **Stretch limiting**: keeps the cloth visually inextensible
//! - **Obstacles**: arbitrary rotated, scaled ellipsoid plus a ground plane
//! - **Observable**: monitor pipeline stages via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments
//!
//! ```
//! use drape::{Cloth, ClothConfig};
//!
//! let mut cloth: Cloth<f32> = Cloth::new(ClothConfig::hanging()).unwrap();
//! let steps = cloth.advance(1.0 / 30.0);
//! assert_eq!(steps, 2);
//! let first = cloth.positions().next().unwrap();
//! assert_eq!(first, cloth.grid().rest_position(0));
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod grid;
pub mod spring;
pub mod network;
pub mod forces;
pub mod integrator;
pub mod limiter;
pub mod collision;
pub mod scheduler;
pub mod cloth;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Mat3, Vec3};
pub use particle::Particle;
pub use grid::{Anchors, GridLayout, ParticleGrid, Plane};
pub use spring::{Spring, SpringKind, SpringParams};
pub use network::{NetworkParams, SpringNetwork};
pub use integrator::Integration;
pub use collision::{Ellipsoid, GroundPlane};
pub use scheduler::FixedStepScheduler;
pub use cloth::Cloth;
pub use config::{ClothConfig, PassOrder};
pub use observer::{NoOpStepObserver, StepCounter, StepObserver};
pub use error::ClothError;
