//! Fixed-step time accumulator.

use crate::error::ClothError;
use crate::float::Float;

/// Turns variable frame times into a whole number of fixed steps.
///
/// Leftover time smaller than one step is carried into the next call.
/// With a catch-up limit set, backlog beyond that many steps is
/// discarded instead of simulated.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedStepScheduler<F: Float> {
    step: F,
    accumulator: F,
    max_steps: Option<usize>,
}

impl<F: Float> FixedStepScheduler<F> {
    /// A scheduler with no catch-up limit.
    ///
    /// `step` must be positive and finite, or `advance` could never drain
    /// the accumulator.
    pub fn new(step: F) -> Result<Self, ClothError> {
        if !(step > F::zero()) || !step.is_finite() {
            return Err(ClothError::InvalidTimeStep);
        }
        Ok(FixedStepScheduler { step, accumulator: F::zero(), max_steps: None })
    }

    /// Cap the number of steps a single `advance` may report.
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Add `elapsed` wall time and return how many fixed steps are due.
    ///
    /// Negative or non-finite input counts as no time passing.
    pub fn advance(&mut self, elapsed: F) -> usize {
        if elapsed.is_finite() && elapsed > F::zero() {
            self.accumulator = self.accumulator + elapsed;
        }

        let mut steps = 0;
        while self.accumulator >= self.step {
            if self.max_steps.is_some_and(|max| steps >= max) {
                log::warn!(
                    "simulation fell behind, dropping {:?}s of backlog after {} steps",
                    self.accumulator,
                    steps,
                );
                self.accumulator = F::zero();
                break;
            }
            self.accumulator = self.accumulator - self.step;
            steps += 1;
        }
        steps
    }

    pub fn step(&self) -> F { self.step }
    pub fn accumulator(&self) -> F { self.accumulator }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> F { self.accumulator / self.step }

    pub fn reset(&mut self) {
        self.accumulator = F::zero();
    }
}
