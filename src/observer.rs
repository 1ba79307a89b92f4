//! Step observer trait for monitoring the cloth pipeline.

/// Hooks called at each stage of a simulation step.
///
/// Implement this to drive debug overlays, profiling, or test probes.
/// All methods default to no-ops.
pub trait StepObserver {
    /// Called after forces have been rebuilt.
    fn on_forces(&mut self, _degenerate_springs: usize) {}

    /// Called after all free particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after obstacle and ground contacts are resolved.
    fn on_collisions(&mut self, _contacts: usize) {}

    /// Called after the stretch limiter pass.
    fn on_stretch_limit(&mut self, _corrected: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Tallies pipeline activity across steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepCounter {
    pub steps: usize,
    pub contacts: usize,
    pub corrected_springs: usize,
    pub degenerate_springs: usize,
}

impl StepObserver for StepCounter {
    fn on_forces(&mut self, degenerate_springs: usize) {
        self.degenerate_springs += degenerate_springs;
    }

    fn on_collisions(&mut self, contacts: usize) {
        self.contacts += contacts;
    }

    fn on_stretch_limit(&mut self, corrected: usize) {
        self.corrected_springs += corrected;
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
