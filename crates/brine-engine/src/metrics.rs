//! Per-step timing metrics for the salt model.
//!
//! [`StepMetrics`] captures wall-clock timing for a single step so callers
//! can tell time spent in the external solver from the model's own work.

/// Timing collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent inside the steady-state solver, in microseconds.
    pub solver_us: u64,
}

impl StepMetrics {
    /// Time spent outside the solver, in microseconds.
    pub fn model_us(&self) -> u64 {
        self.total_us.saturating_sub(self.solver_us)
    }
}
