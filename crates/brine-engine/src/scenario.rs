//! Time series of forcing for multi-step runs.
//!
//! A [`Scenario`] is a table of `(time, Forcing)` rows with strictly
//! increasing times, in seconds since the start of the run. The row in
//! effect at time `t` is the last row whose time lies strictly before `t`;
//! at or before the first row time, the first row applies.

use std::error::Error;
use std::fmt;

use brine_core::{StepError, StepId};

use crate::forcing::Forcing;

// ── ScenarioError ──────────────────────────────────────────────────

/// Errors detected when building or checking a [`Scenario`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioError {
    /// The scenario has no rows.
    Empty,
    /// A row time is NaN or infinite.
    NonFiniteTime {
        /// Row index.
        index: usize,
    },
    /// Row times are not strictly increasing.
    NotIncreasing {
        /// Index of the first offending row.
        index: usize,
        /// Time of the row before it.
        previous: f64,
        /// Time of the offending row.
        time: f64,
    },
    /// Two rows are closer together than the model's time step.
    IntervalShorterThanDt {
        /// Index of the later row of the pair.
        index: usize,
        /// The interval between the rows (s).
        interval: f64,
        /// The model time step (s).
        dt: f64,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "scenario has no rows"),
            Self::NonFiniteTime { index } => write!(f, "row {index} has a non-finite time"),
            Self::NotIncreasing {
                index,
                previous,
                time,
            } => write!(
                f,
                "row {index} time {time} does not follow previous time {previous}"
            ),
            Self::IntervalShorterThanDt {
                index,
                interval,
                dt,
            } => write!(
                f,
                "interval {interval} s before row {index} is shorter than dt {dt} s"
            ),
        }
    }
}

impl Error for ScenarioError {}

// ── RunError ───────────────────────────────────────────────────────

/// Errors from [`SaltModel::run_until`](crate::SaltModel::run_until).
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The scenario does not fit the model.
    Scenario(ScenarioError),
    /// A step failed; earlier steps stay applied.
    Step {
        /// The step that failed.
        step: StepId,
        /// Model time at the start of the failed step (s).
        time: f64,
        /// The underlying step error.
        source: StepError,
    },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scenario(e) => write!(f, "scenario: {e}"),
            Self::Step { step, time, source } => {
                write!(f, "step {step} at t={time} s failed: {source}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scenario(e) => Some(e),
            Self::Step { source, .. } => Some(source),
        }
    }
}

impl From<ScenarioError> for RunError {
    fn from(e: ScenarioError) -> Self {
        Self::Scenario(e)
    }
}

// ── Scenario ───────────────────────────────────────────────────────

/// Forcing rows keyed by time.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    times: Vec<f64>,
    forcings: Vec<Forcing>,
}

impl Scenario {
    /// Build a scenario from `(time, forcing)` rows.
    pub fn new(rows: impl IntoIterator<Item = (f64, Forcing)>) -> Result<Self, ScenarioError> {
        let (times, forcings): (Vec<f64>, Vec<Forcing>) = rows.into_iter().unzip();
        if times.is_empty() {
            return Err(ScenarioError::Empty);
        }
        for (index, &time) in times.iter().enumerate() {
            if !time.is_finite() {
                return Err(ScenarioError::NonFiniteTime { index });
            }
            if index > 0 && time <= times[index - 1] {
                return Err(ScenarioError::NotIncreasing {
                    index,
                    previous: times[index - 1],
                    time,
                });
            }
        }
        Ok(Self { times, forcings })
    }

    /// A single row applying `forcing` for all time.
    pub fn constant(forcing: Forcing) -> Self {
        Self {
            times: vec![0.0],
            forcings: vec![forcing],
        }
    }

    /// Number of rows. Never zero.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`; kept for API symmetry with `len()`.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Row times (s).
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Index of the row in effect at `time`.
    pub fn row_index_at(&self, time: f64) -> usize {
        self.times
            .partition_point(|&t| t < time)
            .saturating_sub(1)
    }

    /// Forcing in effect at `time`.
    pub fn forcing_at(&self, time: f64) -> &Forcing {
        &self.forcings[self.row_index_at(time)]
    }

    /// Check that no interval between rows is shorter than `dt`.
    pub fn check_dt(&self, dt: f64) -> Result<(), ScenarioError> {
        for (index, pair) in self.times.windows(2).enumerate() {
            let interval = pair[1] - pair[0];
            if interval < dt {
                return Err(ScenarioError::IntervalShorterThanDt {
                    index: index + 1,
                    interval,
                    dt,
                });
            }
        }
        Ok(())
    }
}
