//! Reusable solver test fixtures.
//!
//! - [`FixedSolver`]: returns the same result set on every call.
//! - [`RecordingSolver`]: a [`FixedSolver`] that logs every parameter set.
//! - [`FailingSolver`]: fails deterministically after N calls.
//! - [`HeadDrivenSolver`]: a smooth, deterministic function of the heads
//!   and salinities. Not a lock-exchange formulation; it only gives tests
//!   and benchmarks results that react to forcing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use brine_core::{names, ParameterSet, ResultSet, SolverError, SteadySolver};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Returns a fixed result set regardless of input.
#[derive(Clone, Debug)]
pub struct FixedSolver {
    pub results: ResultSet,
}

impl FixedSolver {
    /// Results with the three entries the model consumes.
    pub fn new(discharge_from_lake: f64, discharge_to_lake: f64, salt_load_lake: f64) -> Self {
        Self {
            results: ResultSet::new()
                .with(names::DISCHARGE_FROM_LAKE, discharge_from_lake)
                .with(names::DISCHARGE_TO_LAKE, discharge_to_lake)
                .with(names::SALT_LOAD_LAKE, salt_load_lake),
        }
    }

    /// Arbitrary result set, e.g. one with entries missing.
    pub fn with_results(results: ResultSet) -> Self {
        Self { results }
    }
}

impl SteadySolver for FixedSolver {
    fn name(&self) -> &str {
        "fixed"
    }

    fn calc_steady(&self, _parameters: &ParameterSet) -> Result<ResultSet, SolverError> {
        Ok(self.results.clone())
    }
}

/// Shared log of the parameter sets a [`RecordingSolver`] received.
pub type ParameterLog = Arc<Mutex<Vec<ParameterSet>>>;

/// A [`FixedSolver`] that records each call's parameters.
///
/// Keep the [`log()`](RecordingSolver::log) handle before moving the solver
/// into a model, then inspect it after stepping.
pub struct RecordingSolver {
    inner: FixedSolver,
    log: ParameterLog,
}

impl RecordingSolver {
    pub fn new(inner: FixedSolver) -> Self {
        Self {
            inner,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the shared call log.
    pub fn log(&self) -> ParameterLog {
        Arc::clone(&self.log)
    }
}

impl SteadySolver for RecordingSolver {
    fn name(&self) -> &str {
        "recording"
    }

    fn calc_steady(&self, parameters: &ParameterSet) -> Result<ResultSet, SolverError> {
        self.log
            .lock()
            .map_err(|_| SolverError::Failed {
                solver: self.name().to_string(),
                reason: "parameter log poisoned".into(),
            })?
            .push(parameters.clone());
        self.inner.calc_steady(parameters)
    }
}

/// Succeeds `succeed_count` times, then fails on every call.
///
/// Uses `AtomicUsize` for the call counter so it satisfies `Send`.
pub struct FailingSolver {
    pub inner: FixedSolver,
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingSolver {
    pub fn new(inner: FixedSolver, succeed_count: usize) -> Self {
        Self {
            inner,
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `calc_steady()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl SteadySolver for FailingSolver {
    fn name(&self) -> &str {
        "failing"
    }

    fn calc_steady(&self, parameters: &ParameterSet) -> Result<ResultSet, SolverError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(SolverError::Failed {
                solver: self.name().to_string(),
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        self.inner.calc_steady(parameters)
    }
}

/// Deterministic stand-in driven by the lock parameters.
///
/// Per lock cycle it moves the levelling volume `L·W·|head_sea − head_lake|`
/// out of the lake and exchanges `calibration · L·W·(head_lake − lock_bottom)`
/// each way, carrying the sea–lake salinity difference into the lake.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadDrivenSolver;

impl SteadySolver for HeadDrivenSolver {
    fn name(&self) -> &str {
        "head_driven"
    }

    fn calc_steady(&self, p: &ParameterSet) -> Result<ResultSet, SolverError> {
        let area = p.require(names::LOCK_LENGTH)? * p.require(names::LOCK_WIDTH)?;
        let head_sea = p.require(names::HEAD_SEA)?;
        let head_lake = p.require(names::HEAD_LAKE)?;
        let lock_bottom = p.require(names::LOCK_BOTTOM)?;
        let cycles_per_second = p.require(names::NUM_CYCLES)? / SECONDS_PER_DAY;
        let calibration = p.require(names::CALIBRATION_COEFFICIENT)?;
        let salinity_gap = p.require(names::SALINITY_SEA)? - p.require(names::SALINITY_LAKE)?;

        let levelling = area * (head_sea - head_lake).abs();
        let exchange = calibration * area * (head_lake - lock_bottom);

        Ok(ResultSet::new()
            .with(
                names::DISCHARGE_FROM_LAKE,
                cycles_per_second * (levelling + exchange),
            )
            .with(names::DISCHARGE_TO_LAKE, cycles_per_second * exchange)
            .with(
                names::SALT_LOAD_LAKE,
                cycles_per_second * exchange * salinity_gap,
            ))
    }
}
