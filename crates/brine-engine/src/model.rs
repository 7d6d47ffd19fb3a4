//! The harbour–canal salt model.
//!
//! [`SaltModel`] is the caller-owned simulation state: the two reservoirs,
//! the connection between them, the injected solver and the configuration.
//! Each [`step()`](SaltModel::step) is one call of the steady-state solver
//! followed by one explicit mass update of both reservoirs.
//!
//! # Atomicity
//!
//! Both mass increments are computed from the pre-step state before either
//! is applied. A step that fails at any point leaves the model unchanged.

use std::time::Instant;

use brine_basin::{BasinSet, Connection, Dispersion, Inflow, Reservoir};
use brine_core::{
    names, ParameterSet, ReservoirId, ResultSet, SteadySolver, StepError, StepId,
};

use crate::config::{ConfigError, ModelConfig};
use crate::forcing::Forcing;
use crate::metrics::StepMetrics;
use crate::scenario::{RunError, Scenario};

/// Name of the approach harbour in the model's [`BasinSet`].
pub const APPROACH_HARBOR: &str = "approach_harbor";

/// Name of the canal in the model's [`BasinSet`].
pub const CANAL: &str = "canal";

// Compile-time assertion: SaltModel is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<SaltModel>();
    }
};

// ── StepReport ──────────────────────────────────────────────────

/// Result of a successful [`SaltModel::step()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// The step just completed (1 after the first step).
    pub step: StepId,
    /// Model time at the end of the step (s).
    pub time: f64,
    /// Salt load into the lake reported by the solver (kg/s).
    pub salt_load_lake: f64,
    /// Net discharge entering the harbour (m³/s).
    pub discharge_in: f64,
    /// Harbour-to-canal exchange of this step.
    pub dispersion: Dispersion,
    /// Harbour salt mass after the step (kg).
    pub harbor_mass: f64,
    /// Canal salt mass after the step (kg).
    pub canal_mass: f64,
    /// Everything the solver returned.
    pub results: ResultSet,
    /// Timing for this step.
    pub metrics: StepMetrics,
}

// ── SaltModel ───────────────────────────────────────────────────

/// Approach harbour and canal coupled through a sea lock.
///
/// # Example
///
/// ```ignore
/// let mut model = SaltModel::new(ModelConfig::default(), Box::new(solver))?;
/// let report = model.step(&Forcing::new().head_sea(0.3))?;
/// println!("salt load {}", report.salt_load_lake);
/// ```
pub struct SaltModel {
    config: ModelConfig,
    solver: Box<dyn SteadySolver>,
    basins: BasinSet,
    harbor: ReservoirId,
    canal: ReservoirId,
    connection: Connection,
    step: StepId,
    time: f64,
    last_metrics: StepMetrics,
}

impl SaltModel {
    /// Create a model from a validated configuration and a solver.
    pub fn new(config: ModelConfig, solver: Box<dyn SteadySolver>) -> Result<Self, ConfigError> {
        config.validate()?;
        let (basins, harbor, canal) = build_basins(&config)?;
        Ok(Self {
            config,
            solver,
            basins,
            harbor,
            canal,
            connection: Connection::new(harbor, canal),
            step: StepId::default(),
            time: 0.0,
            last_metrics: StepMetrics::default(),
        })
    }

    /// Merged solver parameters for a step under `forcing`.
    ///
    /// Merge order, later entries winning: lock geometry, boundary
    /// conditions, the harbour's current salinity as `salinity_lake`, the
    /// forcing overrides, operational parameters.
    pub fn parameters(&self, forcing: &Forcing) -> Result<ParameterSet, StepError> {
        let mut parameters = self.config.lock.to_parameters();
        parameters.merge(&self.config.boundary.to_parameters());
        parameters.insert(names::SALINITY_LAKE, self.basins.salinity(self.harbor)?);
        parameters.merge(&forcing.to_parameters());
        parameters.merge(&self.config.operation.to_parameters());
        Ok(parameters)
    }

    /// Advance the model by one time step.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] if the solver fails, omits a required result,
    /// returns a non-finite value, or if a reservoir has no positive salt
    /// mass. The model is left untouched on error.
    pub fn step(&mut self, forcing: &Forcing) -> Result<StepReport, StepError> {
        let started = Instant::now();
        let dt = self.config.dt;

        let parameters = self.parameters(forcing)?;
        let solver_started = Instant::now();
        let results = self.solver.calc_steady(&parameters)?;
        let solver_us = solver_started.elapsed().as_micros() as u64;

        let discharge_from_lake = required(&results, names::DISCHARGE_FROM_LAKE)?;
        let discharge_to_lake = required(&results, names::DISCHARGE_TO_LAKE)?;
        let salt_load_lake = required(&results, names::SALT_LOAD_LAKE)?;
        let discharge_in = self.config.spui_discharge + (discharge_from_lake - discharge_to_lake);

        let dispersion =
            self.connection
                .dispersion(&self.basins, self.config.dispersion_coefficient, dt)?;

        let harbor_inflow = Inflow {
            discharge_in,
            salinity_in: self.basins.salinity(self.canal)?,
            mass_dispersion: -dispersion.mass,
            c_spui: self.config.harbor_spui_coefficient,
            mass_lockage: -(salt_load_lake * dt),
        };
        let canal_inflow = Inflow {
            discharge_in,
            salinity_in: self.config.canal_inflow_salinity,
            mass_dispersion: dispersion.mass,
            c_spui: self.config.canal_spui_coefficient,
            mass_lockage: 0.0,
        };
        let harbor_delta = self.basins.mass_delta(self.harbor, &harbor_inflow, dt)?;
        let canal_delta = self.basins.mass_delta(self.canal, &canal_inflow, dt)?;

        // Commit.
        self.basins.get_mut(self.harbor)?.apply_delta(harbor_delta);
        self.basins.get_mut(self.canal)?.apply_delta(canal_delta);
        self.step = self.step.next();
        self.time += dt;

        let metrics = StepMetrics {
            total_us: started.elapsed().as_micros() as u64,
            solver_us,
        };
        self.last_metrics = metrics.clone();

        let harbor_mass = self.basins[self.harbor].mass();
        let canal_mass = self.basins[self.canal].mass();
        log::debug!(
            "step {} t={}s via '{}': discharge_in={:.3} m3/s, salt_load_lake={:.4} kg/s, \
             dispersion={:.4} m3/s, harbour={:.6e} kg, canal={:.6e} kg",
            self.step,
            self.time,
            self.solver.name(),
            discharge_in,
            salt_load_lake,
            dispersion.discharge,
            harbor_mass,
            canal_mass,
        );

        Ok(StepReport {
            step: self.step,
            time: self.time,
            salt_load_lake,
            discharge_in,
            dispersion,
            harbor_mass,
            canal_mass,
            results,
            metrics,
        })
    }

    /// Step under `scenario` until the model time reaches `end_time`.
    ///
    /// The forcing for each step is looked up at the model time at the
    /// start of that step.
    ///
    /// # Errors
    ///
    /// [`RunError::Scenario`] if a scenario interval is shorter than `dt`
    /// (nothing is stepped). [`RunError::Step`] if a step fails; steps
    /// completed before it stay applied.
    pub fn run_until(
        &mut self,
        scenario: &Scenario,
        end_time: f64,
    ) -> Result<Vec<StepReport>, RunError> {
        scenario.check_dt(self.config.dt)?;
        log::info!(
            "running from t={}s to t={}s with {} forcing rows",
            self.time,
            end_time,
            scenario.len()
        );
        let mut reports = Vec::new();
        while self.time < end_time {
            let forcing = *scenario.forcing_at(self.time);
            let report = self.step(&forcing).map_err(|source| RunError::Step {
                step: self.step.next(),
                time: self.time,
                source,
            })?;
            reports.push(report);
        }
        log::info!("run finished after {} steps at t={}s", reports.len(), self.time);
        Ok(reports)
    }

    /// Restore the initial reservoirs and rewind the clock to zero.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let (basins, harbor, canal) = build_basins(&self.config)?;
        self.basins = basins;
        self.harbor = harbor;
        self.canal = canal;
        self.connection = Connection::new(harbor, canal);
        self.step = StepId::default();
        self.time = 0.0;
        self.last_metrics = StepMetrics::default();
        log::info!("salt model reset to initial state");
        Ok(())
    }

    /// The approach harbour.
    pub fn approach_harbor(&self) -> &Reservoir {
        &self.basins[self.harbor]
    }

    /// The canal.
    pub fn canal(&self) -> &Reservoir {
        &self.basins[self.canal]
    }

    /// All reservoirs.
    pub fn basins(&self) -> &BasinSet {
        &self.basins
    }

    /// The harbour–canal connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The configuration the model was built from.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Number of completed steps (0 after construction or reset).
    pub fn current_step(&self) -> StepId {
        self.step
    }

    /// Model time (s).
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl std::fmt::Debug for SaltModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaltModel")
            .field("solver", &self.solver.name())
            .field("step", &self.step)
            .field("time", &self.time)
            .field("harbor_mass", &self.approach_harbor().mass())
            .field("canal_mass", &self.canal().mass())
            .finish()
    }
}

fn build_basins(config: &ModelConfig) -> Result<(BasinSet, ReservoirId, ReservoirId), ConfigError> {
    let harbor = config
        .approach_harbor
        .build()
        .map_err(|reason| ConfigError::Reservoir {
            name: APPROACH_HARBOR,
            reason,
        })?;
    let canal = config.canal.build().map_err(|reason| ConfigError::Reservoir {
        name: CANAL,
        reason,
    })?;
    let mut basins = BasinSet::new();
    let harbor = basins.insert(APPROACH_HARBOR, harbor);
    let canal = basins.insert(CANAL, canal);
    Ok((basins, harbor, canal))
}

fn required(results: &ResultSet, name: &str) -> Result<f64, StepError> {
    let value = results.get(name).ok_or_else(|| StepError::MissingResult {
        name: name.to_string(),
    })?;
    if !value.is_finite() {
        return Err(StepError::NonFiniteResult {
            name: name.to_string(),
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brine_core::{BasinError, SolverError};
    use brine_test_utils::{FailingSolver, FixedSolver, RecordingSolver};

    fn model_with(solver: impl SteadySolver) -> SaltModel {
        SaltModel::new(ModelConfig::default(), Box::new(solver)).unwrap()
    }

    #[test]
    fn parameters_follow_merge_order() {
        let model = model_with(FixedSolver::new(0.0, 0.0, 0.0));
        let params = model.parameters(&Forcing::new().head_lake(-0.6)).unwrap();
        let names_in_order: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names_in_order,
            vec![
                "lock_length",
                "lock_width",
                "lock_bottom",
                "head_lake",
                "head_sea",
                "salinity_lake",
                "salinity_sea",
                "num_cycles",
                "door_time_to_open",
                "leveling_time",
                "calibration_coefficient",
            ]
        );
        assert_eq!(params.get(names::HEAD_LAKE), Some(-0.6));
        assert_eq!(params.get(names::HEAD_SEA), Some(0.05));
    }

    #[test]
    fn lake_salinity_defaults_to_harbour() {
        let model = model_with(FixedSolver::new(0.0, 0.0, 0.0));
        let harbour = model.approach_harbor().salinity().unwrap();
        let params = model.parameters(&Forcing::new()).unwrap();
        assert_eq!(params.get(names::SALINITY_LAKE), Some(harbour));
        let params = model.parameters(&Forcing::new().salinity_lake(3.0)).unwrap();
        assert_eq!(params.get(names::SALINITY_LAKE), Some(3.0));
    }

    #[test]
    fn step_applies_reference_mass_balance() {
        let mut model = model_with(FixedSolver::new(10.0, 4.0, 2.0));
        let harbour = model.approach_harbor().clone();
        let canal = model.canal().clone();
        let dt = 600.0;

        let dispersion = Connection::between(&harbour, &canal, 0.55, dt).unwrap();
        let discharge_in = 68.0 + (10.0 - 4.0);
        let s_h = harbour.salinity().unwrap();
        let s_c = canal.salinity().unwrap();
        let harbour_expected = harbour.mass()
            + (discharge_in * s_c * dt
                + -discharge_in * 0.782 * s_h * dt
                + -dispersion.mass
                + -(2.0 * dt));
        let canal_expected = canal.mass()
            + (discharge_in * 0.2 * dt + -discharge_in * 1.0 * s_c * dt + dispersion.mass + 0.0);

        let report = model.step(&Forcing::new()).unwrap();
        assert_eq!(report.step, StepId(1));
        assert_eq!(report.time, 600.0);
        assert_eq!(report.salt_load_lake, 2.0);
        assert_eq!(report.discharge_in, discharge_in);
        assert_eq!(report.dispersion, dispersion);
        assert_eq!(report.harbor_mass, harbour_expected);
        assert_eq!(report.canal_mass, canal_expected);
        assert_eq!(model.approach_harbor().mass(), harbour_expected);
    }

    #[test]
    fn missing_result_leaves_state_untouched() {
        let results = ResultSet::new()
            .with(names::DISCHARGE_FROM_LAKE, 1.0)
            .with(names::DISCHARGE_TO_LAKE, 1.0);
        let mut model = model_with(FixedSolver::with_results(results));
        let before = model.basins().clone();
        let err = model.step(&Forcing::new()).unwrap_err();
        assert_eq!(
            err,
            StepError::MissingResult {
                name: "salt_load_lake".into()
            }
        );
        assert_eq!(model.basins(), &before);
        assert_eq!(model.current_step(), StepId(0));
    }

    #[test]
    fn non_finite_result_rejected() {
        let mut model = model_with(FixedSolver::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(
            model.step(&Forcing::new()),
            Err(StepError::NonFiniteResult { .. })
        ));
    }

    #[test]
    fn solver_failure_surfaces_as_step_error() {
        let mut model = model_with(FailingSolver::new(FixedSolver::new(0.0, 0.0, 0.0), 1));
        model.step(&Forcing::new()).unwrap();
        let before = model.basins().clone();
        let err = model.step(&Forcing::new()).unwrap_err();
        assert!(matches!(err, StepError::Solver(SolverError::Failed { .. })));
        assert_eq!(model.basins(), &before);
        assert_eq!(model.current_step(), StepId(1));
    }

    #[test]
    fn drained_harbour_stops_the_model() {
        // A lockage load that removes all harbour salt in one step.
        let harbour_mass = ModelConfig::default().approach_harbor.build().unwrap().mass();
        let mut model = model_with(FixedSolver::new(-68.0, 0.0, 2.0 * harbour_mass / 600.0));
        let report = model.step(&Forcing::new()).unwrap();
        assert!(report.harbor_mass < 0.0);
        let err = model.step(&Forcing::new()).unwrap_err();
        assert!(matches!(
            err,
            StepError::Basin(BasinError::NonPositiveMass {
                reservoir: Some(ReservoirId(0)),
                ..
            })
        ));
    }

    #[test]
    fn solver_sees_each_step() {
        let solver = RecordingSolver::new(FixedSolver::new(1.0, 0.0, 0.0));
        let log = solver.log();
        let mut model = model_with(solver);
        model.step(&Forcing::new().head_sea(0.2)).unwrap();
        model.step(&Forcing::new()).unwrap();
        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].get(names::HEAD_SEA), Some(0.2));
        assert_eq!(calls[1].get(names::HEAD_SEA), Some(0.05));
        // The second call sees the harbour salinity after the first step.
        assert_ne!(
            calls[0].get(names::SALINITY_LAKE),
            calls[1].get(names::SALINITY_LAKE)
        );
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut model = model_with(FixedSolver::new(5.0, 1.0, 0.5));
        let initial = model.basins().clone();
        for _ in 0..3 {
            model.step(&Forcing::new()).unwrap();
        }
        assert_ne!(model.basins(), &initial);
        model.reset().unwrap();
        assert_eq!(model.basins(), &initial);
        assert_eq!(model.current_step(), StepId(0));
        assert_eq!(model.time(), 0.0);
        assert_eq!(model.last_metrics(), &StepMetrics::default());
    }

    #[test]
    fn invalid_config_rejected() {
        let config = ModelConfig {
            dt: -1.0,
            ..ModelConfig::default()
        };
        let err = SaltModel::new(config, Box::new(FixedSolver::new(0.0, 0.0, 0.0))).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDt { value: -1.0 });
    }
}
