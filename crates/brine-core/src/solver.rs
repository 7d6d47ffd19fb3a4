//! The [`SteadySolver`] trait and the [`FnSolver`] closure adapter.
//!
//! The lock-exchange calculation is an external collaborator: it takes a
//! named parameter set and answers with a named result set. Its internals
//! are out of reach of this workspace, so it is injected behind a trait and
//! replaced with stubs in tests.

use crate::error::SolverError;
use crate::params::{ParameterSet, ResultSet};

/// A steady-state (cycle-averaged) sea-lock salt intrusion calculation.
///
/// # Contract
///
/// - `calc_steady()` is synchronous and side-effect free from the model's
///   point of view: same parameters, same results.
/// - The result set of a successful call contains at least
///   `discharge_from_lake`, `discharge_to_lake` and `salt_load_lake`
///   (see [`names`](crate::names)).
///
/// # Object safety
///
/// This trait is object-safe; the model stores its solver as
/// `Box<dyn SteadySolver>`.
///
/// # Examples
///
/// ```
/// use brine_core::{names, ParameterSet, ResultSet, SolverError, SteadySolver};
///
/// struct NoExchange;
///
/// impl SteadySolver for NoExchange {
///     fn name(&self) -> &str { "no_exchange" }
///
///     fn calc_steady(&self, _: &ParameterSet) -> Result<ResultSet, SolverError> {
///         Ok(ResultSet::new()
///             .with(names::DISCHARGE_FROM_LAKE, 0.0)
///             .with(names::DISCHARGE_TO_LAKE, 0.0)
///             .with(names::SALT_LOAD_LAKE, 0.0))
///     }
/// }
///
/// let results = NoExchange.calc_steady(&ParameterSet::new()).unwrap();
/// assert_eq!(results.get(names::SALT_LOAD_LAKE), Some(0.0));
/// ```
pub trait SteadySolver: Send + 'static {
    /// Human-readable name for error reporting and logging.
    fn name(&self) -> &str;

    /// Run the steady-state calculation for one parameter set.
    fn calc_steady(&self, parameters: &ParameterSet) -> Result<ResultSet, SolverError>;
}

/// Adapts a closure into a [`SteadySolver`].
///
/// ```
/// use brine_core::{names, FnSolver, ParameterSet, ResultSet, SteadySolver};
///
/// let solver = FnSolver::new("echo_head", |p: &ParameterSet| {
///     Ok(ResultSet::new().with(names::SALT_LOAD_LAKE, p.require(names::HEAD_SEA)?))
/// });
/// let out = solver
///     .calc_steady(&ParameterSet::new().with(names::HEAD_SEA, 0.05))
///     .unwrap();
/// assert_eq!(out.get(names::SALT_LOAD_LAKE), Some(0.05));
/// ```
pub struct FnSolver<F> {
    name: String,
    f: F,
}

impl<F> FnSolver<F>
where
    F: Fn(&ParameterSet) -> Result<ResultSet, SolverError> + Send + 'static,
{
    /// Wrap `f` under the given solver name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> SteadySolver for FnSolver<F>
where
    F: Fn(&ParameterSet) -> Result<ResultSet, SolverError> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn calc_steady(&self, parameters: &ParameterSet) -> Result<ResultSet, SolverError> {
        (self.f)(parameters)
    }
}

impl<F> std::fmt::Debug for FnSolver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSolver").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;

    #[test]
    fn fn_solver_propagates_errors() {
        let solver = FnSolver::new("strict", |p: &ParameterSet| {
            p.require(names::LOCK_LENGTH)?;
            Ok(ResultSet::new())
        });
        let err = solver.calc_steady(&ParameterSet::new()).unwrap_err();
        assert_eq!(
            err,
            SolverError::MissingParameter {
                name: "lock_length".into()
            }
        );
    }

    #[test]
    fn fn_solver_is_object_safe() {
        let boxed: Box<dyn SteadySolver> =
            Box::new(FnSolver::new("empty", |_: &ParameterSet| Ok(ResultSet::new())));
        assert_eq!(boxed.name(), "empty");
        assert!(boxed.calc_steady(&ParameterSet::new()).unwrap().is_empty());
    }
}
