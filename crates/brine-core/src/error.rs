//! Error types for the brine salt-balance model.
//!
//! Organized by subsystem: the external steady-state solver, the reservoir
//! bookkeeping, and the per-step driver that chains the two.

use std::error::Error;
use std::fmt;

use crate::id::ReservoirId;

/// Errors reported by a [`SteadySolver`](crate::SteadySolver).
#[derive(Clone, Debug, PartialEq)]
pub enum SolverError {
    /// The solver ran but could not produce a result.
    Failed {
        /// Name of the failing solver.
        solver: String,
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A parameter the solver needs is absent from the parameter set.
    MissingParameter {
        /// Name of the missing parameter.
        name: String,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { solver, reason } => write!(f, "solver '{solver}' failed: {reason}"),
            Self::MissingParameter { name } => write!(f, "missing parameter '{name}'"),
        }
    }
}

impl Error for SolverError {}

/// Errors from reservoir and connection arithmetic.
#[derive(Clone, Debug, PartialEq)]
pub enum BasinError {
    /// Salinity was requested while the salt mass is zero or negative.
    NonPositiveMass {
        /// The offending reservoir, if known.
        reservoir: Option<ReservoirId>,
        /// The mass at the time of the request (kg).
        mass: f64,
    },
    /// A computed quantity is NaN or infinite.
    NonFinite {
        /// Which quantity went non-finite.
        quantity: &'static str,
    },
    /// Reservoir geometry is unusable (non-finite or non-positive depth).
    InvalidGeometry {
        /// Description of the problem.
        reason: String,
    },
    /// A connection refers to a reservoir that is not in the set.
    UnknownReservoir {
        /// The missing id.
        id: ReservoirId,
    },
}

impl fmt::Display for BasinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveMass { reservoir, mass } => {
                write!(f, "salinity undefined for non-positive mass {mass}")?;
                if let Some(id) = reservoir {
                    write!(f, " in reservoir {id}")?;
                }
                Ok(())
            }
            Self::NonFinite { quantity } => write!(f, "{quantity} is not finite"),
            Self::InvalidGeometry { reason } => write!(f, "invalid geometry: {reason}"),
            Self::UnknownReservoir { id } => write!(f, "unknown reservoir {id}"),
        }
    }
}

impl Error for BasinError {}

/// Errors from a single model step.
///
/// A failed step never mutates reservoir state: both mass increments are
/// computed before either is committed.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The steady-state solver failed.
    Solver(SolverError),
    /// Reservoir or connection arithmetic failed.
    Basin(BasinError),
    /// The solver's result set lacks a required entry.
    MissingResult {
        /// Name of the missing result.
        name: String,
    },
    /// The solver returned a NaN or infinite value.
    NonFiniteResult {
        /// Name of the offending result.
        name: String,
        /// The value returned.
        value: f64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solver(e) => write!(f, "solver: {e}"),
            Self::Basin(e) => write!(f, "basin: {e}"),
            Self::MissingResult { name } => write!(f, "solver result '{name}' missing"),
            Self::NonFiniteResult { name, value } => {
                write!(f, "solver result '{name}' is not finite: {value}")
            }
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Solver(e) => Some(e),
            Self::Basin(e) => Some(e),
            Self::MissingResult { .. } | Self::NonFiniteResult { .. } => None,
        }
    }
}

impl From<SolverError> for StepError {
    fn from(e: SolverError) -> Self {
        Self::Solver(e)
    }
}

impl From<BasinError> for StepError {
    fn from(e: BasinError) -> Self {
        Self::Basin(e)
    }
}
