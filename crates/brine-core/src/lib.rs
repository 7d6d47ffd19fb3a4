//! Core types and traits for the brine salt-balance model.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by the rest of the workspace: named parameter and
//! result sets, the typed parameter groups of a sea lock, the
//! [`SteadySolver`] trait behind which the lock-exchange calculation sits,
//! identifiers, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod params;
pub mod solver;

pub use error::{BasinError, SolverError, StepError};
pub use id::{ReservoirId, StepId};
pub use params::{
    names, BoundaryConditions, LockGeometry, OperationalParameters, ParameterSet, ResultSet,
};
pub use solver::{FnSolver, SteadySolver};
