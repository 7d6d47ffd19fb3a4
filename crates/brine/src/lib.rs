//! Brine: salt balance of an approach harbour and canal behind a sea lock.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! brine sub-crates. For most users, adding `brine` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use brine::prelude::*;
//!
//! // A stand-in for the lock-exchange calculation: constant flows.
//! let solver = FnSolver::new("constant", |_: &ParameterSet| {
//!     Ok(ResultSet::new()
//!         .with(names::DISCHARGE_FROM_LAKE, 40.0)
//!         .with(names::DISCHARGE_TO_LAKE, 38.0)
//!         .with(names::SALT_LOAD_LAKE, 50.0))
//! });
//!
//! let mut model = SaltModel::new(ModelConfig::default(), Box::new(solver)).unwrap();
//! let report = model.step(&Forcing::new().head_sea(0.3)).unwrap();
//! assert_eq!(report.step, StepId(1));
//! assert_eq!(report.salt_load_lake, 50.0);
//! assert_eq!(report.discharge_in, 70.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `brine-core` | Parameter sets, solver trait, IDs, errors |
//! | [`basin`] | `brine-basin` | Reservoirs, connections, basin sets |
//! | [`engine`] | `brine-engine` | Configuration, forcing, scenarios, the stepped model |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`brine-core`).
///
/// Contains [`types::ParameterSet`], [`types::ResultSet`], the typed
/// parameter groups, the [`types::SteadySolver`] trait and error types.
pub use brine_core as types;

/// Reservoir bookkeeping (`brine-basin`).
///
/// [`basin::Reservoir`] for a single water body, [`basin::Connection`] for
/// the exchange between two of them.
pub use brine_basin as basin;

/// The stepped model (`brine-engine`).
///
/// [`engine::SaltModel`] owns the reservoirs and the solver;
/// [`engine::Scenario`] drives multi-step runs.
pub use brine_engine as engine;

/// Common imports for typical brine usage.
///
/// ```rust
/// use brine::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use brine_core::{
        names, BoundaryConditions, FnSolver, LockGeometry, OperationalParameters, ParameterSet,
        ReservoirId, ResultSet, SteadySolver, StepId,
    };

    // Errors
    pub use brine_core::{BasinError, SolverError, StepError};

    // Basins
    pub use brine_basin::{BasinSet, Connection, Dispersion, Inflow, Reservoir};

    // Engine
    pub use brine_engine::{
        ConfigError, Forcing, ModelConfig, ReservoirConfig, RunError, SaltModel, Scenario,
        ScenarioError, StepMetrics, StepReport,
    };
}
