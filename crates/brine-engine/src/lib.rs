//! Time-stepping driver for the brine salt-balance model.
//!
//! [`SaltModel`] owns the approach harbour, the canal, the connection
//! between them and the injected [`SteadySolver`](brine_core::SteadySolver).
//! Each [`step()`](SaltModel::step) runs the solver once and applies one
//! explicit mass update to both reservoirs. [`Scenario`] supplies
//! time-varying [`Forcing`] for longer runs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod forcing;
pub mod metrics;
pub mod model;
pub mod scenario;

pub use config::{ConfigError, ModelConfig, ReservoirConfig};
pub use forcing::Forcing;
pub use metrics::StepMetrics;
pub use model::{SaltModel, StepReport, APPROACH_HARBOR, CANAL};
pub use scenario::{RunError, Scenario, ScenarioError};
