//! Reservoir salt bookkeeping for the brine model.
//!
//! - [`Reservoir`]: a rectangular water body carrying a salt mass, updated
//!   by one explicit Euler step per call.
//! - [`Connection`]: density-driven (gravitational) exchange between two
//!   reservoirs, computed from their current salinities.
//! - [`BasinSet`]: the ordered collection that owns the reservoirs and
//!   hands out [`ReservoirId`](brine_core::ReservoirId)s.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod basin_set;
pub mod connection;
pub mod reservoir;

pub use basin_set::BasinSet;
pub use connection::{Connection, Dispersion};
pub use reservoir::{Inflow, Reservoir};
