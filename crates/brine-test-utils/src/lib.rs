//! Test utilities and stub solvers for brine development.
//!
//! The real lock-exchange calculation lives outside this workspace, so
//! tests and benchmarks drive the model with the stand-ins in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{FailingSolver, FixedSolver, HeadDrivenSolver, ParameterLog, RecordingSolver};
