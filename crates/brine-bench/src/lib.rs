//! Benchmark profiles and utilities for the brine salt-balance model.
//!
//! Provides pre-built [`ModelConfig`] profiles and forcing series for
//! benchmarks and examples:
//!
//! - [`reference_profile`]: the default harbour–canal set-up
//! - [`tidal_scenario`]: a day of semi-diurnal sea levels, one row per hour

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use brine_engine::{Forcing, ModelConfig, Scenario};

/// Period of the principal lunar tide (s).
const M2_PERIOD: f64 = 44_712.0;

/// Build the reference profile: approach harbour 7000 × 280 m, canal
/// 40000 × 220 m, dt = 600 s.
pub fn reference_profile() -> ModelConfig {
    ModelConfig::default()
}

/// Build a coarse-step profile for long runs.
///
/// Same reservoirs as [`reference_profile`] with dt = 3600 s.
pub fn hourly_profile() -> ModelConfig {
    ModelConfig {
        dt: 3600.0,
        ..ModelConfig::default()
    }
}

/// Sea levels following a sine tide of `amplitude` metres around `mean`,
/// sampled every hour for `hours` hours.
///
/// Returns `None` when `hours` is zero.
pub fn tidal_scenario(mean: f64, amplitude: f64, hours: u32) -> Option<Scenario> {
    let rows = (0..hours).map(|h| {
        let t = f64::from(h) * 3600.0;
        let head_sea = mean + amplitude * (2.0 * std::f64::consts::PI * t / M2_PERIOD).sin();
        (t, Forcing::new().head_sea(head_sea))
    });
    Scenario::new(rows).ok()
}
