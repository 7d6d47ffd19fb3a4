//! Density-driven exchange between two connected reservoirs.
//!
//! Salt water under fresher water sets up a lock-exchange style
//! gravitational current through the connecting channel. The exchange
//! velocity scales with `sqrt(g' * h)` where `g'` is the reduced gravity of
//! the salinity difference and `h` the exchange height of the channel.

use brine_core::{BasinError, ReservoirId};

use crate::basin_set::BasinSet;
use crate::reservoir::Reservoir;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Reference density of fresh water (kg/m³).
pub const REFERENCE_DENSITY: f64 = 1000.0;

/// Density increase per unit salinity (kg/m³ per kg/m³).
pub const DENSITY_PER_SALINITY: f64 = 0.8;

/// Result of [`Connection::dispersion`].
///
/// Positive values move salt from `a` to `b`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dispersion {
    /// Exchange discharge after calibration (m³/s).
    pub discharge: f64,
    /// Salt mass exchanged over one step (kg).
    pub mass: f64,
}

/// A channel between reservoirs `a` and `b`.
///
/// Holds only ids; the reservoirs stay owned by the [`BasinSet`]. The
/// channel width is taken from `b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
    a: ReservoirId,
    b: ReservoirId,
}

impl Connection {
    /// Connect `a` to `b`.
    pub fn new(a: ReservoirId, b: ReservoirId) -> Self {
        Self { a, b }
    }

    /// First reservoir.
    pub fn a(&self) -> ReservoirId {
        self.a
    }

    /// Second reservoir; supplies the channel width.
    pub fn b(&self) -> ReservoirId {
        self.b
    }

    /// Exchange over one step of `dt` seconds with calibration `c_d`.
    pub fn dispersion(
        &self,
        basins: &BasinSet,
        c_d: f64,
        dt: f64,
    ) -> Result<Dispersion, BasinError> {
        let a = basins.get(self.a)?;
        let b = basins.get(self.b)?;
        let salinity_a = basins.salinity(self.a)?;
        let salinity_b = basins.salinity(self.b)?;
        exchange(a, b, salinity_a, salinity_b, c_d, dt)
    }

    /// Exchange between two free-standing reservoirs.
    pub fn between(
        a: &Reservoir,
        b: &Reservoir,
        c_d: f64,
        dt: f64,
    ) -> Result<Dispersion, BasinError> {
        exchange(a, b, a.salinity()?, b.salinity()?, c_d, dt)
    }
}

fn exchange(
    a: &Reservoir,
    b: &Reservoir,
    salinity_a: f64,
    salinity_b: f64,
    c_d: f64,
    dt: f64,
) -> Result<Dispersion, BasinError> {
    let delta_salinity = salinity_a - salinity_b;
    let red_g = GRAVITY * (DENSITY_PER_SALINITY * delta_salinity)
        / (REFERENCE_DENSITY + DENSITY_PER_SALINITY * (salinity_b + salinity_a) / 2.0);

    // Magnitude of the more negative bottom-minus-water level: the larger
    // of the two depths.
    let h_min = (b.bottom_level() - b.water_level())
        .min(a.bottom_level() - a.water_level())
        .abs();

    let c_le = if delta_salinity > 0.0 {
        0.5 * (red_g * h_min).sqrt()
    } else if delta_salinity < 0.0 {
        -0.5 * (-red_g * h_min).sqrt()
    } else {
        0.0
    };
    if !c_le.is_finite() {
        return Err(BasinError::NonFinite {
            quantity: "exchange velocity",
        });
    }

    let discharge_le = c_le * b.width() * (h_min / 2.0);
    let discharge = c_d * discharge_le;
    // The discharge already carries the sign of the salinity difference;
    // salt moves from the saltier to the fresher side.
    let mass = discharge.abs() * delta_salinity * dt;
    if !mass.is_finite() {
        return Err(BasinError::NonFinite {
            quantity: "dispersive mass",
        });
    }
    Ok(Dispersion { discharge, mass })
}
