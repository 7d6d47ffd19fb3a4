//! A rectangular water body with a salt-mass state.

use brine_core::BasinError;

/// Salt fluxes acting on a reservoir during one time step.
///
/// `discharge_in` and `salinity_in` describe the advective inflow; the
/// matching outflow leaves at the reservoir's own salinity scaled by
/// `c_spui`. `mass_dispersion` and `mass_lockage` are already integrated
/// over the step (kg).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Inflow {
    /// Discharge entering from upstream (m³/s).
    pub discharge_in: f64,
    /// Salinity of the entering water (kg/m³).
    pub salinity_in: f64,
    /// Dispersive exchange with a connected reservoir (kg).
    pub mass_dispersion: f64,
    /// Calibration coefficient on the advective outflow.
    pub c_spui: f64,
    /// Salt supplied by lock operation (kg).
    pub mass_lockage: f64,
}

/// A rectangular reservoir.
///
/// Geometry is fixed after construction; the salt mass changes only
/// through [`update()`](Reservoir::update).
#[derive(Clone, Debug, PartialEq)]
pub struct Reservoir {
    length: f64,
    width: f64,
    bottom_level: f64,
    water_level: f64,
    mass: f64,
}

impl Reservoir {
    /// Create a reservoir with an initial salinity (kg/m³).
    ///
    /// The salt mass is derived as `salinity_initial * volume`. Rejects
    /// non-finite geometry and a water level at or below the bottom.
    pub fn new(
        length: f64,
        width: f64,
        bottom_level: f64,
        water_level: f64,
        salinity_initial: f64,
    ) -> Result<Self, BasinError> {
        for (name, value) in [
            ("length", length),
            ("width", width),
            ("bottom_level", bottom_level),
            ("water_level", water_level),
            ("salinity_initial", salinity_initial),
        ] {
            if !value.is_finite() {
                return Err(BasinError::InvalidGeometry {
                    reason: format!("{name} must be finite, got {value}"),
                });
            }
        }
        if length <= 0.0 || width <= 0.0 {
            return Err(BasinError::InvalidGeometry {
                reason: format!("length and width must be positive, got {length} x {width}"),
            });
        }
        if water_level <= bottom_level {
            return Err(BasinError::InvalidGeometry {
                reason: format!(
                    "water level {water_level} must lie above bottom level {bottom_level}"
                ),
            });
        }
        let mut reservoir = Self::from_mass(length, width, bottom_level, water_level, 0.0);
        reservoir.mass = salinity_initial * reservoir.volume();
        Ok(reservoir)
    }

    /// Create a reservoir with an explicit salt mass and no validation.
    pub fn from_mass(
        length: f64,
        width: f64,
        bottom_level: f64,
        water_level: f64,
        mass: f64,
    ) -> Self {
        Self {
            length,
            width,
            bottom_level,
            water_level,
            mass,
        }
    }

    /// Length (m).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Width (m).
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Bottom level (m).
    pub fn bottom_level(&self) -> f64 {
        self.bottom_level
    }

    /// Water level (m).
    pub fn water_level(&self) -> f64 {
        self.water_level
    }

    /// Salt mass (kg). May be negative after sustained net outflow.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Water depth (m).
    pub fn depth(&self) -> f64 {
        self.water_level - self.bottom_level
    }

    /// Water volume below the water line (m³).
    pub fn volume(&self) -> f64 {
        self.length * self.width * (self.water_level - self.bottom_level)
    }

    /// Salinity `mass / volume`, floored at zero.
    ///
    /// Undefined while the mass is zero or negative.
    pub fn salinity(&self) -> Result<f64, BasinError> {
        if self.mass.is_nan() || self.mass <= 0.0 {
            return Err(BasinError::NonPositiveMass {
                reservoir: None,
                mass: self.mass,
            });
        }
        Ok((self.mass / self.volume()).max(0.0))
    }

    /// Mass increment one step of `inflow` would cause, without applying it.
    pub fn mass_delta(&self, inflow: &Inflow, dt: f64) -> Result<f64, BasinError> {
        let mass_in = inflow.discharge_in * inflow.salinity_in * dt;
        let mass_out = -inflow.discharge_in * inflow.c_spui * self.salinity()? * dt;
        Ok(mass_in + mass_out + inflow.mass_dispersion + inflow.mass_lockage)
    }

    /// Apply one explicit Euler step and return the new mass.
    pub fn update(&mut self, inflow: &Inflow, dt: f64) -> Result<f64, BasinError> {
        let delta = self.mass_delta(inflow, dt)?;
        self.apply_delta(delta);
        Ok(self.mass)
    }

    /// Add a precomputed increment to the salt mass.
    ///
    /// The mass is not floored: a negative result is kept and reported.
    pub fn apply_delta(&mut self, delta: f64) {
        self.mass += delta;
        if self.mass <= 0.0 {
            log::warn!(
                "reservoir salt mass dropped to {:.3e} kg; salinity is undefined until it recovers",
                self.mass
            );
        }
    }
}
