//! Model configuration, validation, and error types.
//!
//! [`ModelConfig`] is the builder-input for [`SaltModel`](crate::SaltModel).
//! [`validate()`](ModelConfig::validate) checks structural invariants at
//! construction; the defaults reproduce the approach harbour and canal of
//! the reference set-up.

use std::error::Error;
use std::fmt;

use brine_basin::Reservoir;
use brine_core::{BasinError, BoundaryConditions, LockGeometry, OperationalParameters};

// ── ReservoirConfig ────────────────────────────────────────────────

/// Initial geometry and salinity of one reservoir.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservoirConfig {
    /// Length (m).
    pub length: f64,
    /// Width (m).
    pub width: f64,
    /// Bottom level (m).
    pub bottom_level: f64,
    /// Water level (m).
    pub water_level: f64,
    /// Initial salinity (kg/m³).
    pub salinity_initial: f64,
}

impl ReservoirConfig {
    /// The approach harbour in front of the lock.
    pub fn approach_harbor() -> Self {
        Self {
            length: 7000.0,
            width: 280.0,
            bottom_level: -15.0,
            water_level: -0.4,
            salinity_initial: 10.3,
        }
    }

    /// The canal behind the harbour.
    pub fn canal() -> Self {
        Self {
            length: 40_000.0,
            width: 220.0,
            bottom_level: -15.0,
            water_level: -0.4,
            salinity_initial: 8.0,
        }
    }

    /// Construct the reservoir in its initial state.
    pub fn build(&self) -> Result<Reservoir, BasinError> {
        Reservoir::new(
            self.length,
            self.width,
            self.bottom_level,
            self.water_level,
            self.salinity_initial,
        )
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ModelConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// dt is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// A coefficient or lock parameter is NaN or infinite.
    NonFinite {
        /// Name of the offending setting.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// A reservoir could not be constructed.
    Reservoir {
        /// Which reservoir.
        name: &'static str,
        /// Why it was rejected.
        reason: BasinError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::NonFinite { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            Self::Reservoir { name, reason } => write!(f, "reservoir '{name}': {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Reservoir { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

// ── ModelConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a [`SaltModel`](crate::SaltModel).
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// Lock chamber geometry passed to the solver.
    pub lock: LockGeometry,
    /// Boundary heads and salinities passed to the solver.
    pub boundary: BoundaryConditions,
    /// Lock operation passed to the solver.
    pub operation: OperationalParameters,
    /// Initial state of the approach harbour.
    pub approach_harbor: ReservoirConfig,
    /// Initial state of the canal.
    pub canal: ReservoirConfig,
    /// Time step in seconds. Default: 600.
    pub dt: f64,
    /// Sluice discharge added to the lock's net discharge (m³/s). Default: 68.
    pub spui_discharge: f64,
    /// Calibration of the harbour–canal exchange. Default: 0.55.
    pub dispersion_coefficient: f64,
    /// Outflow calibration of the harbour. Default: 0.782.
    pub harbor_spui_coefficient: f64,
    /// Outflow calibration of the canal. Default: 1.0.
    pub canal_spui_coefficient: f64,
    /// Salinity of the water feeding the canal (kg/m³). Default: 0.2.
    pub canal_inflow_salinity: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            lock: LockGeometry::default(),
            boundary: BoundaryConditions::default(),
            operation: OperationalParameters::default(),
            approach_harbor: ReservoirConfig::approach_harbor(),
            canal: ReservoirConfig::canal(),
            dt: 600.0,
            spui_discharge: 68.0,
            dispersion_coefficient: 0.55,
            harbor_spui_coefficient: 0.782,
            canal_spui_coefficient: 1.0,
            canal_inflow_salinity: 0.2,
        }
    }
}

impl ModelConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. dt must be a usable step length.
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        // 2. Every scalar handed to the arithmetic must be finite.
        for (name, value) in [
            ("spui_discharge", self.spui_discharge),
            ("dispersion_coefficient", self.dispersion_coefficient),
            ("harbor_spui_coefficient", self.harbor_spui_coefficient),
            ("canal_spui_coefficient", self.canal_spui_coefficient),
            ("canal_inflow_salinity", self.canal_inflow_salinity),
            ("lock_length", self.lock.lock_length),
            ("lock_width", self.lock.lock_width),
            ("lock_bottom", self.lock.lock_bottom),
            ("head_lake", self.boundary.head_lake),
            ("head_sea", self.boundary.head_sea),
            ("salinity_lake", self.boundary.salinity_lake),
            ("salinity_sea", self.boundary.salinity_sea),
            ("door_time_to_open", self.operation.door_time_to_open),
            ("leveling_time", self.operation.leveling_time),
            (
                "calibration_coefficient",
                self.operation.calibration_coefficient,
            ),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        // 3. Both reservoirs must build.
        self.approach_harbor
            .build()
            .map_err(|reason| ConfigError::Reservoir {
                name: "approach_harbor",
                reason,
            })?;
        self.canal.build().map_err(|reason| ConfigError::Reservoir {
            name: "canal",
            reason,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ModelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn zero_dt_rejected() {
        let config = ModelConfig {
            dt: 0.0,
            ..ModelConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDt { value: 0.0 }));
    }

    #[test]
    fn nan_coefficient_rejected() {
        let config = ModelConfig {
            dispersion_coefficient: f64::NAN,
            ..ModelConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite {
                name: "dispersion_coefficient",
                ..
            })
        ));
    }

    #[test]
    fn dry_canal_rejected() {
        let mut config = ModelConfig::default();
        config.canal.water_level = config.canal.bottom_level;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Reservoir { name: "canal", .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn default_reservoirs_match_reference_setup() {
        let harbour = ReservoirConfig::approach_harbor().build().unwrap();
        let canal = ReservoirConfig::canal().build().unwrap();
        assert!((harbour.volume() - 7000.0 * 280.0 * 14.6).abs() < 1e-3);
        assert!((canal.volume() - 40_000.0 * 220.0 * 14.6).abs() < 1e-3);
        assert!((canal.salinity().unwrap() - 8.0).abs() < 1e-12);
    }
}
