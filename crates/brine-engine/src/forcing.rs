//! Per-step boundary overrides.

use brine_core::{names, ParameterSet};
use smallvec::SmallVec;

/// Optional overrides of the boundary conditions for one step.
///
/// Unset fields fall back to the configured
/// [`BoundaryConditions`](brine_core::BoundaryConditions), except
/// `salinity_lake`, which falls back to the harbour's current salinity.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Forcing {
    /// Sea-side water level (m).
    pub head_sea: Option<f64>,
    /// Lake-side water level (m).
    pub head_lake: Option<f64>,
    /// Lake-side salinity (kg/m³).
    pub salinity_lake: Option<f64>,
}

impl Forcing {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the sea-side head.
    pub fn head_sea(mut self, value: f64) -> Self {
        self.head_sea = Some(value);
        self
    }

    /// Override the lake-side head.
    pub fn head_lake(mut self, value: f64) -> Self {
        self.head_lake = Some(value);
        self
    }

    /// Override the lake-side salinity.
    pub fn salinity_lake(mut self, value: f64) -> Self {
        self.salinity_lake = Some(value);
        self
    }

    /// The set overrides as `(parameter, value)` pairs.
    pub fn overrides(&self) -> SmallVec<[(&'static str, f64); 3]> {
        [
            (names::HEAD_SEA, self.head_sea),
            (names::SALINITY_LAKE, self.salinity_lake),
            (names::HEAD_LAKE, self.head_lake),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    /// The set overrides as a parameter set, ready to merge.
    pub fn to_parameters(&self) -> ParameterSet {
        self.overrides().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_overrides() {
        assert!(Forcing::new().overrides().is_empty());
        assert!(Forcing::new().to_parameters().is_empty());
    }

    #[test]
    fn only_set_fields_are_emitted() {
        let forcing = Forcing::new().head_sea(0.3).salinity_lake(4.0);
        let params = forcing.to_parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get(names::HEAD_SEA), Some(0.3));
        assert_eq!(params.get(names::SALINITY_LAKE), Some(4.0));
        assert_eq!(params.get(names::HEAD_LAKE), None);
    }
}
