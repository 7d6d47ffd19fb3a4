//! Named parameter and result sets, and the typed parameter groups of a
//! sea lock.
//!
//! The steady-state solver is driven by keyword-style inputs and answers
//! with keyword-style outputs. [`ParameterSet`] and [`ResultSet`] carry those
//! as insertion-ordered `name -> f64` maps. Merging follows dictionary
//! semantics: a later value replaces an earlier one in place.

use indexmap::IndexMap;

use crate::error::SolverError;

/// Parameter and result names understood by the steady-state solver.
pub mod names {
    /// Lock chamber length (m).
    pub const LOCK_LENGTH: &str = "lock_length";
    /// Lock chamber width (m).
    pub const LOCK_WIDTH: &str = "lock_width";
    /// Lock chamber bottom level (m).
    pub const LOCK_BOTTOM: &str = "lock_bottom";
    /// Water level on the lake (canal) side (m).
    pub const HEAD_LAKE: &str = "head_lake";
    /// Water level on the sea side (m).
    pub const HEAD_SEA: &str = "head_sea";
    /// Salinity on the lake side (kg/m³).
    pub const SALINITY_LAKE: &str = "salinity_lake";
    /// Salinity on the sea side (kg/m³).
    pub const SALINITY_SEA: &str = "salinity_sea";
    /// Number of lock cycles per day.
    pub const NUM_CYCLES: &str = "num_cycles";
    /// Time the doors take to open (s).
    pub const DOOR_TIME_TO_OPEN: &str = "door_time_to_open";
    /// Time needed to level the chamber (s).
    pub const LEVELING_TIME: &str = "leveling_time";
    /// Calibration coefficient of the lock-exchange formulation.
    pub const CALIBRATION_COEFFICIENT: &str = "calibration_coefficient";

    /// Discharge leaving the lake side towards the lock (m³/s).
    pub const DISCHARGE_FROM_LAKE: &str = "discharge_from_lake";
    /// Discharge entering the lake side from the lock (m³/s).
    pub const DISCHARGE_TO_LAKE: &str = "discharge_to_lake";
    /// Salt load transported into the lake (kg/s).
    pub const SALT_LOAD_LAKE: &str = "salt_load_lake";
}

macro_rules! named_values {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name {
            values: IndexMap<String, f64>,
        }

        impl $name {
            /// Create an empty set.
            pub fn new() -> Self {
                Self::default()
            }

            /// Builder-style insert.
            pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
                self.insert(name, value);
                self
            }

            /// Insert or replace a value. A replaced value keeps its position.
            pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
                self.values.insert(name.into(), value)
            }

            /// Look up a value by name.
            pub fn get(&self, name: &str) -> Option<f64> {
                self.values.get(name).copied()
            }

            /// Whether a value with this name is present.
            pub fn contains(&self, name: &str) -> bool {
                self.values.contains_key(name)
            }

            /// Merge `other` into `self`; values from `other` win.
            pub fn merge(&mut self, other: &Self) {
                for (name, value) in &other.values {
                    self.values.insert(name.clone(), *value);
                }
            }

            /// Number of entries.
            pub fn len(&self) -> usize {
                self.values.len()
            }

            /// Whether the set is empty.
            pub fn is_empty(&self) -> bool {
                self.values.is_empty()
            }

            /// Iterate entries in insertion order.
            pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
                self.values.iter().map(|(k, v)| (k.as_str(), *v))
            }
        }

        impl<K: Into<String>> FromIterator<(K, f64)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
                let mut set = Self::new();
                set.extend(iter);
                set
            }
        }

        impl<K: Into<String>> Extend<(K, f64)> for $name {
            fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
                for (name, value) in iter {
                    self.insert(name, value);
                }
            }
        }
    };
}

named_values!(
    /// Named inputs for one steady-state solver call.
    ParameterSet
);

named_values!(
    /// Named outputs of one steady-state solver call.
    ResultSet
);

impl ParameterSet {
    /// Look up a parameter a solver cannot do without.
    pub fn require(&self, name: &str) -> Result<f64, SolverError> {
        self.get(name).ok_or_else(|| SolverError::MissingParameter {
            name: name.to_string(),
        })
    }
}

// ── Parameter groups ───────────────────────────────────────────────

/// Geometry of the lock chamber.
#[derive(Clone, Debug, PartialEq)]
pub struct LockGeometry {
    /// Chamber length (m). Default: 400.
    pub lock_length: f64,
    /// Chamber width (m). Default: 50.
    pub lock_width: f64,
    /// Chamber bottom level (m). Default: -15.5.
    pub lock_bottom: f64,
}

impl Default for LockGeometry {
    fn default() -> Self {
        Self {
            lock_length: 400.0,
            lock_width: 50.0,
            lock_bottom: -15.5,
        }
    }
}

impl LockGeometry {
    /// The group as named parameters.
    pub fn to_parameters(&self) -> ParameterSet {
        ParameterSet::new()
            .with(names::LOCK_LENGTH, self.lock_length)
            .with(names::LOCK_WIDTH, self.lock_width)
            .with(names::LOCK_BOTTOM, self.lock_bottom)
    }
}

/// Heads and salinities on both sides of the lock.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryConditions {
    /// Lake-side water level (m). Default: -0.40.
    pub head_lake: f64,
    /// Sea-side water level (m). Default: 0.05.
    pub head_sea: f64,
    /// Lake-side salinity (kg/m³). Default: 5.
    pub salinity_lake: f64,
    /// Sea-side salinity (kg/m³). Default: 25.
    pub salinity_sea: f64,
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        Self {
            head_lake: -0.40,
            head_sea: 0.05,
            salinity_lake: 5.0,
            salinity_sea: 25.0,
        }
    }
}

impl BoundaryConditions {
    /// The group as named parameters.
    pub fn to_parameters(&self) -> ParameterSet {
        ParameterSet::new()
            .with(names::HEAD_LAKE, self.head_lake)
            .with(names::HEAD_SEA, self.head_sea)
            .with(names::SALINITY_LAKE, self.salinity_lake)
            .with(names::SALINITY_SEA, self.salinity_sea)
    }
}

/// How the lock is operated.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationalParameters {
    /// Lock cycles per day. Default: 15.
    pub num_cycles: u32,
    /// Door opening time (s). Default: 210.
    pub door_time_to_open: f64,
    /// Levelling time (s). Default: 600.
    pub leveling_time: f64,
    /// Lock-exchange calibration coefficient. Default: 0.77.
    pub calibration_coefficient: f64,
}

impl Default for OperationalParameters {
    fn default() -> Self {
        Self {
            num_cycles: 15,
            door_time_to_open: 210.0,
            leveling_time: 600.0,
            calibration_coefficient: 0.77,
        }
    }
}

impl OperationalParameters {
    /// The group as named parameters.
    pub fn to_parameters(&self) -> ParameterSet {
        ParameterSet::new()
            .with(names::NUM_CYCLES, f64::from(self.num_cycles))
            .with(names::DOOR_TIME_TO_OPEN, self.door_time_to_open)
            .with(names::LEVELING_TIME, self.leveling_time)
            .with(names::CALIBRATION_COEFFICIENT, self.calibration_coefficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn merge_overrides_in_place() {
        let mut base = ParameterSet::new().with("a", 1.0).with("b", 2.0);
        base.merge(&ParameterSet::new().with("a", 10.0).with("c", 3.0));
        let entries: Vec<_> = base.iter().collect();
        assert_eq!(entries, vec![("a", 10.0), ("b", 2.0), ("c", 3.0)]);
    }

    #[test]
    fn require_reports_missing_name() {
        let set = ParameterSet::new();
        assert_eq!(
            set.require(names::HEAD_SEA),
            Err(SolverError::MissingParameter {
                name: "head_sea".into()
            })
        );
    }

    #[test]
    fn groups_cover_all_solver_inputs() {
        let mut set = LockGeometry::default().to_parameters();
        set.merge(&BoundaryConditions::default().to_parameters());
        set.merge(&OperationalParameters::default().to_parameters());
        assert_eq!(set.len(), 11);
        assert_eq!(set.get(names::NUM_CYCLES), Some(15.0));
        assert_eq!(set.get(names::LOCK_BOTTOM), Some(-15.5));
        assert_eq!(set.get(names::SALINITY_SEA), Some(25.0));
    }

    #[test]
    fn result_set_collects_from_pairs() {
        let results: ResultSet = [(names::SALT_LOAD_LAKE, 1.5)].into_iter().collect();
        assert!(results.contains(names::SALT_LOAD_LAKE));
        assert_eq!(results.get(names::DISCHARGE_TO_LAKE), None);
    }

    fn arb_set() -> impl Strategy<Value = ParameterSet> {
        prop::collection::vec((0u8..8, -100.0f64..100.0), 0..12).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(k, v)| (format!("p{k}"), v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn merge_right_values_win(a in arb_set(), b in arb_set()) {
            let mut merged = a.clone();
            merged.merge(&b);
            for (name, value) in b.iter() {
                prop_assert_eq!(merged.get(name), Some(value));
            }
            for (name, value) in a.iter() {
                if !b.contains(name) {
                    prop_assert_eq!(merged.get(name), Some(value));
                }
            }
        }

        #[test]
        fn merge_is_idempotent(a in arb_set(), b in arb_set()) {
            let mut once = a.clone();
            once.merge(&b);
            let mut twice = once.clone();
            twice.merge(&b);
            prop_assert_eq!(once, twice);
        }
    }
}
