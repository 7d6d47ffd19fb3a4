//! Ordered, name-keyed collection of reservoirs.

use std::ops::Index;

use brine_core::{BasinError, ReservoirId};
use indexmap::IndexMap;

use crate::reservoir::{Inflow, Reservoir};

/// Owns the reservoirs of a model.
///
/// Reservoirs are addressed by [`ReservoirId`], which is the insertion
/// index, or by name. Connections hold ids and borrow the set when they
/// compute fluxes, so they never own reservoir state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasinSet {
    reservoirs: IndexMap<String, Reservoir>,
}

impl BasinSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reservoir under `name` and return its id.
    ///
    /// Adding under an existing name replaces that reservoir and keeps its id.
    pub fn insert(&mut self, name: impl Into<String>, reservoir: Reservoir) -> ReservoirId {
        let (index, _) = self.reservoirs.insert_full(name.into(), reservoir);
        ReservoirId(index as u32)
    }

    /// Look up a reservoir by id.
    pub fn get(&self, id: ReservoirId) -> Result<&Reservoir, BasinError> {
        self.reservoirs
            .get_index(id.0 as usize)
            .map(|(_, r)| r)
            .ok_or(BasinError::UnknownReservoir { id })
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: ReservoirId) -> Result<&mut Reservoir, BasinError> {
        self.reservoirs
            .get_index_mut(id.0 as usize)
            .map(|(_, r)| r)
            .ok_or(BasinError::UnknownReservoir { id })
    }

    /// Id of the reservoir registered under `name`.
    pub fn id_of(&self, name: &str) -> Option<ReservoirId> {
        self.reservoirs
            .get_index_of(name)
            .map(|index| ReservoirId(index as u32))
    }

    /// Name of a reservoir.
    pub fn name(&self, id: ReservoirId) -> Option<&str> {
        self.reservoirs
            .get_index(id.0 as usize)
            .map(|(name, _)| name.as_str())
    }

    /// Salinity of a reservoir, with the id attached to any error.
    pub fn salinity(&self, id: ReservoirId) -> Result<f64, BasinError> {
        self.get(id)?.salinity().map_err(|e| tag(e, id))
    }

    /// [`Reservoir::mass_delta`] for a reservoir in the set.
    pub fn mass_delta(
        &self,
        id: ReservoirId,
        inflow: &Inflow,
        dt: f64,
    ) -> Result<f64, BasinError> {
        self.get(id)?.mass_delta(inflow, dt).map_err(|e| tag(e, id))
    }

    /// Number of reservoirs.
    pub fn len(&self) -> usize {
        self.reservoirs.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.reservoirs.is_empty()
    }

    /// Iterate `(id, name, reservoir)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ReservoirId, &str, &Reservoir)> {
        self.reservoirs
            .iter()
            .enumerate()
            .map(|(i, (name, r))| (ReservoirId(i as u32), name.as_str(), r))
    }

    /// Total salt mass over all reservoirs (kg).
    pub fn total_mass(&self) -> f64 {
        self.reservoirs.values().map(Reservoir::mass).sum()
    }
}

impl Index<ReservoirId> for BasinSet {
    type Output = Reservoir;

    /// # Panics
    ///
    /// Panics if `id` is not in the set.
    fn index(&self, id: ReservoirId) -> &Reservoir {
        &self.reservoirs[id.0 as usize]
    }
}

fn tag(error: BasinError, id: ReservoirId) -> BasinError {
    match error {
        BasinError::NonPositiveMass { mass, .. } => BasinError::NonPositiveMass {
            reservoir: Some(id),
            mass,
        },
        other => other,
    }
}
