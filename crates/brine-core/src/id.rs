//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a reservoir within a basin set.
///
/// Reservoirs are registered in order and assigned sequential IDs.
/// `ReservoirId(n)` corresponds to the n-th reservoir added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReservoirId(pub u32);

impl fmt::Display for ReservoirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ReservoirId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// Incremented each time the model advances one time step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_id_next_increments() {
        assert_eq!(StepId(0).next(), StepId(1));
        assert_eq!(StepId::default(), StepId(0));
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(ReservoirId(7).to_string(), "7");
        assert_eq!(StepId(42).to_string(), "42");
    }
}
