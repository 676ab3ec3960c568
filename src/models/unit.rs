//! Manufacturing unit model.
//!
//! A unit is the atomic schedulable job: it occupies exactly one
//! discrete time slot on the shared resource and must start no later
//! than its own deadline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a unit, dense in input order.
///
/// Doubles as the index of the unit's start time in a solved
/// [`Schedule`](crate::models::Schedule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(usize);

impl UnitId {
    /// Creates a unit identifier from its input position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the unit in the input.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}

/// A single unit to be produced.
///
/// Immutable once constructed; the solving layers only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Unique unit identifier.
    pub id: UnitId,
    /// Product type label, used for changeover rule lookups.
    pub product_type: String,
    /// Latest slot at which production of this unit may start.
    pub deadline: i64,
}

impl Unit {
    /// Creates a new unit.
    pub fn new(index: usize, product_type: impl Into<String>, deadline: i64) -> Self {
        Self {
            id: UnitId::new(index),
            product_type: product_type.into(),
            deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_creation() {
        let unit = Unit::new(0, "TypeA", 5);
        assert_eq!(unit.id.index(), 0);
        assert_eq!(unit.product_type, "TypeA");
        assert_eq!(unit.deadline, 5);
    }

    #[test]
    fn test_unit_id_display() {
        assert_eq!(UnitId::new(2).to_string(), "u2");
    }
}
