//! Production order model.
//!
//! Orders carry the delivery commitments of the plan. Within this crate
//! they are consulted for one thing only: the latest order deadline
//! bounds the scheduling horizon. Unit-level deadlines remain
//! authoritative for the per-unit start-time constraints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an order, dense in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(usize);

impl OrderId {
    /// Creates an order identifier from its input position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the order in the input.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o{}", self.0)
    }
}

/// A customer order with a delivery deadline.
///
/// Deadlines are expressed in discrete time slots relative to the
/// schedule start (t=0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Latest delivery slot.
    pub deadline: i64,
}

impl Order {
    /// Creates a new order.
    pub fn new(index: usize, deadline: i64) -> Self {
        Self {
            id: OrderId::new(index),
            deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_creation() {
        let order = Order::new(3, 12);
        assert_eq!(order.id, OrderId::new(3));
        assert_eq!(order.id.index(), 3);
        assert_eq!(order.deadline, 12);
    }

    #[test]
    fn test_order_id_display() {
        assert_eq!(OrderId::new(7).to_string(), "o7");
    }
}
