//! Schedule (solution) model.
//!
//! A schedule is a complete assignment of start slots to units. It can
//! check itself against an [`Instance`], reporting any constraint
//! violations, which keeps the solving layers honest in tests and
//! debug builds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::changeover::CHANGEOVER_SEPARATION;
use crate::models::{Instance, UnitId};

/// A complete schedule: one start slot per unit, indexed by
/// [`UnitId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    starts: Vec<i64>,
    makespan: i64,
}

/// A constraint violation detected in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Violation {
    /// Two units share a start slot on the single resource.
    StartCollision { first: UnitId, second: UnitId },
    /// A unit starts after its deadline.
    DeadlineMiss {
        unit: UnitId,
        start: i64,
        deadline: i64,
    },
    /// A changeover rule applies between two units but the gap between
    /// their starts is too small.
    MissingChangeover { first: UnitId, second: UnitId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::StartCollision { first, second } => {
                write!(f, "units {first} and {second} share a start slot")
            }
            Violation::DeadlineMiss {
                unit,
                start,
                deadline,
            } => write!(f, "unit {unit} starts at {start}, after deadline {deadline}"),
            Violation::MissingChangeover { first, second } => {
                write!(f, "unit {second} follows {first} without a changeover slot")
            }
        }
    }
}

impl Schedule {
    /// Creates a schedule from per-unit start slots.
    ///
    /// The makespan is the latest start.
    pub fn new(starts: Vec<i64>) -> Self {
        let makespan = starts.iter().copied().max().unwrap_or(0);
        Self { starts, makespan }
    }

    /// Start slot of a unit.
    #[inline]
    pub fn start_of(&self, unit: UnitId) -> i64 {
        self.starts[unit.index()]
    }

    /// All start slots, indexed by unit.
    pub fn starts(&self) -> &[i64] {
        &self.starts
    }

    /// Latest start slot (the minimized objective).
    #[inline]
    pub fn makespan(&self) -> i64 {
        self.makespan
    }

    /// Units in order of production (ascending start slot).
    pub fn production_order(&self) -> Vec<UnitId> {
        let mut order: Vec<UnitId> = (0..self.starts.len()).map(UnitId::new).collect();
        order.sort_by_key(|u| self.starts[u.index()]);
        order
    }

    /// Checks this schedule against an instance.
    ///
    /// Returns every violated constraint: shared start slots, missed
    /// deadlines, and changeover rules applied without the required
    /// separation.
    pub fn violations(&self, instance: &Instance) -> Vec<Violation> {
        let mut violations = Vec::new();
        let units = instance.units();

        for i in 0..units.len() {
            for j in (i + 1)..units.len() {
                if self.starts[i] == self.starts[j] {
                    violations.push(Violation::StartCollision {
                        first: units[i].id,
                        second: units[j].id,
                    });
                }
            }
        }

        for unit in units {
            let start = self.start_of(unit.id);
            if start > unit.deadline {
                violations.push(Violation::DeadlineMiss {
                    unit: unit.id,
                    start,
                    deadline: unit.deadline,
                });
            }
        }

        for earlier in units {
            for later in units {
                if earlier.id == later.id {
                    continue;
                }
                let gap = self.start_of(later.id) - self.start_of(earlier.id);
                if gap > 0
                    && gap < CHANGEOVER_SEPARATION
                    && instance
                        .changeovers()
                        .requires_gap(&earlier.product_type, &later.product_type)
                {
                    violations.push(Violation::MissingChangeover {
                        first: earlier.id,
                        second: later.id,
                    });
                }
            }
        }

        violations
    }

    /// Whether this schedule satisfies every constraint of the instance.
    pub fn is_feasible(&self, instance: &Instance) -> bool {
        self.violations(instance).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChangeoverRule, ChangeoverTable, Unit};

    fn instance_with_rule() -> Instance {
        Instance::new(
            vec![],
            vec![Unit::new(0, "paint", 5), Unit::new(1, "varnish", 5)],
            ChangeoverTable::new(vec![ChangeoverRule::new("paint", "varnish")]),
        )
        .unwrap()
    }

    #[test]
    fn test_makespan_is_latest_start() {
        let schedule = Schedule::new(vec![2, 0, 4]);
        assert_eq!(schedule.makespan(), 4);
        assert_eq!(schedule.start_of(UnitId::new(0)), 2);
    }

    #[test]
    fn test_production_order() {
        let schedule = Schedule::new(vec![3, 0, 1]);
        let order = schedule.production_order();
        assert_eq!(order, vec![UnitId::new(1), UnitId::new(2), UnitId::new(0)]);
    }

    #[test]
    fn test_detects_start_collision() {
        let instance = instance_with_rule();
        let schedule = Schedule::new(vec![2, 2]);
        assert!(schedule
            .violations(&instance)
            .iter()
            .any(|v| matches!(v, Violation::StartCollision { .. })));
    }

    #[test]
    fn test_detects_deadline_miss() {
        let instance = instance_with_rule();
        let schedule = Schedule::new(vec![0, 7]);
        assert!(schedule
            .violations(&instance)
            .iter()
            .any(|v| matches!(v, Violation::DeadlineMiss { .. })));
    }

    #[test]
    fn test_detects_missing_changeover() {
        let instance = instance_with_rule();
        // varnish directly after paint: gap of 1, rule demands 2
        let schedule = Schedule::new(vec![0, 1]);
        assert!(schedule
            .violations(&instance)
            .iter()
            .any(|v| matches!(v, Violation::MissingChangeover { .. })));
    }

    #[test]
    fn test_reverse_order_needs_no_gap() {
        let instance = instance_with_rule();
        // paint directly after varnish: no rule for that direction
        let schedule = Schedule::new(vec![1, 0]);
        assert!(schedule.is_feasible(&instance));
    }

    #[test]
    fn test_separated_changeover_is_feasible() {
        let instance = instance_with_rule();
        let schedule = Schedule::new(vec![0, 2]);
        assert!(schedule.is_feasible(&instance));
    }
}
