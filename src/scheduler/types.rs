//! Solve outcome types.

use std::fmt;

use crate::cp::SearchStats;
use crate::models::Schedule;

/// Terminal status of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStatus {
    /// The search space was exhausted under minimization; the
    /// returned schedule is proven optimal.
    Optimal,
    /// A schedule was found without an optimality proof: either the
    /// time limit cut the optimization short, or a feasibility probe
    /// stopped at its first witness.
    Feasible,
    /// The constraints admit no schedule.
    Infeasible,
    /// The time limit fired before any schedule was found; nothing is
    /// known about feasibility.
    Unknown,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScheduleStatus::Optimal => "optimal",
            ScheduleStatus::Feasible => "feasible (optimality not proven)",
            ScheduleStatus::Infeasible => "infeasible",
            ScheduleStatus::Unknown => "no solution found within the limit",
        };
        f.write_str(label)
    }
}

/// Final result of a solve call: status, best schedule (if any), and
/// search statistics. Read-only once produced.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Terminal status.
    pub status: ScheduleStatus,
    /// Best recorded schedule, absent for
    /// [`Infeasible`](ScheduleStatus::Infeasible) and
    /// [`Unknown`](ScheduleStatus::Unknown).
    pub schedule: Option<Schedule>,
    /// Search effort statistics.
    pub stats: SearchStats,
}

impl ScheduleOutcome {
    /// Makespan of the best recorded schedule, if any.
    pub fn objective_value(&self) -> Option<i64> {
        self.schedule.as_ref().map(|s| s.makespan())
    }

    /// Whether a schedule was found.
    pub fn is_solution_found(&self) -> bool {
        self.schedule.is_some()
    }
}

/// Fatal failure of the constraint engine.
///
/// Raised when the engine rejects the model handed to it: an internal
/// invariant breach, not a property of the input. Not recoverable
/// locally.
#[derive(Debug, Clone)]
pub struct EngineError {
    message: String,
}

impl EngineError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint engine failure: {}", self.message)
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(ScheduleStatus::Optimal.to_string(), "optimal");
        assert_eq!(
            ScheduleStatus::Unknown.to_string(),
            "no solution found within the limit"
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = ScheduleOutcome {
            status: ScheduleStatus::Optimal,
            schedule: Some(Schedule::new(vec![0, 2])),
            stats: SearchStats::default(),
        };
        assert!(outcome.is_solution_found());
        assert_eq!(outcome.objective_value(), Some(2));

        let empty = ScheduleOutcome {
            status: ScheduleStatus::Infeasible,
            schedule: None,
            stats: SearchStats::default(),
        };
        assert!(!empty.is_solution_found());
        assert_eq!(empty.objective_value(), None);
    }
}
