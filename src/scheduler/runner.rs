//! Search execution.
//!
//! Drives a [`CpSolver`] over the built model in one of two mutually
//! exclusive modes:
//!
//! - **Optimization** (no explicit bounds): branch-and-bound
//!   minimization of the makespan. Every solution the engine reports
//!   is strictly better than the previous one; the most recent is the
//!   incumbent.
//! - **Feasibility probe** (either bound supplied): the bounds are
//!   posted as constraints and the search stops at the first feasible
//!   schedule.
//!
//! The optional time limit is a cooperative cutoff polled by the
//! engine; it is the only cancellation channel. Each call owns its
//! model and search state for the duration of the call.

use tracing::debug;

use super::builder::ScheduleBuilder;
use super::config::SolveConfig;
use super::types::{EngineError, ScheduleOutcome, ScheduleStatus};
use crate::cp::{BacktrackingSolver, CpSolver, SolverConfig, SolverStatus};
use crate::models::{Instance, Schedule};

/// Solves an instance with the built-in backtracking engine.
pub fn solve(instance: &Instance, config: &SolveConfig) -> Result<ScheduleOutcome, EngineError> {
    solve_with(instance, &BacktrackingSolver::new(), config)
}

/// Solves an instance with a caller-supplied engine.
///
/// Builds the model, runs the search in the mode selected by
/// `config`, records every reported schedule (keeping the best), and
/// classifies the terminal outcome. Fails only when the engine rejects
/// the built model.
pub fn solve_with<S: CpSolver>(
    instance: &Instance,
    solver: &S,
    config: &SolveConfig,
) -> Result<ScheduleOutcome, EngineError> {
    let schedule_model = ScheduleBuilder::new(instance)
        .with_lower_bound(config.lower_bound)
        .with_upper_bound(config.upper_bound)
        .build();

    let solver_config = SolverConfig {
        time_limit_ms: config.time_limit_ms,
        stop_after_first: schedule_model.is_probe(),
    };

    let mut best: Option<Schedule> = None;
    let mut reported = 0u64;
    let result = solver.solve_with(schedule_model.cp_model(), &solver_config, &mut |solution| {
        if let Some(values) = &solution.assignment {
            let starts: Vec<i64> = schedule_model
                .starts()
                .iter()
                .map(|v| values[v.index()])
                .collect();
            let schedule = Schedule::new(starts);
            debug!(makespan = schedule.makespan(), "incumbent schedule");
            reported += 1;
            best = Some(schedule);
        }
    });

    let status = match result.status {
        SolverStatus::Optimal => ScheduleStatus::Optimal,
        SolverStatus::Feasible => ScheduleStatus::Feasible,
        SolverStatus::Infeasible => ScheduleStatus::Infeasible,
        SolverStatus::Timeout => ScheduleStatus::Unknown,
        SolverStatus::ModelInvalid => {
            return Err(EngineError::new("engine rejected the scheduling model"));
        }
    };

    if let Some(schedule) = &best {
        debug_assert!(schedule.is_feasible(instance));
    }
    debug!(
        solutions = reported,
        branches = result.stats.branches,
        wall_time_ms = result.stats.wall_time_ms,
        %status,
        "search finished"
    );

    Ok(ScheduleOutcome {
        status,
        schedule: best,
        stats: result.stats,
    })
}
