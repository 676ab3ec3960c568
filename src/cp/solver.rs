//! CP solver interface and backtracking implementation.

use super::model::{Constraint, CpModel};
use super::variables::VarId;
use std::time::{Duration, Instant};

/// Status of the solver after a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Search space exhausted under minimization; the recorded
    /// solution is proven optimal.
    Optimal,
    /// Feasible solution recorded, optimality not proven.
    Feasible,
    /// Search space exhausted without finding a solution.
    Infeasible,
    /// The time limit fired before any solution was found; nothing is
    /// known about feasibility.
    Timeout,
    /// The model failed validation.
    ModelInvalid,
}

/// Search effort statistics, reported with every outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Number of value assignments tried.
    pub branches: u64,
    /// Wall-clock search time in milliseconds.
    pub wall_time_ms: u64,
    /// Whether the time limit cut the search short.
    pub time_limit_exceeded: bool,
}

/// Outcome of a search: terminal status, best assignment (if any),
/// and effort statistics.
#[derive(Debug, Clone)]
pub struct CpSolution {
    /// Terminal status.
    pub status: SolverStatus,
    /// Value of the minimization objective, when one was set.
    pub objective_value: Option<i64>,
    /// Values of all model variables in declaration order.
    pub assignment: Option<Vec<i64>>,
    /// Search effort.
    pub stats: SearchStats,
}

impl CpSolution {
    /// Whether a feasible assignment was recorded.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Value assigned to a variable, if a solution was recorded.
    pub fn value(&self, id: VarId) -> Option<i64> {
        self.assignment.as_ref().map(|a| a[id.index()])
    }
}

/// Solver configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    /// Cooperative time limit in milliseconds. `None` leaves the
    /// search unbounded.
    pub time_limit_ms: Option<u64>,
    /// Stop at the first feasible solution instead of improving on it.
    pub stop_after_first: bool,
}

/// Trait for CP solver implementations.
///
/// Keeps the model-building and search-control layers agnostic to the
/// engine behind them; an implementation may be a hand-rolled search,
/// a CP library binding, or a SAT/ILP encoding.
pub trait CpSolver {
    /// Runs the search, invoking `on_solution` for each reported
    /// solution. Under minimization every reported solution is
    /// strictly better than the one before it; the final return value
    /// carries the best recorded assignment and the terminal status.
    fn solve_with(
        &self,
        model: &CpModel,
        config: &SolverConfig,
        on_solution: &mut dyn FnMut(&CpSolution),
    ) -> CpSolution;

    /// Runs the search, keeping only the final outcome.
    fn solve(&self, model: &CpModel, config: &SolverConfig) -> CpSolution {
        self.solve_with(model, config, &mut |_| {})
    }
}

/// Chronological backtracking solver.
///
/// Depth-first search over the model's branching variables in
/// declaration order, smallest value first. Bounds are tightened once
/// at the root (an empty domain there proves infeasibility without
/// branching); during search each assignment is checked against the
/// constraints it participates in, and under minimization the
/// incumbent objective prunes via a dynamic upper bound. The time
/// limit is polled cooperatively at every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self
    }
}

impl CpSolver for BacktrackingSolver {
    fn solve_with(
        &self,
        model: &CpModel,
        config: &SolverConfig,
        on_solution: &mut dyn FnMut(&CpSolution),
    ) -> CpSolution {
        let started = Instant::now();

        if model.validate().is_err() {
            return CpSolution {
                status: SolverStatus::ModelInvalid,
                objective_value: None,
                assignment: None,
                stats: SearchStats::default(),
            };
        }

        let mut search = Search {
            model,
            config,
            mins: model.vars().iter().map(|v| v.min).collect(),
            maxs: model.vars().iter().map(|v| v.max).collect(),
            values: vec![None; model.var_count()],
            branches: 0,
            started,
            deadline: config
                .time_limit_ms
                .map(|ms| started + Duration::from_millis(ms)),
            timed_out: false,
            objective_cap: i64::MAX,
            best: None,
        };

        if search.tighten_root_bounds() {
            let _ = search.dfs(0, on_solution);
        }

        let stats = SearchStats {
            branches: search.branches,
            wall_time_ms: started.elapsed().as_millis() as u64,
            time_limit_exceeded: search.timed_out,
        };

        match search.best {
            Some(mut solution) => {
                let proven_optimal = !search.timed_out
                    && !config.stop_after_first
                    && model.objective().is_some();
                solution.status = if proven_optimal {
                    SolverStatus::Optimal
                } else {
                    SolverStatus::Feasible
                };
                solution.stats = stats;
                solution
            }
            None => CpSolution {
                status: if search.timed_out {
                    SolverStatus::Timeout
                } else {
                    SolverStatus::Infeasible
                },
                objective_value: None,
                assignment: None,
                stats,
            },
        }
    }
}

struct Search<'a> {
    model: &'a CpModel,
    config: &'a SolverConfig,
    mins: Vec<i64>,
    maxs: Vec<i64>,
    values: Vec<Option<i64>>,
    branches: u64,
    started: Instant,
    deadline: Option<Instant>,
    timed_out: bool,
    /// Dynamic upper bound on the objective: incumbent minus one.
    objective_cap: i64,
    best: Option<CpSolution>,
}

impl Search<'_> {
    /// One fixpoint pass of bounds reasoning before any branching.
    ///
    /// Returns `false` when the root is already proven infeasible.
    fn tighten_root_bounds(&mut self) -> bool {
        loop {
            let mut changed = false;
            for c in self.model.constraints() {
                match c {
                    Constraint::UpperBound { x, bound } => {
                        changed |= self.clamp_max(*x, *bound);
                    }
                    Constraint::LowerBound { x, bound } => {
                        changed |= self.clamp_min(*x, *bound);
                    }
                    Constraint::MaxEquals { z, xs } => {
                        if let Some(ub) = xs.iter().map(|x| self.maxs[x.index()]).max() {
                            changed |= self.clamp_max(*z, ub);
                        }
                        if let Some(lb) = xs.iter().map(|x| self.mins[x.index()]).max() {
                            changed |= self.clamp_min(*z, lb);
                        }
                        let z_max = self.maxs[z.index()];
                        for x in xs {
                            changed |= self.clamp_max(*x, z_max);
                        }
                    }
                    Constraint::NotEqual { x, y } => {
                        let (xi, yi) = (x.index(), y.index());
                        let x_fixed = self.mins[xi] == self.maxs[xi];
                        let y_fixed = self.mins[yi] == self.maxs[yi];
                        if x_fixed && y_fixed && self.mins[xi] == self.mins[yi] {
                            return false;
                        }
                    }
                    Constraint::OffsetBeforeOrAfter { .. } => {}
                }
            }
            if !changed {
                break;
            }
        }

        (0..self.model.var_count()).all(|i| self.mins[i] <= self.maxs[i])
    }

    fn clamp_max(&mut self, x: VarId, bound: i64) -> bool {
        if bound < self.maxs[x.index()] {
            self.maxs[x.index()] = bound;
            true
        } else {
            false
        }
    }

    fn clamp_min(&mut self, x: VarId, bound: i64) -> bool {
        if bound > self.mins[x.index()] {
            self.mins[x.index()] = bound;
            true
        } else {
            false
        }
    }

    /// Returns `false` when the whole search must stop (timeout or a
    /// first-solution cutoff).
    fn dfs(&mut self, depth: usize, on_solution: &mut dyn FnMut(&CpSolution)) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                return false;
            }
        }

        let branching = self.model.branching();
        if depth == branching.len() {
            return self.record_leaf(on_solution);
        }

        let var = branching[depth];
        let (min, max) = (self.mins[var.index()], self.maxs[var.index()]);
        for value in min..=max {
            self.branches += 1;
            self.values[var.index()] = Some(value);
            if self.consistent_after(var) && !self.dfs(depth + 1, on_solution) {
                self.values[var.index()] = None;
                return false;
            }
            self.values[var.index()] = None;
        }
        true
    }

    /// Effective upper bound on `z`, folding in the incumbent when `z`
    /// is the objective.
    fn cap_for(&self, z: VarId) -> i64 {
        let mut cap = self.maxs[z.index()];
        if self.model.objective() == Some(z) {
            cap = cap.min(self.objective_cap);
        }
        cap
    }

    /// Backward check: every constraint the newly assigned variable
    /// participates in, evaluated as far as the assignment allows.
    fn consistent_after(&self, var: VarId) -> bool {
        let assigned = |id: &VarId| self.values[id.index()];

        if self.model.objective() == Some(var) {
            if let Some(v) = self.values[var.index()] {
                if v > self.objective_cap {
                    return false;
                }
            }
        }

        for c in self.model.constraints() {
            let ok = match c {
                Constraint::NotEqual { x, y } => {
                    *x != var && *y != var
                        || !matches!((assigned(x), assigned(y)), (Some(a), Some(b)) if a == b)
                }
                Constraint::UpperBound { x, bound } => {
                    *x != var || assigned(x).is_none_or(|v| v <= *bound)
                }
                Constraint::LowerBound { x, bound } => {
                    *x != var || assigned(x).is_none_or(|v| v >= *bound)
                }
                Constraint::OffsetBeforeOrAfter { x, y, offset } => {
                    if *x != var && *y != var {
                        true
                    } else {
                        match (assigned(x), assigned(y)) {
                            (Some(a), Some(b)) => (a + offset < b) != (b < a),
                            _ => true,
                        }
                    }
                }
                Constraint::MaxEquals { z, xs } => {
                    !xs.contains(&var)
                        || self.values[var.index()].is_none_or(|v| v <= self.cap_for(*z))
                }
            };
            if !ok {
                return false;
            }
        }
        true
    }

    /// Full assignment of the branching variables: fix the
    /// aggregation-defined variables, re-check everything exactly, and
    /// report the solution.
    fn record_leaf(&mut self, on_solution: &mut dyn FnMut(&CpSolution)) -> bool {
        let mut derived: Vec<VarId> = Vec::new();
        let mut feasible = true;

        for c in self.model.constraints() {
            if let Constraint::MaxEquals { z, xs } = c {
                let inputs: Option<Vec<i64>> =
                    xs.iter().map(|x| self.values[x.index()]).collect();
                match inputs.and_then(|vals| vals.into_iter().max()) {
                    Some(m) if m >= self.mins[z.index()] && m <= self.cap_for(*z) => {
                        self.values[z.index()] = Some(m);
                        derived.push(*z);
                    }
                    _ => {
                        feasible = false;
                        break;
                    }
                }
            }
        }

        let mut keep_searching = true;
        if feasible && self.all_constraints_hold() {
            if let Some(assignment) = self.values.iter().copied().collect::<Option<Vec<i64>>>() {
                let objective_value = self.model.objective().map(|z| assignment[z.index()]);
                let solution = CpSolution {
                    status: SolverStatus::Feasible,
                    objective_value,
                    assignment: Some(assignment),
                    stats: SearchStats {
                        branches: self.branches,
                        wall_time_ms: self.started.elapsed().as_millis() as u64,
                        time_limit_exceeded: false,
                    },
                };
                on_solution(&solution);
                self.best = Some(solution);

                if let Some(v) = objective_value {
                    self.objective_cap = v - 1;
                }
                // Without an objective there is nothing to improve.
                keep_searching =
                    !self.config.stop_after_first && self.model.objective().is_some();
            }
        }

        for z in derived {
            self.values[z.index()] = None;
        }
        keep_searching
    }

    fn all_constraints_hold(&self) -> bool {
        let val = |id: &VarId| self.values[id.index()];
        self.model.constraints().iter().all(|c| match c {
            Constraint::NotEqual { x, y } => {
                matches!((val(x), val(y)), (Some(a), Some(b)) if a != b)
            }
            Constraint::UpperBound { x, bound } => {
                matches!(val(x), Some(v) if v <= *bound)
            }
            Constraint::LowerBound { x, bound } => {
                matches!(val(x), Some(v) if v >= *bound)
            }
            Constraint::OffsetBeforeOrAfter { x, y, offset } => {
                matches!((val(x), val(y)), (Some(a), Some(b)) if (a + offset < b) != (b < a))
            }
            Constraint::MaxEquals { z, xs } => {
                let m = xs.iter().map(val).collect::<Option<Vec<i64>>>();
                matches!(
                    (m.and_then(|vals| vals.into_iter().max()), val(z)),
                    (Some(m), Some(zv)) if m == zv
                )
            }
        })
    }
}
