//! CP model definition.

use super::variables::{IntVar, VarId};
use std::collections::HashSet;

/// A constraint over integer variables.
///
/// The vocabulary is deliberately small: equality/inequality over
/// pairs, bounds against constants, one asymmetric disjunction, and a
/// max aggregation. Domain semantics belong to the consumer layer.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// `x != y`.
    NotEqual { x: VarId, y: VarId },

    /// `x <= bound`.
    UpperBound { x: VarId, bound: i64 },

    /// `x >= bound`.
    LowerBound { x: VarId, bound: i64 },

    /// Exactly one of `x + offset < y` or `y < x` holds.
    ///
    /// With a non-negative offset the two cases are mutually
    /// exclusive, so the constraint forbids precisely
    /// `y ∈ {x, x+1, …, x+offset}`: `y` may sit strictly before `x`,
    /// or after it with more than `offset` slots in between.
    OffsetBeforeOrAfter { x: VarId, y: VarId, offset: i64 },

    /// `z == max(xs)`.
    MaxEquals { z: VarId, xs: Vec<VarId> },
}

/// A constraint programming model.
///
/// Holds variables, constraints, the branching order, and an optional
/// minimization objective. Solved through a
/// [`CpSolver`](super::CpSolver) implementation.
#[derive(Debug, Clone, Default)]
pub struct CpModel {
    /// Model name (for diagnostics).
    pub name: String,
    vars: Vec<IntVar>,
    constraints: Vec<Constraint>,
    branching: Vec<VarId>,
    objective: Option<VarId>,
}

impl CpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares an integer variable with domain `[min, max]`.
    pub fn new_var(&mut self, name: impl Into<String>, min: i64, max: i64) -> VarId {
        let id = VarId::new(self.vars.len());
        self.vars.push(IntVar::new(name, min, max));
        id
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: `x != y`.
    pub fn not_equal(&mut self, x: VarId, y: VarId) {
        self.constraints.push(Constraint::NotEqual { x, y });
    }

    /// Convenience: `x <= bound`.
    pub fn upper_bound(&mut self, x: VarId, bound: i64) {
        self.constraints.push(Constraint::UpperBound { x, bound });
    }

    /// Convenience: `x >= bound`.
    pub fn lower_bound(&mut self, x: VarId, bound: i64) {
        self.constraints.push(Constraint::LowerBound { x, bound });
    }

    /// Convenience: exactly one of `x + offset < y` or `y < x`.
    pub fn offset_before_or_after(&mut self, x: VarId, y: VarId, offset: i64) {
        self.constraints
            .push(Constraint::OffsetBeforeOrAfter { x, y, offset });
    }

    /// Convenience: `z == max(xs)`.
    pub fn max_equals(&mut self, z: VarId, xs: Vec<VarId>) {
        self.constraints.push(Constraint::MaxEquals { z, xs });
    }

    /// Sets the branching variables, searched in the given order with
    /// the smallest remaining value first.
    pub fn set_branching(&mut self, vars: Vec<VarId>) {
        self.branching = vars;
    }

    /// Requests branch-and-bound minimization of `objective`.
    pub fn minimize(&mut self, objective: VarId) {
        self.objective = Some(objective);
    }

    /// The variable behind a handle.
    pub fn var(&self, id: VarId) -> &IntVar {
        &self.vars[id.index()]
    }

    /// All variables in declaration order.
    pub fn vars(&self) -> &[IntVar] {
        &self.vars
    }

    /// All posted constraints.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// The branching order.
    pub fn branching(&self) -> &[VarId] {
        &self.branching
    }

    /// The minimization objective, if any.
    pub fn objective(&self) -> Option<VarId> {
        self.objective
    }

    /// Number of declared variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of posted constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists, that branching
    /// variables are declared, and that every variable is either
    /// branched on or defined by a `MaxEquals` aggregation; the
    /// search assigns no other kind of variable.
    pub fn validate(&self) -> Result<(), String> {
        let in_range = |id: &VarId| id.index() < self.vars.len();

        for c in &self.constraints {
            let ok = match c {
                Constraint::NotEqual { x, y } => in_range(x) && in_range(y),
                Constraint::UpperBound { x, .. } | Constraint::LowerBound { x, .. } => in_range(x),
                Constraint::OffsetBeforeOrAfter { x, y, .. } => in_range(x) && in_range(y),
                Constraint::MaxEquals { z, xs } => {
                    if xs.is_empty() {
                        return Err("max aggregation over no variables".into());
                    }
                    in_range(z) && xs.iter().all(in_range)
                }
            };
            if !ok {
                return Err(format!("constraint references undeclared variable: {c:?}"));
            }
        }

        for id in &self.branching {
            if !in_range(id) {
                return Err(format!("branching references undeclared variable: {id}"));
            }
        }

        if let Some(obj) = self.objective {
            if !in_range(&obj) {
                return Err(format!("objective references undeclared variable: {obj}"));
            }
        }

        let mut assignable: HashSet<VarId> = self.branching.iter().copied().collect();
        for c in &self.constraints {
            if let Constraint::MaxEquals { z, .. } = c {
                let _ = assignable.insert(*z);
            }
        }
        for index in 0..self.vars.len() {
            let id = VarId::new(index);
            if !assignable.contains(&id) {
                return Err(format!(
                    "variable '{}' is neither branched on nor defined by an aggregation",
                    self.vars[index].name
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let mut model = CpModel::new("test");
        let x = model.new_var("x", 0, 5);
        let y = model.new_var("y", 0, 5);
        let z = model.new_var("z", 0, 5);
        model.not_equal(x, y);
        model.max_equals(z, vec![x, y]);
        model.set_branching(vec![x, y]);
        model.minimize(z);

        assert_eq!(model.var_count(), 3);
        assert_eq!(model.constraint_count(), 2);
        assert_eq!(model.var(x).name, "x");
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_foreign_variable() {
        let mut other = CpModel::new("other");
        let _ = other.new_var("a", 0, 1);
        let foreign = other.new_var("b", 0, 1);

        let mut model = CpModel::new("test");
        let x = model.new_var("x", 0, 1);
        model.not_equal(x, foreign);
        model.set_branching(vec![x]);

        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unassignable_variable() {
        let mut model = CpModel::new("test");
        let x = model.new_var("x", 0, 1);
        let _dangling = model.new_var("y", 0, 1);
        model.set_branching(vec![x]);

        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_aggregation() {
        let mut model = CpModel::new("test");
        let z = model.new_var("z", 0, 1);
        model.max_equals(z, vec![]);

        assert!(model.validate().is_err());
    }
}
