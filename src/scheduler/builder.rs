//! CP model construction for production scheduling.
//!
//! Translates an [`Instance`] into decision variables and constraints:
//! one start-time variable per unit, pairwise mutual exclusion on the
//! single resource, per-unit deadline bounds, the directional
//! changeover disjunctions, and the makespan definition.

use crate::cp::{CpModel, VarId};
use crate::models::Instance;

/// Handle to a built scheduling model.
///
/// Bundles the engine model with the variable handles the search
/// controller needs to interpret its solutions.
#[derive(Debug)]
pub struct ScheduleModel {
    pub(crate) model: CpModel,
    pub(crate) starts: Vec<VarId>,
    pub(crate) makespan: VarId,
    pub(crate) probe: bool,
}

impl ScheduleModel {
    /// Per-unit start-time variables, in unit order.
    pub fn starts(&self) -> &[VarId] {
        &self.starts
    }

    /// The makespan variable.
    pub fn makespan_var(&self) -> VarId {
        self.makespan
    }

    /// Whether the model was built for a feasibility probe.
    pub fn is_probe(&self) -> bool {
        self.probe
    }

    /// The underlying engine model.
    pub fn cp_model(&self) -> &CpModel {
        &self.model
    }
}

/// Builds a [`ScheduleModel`] from a validated instance.
///
/// # Example
/// ```
/// use prodsched::models::{ChangeoverTable, Instance, Unit};
/// use prodsched::scheduler::ScheduleBuilder;
///
/// let instance = Instance::new(
///     vec![],
///     vec![Unit::new(0, "paint", 3), Unit::new(1, "varnish", 3)],
///     ChangeoverTable::empty(),
/// )
/// .unwrap();
/// let model = ScheduleBuilder::new(&instance).build();
/// assert_eq!(model.starts().len(), 2);
/// ```
#[derive(Debug)]
pub struct ScheduleBuilder<'a> {
    instance: &'a Instance,
    lower_bound: Option<i64>,
    upper_bound: Option<i64>,
}

impl<'a> ScheduleBuilder<'a> {
    /// Creates a builder for an instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            lower_bound: None,
            upper_bound: None,
        }
    }

    /// Posts `makespan >= bound` and switches the model to probe mode.
    pub fn with_lower_bound(mut self, bound: Option<i64>) -> Self {
        self.lower_bound = bound;
        self
    }

    /// Posts `makespan <= bound` and switches the model to probe mode.
    pub fn with_upper_bound(mut self, bound: Option<i64>) -> Self {
        self.upper_bound = bound;
        self
    }

    /// Builds the model.
    ///
    /// Posts, in order:
    /// - one start variable per unit with domain `[0, horizon]`;
    /// - pairwise `!=` over every pair of starts (no simultaneous
    ///   production on the single resource);
    /// - `start <= deadline` per unit;
    /// - for every changeover rule `(p1, p2)` and every ordered pair
    ///   of distinct units `(i: p1, j: p2)`, the disjunction
    ///   "`start_i + 1 < start_j` xor `start_j < start_i`": a
    ///   `p2`-unit may not start in the slot a `p1`-unit occupies nor
    ///   in the slot right after it, while starting earlier is free;
    /// - `makespan == max(starts)`;
    /// - the caller's makespan bounds, when given;
    /// - a minimize directive, unless a bound selected probe mode.
    ///
    /// Branching follows unit declaration order.
    pub fn build(&self) -> ScheduleModel {
        let units = self.instance.units();
        let horizon = self.instance.horizon();
        let mut model = CpModel::new("production-scheduling");

        let starts: Vec<VarId> = units
            .iter()
            .map(|u| model.new_var(format!("s_{}", u.id.index()), 0, horizon))
            .collect();
        let makespan = model.new_var("makespan", 0, horizon);

        for i in 0..units.len() {
            for j in (i + 1)..units.len() {
                model.not_equal(starts[i], starts[j]);
            }
        }

        for (i, unit) in units.iter().enumerate() {
            model.upper_bound(starts[i], unit.deadline);
        }

        for rule in self.instance.changeovers().iter() {
            for (i, from_unit) in units.iter().enumerate() {
                for (j, to_unit) in units.iter().enumerate() {
                    if i != j
                        && from_unit.product_type == rule.from
                        && to_unit.product_type == rule.to
                    {
                        model.offset_before_or_after(starts[i], starts[j], 1);
                    }
                }
            }
        }

        model.max_equals(makespan, starts.clone());

        if let Some(lb) = self.lower_bound {
            model.lower_bound(makespan, lb);
        }
        if let Some(ub) = self.upper_bound {
            model.upper_bound(makespan, ub);
        }

        model.set_branching(starts.clone());

        let probe = self.lower_bound.is_some() || self.upper_bound.is_some();
        if !probe {
            model.minimize(makespan);
        }

        ScheduleModel {
            model,
            starts,
            makespan,
            probe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChangeoverRule, ChangeoverTable, Unit};

    fn three_unit_instance() -> Instance {
        Instance::new(
            vec![],
            vec![
                Unit::new(0, "paint", 4),
                Unit::new(1, "varnish", 5),
                Unit::new(2, "paint", 6),
            ],
            ChangeoverTable::new(vec![ChangeoverRule::new("paint", "varnish")]),
        )
        .unwrap()
    }

    #[test]
    fn test_build_optimization_model() {
        let instance = three_unit_instance();
        let schedule_model = ScheduleBuilder::new(&instance).build();

        // 3 starts + makespan
        assert_eq!(schedule_model.cp_model().var_count(), 4);
        // 3 pairwise + 3 deadlines + 2 changeover pairs (u0->u1, u2->u1)
        // + 1 makespan definition
        assert_eq!(schedule_model.cp_model().constraint_count(), 9);
        assert!(!schedule_model.is_probe());
        assert!(schedule_model.cp_model().objective().is_some());
        assert!(schedule_model.cp_model().validate().is_ok());
    }

    #[test]
    fn test_build_probe_model() {
        let instance = three_unit_instance();
        let schedule_model = ScheduleBuilder::new(&instance)
            .with_lower_bound(Some(2))
            .with_upper_bound(Some(4))
            .build();

        assert!(schedule_model.is_probe());
        assert!(schedule_model.cp_model().objective().is_none());
        // Two extra bound constraints
        assert_eq!(schedule_model.cp_model().constraint_count(), 11);
    }

    #[test]
    fn test_start_domains_span_horizon() {
        let instance = three_unit_instance();
        let schedule_model = ScheduleBuilder::new(&instance).build();
        let model = schedule_model.cp_model();

        for &start in schedule_model.starts() {
            assert_eq!(model.var(start).min, 0);
            assert_eq!(model.var(start).max, instance.horizon());
        }
    }

    #[test]
    fn test_same_type_rule_constrains_both_directions() {
        let instance = Instance::new(
            vec![],
            vec![Unit::new(0, "paint", 4), Unit::new(1, "paint", 4)],
            ChangeoverTable::new(vec![ChangeoverRule::new("paint", "paint")]),
        )
        .unwrap();
        let schedule_model = ScheduleBuilder::new(&instance).build();

        // 1 pairwise + 2 deadlines + 2 directed changeover pairs + 1 max
        assert_eq!(schedule_model.cp_model().constraint_count(), 6);
    }
}
