//! Solve configuration.

/// Configuration for one solve call.
///
/// Supplying either makespan bound switches the search from
/// branch-and-bound optimization to a feasibility probe that stops at
/// the first solution inside the bounded window, the building block
/// for external bisection on the optimal makespan.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveConfig {
    /// Cooperative search time limit in milliseconds. `None` leaves
    /// the search unbounded; optimality is then guaranteed on
    /// termination.
    pub time_limit_ms: Option<u64>,
    /// Require `makespan >= bound` and probe for feasibility.
    pub lower_bound: Option<i64>,
    /// Require `makespan <= bound` and probe for feasibility.
    pub upper_bound: Option<i64>,
}

impl SolveConfig {
    /// Creates a configuration with no limit and no bounds
    /// (optimization mode).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, limit_ms: u64) -> Self {
        self.time_limit_ms = Some(limit_ms);
        self
    }

    /// Sets a makespan lower bound (selects probe mode).
    pub fn with_lower_bound(mut self, bound: i64) -> Self {
        self.lower_bound = Some(bound);
        self
    }

    /// Sets a makespan upper bound (selects probe mode).
    pub fn with_upper_bound(mut self, bound: i64) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    /// Whether this configuration selects feasibility-probe mode.
    pub fn is_probe(&self) -> bool {
        self.lower_bound.is_some() || self.upper_bound.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_optimization_mode() {
        let config = SolveConfig::new();
        assert!(!config.is_probe());
        assert!(config.time_limit_ms.is_none());
    }

    #[test]
    fn test_any_bound_selects_probe_mode() {
        assert!(SolveConfig::new().with_lower_bound(2).is_probe());
        assert!(SolveConfig::new().with_upper_bound(9).is_probe());
        assert!(SolveConfig::new()
            .with_lower_bound(2)
            .with_upper_bound(9)
            .is_probe());
    }
}
