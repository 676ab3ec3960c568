//! Scheduling core: model construction and search control.
//!
//! The [`ScheduleBuilder`] turns a validated
//! [`Instance`](crate::models::Instance) into variables and
//! constraints for the [`cp`](crate::cp) substrate; [`solve`] (or
//! [`solve_with`], for a caller-supplied engine) runs the search in
//! optimization or feasibility-probe mode and returns a
//! [`ScheduleOutcome`].
//!
//! # Example
//!
//! ```
//! use prodsched::models::{ChangeoverRule, ChangeoverTable, Instance, Unit};
//! use prodsched::scheduler::{solve, SolveConfig};
//!
//! let instance = Instance::new(
//!     vec![],
//!     vec![Unit::new(0, "paint", 3), Unit::new(1, "varnish", 3)],
//!     ChangeoverTable::new(vec![ChangeoverRule::new("paint", "varnish")]),
//! )
//! .unwrap();
//!
//! let outcome = solve(&instance, &SolveConfig::new()).unwrap();
//! assert_eq!(outcome.objective_value(), Some(1));
//! ```

mod builder;
mod config;
mod runner;
mod types;

pub use builder::{ScheduleBuilder, ScheduleModel};
pub use config::SolveConfig;
pub use runner::{solve, solve_with};
pub use types::{EngineError, ScheduleOutcome, ScheduleStatus};
