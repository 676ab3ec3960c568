//! Single-resource production scheduling with asymmetric changeovers.
//!
//! Computes a minimal-makespan schedule for a set of manufacturing
//! units sharing one resource: no two units may be produced at the
//! same time, every unit must start by its deadline, and switching
//! from one product type to another may require a changeover slot.
//! Changeover rules are directional: a rule for (p1, p2) says nothing
//! about (p2, p1).
//!
//! # Modules
//!
//! - **`models`**: domain types (`Order`, `Unit`, `ChangeoverRule`,
//!   the validated `Instance`, and the `Schedule` solution view)
//! - **`validation`**: input integrity checks
//! - **`cp`**: a narrow constraint modeling-and-solving substrate with
//!   a backtracking branch-and-bound engine behind a solver trait
//! - **`scheduler`**: the CP formulation and the search controller
//!   (optimization and feasibility-probe modes, time-limited anytime
//!   search)
//! - **`loader`**: JSON input loading
//!
//! # Example
//!
//! ```
//! use prodsched::loader;
//! use prodsched::scheduler::{solve, SolveConfig};
//!
//! let instance = loader::load_str(
//!     r#"{
//!         "setups": [["paint", "varnish"]],
//!         "order_list": [{"dline": 6}],
//!         "unit_list": [
//!             {"prod": "paint", "dline": 4},
//!             {"prod": "varnish", "dline": 4}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let outcome = solve(&instance, &SolveConfig::new()).unwrap();
//! assert!(outcome.is_solution_found());
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Allahverdi et al. (2008), "A survey of scheduling problems with
//!   setup times or costs"

pub mod cp;
pub mod loader;
pub mod models;
pub mod scheduler;
pub mod validation;
