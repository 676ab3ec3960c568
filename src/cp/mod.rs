//! Constraint programming substrate.
//!
//! A deliberately narrow modeling-and-solving capability: integer
//! variables with bounded domains, a small constraint vocabulary, and
//! a search interface with per-solution reporting, branch counting,
//! and a cooperative time limit.
//!
//! # Key Components
//!
//! - **Variables**: [`IntVar`], addressed through [`VarId`] handles
//! - **Model**: [`CpModel`] holding variables, [`Constraint`]s, the
//!   branching order, and an optional minimization objective
//! - **Solver**: the [`CpSolver`] trait, with [`BacktrackingSolver`]
//!   as the built-in implementation
//!
//! # Design
//!
//! The trait boundary keeps consumers agnostic to the engine: the
//! built-in depth-first branch-and-bound search can be swapped for a
//! CP library binding or a SAT/ILP encoding without touching the
//! layers above.
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod model;
mod solver;
mod variables;

pub use model::{Constraint, CpModel};
pub use solver::{
    BacktrackingSolver, CpSolution, CpSolver, SearchStats, SolverConfig, SolverStatus,
};
pub use variables::{IntVar, VarId};
