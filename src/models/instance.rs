//! Validated scheduling instance.
//!
//! An `Instance` bundles the orders, units, and changeover rules of one
//! scheduling problem after input validation, and derives the time
//! horizon that bounds every start-time domain.

use serde::Serialize;
use std::fmt;

use crate::models::{ChangeoverTable, Order, Unit};
use crate::validation::{self, ValidationError};

/// Malformed input, rejected before any model is built.
///
/// Wraps the full list of detected [`ValidationError`]s so a caller can
/// report every problem at once.
#[derive(Debug, Clone)]
pub struct MalformedInputError {
    errors: Vec<ValidationError>,
}

impl MalformedInputError {
    /// The individual validation failures.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed scheduling input: ")?;
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for MalformedInputError {}

/// A validated, immutable scheduling problem.
///
/// Construction runs [`validation::validate_input`] and fails with
/// [`MalformedInputError`] on any structural defect, so every other
/// layer can rely on the data being well-formed. Construction goes
/// through [`Instance::new`] only; loading documents is the
/// [`loader`](crate::loader)'s job.
#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    orders: Vec<Order>,
    units: Vec<Unit>,
    changeovers: ChangeoverTable,
    horizon: i64,
}

impl Instance {
    /// Builds a validated instance.
    ///
    /// The horizon is the latest order deadline; when no orders are
    /// given it falls back to the latest unit deadline.
    pub fn new(
        orders: Vec<Order>,
        units: Vec<Unit>,
        changeovers: ChangeoverTable,
    ) -> Result<Self, MalformedInputError> {
        validation::validate_input(&orders, &units, &changeovers)
            .map_err(|errors| MalformedInputError { errors })?;

        let horizon = orders
            .iter()
            .map(|o| o.deadline)
            .max()
            .or_else(|| units.iter().map(|u| u.deadline).max())
            .unwrap_or(0);

        Ok(Self {
            orders,
            units,
            changeovers,
            horizon,
        })
    }

    /// The orders, in input order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// The units, in input order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// The declared changeover rules.
    pub fn changeovers(&self) -> &ChangeoverTable {
        &self.changeovers
    }

    /// Latest slot any unit could plausibly need.
    #[inline]
    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// Number of units to schedule.
    #[inline]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}
