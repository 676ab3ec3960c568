//! Input validation for scheduling instances.
//!
//! Checks structural integrity of orders, units, and changeover rules
//! before any model is built. Detects:
//! - Empty unit lists
//! - Negative deadlines
//! - Changeover rules naming product types no unit carries
//!
//! Rejecting bad input here keeps the solving layers free of defensive
//! checks: an [`Instance`](crate::models::Instance) is valid by
//! construction.

use crate::models::{ChangeoverTable, Order, Unit};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no units to schedule.
    EmptyUnitList,
    /// An order or unit deadline is below zero.
    NegativeDeadline,
    /// A changeover rule references a product type no unit carries.
    UnknownProductType,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a scheduling instance.
///
/// Checks:
/// 1. At least one unit is present
/// 2. All unit deadlines are non-negative
/// 3. All order deadlines are non-negative
/// 4. Both sides of every changeover rule name a product type carried
///    by some unit
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    orders: &[Order],
    units: &[Unit],
    changeovers: &ChangeoverTable,
) -> ValidationResult {
    let mut errors = Vec::new();

    if units.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyUnitList,
            "No units to schedule",
        ));
    }

    for unit in units {
        if unit.deadline < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDeadline,
                format!("Unit '{}' has negative deadline {}", unit.id, unit.deadline),
            ));
        }
    }

    for order in orders {
        if order.deadline < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDeadline,
                format!(
                    "Order '{}' has negative deadline {}",
                    order.id, order.deadline
                ),
            ));
        }
    }

    let known_types: HashSet<&str> = units.iter().map(|u| u.product_type.as_str()).collect();
    for rule in changeovers.iter() {
        for side in [rule.from.as_str(), rule.to.as_str()] {
            if !known_types.contains(side) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownProductType,
                    format!(
                        "Changeover rule ({} -> {}) references unknown product type '{}'",
                        rule.from, rule.to, side
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChangeoverRule;

    fn sample_units() -> Vec<Unit> {
        vec![
            Unit::new(0, "paint", 4),
            Unit::new(1, "varnish", 5),
            Unit::new(2, "paint", 6),
        ]
    }

    #[test]
    fn test_valid_input() {
        let orders = vec![Order::new(0, 8)];
        let units = sample_units();
        let table = ChangeoverTable::new(vec![ChangeoverRule::new("paint", "varnish")]);

        assert!(validate_input(&orders, &units, &table).is_ok());
    }

    #[test]
    fn test_empty_unit_list() {
        let errors = validate_input(&[], &[], &ChangeoverTable::empty()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyUnitList));
    }

    #[test]
    fn test_negative_unit_deadline() {
        let units = vec![Unit::new(0, "paint", -1)];
        let errors = validate_input(&[], &units, &ChangeoverTable::empty()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeDeadline));
    }

    #[test]
    fn test_negative_order_deadline() {
        let orders = vec![Order::new(0, -3)];
        let units = sample_units();
        let errors = validate_input(&orders, &units, &ChangeoverTable::empty()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeDeadline
                && e.message.contains("Order")));
    }

    #[test]
    fn test_unknown_product_type_in_rule() {
        let units = sample_units();
        let table = ChangeoverTable::new(vec![ChangeoverRule::new("paint", "NONEXISTENT")]);

        let errors = validate_input(&[], &units, &table).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownProductType));
    }

    #[test]
    fn test_multiple_errors() {
        // Negative deadline + both rule sides unknown
        let units = vec![Unit::new(0, "paint", -2)];
        let table = ChangeoverTable::new(vec![ChangeoverRule::new("x", "y")]);

        let errors = validate_input(&[], &units, &table).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
