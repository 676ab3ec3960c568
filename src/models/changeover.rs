//! Changeover rules between product types.
//!
//! Switching the shared resource from one product type to another may
//! require a cleaning/retooling slot. Rules are directional: a rule for
//! (p1, p2) says nothing about the reverse switch (p2, p1) unless that
//! pair is declared separately.
//!
//! # Reference
//! Allahverdi et al. (2008), "A survey of scheduling problems with
//! setup times or costs"

use serde::{Deserialize, Serialize};

/// Minimum start-to-start separation, in slots, between a unit of a
/// rule's `from` type and a later unit of its `to` type: one slot of
/// production plus one slot of changeover.
pub const CHANGEOVER_SEPARATION: i64 = 2;

/// A directional changeover requirement between two product types.
///
/// When a `from`-type unit starts strictly before a `to`-type unit,
/// their start times must differ by at least
/// [`CHANGEOVER_SEPARATION`]. The reverse temporal order carries no
/// requirement beyond ordinary mutual exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeoverRule {
    /// Product type being switched away from.
    pub from: String,
    /// Product type being switched to.
    pub to: String,
}

impl ChangeoverRule {
    /// Creates a new directional rule.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The set of declared changeover rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeoverTable {
    rules: Vec<ChangeoverRule>,
}

impl ChangeoverTable {
    /// Creates a table from a list of rules.
    pub fn new(rules: Vec<ChangeoverRule>) -> Self {
        Self { rules }
    }

    /// Creates an empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a rule demands a gap when switching `from` → `to`.
    pub fn requires_gap(&self, from: &str, to: &str) -> bool {
        self.rules.iter().any(|r| r.from == from && r.to == to)
    }

    /// Iterates over the declared rules.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeoverRule> {
        self.rules.iter()
    }

    /// Number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_directional() {
        let table = ChangeoverTable::new(vec![ChangeoverRule::new("paint", "varnish")]);

        assert!(table.requires_gap("paint", "varnish"));
        assert!(!table.requires_gap("varnish", "paint"));
        assert!(!table.requires_gap("paint", "paint"));
    }

    #[test]
    fn test_same_type_rule_must_be_declared() {
        let table = ChangeoverTable::new(vec![ChangeoverRule::new("paint", "paint")]);
        assert!(table.requires_gap("paint", "paint"));
    }

    #[test]
    fn test_empty_table() {
        let table = ChangeoverTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(!table.requires_gap("a", "b"));
    }
}
