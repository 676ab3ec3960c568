//! JSON input loading.
//!
//! Reads the planner data format: a document with `setups` (ordered
//! product-type pairs requiring a changeover), `order_list` (order
//! deadlines, field `dline`), and `unit_list` (product type `prod` and
//! start deadline `dline` per unit). Unknown fields, notably the
//! per-order `order_table` some documents carry, are tolerated and
//! ignored. Product-type labels may be JSON strings or integers;
//! integers are normalized to their decimal string form.

use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::models::{ChangeoverRule, ChangeoverTable, Instance, MalformedInputError, Order, Unit};

/// Failure to produce an [`Instance`] from an input document.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The document is not valid JSON or misses required fields.
    Json(serde_json::Error),
    /// The document parsed but describes a malformed instance.
    Invalid(MalformedInputError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read input: {e}"),
            LoadError::Json(e) => write!(f, "failed to parse input: {e}"),
            LoadError::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
            LoadError::Invalid(e) => Some(e),
        }
    }
}

/// A product-type label: string or integer in the document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Number(i64),
}

impl RawLabel {
    fn into_name(self) -> String {
        match self {
            RawLabel::Text(s) => s,
            RawLabel::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawOrder {
    dline: i64,
}

#[derive(Debug, Deserialize)]
struct RawUnit {
    prod: RawLabel,
    dline: i64,
}

#[derive(Debug, Deserialize)]
struct RawData {
    #[serde(default)]
    setups: Vec<(RawLabel, RawLabel)>,
    #[serde(default)]
    order_list: Vec<RawOrder>,
    unit_list: Vec<RawUnit>,
}

fn build_instance(data: RawData) -> Result<Instance, LoadError> {
    let orders: Vec<Order> = data
        .order_list
        .into_iter()
        .enumerate()
        .map(|(i, o)| Order::new(i, o.dline))
        .collect();
    let units: Vec<Unit> = data
        .unit_list
        .into_iter()
        .enumerate()
        .map(|(i, u)| Unit::new(i, u.prod.into_name(), u.dline))
        .collect();
    let rules: Vec<ChangeoverRule> = data
        .setups
        .into_iter()
        .map(|(from, to)| ChangeoverRule::new(from.into_name(), to.into_name()))
        .collect();

    Instance::new(orders, units, ChangeoverTable::new(rules)).map_err(LoadError::Invalid)
}

/// Loads an instance from a JSON file.
pub fn load_path(path: impl AsRef<Path>) -> Result<Instance, LoadError> {
    let file = File::open(path).map_err(LoadError::Io)?;
    load_reader(BufReader::new(file))
}

/// Loads an instance from a JSON reader.
pub fn load_reader<R: Read>(reader: R) -> Result<Instance, LoadError> {
    let data: RawData = serde_json::from_reader(reader).map_err(LoadError::Json)?;
    build_instance(data)
}

/// Loads an instance from a JSON string.
pub fn load_str(input: &str) -> Result<Instance, LoadError> {
    let data: RawData = serde_json::from_str(input).map_err(LoadError::Json)?;
    build_instance(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMERIC_LABELS: &str = r#"{
        "setups": [[0, 1]],
        "order_list": [{"dline": 8}, {"dline": 6}],
        "unit_list": [
            {"prod": 0, "dline": 4},
            {"prod": 1, "dline": 5},
            {"prod": 0, "dline": 6}
        ],
        "order_table": [[0, 1, 0], [1, 0, 0]]
    }"#;

    #[test]
    fn test_loads_numeric_labels_and_ignores_order_table() {
        let instance = load_str(NUMERIC_LABELS).unwrap();

        assert_eq!(instance.unit_count(), 3);
        assert_eq!(instance.orders().len(), 2);
        assert_eq!(instance.horizon(), 8);
        assert_eq!(instance.units()[1].product_type, "1");
        assert!(instance.changeovers().requires_gap("0", "1"));
        assert!(!instance.changeovers().requires_gap("1", "0"));
    }

    #[test]
    fn test_loads_string_labels() {
        let instance = load_str(
            r#"{
                "setups": [["paint", "varnish"]],
                "order_list": [],
                "unit_list": [
                    {"prod": "paint", "dline": 3},
                    {"prod": "varnish", "dline": 3}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(instance.horizon(), 3);
        assert!(instance.changeovers().requires_gap("paint", "varnish"));
    }

    #[test]
    fn test_missing_unit_list_is_a_parse_error() {
        let err = load_str(r#"{"order_list": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_semantic_errors_surface_as_invalid() {
        let err = load_str(r#"{"unit_list": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));

        let err = load_str(
            r#"{
                "setups": [["paint", "glaze"]],
                "unit_list": [{"prod": "paint", "dline": 3}]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_path("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
