//! Field shaping for employee responses.
//!
//! Callers may request a subset of fields via the `fields` query parameter.
//! Selection goes through an explicit accessor table rather than reflection;
//! unknown field names are ignored so stale client field lists keep working.

use serde_json::{Map, Value, json};

use crate::domain::employee::Employee;

type FieldAccessor = fn(&Employee) -> Value;

/// Every publicly exposed employee field, in response order.
const EMPLOYEE_FIELDS: &[(&str, FieldAccessor)] = &[
    ("name", |e| json!(e.name)),
    ("age", |e| json!(e.age)),
    ("position", |e| json!(e.position)),
];

/// Splits a raw comma-separated `fields` parameter into trimmed names.
pub fn parse_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Projects employees down to the requested fields.
///
/// The `id` field is always retained. An empty request returns all fields;
/// unknown names are dropped silently.
pub fn shape_employees(employees: &[Employee], fields: &[String]) -> Vec<Map<String, Value>> {
    let selected: Vec<&(&str, FieldAccessor)> = if fields.is_empty() {
        EMPLOYEE_FIELDS.iter().collect()
    } else {
        EMPLOYEE_FIELDS
            .iter()
            .filter(|(name, _)| fields.iter().any(|f| f.eq_ignore_ascii_case(name)))
            .collect()
    };

    employees
        .iter()
        .map(|employee| {
            let mut shaped = Map::new();
            shaped.insert("id".to_string(), json!(employee.id));
            for (name, accessor) in &selected {
                shaped.insert((*name).to_string(), accessor(employee));
            }
            shaped
        })
        .collect()
}
