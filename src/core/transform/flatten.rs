//! Record flattening
//!
//! Converts nested JSON records into flat rows keyed by dotted column names:
//! - `{"address": {"city": "Paris"}}` → `"address.city"`
//! - `{"manager": {"id": 4, "name": "A"}}` → `"manager.id"`, `"manager.name"`
//!
//! Arrays and scalars are leaves. Nested objects with no members contribute
//! no column.

use serde_json::{Map, Value};

/// Column used for records that are not JSON objects
pub const VALUE_COLUMN: &str = "value";

/// Flat row: dotted column name to leaf value, in encounter order
pub type FlatRecord = Map<String, Value>;

/// Flattens one record
///
/// Non-object records land under [`VALUE_COLUMN`].
///
/// # Examples
///
/// ```
/// use lucca_export::core::transform::flatten::flatten_record;
/// use serde_json::json;
///
/// let row = flatten_record(&json!({"id": 1, "department": {"id": 7, "name": "R&D"}}));
/// let columns: Vec<&str> = row.keys().map(String::as_str).collect();
/// assert_eq!(columns, ["id", "department.id", "department.name"]);
/// ```
pub fn flatten_record(record: &Value) -> FlatRecord {
    let mut row = Map::new();
    match record {
        Value::Object(fields) => flatten_into(&mut row, None, fields),
        other => {
            row.insert(VALUE_COLUMN.to_string(), other.clone());
        }
    }
    row
}

fn flatten_into(row: &mut FlatRecord, prefix: Option<&str>, fields: &Map<String, Value>) {
    for (key, value) in fields {
        let column = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(row, Some(&column), nested),
            leaf => {
                row.insert(column, leaf.clone());
            }
        }
    }
}

/// Union of column names across `rows`, in first-seen order
pub fn column_union(rows: &[FlatRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    rows.iter()
        .flat_map(|row| row.keys())
        .filter(|column| seen.insert(column.as_str()))
        .cloned()
        .collect()
}

/// Renders a leaf as CSV cell text
///
/// Strings verbatim, `null` empty, everything else as compact JSON.
pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Projects a flat row onto `columns`; missing columns render empty
pub fn project(row: &FlatRecord, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .map(|column| row.get(column).map(render_cell).unwrap_or_default())
        .collect()
}
