//! Key-path extraction from JSON response bodies
//!
//! Responses wrap their record list at different depths (`data.items` for
//! the v3 endpoints, `items` for the directory API). A [`JsonPath`] names that
//! location and [`extract`] walks it, failing with a typed
//! [`ExtractionError`] instead of falling back to a default.

use crate::domain::ExtractionError;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One step of a [`JsonPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathKey {
    /// Object member
    Field(String),
    /// Array element
    Index(usize),
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKey::Field(name) => f.write_str(name),
            PathKey::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathKey {
    fn from(name: &str) -> Self {
        PathKey::Field(name.to_string())
    }
}

impl From<String> for PathKey {
    fn from(name: String) -> Self {
        PathKey::Field(name)
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        PathKey::Index(index)
    }
}

/// Ordered sequence of keys locating a value inside a body
///
/// # Examples
///
/// ```
/// use lucca_export::core::extract::{extract, JsonPath};
/// use serde_json::json;
///
/// let body = json!({"data": {"items": [{"id": 1}]}});
/// let path: JsonPath = "data.items".parse().unwrap();
/// assert_eq!(extract(&body, &path).unwrap(), &json!([{"id": 1}]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<PathKey>);

impl JsonPath {
    /// Empty path, addressing the whole body
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds a path from keys
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<PathKey>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Keys in traversal order
    pub fn keys(&self) -> &[PathKey] {
        &self.0
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl FromStr for JsonPath {
    type Err = String;

    /// Parses a dotted path; all-digit segments become array indices
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "$" {
            return Ok(Self::root());
        }

        s.split('.')
            .map(|segment| {
                if segment.is_empty() {
                    Err(format!("Empty segment in path '{s}'"))
                } else if segment.bytes().all(|b| b.is_ascii_digit()) {
                    segment
                        .parse()
                        .map(PathKey::Index)
                        .map_err(|e| format!("Invalid index '{segment}': {e}"))
                } else {
                    Ok(PathKey::Field(segment.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// JSON type name used in error messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn wrong_shape(key: &PathKey, depth: usize, value: &Value) -> ExtractionError {
    ExtractionError::WrongShape {
        key: key.to_string(),
        depth,
        found: type_name(value),
    }
}

fn not_found(key: &PathKey, depth: usize) -> ExtractionError {
    ExtractionError::NotFound {
        key: key.to_string(),
        depth,
    }
}

/// Returns the value at `path` inside `body`
///
/// An empty path returns `body` itself.
///
/// # Errors
///
/// [`ExtractionError::NotFound`] when an object lacks the field or an array is
/// too short, [`ExtractionError::WrongShape`] when the value cannot be indexed
/// by the key at all.
pub fn extract<'a>(body: &'a Value, path: &JsonPath) -> Result<&'a Value, ExtractionError> {
    path.keys()
        .iter()
        .enumerate()
        .try_fold(body, |current, (depth, key)| match (key, current) {
            (PathKey::Field(name), Value::Object(map)) => {
                map.get(name).ok_or_else(|| not_found(key, depth))
            }
            (PathKey::Index(index), Value::Array(items)) => {
                items.get(*index).ok_or_else(|| not_found(key, depth))
            }
            (key, other) => Err(wrong_shape(key, depth, other)),
        })
}

/// Like [`extract`], but moves the value out of `body`
pub fn extract_owned(body: Value, path: &JsonPath) -> Result<Value, ExtractionError> {
    let mut current = body;
    for (depth, key) in path.keys().iter().enumerate() {
        current = match (key, current) {
            (PathKey::Field(name), Value::Object(mut map)) => map
                .remove(name.as_str())
                .ok_or_else(|| not_found(key, depth))?,
            (PathKey::Index(index), Value::Array(mut items)) => {
                if *index >= items.len() {
                    return Err(not_found(key, depth));
                }
                items.swap_remove(*index)
            }
            (key, other) => return Err(wrong_shape(key, depth, &other)),
        };
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Rebuilds a body holding `value` at `path` (field keys only)
    fn wrap(path: &JsonPath, value: Value) -> Value {
        path.keys().iter().rev().fold(value, |inner, key| match key {
            PathKey::Field(name) => {
                let mut map = serde_json::Map::new();
                map.insert(name.clone(), inner);
                Value::Object(map)
            }
            PathKey::Index(_) => json!([inner]),
        })
    }

    #[test]
    fn test_empty_path_returns_body() {
        let body = json!({"items": [1, 2]});
        assert_eq!(extract(&body, &JsonPath::root()).unwrap(), &body);
        assert_eq!(extract_owned(body.clone(), &JsonPath::root()).unwrap(), body);
    }

    #[test]
    fn test_extract_nested_items() {
        let body = json!({"data": {"items": [{"id": 1}, {"id": 2}]}});
        let path = JsonPath::new(["data", "items"]);
        assert_eq!(
            extract(&body, &path).unwrap(),
            &json!([{"id": 1}, {"id": 2}])
        );
        assert_eq!(
            extract_owned(body, &path).unwrap(),
            json!([{"id": 1}, {"id": 2}])
        );
    }

    #[test]
    fn test_extract_array_index() {
        let body = json!({"items": [{"id": 7}, {"id": 8}]});
        let path = JsonPath::new([PathKey::from("items"), PathKey::Index(1), "id".into()]);
        assert_eq!(extract(&body, &path).unwrap(), &json!(8));
        assert_eq!(extract_owned(body, &path).unwrap(), json!(8));
    }

    #[test]
    fn test_round_trip_over_depths() {
        let leaf = json!([{"id": 1, "name": "Finance"}]);
        let keys = ["a", "b", "c", "d", "e"];
        for depth in 0..=keys.len() {
            let path = JsonPath::new(keys[..depth].iter().copied());
            let body = wrap(&path, leaf.clone());
            assert_eq!(extract(&body, &path).unwrap(), &leaf, "depth {depth}");
            assert_eq!(wrap(&path, extract(&body, &path).unwrap().clone()), body);
        }
    }

    #[test]
    fn test_missing_key_at_each_depth() {
        let keys = ["a", "b", "c"];
        let path = JsonPath::new(keys);
        for missing in 0..keys.len() {
            let mut present = keys.to_vec();
            present[missing] = "other";
            let body = wrap(&JsonPath::new(present), json!([]));

            let expected = ExtractionError::NotFound {
                key: keys[missing].to_string(),
                depth: missing,
            };
            assert_eq!(extract(&body, &path).unwrap_err(), expected);
            assert_eq!(extract_owned(body, &path).unwrap_err(), expected);
        }
    }

    #[test]
    fn test_wrong_shape() {
        let body = json!({"data": "maintenance"});
        let path = JsonPath::new(["data", "items"]);
        assert_eq!(
            extract(&body, &path).unwrap_err(),
            ExtractionError::WrongShape {
                key: "items".to_string(),
                depth: 1,
                found: "a string",
            }
        );

        let body = json!([1, 2]);
        assert!(matches!(
            extract(&body, &JsonPath::new(["items"])),
            Err(ExtractionError::WrongShape { .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let body = json!([1]);
        let path = JsonPath::new([3usize]);
        assert!(matches!(
            extract(&body, &path),
            Err(ExtractionError::NotFound { depth: 0, .. })
        ));
    }

    #[test]
    fn test_parse_and_display() {
        let path: JsonPath = "data.items".parse().unwrap();
        assert_eq!(path, JsonPath::new(["data", "items"]));
        assert_eq!(path.to_string(), "data.items");

        let indexed: JsonPath = "items.0.id".parse().unwrap();
        assert_eq!(indexed.keys()[1], PathKey::Index(0));

        assert!("".parse::<JsonPath>().unwrap().is_empty());
        assert_eq!(JsonPath::root().to_string(), "$");
        assert!("data..items".parse::<JsonPath>().is_err());
    }
}
