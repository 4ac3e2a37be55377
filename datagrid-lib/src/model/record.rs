//! Dynamic row record and row identity

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Unique identifier of a table row.
///
/// Selection is tracked by `RowId`, so it must be stable across re-sorts and
/// re-fetches of the same data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Numeric identifier.
    Int(i64),
    /// Textual identifier (including structural fallbacks).
    Text(String),
}

impl RowId {
    /// Derives an identifier from an `id` field value.
    ///
    /// Returns `None` for null so callers can fall back to structural identity.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Int(n) => Some(RowId::Int(*n)),
            Value::Float(n) if is_exact_i64(*n) => Some(RowId::Int(*n as i64)),
            Value::String(s) => Some(RowId::Text(s.clone())),
            other => Some(RowId::Text(other.coerce_string())),
        }
    }

    /// Structural identity: the JSON serialization of the whole row.
    ///
    /// Two structurally equal rows get the same identifier. This is a known
    /// collision risk for data without an `id` field, not something the table
    /// tries to repair.
    pub fn structural<S: Serialize + ?Sized>(row: &S) -> Self {
        RowId::Text(serde_json::to_string(row).unwrap_or_default())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for RowId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => RowId::Int(n),
            Err(_) => RowId::Text(s.to_string()),
        })
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId::Int(v)
    }
}

impl From<i32> for RowId {
    fn from(v: i32) -> Self {
        RowId::Int(v.into())
    }
}

impl From<&str> for RowId {
    fn from(v: &str) -> Self {
        RowId::Text(v.to_string())
    }
}

impl From<String> for RowId {
    fn from(v: String) -> Self {
        RowId::Text(v)
    }
}

/// Trait for items that can be displayed as rows in a table.
///
/// Any column key resolves to a value or to nothing. Implement this for your
/// own row structs, or use [`Record`] for loosely typed JSON data.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{RowId, TableRow, Value};
///
/// #[derive(Clone)]
/// struct Post {
///     id: i64,
///     title: String,
/// }
///
/// impl TableRow for Post {
///     fn field(&self, key: &str) -> Option<Value> {
///         match key {
///             "id" => Some(Value::from(self.id)),
///             "title" => Some(Value::from(self.title.as_str())),
///             _ => None,
///         }
///     }
///
///     fn row_id(&self) -> RowId {
///         RowId::Int(self.id)
///     }
/// }
/// ```
pub trait TableRow {
    /// Value of the given column key, if the row has one.
    fn field(&self, key: &str) -> Option<Value>;

    /// Unique identifier for this row.
    fn row_id(&self) -> RowId;
}

/// A loosely typed row: a map from column key to [`Value`].
///
/// Fields are kept in key order so the structural identity fallback is
/// deterministic.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Record, RowId, TableRow};
///
/// let with_id = Record::new().set("id", 7).set("name", "Contoso");
/// assert_eq!(with_id.row_id(), RowId::Int(7));
///
/// let without_id = Record::new().set("name", "Contoso");
/// assert_eq!(without_id.row_id(), RowId::from(r#"{"name":"Contoso"}"#));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value (builder style).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Inserts a field value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates over the field keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TableRow for Record {
    fn field(&self, key: &str) -> Option<Value> {
        self.fields.get(key).cloned()
    }

    fn row_id(&self) -> RowId {
        self.get("id")
            .and_then(RowId::from_value)
            .unwrap_or_else(|| RowId::structural(self))
    }
}

/// Integral and inside the `i64` range, so `as i64` does not saturate.
fn is_exact_i64(n: f64) -> bool {
    // i64::MAX rounds up to 2^63 as f64, hence the strict upper bound
    n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_prefers_id_field() {
        assert_eq!(Record::new().set("id", 3).row_id(), RowId::Int(3));
        assert_eq!(
            Record::new().set("id", "abc").row_id(),
            RowId::Text("abc".to_string())
        );
        assert_eq!(Record::new().set("id", 4.0).row_id(), RowId::Int(4));
    }

    #[test]
    fn test_float_ids_outside_i64_stay_distinct() {
        assert_eq!(RowId::from_value(&Value::Float(42.0)), Some(RowId::Int(42)));
        assert_eq!(RowId::from_value(&Value::Float(-9.2e18)), Some(RowId::Int(-9_200_000_000_000_000_000)));

        let a = RowId::from_value(&Value::Float(1e19));
        let b = RowId::from_value(&Value::Float(2e19));
        assert_eq!(a, Some(RowId::Text("10000000000000000000".into())));
        assert_eq!(b, Some(RowId::Text("20000000000000000000".into())));
        assert_ne!(a, b);
        assert_eq!(RowId::from_value(&Value::Float(f64::INFINITY)), Some(RowId::Text("Infinity".into())));
        assert_eq!(RowId::from_value(&Value::Float(1.5)), Some(RowId::Text("1.5".into())));
    }

    #[test]
    fn test_row_id_null_falls_back_to_structure() {
        let record = Record::new().set("id", Value::Null).set("v", 1);
        assert_eq!(record.row_id(), RowId::from(r#"{"id":null,"v":1}"#));
    }

    #[test]
    fn test_structural_ids_collide_for_equal_rows() {
        let a = Record::new().set("name", "x");
        let b = Record::new().set("name", "x");
        assert_eq!(a.row_id(), b.row_id());
    }

    #[test]
    fn test_deserialize_record() {
        let record: Record = serde_json::from_str(r#"{"id": 1, "title": "Hello"}"#).unwrap();
        assert_eq!(record.field("title"), Some(Value::from("Hello")));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_row_id_from_str() {
        assert_eq!("12".parse::<RowId>().unwrap(), RowId::Int(12));
        assert_eq!("ab".parse::<RowId>().unwrap(), RowId::from("ab"));
    }
}
