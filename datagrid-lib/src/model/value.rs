//! Value enum for dynamic row fields

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by a row field.
///
/// Rows coming from a fetched JSON list carry loosely typed fields. `Value`
/// keeps the distinction the table engine cares about (strings, numbers,
/// everything else) and falls back to raw JSON for arrays and objects.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integral number | `Int` |
/// | other number | `Float` |
/// | string | `String` |
/// | array, object | `Json` |
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let revenue = Value::from(1_000_000i64);
/// let empty = Value::Null;
/// assert!(revenue.is_numeric());
/// assert!(empty.is_null());
/// assert_eq!(name.coerce_string(), "Contoso");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Arrays, objects and anything else the table treats opaquely.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Json(_) => "json",
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64` for `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Coerces the value to a string the way a dynamic `String(x)` would.
    ///
    /// Integral floats drop their fraction, arrays are joined with `,` and
    /// objects become `[object Object]`. Used by the mixed-type sort policy.
    pub fn coerce_string(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Json(json) => coerce_json(json),
        }
    }

    /// Text shown in a table cell: empty for null, otherwise the coerced string.
    pub fn display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.coerce_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

fn coerce_json(json: &serde_json::Value) -> String {
    match json {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => format_number(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => s.clone(),
        // Array join renders null elements as empty strings.
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::Null => String::new(),
                other => coerce_json(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        serde_json::Value::Object(_) => "[object Object]".to_string(),
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "x", [1, 2], {"a": 1}]"#).unwrap();
        let types: Vec<_> = values.iter().map(Value::type_name).collect();
        assert_eq!(
            types,
            vec!["null", "bool", "int", "float", "string", "json", "json"]
        );
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(Value::Null.coerce_string(), "null");
        assert_eq!(Value::Float(3.0).coerce_string(), "3");
        assert_eq!(Value::Float(2.5).coerce_string(), "2.5");
        assert_eq!(Value::Float(f64::NAN).coerce_string(), "NaN");
        assert_eq!(
            Value::from(serde_json::json!([1, null, "a"])).coerce_string(),
            "1,,a"
        );
        assert_eq!(
            Value::from(serde_json::json!({"a": 1})).coerce_string(),
            "[object Object]"
        );
    }

    #[test]
    fn test_display_string_hides_null() {
        assert_eq!(Value::Null.display_string(), "");
        assert_eq!(Value::Int(0).display_string(), "0");
        assert_eq!(Value::Bool(false).display_string(), "false");
    }

    #[test]
    fn test_from_json_number() {
        assert_eq!(Value::from(serde_json::json!(7)), Value::Int(7));
        assert_eq!(Value::from(serde_json::json!(7.5)), Value::Float(7.5));
    }
}
