//! Sort direction, sort state and value comparison.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns `"asc"` or `"desc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Which column the table is sorted by, and in which direction.
///
/// The direction only means something while a key is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    key: Option<String>,
    direction: Direction,
}

impl SortState {
    /// Creates a sort state, typically from table options.
    pub fn new(key: Option<String>, direction: Direction) -> Self {
        Self { key, direction }
    }

    /// The active sort key, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction if the table is sorted by `key`.
    pub fn direction_for(&self, key: &str) -> Option<Direction> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }

    /// Toggle sort for a key.
    ///
    /// If the key is already active, flips the direction.
    /// A different key becomes active in ascending order.
    /// Returns the new direction.
    pub fn toggle(&mut self, key: &str) -> Direction {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key.to_string());
            self.direction = Direction::Asc;
        }
        self.direction
    }

    /// Clears the sort key.
    pub fn clear(&mut self) {
        self.key = None;
    }
}

/// Precomputed ascending sort keys for one column.
///
/// The column is classified once. When every non-null value is a number the
/// keys compare numerically, with nulls and then missing values after the
/// numbers. Any other column compares the string coercion of each value
/// (`None` becomes `"undefined"`) with [`locale_compare`]. Either way the
/// whole column sorts under one total order.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKeys {
    Numeric(Vec<NumericKey>),
    Text(Vec<String>),
}

/// A numeric column entry: numbers first, then nulls, then missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericKey {
    Number(f64),
    Null,
    Missing,
}

impl NumericKey {
    fn rank(self) -> u8 {
        match self {
            NumericKey::Number(_) => 0,
            NumericKey::Null => 1,
            NumericKey::Missing => 2,
        }
    }

    fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (NumericKey::Number(a), NumericKey::Number(b)) => a.total_cmp(&b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl SortKeys {
    /// Classifies a column of field values.
    pub fn from_column(values: &[Option<Value>]) -> Self {
        let numeric = values
            .iter()
            .flatten()
            .filter(|value| !value.is_null())
            .all(Value::is_numeric);

        if numeric {
            let keys = values
                .iter()
                .map(|value| match value {
                    None => NumericKey::Missing,
                    Some(Value::Null) => NumericKey::Null,
                    Some(value) => NumericKey::Number(value.as_f64().unwrap_or(f64::NAN)),
                })
                .collect();
            SortKeys::Numeric(keys)
        } else {
            SortKeys::Text(values.iter().map(|value| coerce(value.as_ref())).collect())
        }
    }

    /// Compares the keys at two row indices in ascending order.
    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        match self {
            SortKeys::Numeric(keys) => keys[a].compare(keys[b]),
            SortKeys::Text(keys) => locale_compare(&keys[a], &keys[b]),
        }
    }

    /// Returns `true` if the column is compared numerically.
    pub fn is_numeric(&self) -> bool {
        matches!(self, SortKeys::Numeric(_))
    }
}

fn coerce(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), Value::coerce_string)
}

/// Locale-aware string comparison.
///
/// Approximates root collation: whitespace sorts before punctuation, which
/// sorts before digits, which sort before letters. Letters compare without
/// case first; on a tie lowercase sorts before uppercase. Digits compare
/// character by character, so `"10" < "9"`.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(primary_key).cmp(b.chars().map(primary_key));
    primary
        .then_with(|| case_compare(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_key(c: char) -> (u8, char) {
    let class = if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    };
    (class, c.to_lowercase().next().unwrap_or(c))
}

fn case_compare(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_key_flips() {
        let mut sort = SortState::default();
        assert_eq!(sort.toggle("name"), Direction::Asc);
        assert_eq!(sort.toggle("name"), Direction::Desc);
        assert_eq!(sort.toggle("name"), Direction::Asc);
    }

    #[test]
    fn test_toggle_new_key_resets() {
        let mut sort = SortState::new(Some("name".into()), Direction::Desc);
        assert_eq!(sort.toggle("age"), Direction::Asc);
        assert_eq!(sort.key(), Some("age"));
    }

    #[test]
    fn test_locale_compare_digits_as_text() {
        assert_eq!(locale_compare("10", "9"), Ordering::Less);
    }

    #[test]
    fn test_locale_compare_case() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_classes() {
        assert_eq!(locale_compare("_x", "1"), Ordering::Less);
        assert_eq!(locale_compare("9", "a"), Ordering::Less);
        assert_eq!(locale_compare(" ", "-"), Ordering::Less);
        assert_eq!(locale_compare("ab", "abc"), Ordering::Less);
    }

    fn column(values: &[Option<Value>]) -> SortKeys {
        SortKeys::from_column(values)
    }

    #[test]
    fn test_numeric_column_compares_numbers() {
        let keys = column(&[Some(Value::Int(10)), Some(Value::Float(9.5))]);
        assert!(keys.is_numeric());
        assert_eq!(keys.compare(0, 1), Ordering::Greater);
        assert_eq!(keys.compare(1, 1), Ordering::Equal);
    }

    #[test]
    fn test_numeric_column_puts_null_and_missing_last() {
        let keys = column(&[None, Some(Value::Null), Some(Value::Int(-3))]);
        assert!(keys.is_numeric());
        assert_eq!(keys.compare(2, 1), Ordering::Less);
        assert_eq!(keys.compare(1, 0), Ordering::Less);
    }

    #[test]
    fn test_mixed_column_coerces() {
        // "10" vs "9" as strings
        let keys = column(&[Some(Value::Int(10)), Some(Value::from("9")), None, Some(Value::Null)]);
        assert!(!keys.is_numeric());
        assert_eq!(keys.compare(0, 1), Ordering::Less);
        // "undefined" vs "null"
        assert_eq!(keys.compare(2, 3), Ordering::Greater);
    }

    #[test]
    fn test_mixed_column_is_transitive() {
        // numerically 10 > 9.5, but as text "10" < "9" < "9.5"
        let keys = column(&[Some(Value::Int(10)), Some(Value::Float(9.5)), Some(Value::from("9"))]);
        assert_eq!(keys.compare(0, 2), Ordering::Less);
        assert_eq!(keys.compare(2, 1), Ordering::Less);
        assert_eq!(keys.compare(0, 1), Ordering::Less);
    }

    #[test]
    fn test_equal_values_ignore_direction() {
        let keys = column(&[Some(Value::from("x")), Some(Value::from("x"))]);
        assert_eq!(Direction::Desc.apply(keys.compare(0, 1)), Ordering::Equal);
    }
}
