//! Record values and the flat record they live in.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALUE
// ============================================================================

/// One primitive value held by a record field.
///
/// Deserializes untagged: JSON `null` is [`Value::Null`], numbers are
/// [`Value::Number`], `YYYY-MM-DD` strings are [`Value::Date`] and every
/// other string is [`Value::Text`] (including the empty string).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// A number, integral or not.
    Number(f64),
    /// A calendar day.
    Date(NaiveDate),
    /// Free text, possibly empty.
    Text(String),
}

impl Value {
    /// Returns the string form used by the required check.
    ///
    /// `Null` has an empty string form. Integral numbers print without a
    /// fractional part.
    pub fn form_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Date(date) => Cow::Owned(date.to_string()),
        }
    }

    /// Returns `true` when the trimmed string form is empty.
    pub fn is_blank(&self) -> bool {
        self.form_text().trim().is_empty()
    }

    /// Interprets the value as a calendar day.
    ///
    /// Text is parsed as `YYYY-MM-DD` after trimming. Numbers and `Null`
    /// are not dates.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Null | Self::Number(_) => None,
        }
    }

    /// Interprets the value as a number. Text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Null | Self::Date(_) => None,
        }
    }

    /// Returns the text if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.form_text())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A flat, ordered `key → value` mapping representing one item being
/// created or edited.
///
/// The validator only ever reads a record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Removes a field, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Returns the string form of a field; missing fields are empty.
    pub fn text(&self, key: &str) -> Cow<'_, str> {
        self.get(key).map_or(Cow::Borrowed(""), Value::form_text)
    }

    /// Returns `true` if the record has a field named `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
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

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Value::Null, "")]
    #[case(Value::from(""), "")]
    #[case(Value::from("  Drama "), "  Drama ")]
    #[case(Value::from(3), "3")]
    #[case(Value::from(0), "0")]
    #[case(Value::from(12.5), "12.5")]
    #[case(Value::from(day(2018, 5, 14)), "2018-05-14")]
    fn form_text(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.form_text(), expected);
    }

    #[rstest]
    #[case(Value::Null, true)]
    #[case(Value::from(""), true)]
    #[case(Value::from(" \t\n"), true)]
    #[case(Value::from("x"), false)]
    #[case(Value::from(0), false)]
    fn blankness(#[case] value: Value, #[case] blank: bool) {
        assert_eq!(value.is_blank(), blank);
    }

    #[test]
    fn as_date_parses_text() {
        assert_eq!(Value::from(" 2020-06-10 ").as_date(), Some(day(2020, 6, 10)));
        assert_eq!(Value::from("June").as_date(), None);
        assert_eq!(Value::from(20_200_610).as_date(), None);
        assert_eq!(Value::Null.as_date(), None);
    }

    #[test]
    fn deserializes_untagged() {
        let record: Record = serde_json::from_str(
            r#"{"Name":"Tech Patterns","ReleaseDate":"2020-06-10","AvailableQuantity":7,"Genre":"","ID":null}"#,
        )
        .unwrap();

        assert_eq!(record.get("Name"), Some(&Value::from("Tech Patterns")));
        assert_eq!(record.get("ReleaseDate"), Some(&Value::Date(day(2020, 6, 10))));
        assert_eq!(record.get("AvailableQuantity"), Some(&Value::Number(7.0)));
        assert_eq!(record.get("Genre"), Some(&Value::from("")));
        assert_eq!(record.get("ID"), Some(&Value::Null));
        let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["Name", "ReleaseDate", "AvailableQuantity", "Genre", "ID"]);
    }

    #[test]
    fn record_macro_and_missing_keys() {
        let record = record! {
            "Name" => "X",
            "ReleaseDate" => None::<NaiveDate>,
        };
        assert_eq!(record.text("Name"), "X");
        assert_eq!(record.text("Author"), "");
        assert_eq!(record.get("ReleaseDate"), Some(&Value::Null));
        assert_eq!(record.len(), 2);
    }
}
