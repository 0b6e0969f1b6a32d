//! Runtime scalar values
//!
//! This module provides the typed runtime value used for record fields,
//! filter literals and sort keys, plus conversion from query-string literals.

use crate::schema::FieldType;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scalar value carried by records and filter literals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Boolean(bool),
    Null,
}

impl FieldValue {
    /// Parse a query-string literal into a value of the given type.
    ///
    /// Returns `None` when the literal is not convertible; the caller attaches
    /// the offending key and reports a type mismatch.
    pub fn parse(raw: &str, field_type: FieldType) -> Option<Self> {
        match field_type {
            FieldType::String => Some(Self::Text(raw.to_string())),
            FieldType::Integer => raw.parse::<i64>().ok().map(Self::Integer),
            FieldType::Float => raw.parse::<f64>().ok().map(Self::Float),
            FieldType::Boolean => match raw.to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(Self::Boolean(true)),
                "false" | "0" | "no" => Some(Self::Boolean(false)),
                _ => None,
            },
            FieldType::DateTime => parse_timestamp(raw).map(Self::Timestamp),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compare two values of the same variant.
    ///
    /// Returns `None` across variants or when either side is null; a null
    /// never satisfies an ordering comparison.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// The text payload, when this value is a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Date literals accept calendar-date or full timestamp form; a bare calendar
/// date means the start-of-day instant.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Convert basic Rust types to FieldValue
impl From<String> for FieldValue {
    fn from(val: String) -> Self {
        FieldValue::Text(val)
    }
}

impl From<&str> for FieldValue {
    fn from(val: &str) -> Self {
        FieldValue::Text(val.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(val: i64) -> Self {
        FieldValue::Integer(val)
    }
}

impl From<i32> for FieldValue {
    fn from(val: i32) -> Self {
        FieldValue::Integer(val as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(val: f64) -> Self {
        FieldValue::Float(val)
    }
}

impl From<bool> for FieldValue {
    fn from(val: bool) -> Self {
        FieldValue::Boolean(val)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(val: NaiveDateTime) -> Self {
        FieldValue::Timestamp(val)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(
            FieldValue::parse("42", FieldType::Integer),
            Some(FieldValue::Integer(42))
        );
        assert_eq!(FieldValue::parse("forty-two", FieldType::Integer), None);
        assert_eq!(FieldValue::parse("4.2", FieldType::Integer), None);
    }

    #[test]
    fn test_parse_boolean_forms() {
        for raw in ["true", "True", "1", "yes", "YES"] {
            assert_eq!(
                FieldValue::parse(raw, FieldType::Boolean),
                Some(FieldValue::Boolean(true)),
                "literal {raw:?}"
            );
        }
        for raw in ["false", "0", "no", "No"] {
            assert_eq!(
                FieldValue::parse(raw, FieldType::Boolean),
                Some(FieldValue::Boolean(false)),
                "literal {raw:?}"
            );
        }
        assert_eq!(FieldValue::parse("maybe", FieldType::Boolean), None);
    }

    #[test]
    fn test_parse_dates() {
        let start_of_day = FieldValue::parse("2024-03-01", FieldType::DateTime).unwrap();
        let explicit = FieldValue::parse("2024-03-01T00:00:00", FieldType::DateTime).unwrap();
        assert_eq!(start_of_day, explicit);

        let later = FieldValue::parse("2024-03-01T09:30:00", FieldType::DateTime).unwrap();
        assert_eq!(start_of_day.compare(&later), Some(Ordering::Less));

        assert_eq!(FieldValue::parse("01/03/2024", FieldType::DateTime), None);
    }

    #[test]
    fn test_compare_across_variants() {
        assert_eq!(
            FieldValue::Integer(1).compare(&FieldValue::Text("1".into())),
            None
        );
        assert_eq!(FieldValue::Null.compare(&FieldValue::Null), None);
        assert_eq!(
            FieldValue::Integer(5).compare(&FieldValue::Null),
            None
        );
    }

    #[test]
    fn test_float_total_ordering() {
        assert_eq!(
            FieldValue::Float(1.5).compare(&FieldValue::Float(2.0)),
            Some(Ordering::Less)
        );
        // NaN is ordered, not poisonous
        assert!(FieldValue::Float(f64::NAN)
            .compare(&FieldValue::Float(0.0))
            .is_some());
    }

    #[test]
    fn test_from_option() {
        let v: FieldValue = Option::<i64>::None.into();
        assert!(v.is_null());
        let v: FieldValue = Some("street").into();
        assert_eq!(v, FieldValue::Text("street".into()));
    }
}
