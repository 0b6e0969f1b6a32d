//! Filter conditions
//!
//! A condition targets a path (relation hops plus a terminal field), carries
//! one of the six supported operators and a typed literal, and knows how to
//! evaluate itself against a field value.

use crate::schema::RelationSchema;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Supported filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Eq,
    ILike,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl FilterOperator {
    /// Operator for a `__`-suffix token, if the token is a known operator
    pub fn from_suffix(token: &str) -> Option<Self> {
        match token {
            "ilike" => Some(Self::ILike),
            "gt" => Some(Self::Gt),
            "lt" => Some(Self::Lt),
            "gte" => Some(Self::Gte),
            "lte" => Some(Self::Lte),
            _ => None,
        }
    }
}

/// Single filter condition in a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Relation names followed by a terminal field name
    pub path: Vec<String>,
    pub operator: FilterOperator,
    pub value: FieldValue,
    /// Relation schemas resolved at parse time, one per hop in `path`.
    /// Execution traverses these directly, so it cannot diverge from the
    /// schema the condition was validated against.
    pub relations: Vec<RelationSchema>,
}

impl FilterCondition {
    pub fn new(path: Vec<String>, operator: FilterOperator, value: FieldValue) -> Self {
        Self {
            path,
            operator,
            value,
            relations: Vec::new(),
        }
    }

    /// Attach the relation schemas resolved for this condition's path
    pub fn with_relations(mut self, relations: Vec<RelationSchema>) -> Self {
        self.relations = relations;
        self
    }

    /// Relation hops preceding the terminal field
    pub fn relation_path(&self) -> &[String] {
        &self.path[..self.path.len().saturating_sub(1)]
    }

    /// Terminal field name
    pub fn field_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Equal condition on a direct field
    pub fn eq(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::new(vec![field.to_string()], FilterOperator::Eq, value.into())
    }

    /// ILIKE condition (case insensitive, `%` wildcard) on a direct field
    pub fn ilike(field: &str, pattern: &str) -> Self {
        Self::new(
            vec![field.to_string()],
            FilterOperator::ILike,
            FieldValue::Text(pattern.to_string()),
        )
    }

    /// Greater than condition on a direct field
    pub fn gt(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::new(vec![field.to_string()], FilterOperator::Gt, value.into())
    }

    /// Less than condition on a direct field
    pub fn lt(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::new(vec![field.to_string()], FilterOperator::Lt, value.into())
    }

    /// Greater than or equal condition on a direct field
    pub fn gte(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::new(vec![field.to_string()], FilterOperator::Gte, value.into())
    }

    /// Less than or equal condition on a direct field
    pub fn lte(field: &str, value: impl Into<FieldValue>) -> Self {
        Self::new(vec![field.to_string()], FilterOperator::Lte, value.into())
    }

    /// Evaluate this condition's operator against the actual field value.
    ///
    /// Null or missing values never satisfy any operator.
    pub fn matches(&self, actual: &FieldValue) -> bool {
        if actual.is_null() {
            return false;
        }

        match self.operator {
            FilterOperator::Eq => *actual == self.value,
            FilterOperator::ILike => match (actual.as_text(), self.value.as_text()) {
                (Some(text), Some(pattern)) => ilike_match(pattern, text),
                _ => false,
            },
            FilterOperator::Gt => matches!(actual.compare(&self.value), Some(Ordering::Greater)),
            FilterOperator::Lt => matches!(actual.compare(&self.value), Some(Ordering::Less)),
            FilterOperator::Gte => matches!(
                actual.compare(&self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOperator::Lte => matches!(
                actual.compare(&self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

/// Case-insensitive pattern match where `%` matches any substring.
///
/// A pattern without `%` must match the whole text; everything except `%` is
/// literal.
pub(crate) fn ilike_match(pattern: &str, text: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let text = text.to_lowercase();

    let mut parts = pattern.split('%');
    // split always yields at least one part
    let first = parts.next().unwrap_or("");
    if !text.starts_with(first) {
        return false;
    }
    let mut pos = first.len();

    let mut middle: Vec<&str> = parts.collect();
    let Some(last) = middle.pop() else {
        // no wildcard: exact match
        return pos == text.len();
    };

    for part in middle {
        if part.is_empty() {
            continue;
        }
        match text[pos..].find(part) {
            Some(idx) => pos += idx + part.len(),
            None => return false,
        }
    }

    text[pos..].len() >= last.len() && text[pos..].ends_with(last)
}
