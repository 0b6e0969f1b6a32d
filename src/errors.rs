//! Error types for query resolution
//!
//! All parse-time failures carry the offending query key so the HTTP layer
//! can map them to a 4xx response with a useful message.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryhausError {
    #[error("Unknown path in '{key}': segment '{segment}' does not name a field or relation")]
    UnknownPath { key: String, segment: String },

    #[error("Type mismatch in '{key}': value '{value}' is not a valid {expected}")]
    TypeMismatch {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("Unsupported operator in '{key}': '{token}' is not one of ilike, gt, lt, gte, lte")]
    UnsupportedOperator { key: String, token: String },

    #[error("Relation path in '{key}' exceeds the maximum depth of {max_depth}")]
    RelationDepthExceeded { key: String, max_depth: usize },

    #[error("Record store error: {0}")]
    Store(String),
}
