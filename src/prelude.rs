//! Convenience re-exports for common queryhaus usage

// Schema building
pub use crate::schema::{Cardinality, EntitySchema, FieldSchema, FieldType, RelationSchema};

// Query representation
pub use crate::query::{FilterCondition, FilterOperator, Pagination, QuerySpec, SortKey, SortOrder};

// Parsing and execution
pub use crate::config::ResolverConfig;
pub use crate::params::parse_params;
pub use crate::resolver::{QueryResolver, ResultPage};

// Records and stores
pub use crate::store::{MemoryStore, Record, RecordStore};
pub use crate::value::FieldValue;

// Error types
pub use crate::errors::QueryhausError;

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use chrono::NaiveDateTime;
