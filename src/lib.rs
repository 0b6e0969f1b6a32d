//! # Queryhaus
//!
//! A schema-driven query-string resolver: translate flat HTTP query parameters
//! (filtering, relation traversal, sorting, pagination, full-text search) into
//! a typed query specification, evaluate it against a pluggable record store,
//! and return a deterministic page of records plus the total match count.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use queryhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let address = EntitySchema::new("addresses")
//!         .with_field("street", FieldType::String)
//!         .with_field("city", FieldType::String);
//!
//!     let person = EntitySchema::new("persons")
//!         .with_searchable_field("name", FieldType::String)
//!         .with_field("age", FieldType::Integer)
//!         .with_field("created_at", FieldType::DateTime)
//!         .with_relation("addresses", address, Cardinality::Many, "person_id");
//!
//!     let mut store = MemoryStore::new();
//!     store.insert("persons", Record::new()
//!         .with("id", 1i64)
//!         .with("name", "John")
//!         .with("age", 25i64));
//!
//!     let config = ResolverConfig::default();
//!     let params = vec![
//!         ("name__ilike".to_string(), "%john%".to_string()),
//!         ("sort".to_string(), "-age".to_string()),
//!     ];
//!
//!     let spec = parse_params(&params, &person, &config)?;
//!     let page = QueryResolver::new(person).resolve(&spec, &store).await?;
//!     println!("matched {} of {}", page.records.len(), page.total);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod config;
pub mod errors;
pub mod params;
pub mod prelude;
pub mod query;
pub mod resolver;
pub mod schema;
pub mod store;
pub mod value;

// Re-export the main public types for convenience
pub use config::ResolverConfig;
pub use errors::QueryhausError;
pub use params::parse_params;
pub use query::{FilterCondition, FilterOperator, Pagination, QuerySpec, SortKey, SortOrder};
pub use resolver::{QueryResolver, ResultPage};
pub use schema::{Cardinality, EntitySchema, FieldSchema, FieldType, RelationSchema};
pub use store::{MemoryStore, Record, RecordStore};
pub use value::FieldValue;

// Re-export external dependencies used in public API
pub use async_trait;
pub use chrono;
