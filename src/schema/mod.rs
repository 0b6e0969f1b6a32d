//! Entity schemas
//!
//! Runtime descriptions of an entity's fields and relations, used to validate
//! and type filter paths before any store access.

pub mod entity;
pub mod field;
pub mod relation;

pub use entity::{EntitySchema, ResolvedPath};
pub use field::{FieldSchema, FieldType};
pub use relation::{Cardinality, RelationSchema};
