//! Relation descriptors

use crate::schema::EntitySchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    One,
    Many,
}

/// Named link from a parent entity to a related entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSchema {
    pub name: String,
    pub target: EntitySchema,
    pub cardinality: Cardinality,
    /// Field on the target entity holding the parent's key
    pub join_field: String,
}

impl RelationSchema {
    pub fn new(name: &str, target: EntitySchema, cardinality: Cardinality, join_field: &str) -> Self {
        Self {
            name: name.to_string(),
            target,
            cardinality,
            join_field: join_field.to_string(),
        }
    }
}
