//! Entity schema and filter path resolution

use crate::schema::{Cardinality, FieldSchema, FieldType, RelationSchema};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome of walking a `__`-separated filter path against a schema
#[derive(Debug)]
pub struct ResolvedPath<'a> {
    /// Relations traversed, outermost first (empty for main-entity fields)
    pub relations: Vec<&'a RelationSchema>,
    /// Terminal field
    pub field: &'a FieldSchema,
}

/// Why a path failed to resolve; the parameter parser attaches the raw key.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PathError {
    /// Segment names neither a field nor a relation of the current entity
    Unknown { segment: String },
    /// A field was reached with segments left over
    Trailing { segment: String, is_last: bool },
    /// More relation hops than the configured bound
    TooDeep,
}

/// Runtime description of one entity: ordered fields plus named relations.
///
/// Invariant: field names and relation names are disjoint within one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
    pub relations: HashMap<String, RelationSchema>,
    /// Primary key field, used as the stable sort fallback and join anchor
    pub key_field: String,
}

impl EntitySchema {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
            relations: HashMap::new(),
            key_field: "id".to_string(),
        }
    }

    pub fn with_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(FieldSchema::new(name, field_type));
        self
    }

    pub fn with_searchable_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(FieldSchema::new(name, field_type).searchable());
        self
    }

    pub fn with_relation(
        mut self,
        name: &str,
        target: EntitySchema,
        cardinality: Cardinality,
        join_field: &str,
    ) -> Self {
        self.relations.insert(
            name.to_string(),
            RelationSchema::new(name, target, cardinality, join_field),
        );
        self
    }

    pub fn with_key_field(mut self, name: &str) -> Self {
        self.key_field = name.to_string();
        self
    }

    /// Look up a direct field by name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a direct relation by name
    pub fn relation(&self, name: &str) -> Option<&RelationSchema> {
        self.relations.get(name)
    }

    /// String fields participating in full-text search
    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields
            .iter()
            .filter(|f| f.searchable && f.field_type == FieldType::String)
    }

    /// Walk path segments: every segment but the last must name a relation,
    /// the last must name a field on the entity reached.
    pub(crate) fn resolve_path<'a>(
        &'a self,
        segments: &[&str],
        max_depth: usize,
    ) -> Result<ResolvedPath<'a>, PathError> {
        let mut entity = self;
        let mut relations = Vec::new();

        for (i, segment) in segments.iter().enumerate() {
            let is_last = i == segments.len() - 1;

            if let Some(field) = entity.field(segment) {
                if is_last {
                    return Ok(ResolvedPath { relations, field });
                }
                // a field consumed mid-path: the next segment is stray
                return Err(PathError::Trailing {
                    segment: segments[i + 1].to_string(),
                    is_last: i + 2 == segments.len(),
                });
            }

            match entity.relation(segment) {
                Some(relation) if !is_last => {
                    if relations.len() >= max_depth {
                        return Err(PathError::TooDeep);
                    }
                    relations.push(relation);
                    entity = &relation.target;
                }
                _ => {
                    return Err(PathError::Unknown {
                        segment: (*segment).to_string(),
                    });
                }
            }
        }

        // unreachable for non-empty segment lists; empty paths are stray keys
        Err(PathError::Unknown {
            segment: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_schema() -> EntitySchema {
        let address = EntitySchema::new("addresses")
            .with_field("id", FieldType::Integer)
            .with_field("street", FieldType::String)
            .with_field("city", FieldType::String);

        EntitySchema::new("persons")
            .with_field("id", FieldType::Integer)
            .with_searchable_field("name", FieldType::String)
            .with_field("age", FieldType::Integer)
            .with_relation("addresses", address, Cardinality::Many, "person_id")
    }

    #[test]
    fn test_resolve_direct_field() {
        let schema = person_schema();
        let resolved = schema.resolve_path(&["age"], 2).unwrap();
        assert!(resolved.relations.is_empty());
        assert_eq!(resolved.field.name, "age");
        assert_eq!(resolved.field.field_type, FieldType::Integer);
    }

    #[test]
    fn test_resolve_relation_field() {
        let schema = person_schema();
        let resolved = schema.resolve_path(&["addresses", "city"], 2).unwrap();
        assert_eq!(resolved.relations.len(), 1);
        assert_eq!(resolved.relations[0].name, "addresses");
        assert_eq!(resolved.field.name, "city");
    }

    #[test]
    fn test_unknown_segment() {
        let schema = person_schema();
        let err = schema.resolve_path(&["salary"], 2).unwrap_err();
        assert_eq!(
            err,
            PathError::Unknown {
                segment: "salary".to_string()
            }
        );

        let err = schema.resolve_path(&["addresses", "country"], 2).unwrap_err();
        assert_eq!(
            err,
            PathError::Unknown {
                segment: "country".to_string()
            }
        );
    }

    #[test]
    fn test_trailing_after_field() {
        let schema = person_schema();
        let err = schema.resolve_path(&["age", "gt2"], 2).unwrap_err();
        assert_eq!(
            err,
            PathError::Trailing {
                segment: "gt2".to_string(),
                is_last: true
            }
        );
    }

    #[test]
    fn test_depth_bound() {
        // persons -> addresses -> (fake) persons chain, three hops deep
        let deep = EntitySchema::new("a").with_relation(
            "b",
            EntitySchema::new("b").with_relation(
                "c",
                EntitySchema::new("c").with_relation(
                    "d",
                    EntitySchema::new("d").with_field("x", FieldType::Integer),
                    Cardinality::Many,
                    "c_id",
                ),
                Cardinality::Many,
                "b_id",
            ),
            Cardinality::Many,
            "a_id",
        );

        assert_eq!(
            deep.resolve_path(&["b", "c", "d", "x"], 2).unwrap_err(),
            PathError::TooDeep
        );
        assert!(deep.resolve_path(&["b", "c", "d", "x"], 3).is_ok());
    }

    #[test]
    fn test_searchable_fields() {
        let schema = person_schema();
        let names: Vec<_> = schema.searchable_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name"]);
    }
}
