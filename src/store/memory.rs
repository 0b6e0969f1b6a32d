//! In-memory record store
//!
//! Insertion-ordered tables keyed by entity name; relations are resolved by
//! matching the relation's join field against the parent key. Intended for
//! tests, demos and small data sets.

use crate::errors::QueryhausError;
use crate::schema::RelationSchema;
use crate::store::{Record, RecordStore};
use crate::value::FieldValue;
use async_trait::async_trait;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the named entity's table
    pub fn insert(&mut self, entity: &str, record: Record) {
        self.tables.entry(entity.to_string()).or_default().push(record);
    }

    /// Append many records at once
    pub fn insert_all(&mut self, entity: &str, records: impl IntoIterator<Item = Record>) {
        self.tables
            .entry(entity.to_string())
            .or_default()
            .extend(records);
    }

    pub fn len(&self, entity: &str) -> usize {
        self.tables.get(entity).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, entity: &str) -> bool {
        self.len(entity) == 0
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_all(&self, entity: &str) -> Result<Vec<Record>, QueryhausError> {
        Ok(self.tables.get(entity).cloned().unwrap_or_default())
    }

    async fn fetch_related(
        &self,
        relation: &RelationSchema,
        parent_key: &FieldValue,
    ) -> Result<Vec<Record>, QueryhausError> {
        if parent_key.is_null() {
            return Ok(Vec::new());
        }

        let rows = self.tables.get(&relation.target.name);
        Ok(rows
            .map(|rows| {
                rows.iter()
                    .filter(|r| r.get(&relation.join_field) == parent_key)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
