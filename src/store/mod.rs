//! Record store abstraction
//!
//! The resolver is storage-agnostic: it pulls records through the
//! [`RecordStore`] trait and evaluates predicates in-process. Stores may do
//! blocking or async I/O behind the trait; the resolver only awaits them.

pub mod memory;
pub mod record;

pub use memory::MemoryStore;
pub use record::Record;

use crate::errors::QueryhausError;
use crate::schema::RelationSchema;
use crate::value::FieldValue;
use async_trait::async_trait;

/// Data source for query resolution
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records of the named entity, in the store's stable iteration order.
    ///
    /// That order is the final sort tiebreaker, so it must be consistent
    /// across calls for pagination to be deterministic.
    async fn fetch_all(&self, entity: &str) -> Result<Vec<Record>, QueryhausError>;

    /// Records related to the parent identified by `parent_key`, following
    /// the given relation. An empty result is an answer, not an error.
    async fn fetch_related(
        &self,
        relation: &RelationSchema,
        parent_key: &FieldValue,
    ) -> Result<Vec<Record>, QueryhausError>;
}
