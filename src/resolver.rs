//! Query execution
//!
//! Evaluates a [`QuerySpec`] against a [`RecordStore`]: AND-combined filters
//! with semi-join relation traversal, OR-combined search over searchable
//! fields, stable multi-key sort, then count-and-slice pagination.

use crate::errors::QueryhausError;
use crate::query::{FilterCondition, QuerySpec, SortKey, SortOrder};
use crate::schema::{EntitySchema, RelationSchema};
use crate::store::{Record, RecordStore};
use crate::value::FieldValue;
use serde::Serialize;
use std::cmp::Ordering;
use std::future::Future;
use std::pin::Pin;

/// One page of results plus the pre-pagination match count
#[derive(Debug, Clone, Serialize)]
pub struct ResultPage {
    pub records: Vec<Record>,
    /// Matches before `skip`/`limit` were applied
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// Executes validated query specs against a record store.
///
/// Holds only the main entity's schema; resolution is a pure computation over
/// the store's data, so one resolver can serve concurrent queries.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    schema: EntitySchema,
}

impl QueryResolver {
    pub fn new(schema: EntitySchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Resolve a query: fetch, filter, sort, count, then slice the page.
    pub async fn resolve(
        &self,
        spec: &QuerySpec,
        store: &dyn RecordStore,
    ) -> Result<ResultPage, QueryhausError> {
        let records = store.fetch_all(&self.schema.name).await?;

        let mut matched = Vec::with_capacity(records.len());
        'records: for record in records {
            for condition in &spec.filters {
                if !self
                    .condition_matches(&self.schema.key_field, &record, &condition.relations, condition, store)
                    .await?
                {
                    continue 'records;
                }
            }

            if let Some(term) = &spec.search
                && !self.search_matches(&record, term)
            {
                continue;
            }

            matched.push(record);
        }

        sort_records(&mut matched, &spec.sort);

        let total = matched.len() as u64;
        let skip = spec.pagination.skip;
        let limit = spec.pagination.limit;
        let page = matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect::<Vec<_>>();

        crate::debug_log!(
            entity = %self.schema.name,
            total,
            returned = page.len(),
            "resolved query"
        );

        Ok(ResultPage {
            records: page,
            total,
            skip,
            limit,
        })
    }

    /// Evaluate one condition against a record, traversing the relation
    /// schemas resolved at parse time with existence semantics: any
    /// satisfying related record makes the parent match, and a parent with
    /// no related records never matches.
    fn condition_matches<'a>(
        &'a self,
        parent_key_field: &'a str,
        record: &'a Record,
        relations: &'a [RelationSchema],
        condition: &'a FilterCondition,
        store: &'a dyn RecordStore,
    ) -> Pin<Box<dyn Future<Output = Result<bool, QueryhausError>> + Send + 'a>> {
        Box::pin(async move {
            let Some((relation, rest)) = relations.split_first() else {
                return Ok(condition.matches(record.get(condition.field_name())));
            };

            let parent_key = record.get(parent_key_field);
            let related = store.fetch_related(relation, parent_key).await?;

            for related_record in &related {
                if self
                    .condition_matches(&relation.target.key_field, related_record, rest, condition, store)
                    .await?
                {
                    return Ok(true);
                }
            }

            Ok(false)
        })
    }

    /// Case-insensitive substring match, OR-ed across searchable fields.
    /// With no searchable fields a non-empty term matches nothing.
    fn search_matches(&self, record: &Record, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.schema.searchable_fields().any(|field| {
            record
                .get(&field.name)
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }
}

/// Stable multi-key sort; equal keys keep the store's order, which makes
/// repeated pagination deterministic.
fn sort_records(records: &mut [Record], sort: &[SortKey]) {
    if sort.is_empty() {
        return;
    }

    records.sort_by(|a, b| {
        for key in sort {
            let ordering = compare_for_sort(a.get(&key.field), b.get(&key.field));
            let ordering = match key.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Nulls (and type-mismatched values) sort last under ascending order.
fn compare_for_sort(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.compare(b).unwrap_or(Ordering::Equal),
    }
}
