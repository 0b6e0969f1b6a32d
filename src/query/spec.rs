//! Query specification

use crate::query::{FilterCondition, Pagination, SortKey};
use serde::{Deserialize, Serialize};

/// Fully parsed, validated query: AND-combined filters, multi-key sort,
/// pagination window and optional full-text search.
///
/// Built fresh per request and immutable afterwards; execution never mutates
/// it, so concurrent resolutions can share one by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub filters: Vec<FilterCondition>,
    pub sort: Vec<SortKey>,
    pub pagination: Pagination,
    pub search: Option<String>,
}

impl QuerySpec {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            filters: Vec::new(),
            sort: Vec::new(),
            pagination,
            search: None,
        }
    }

    /// Add a filter condition (AND-combined with the rest)
    pub fn filter(mut self, condition: FilterCondition) -> Self {
        self.filters.push(condition);
        self
    }

    /// Add a sort key
    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Set the full-text search term
    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }
}
