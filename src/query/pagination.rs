//! Pagination window

use serde::{Deserialize, Serialize};

/// Offset/limit window applied after filtering and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Records to drop from the front of the sorted match set
    pub skip: u64,
    /// Maximum records to return
    pub limit: u64,
}

impl Pagination {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Apply the hard ceiling; oversized limits are clamped, never rejected.
    pub fn clamped(mut self, max_limit: u64) -> Self {
        if self.limit > max_limit {
            self.limit = max_limit;
        }
        self
    }
}
