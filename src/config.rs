//! Resolver configuration
//!
//! Centralized tunables for query resolution. Deserializable so applications
//! can load them from a `[resolver]` section of their TOML configuration.
//!
//! ```toml
//! [resolver]
//! default_limit = 100
//! max_limit = 1000
//! max_relation_depth = 2
//! ```

use serde::Deserialize;

/// Hard ceiling on page size; larger requested limits are clamped, not rejected.
pub const MAX_LIMIT: u64 = 1000;

/// Page size used when the request carries no `limit` parameter.
pub const DEFAULT_LIMIT: u64 = 100;

/// Relation traversal depth bound for filter paths.
pub const DEFAULT_MAX_RELATION_DEPTH: usize = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Page size when `limit` is absent
    pub default_limit: u64,
    /// Ceiling applied to any requested `limit`
    pub max_limit: u64,
    /// Maximum number of relation hops allowed in a filter path
    pub max_relation_depth: usize,
}

impl ResolverConfig {
    pub fn new(default_limit: u64, max_limit: u64, max_relation_depth: usize) -> Self {
        Self {
            default_limit,
            max_limit,
            max_relation_depth,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            max_relation_depth: DEFAULT_MAX_RELATION_DEPTH,
        }
    }
}
