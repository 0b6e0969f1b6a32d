//! Typed query representation
//!
//! The validated, immutable form a raw parameter map is parsed into before
//! execution.

pub mod filter;
pub mod ordering;
pub mod pagination;
pub mod spec;


pub use filter::{FilterCondition, FilterOperator};
pub use ordering::{SortKey, SortOrder};
pub use pagination::Pagination;
pub use spec::QuerySpec;
