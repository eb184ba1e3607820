//! The record store contract the engine paginates against.
//!
//! The engine never touches storage itself. A store answers two questions:
//! "which record has this primary key?" and "give me at most `limit` records
//! matching this predicate, in this order, post-processed by these stages".
//! Implement [`RecordStore`] once per entity type and hand it to a
//! [`Paginator`](crate::Paginator).

mod memory;

pub use memory::{MemoryStage, MemoryStore};

use crate::predicate::Predicate;
use crate::record::Record;
use crate::sort::SortSpec;
use crate::value::Value;

/// A single filtered, sorted, limited fetch.
#[derive(Debug)]
#[non_exhaustive]
pub struct Query<'a, T> {
    /// Records must satisfy this predicate.
    pub predicate: &'a Predicate,
    /// Order of the returned records.
    pub sort: &'a SortSpec,
    /// Maximum number of records to return.
    pub limit: usize,
    /// Post-processing applied after selection, ordering, and limiting.
    /// Stages must not change row count or order.
    pub stages: &'a [T],
}

/// A queryable collection of records.
pub trait RecordStore {
    /// Records held by the store.
    type Record: Record;
    /// Opaque post-processing stage (e.g. an aggregation `$addFields`).
    type Stage;
    /// Store failure, surfaced to callers unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Point lookup by primary key.
    fn find_by_id(&self, id: &Value) -> Result<Option<Self::Record>, Self::Error>;

    /// Execute a fetch: filter, sort, limit, then apply stages.
    fn query(&self, query: &Query<'_, Self::Stage>) -> Result<Vec<Self::Record>, Self::Error>;
}
