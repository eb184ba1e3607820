// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Field names in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::match_same_arms)] // Predicate expansions read clearer case by case
#![allow(clippy::cast_possible_truncation)] // u32 page limits widen to usize
#![cfg_attr(test, allow(clippy::indexing_slicing))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! # ratio-pagination - Cursor Pagination over Any Record Store
//!
//! Table (bidirectional) and infinite (forward-only) cursor pagination over
//! an injected [`RecordStore`]. Records are ordered by a paginated field and
//! tie-broken by primary key, with missing fields sorting before null and
//! null before any value. Cursors are the primary keys of boundary records.
//!
//! ## Quick Start
//!
//! ```
//! # use ratio_pagination::prelude::*;
//! let store = MemoryStore::from_documents([
//!     Document::new(1).with("rating", 4),
//!     Document::new(2).with("rating", 5),
//!     Document::new(3),
//!     Document::new(4).with("rating", 5),
//! ]);
//!
//! let params = InfinitePaginationParams::default().limit(2).on("rating");
//! let page = Paginator::new(&store).infinite(&params).unwrap();
//!
//! // Descending: rating 5 (ties by primary key, descending), then 4, then absent.
//! let ids: Vec<_> = page.results.iter().map(|d| d.id.clone()).collect();
//! assert_eq!(ids, vec![Value::Int(4), Value::Int(2)]);
//! assert_eq!(page.next, Some(Cursor::new(2)));
//! ```
//!
//! ## Filters
//!
//! Callers restrict a pagination with a [`Predicate`], built directly or
//! parsed from a Mongo-style match document:
//!
//! ```
//! # use ratio_pagination::prelude::*;
//! let filter = parse_match(r#"{"user_id": "miguel", "rating": {"$gte": 3}}"#, "_id").unwrap();
//! let doc = Document::new(1).with("user_id", "miguel").with("rating", 4);
//! assert!(filter.matches(&doc));
//! ```
//!
//! ## Store Adapters
//!
//! A [`RecordStore`] receives one [`Query`](store::Query) per page: a
//! predicate, a [`SortSpec`], a limit, and opaque post-processing stages.
//! [`Predicate::to_mongo`] and [`SortSpec::to_mongo`] render the first two
//! for document databases.

pub mod check;
mod config;
mod error;
mod order;
mod pagination;
pub mod predicate;
mod record;
mod sort;
pub mod store;
mod validate;
mod value;

pub use config::{ConfigError, PaginationConfig};
pub use error::PaginationError;
pub use order::{Category, SortDir, compare_field_values, compare_on, physical_direction};
pub use pagination::{
    Boundary, BoundaryValue, Cursor, CursorError, InfinitePage, InfinitePaginationParams,
    PaginationParams, Paginator, TablePage, TablePaginationParams, cursor_predicate,
    infinite_pagination, table_pagination,
};
pub use predicate::{
    Comparison, CompoundPredicate, LogicalOp, Operator, ParseError, Predicate, absent, and,
    compare, exists, is_null, not, null_or_absent, or, parse_match, present,
};
pub use record::{Document, Field, FieldValue, Record};
pub use sort::{SortKey, SortSpec};
pub use store::{MemoryStage, MemoryStore, RecordStore};
pub use validate::is_valid_field_name;
pub use value::Value;

/// Prelude module for convenient imports.
///
/// ```
/// use ratio_pagination::prelude::*;
///
/// let store = MemoryStore::new();
/// let page = table_pagination(&TablePaginationParams::default().limit(10), &store).unwrap();
/// assert!(page.results.is_empty());
/// ```
pub mod prelude {
    pub use crate::{
        Cursor, Document, Field, InfinitePage, InfinitePaginationParams, MemoryStage,
        MemoryStore, Operator, PaginationConfig, PaginationError, PaginationParams, Paginator,
        Predicate, Record, RecordStore, SortDir, TablePage, TablePaginationParams, Value, and,
        compare, infinite_pagination, not, or, parse_match, table_pagination,
    };
}
