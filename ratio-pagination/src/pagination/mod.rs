//! Cursor pagination over a [`RecordStore`].
//!
//! # Strategies
//!
//! | Strategy     | Directions         | Cursors emitted      | Use Case               |
//! |--------------|--------------------|----------------------|------------------------|
//! | **Table**    | forward + backward | `previous` and `next`| Tables with Prev/Next  |
//! | **Infinite** | forward only       | `next`               | Feeds, infinite scroll |
//!
//! Both order records by `(category, value, primary key)` on the paginated
//! field, where the category of a missing field sorts before null, and null
//! before any present value. Every call costs at most one point lookup (to
//! resolve the cursor) and exactly one fetch of `limit + 1` rows.
//!
//! # Example
//!
//! ```
//! use ratio_pagination::{Document, MemoryStore, Paginator, TablePaginationParams};
//!
//! let store = MemoryStore::from_documents((1..=5).map(|id| Document::new(id).with("rating", id % 3)));
//! let paginator = Paginator::new(&store);
//!
//! let first = paginator.table(&TablePaginationParams::default().limit(2).on("rating")).unwrap();
//! assert_eq!(first.results.len(), 2);
//! assert!(first.previous.is_none());
//!
//! let second = paginator
//!     .table(&TablePaginationParams::default().limit(2).on("rating").next(first.next.unwrap()))
//!     .unwrap();
//! let back = paginator
//!     .table(&TablePaginationParams::default().limit(2).on("rating").previous(second.previous.unwrap()))
//!     .unwrap();
//! assert_eq!(back.results, first.results);
//! ```

mod cursor;
mod infinite;
mod keyset;
mod page;
mod table;

pub use cursor::{Cursor, CursorError};
pub use keyset::{Boundary, BoundaryValue, cursor_predicate};
pub use page::{InfinitePage, TablePage};

use crate::config::PaginationConfig;
use crate::error::PaginationError;
use crate::order::SortDir;
use crate::predicate::Predicate;
use crate::record::Field;
use crate::sort::SortSpec;
use crate::store::{Query, RecordStore};
use crate::validate::is_valid_field_name;
use cursor::resolve_boundary;
use page::Lookahead;
use std::fmt;

/// Parameters shared by both strategies.
///
/// `T` is the store's opaque stage type ([`RecordStore::Stage`]).
#[derive(Debug, Clone)]
#[allow(clippy::exhaustive_structs)] // request data, built with struct literals
pub struct PaginationParams<T> {
    /// Page size; `None` uses the configured default.
    pub limit: Option<u32>,
    /// Sort ascending on the paginated field (default descending).
    pub sort_ascending: bool,
    /// Field to order by (default primary key).
    pub paginated_field: Field,
    /// Caller's base predicate, ANDed with the cursor predicate.
    pub filter: Predicate,
    /// Post-processing stages, applied after the sorted and limited fetch.
    pub extra_stages: Vec<T>,
}

impl<T> Default for PaginationParams<T> {
    fn default() -> Self {
        Self {
            limit: None,
            sort_ascending: false,
            paginated_field: Field::PrimaryKey,
            filter: Predicate::match_all(),
            extra_stages: Vec::new(),
        }
    }
}

impl<T> PaginationParams<T> {
    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort ascending instead of descending.
    pub fn ascending(mut self) -> Self {
        self.sort_ascending = true;
        self
    }

    /// Set the sort direction.
    pub fn sort_ascending(mut self, ascending: bool) -> Self {
        self.sort_ascending = ascending;
        self
    }

    /// Paginate on a named field.
    pub fn on(mut self, field: impl Into<String>) -> Self {
        self.paginated_field = Field::named(field);
        self
    }

    /// Paginate on `field`.
    pub fn field(mut self, field: Field) -> Self {
        self.paginated_field = field;
        self
    }

    /// Restrict results to records matching `filter`.
    pub fn filter(mut self, filter: Predicate) -> Self {
        self.filter = filter;
        self
    }

    /// Append a post-processing stage.
    pub fn stage(mut self, stage: T) -> Self {
        self.extra_stages.push(stage);
        self
    }
}

/// Parameters for [`Paginator::table`].
#[derive(Debug, Clone)]
#[allow(clippy::exhaustive_structs)] // request data, built with struct literals
pub struct TablePaginationParams<T> {
    /// Fetch the page after this cursor.
    pub next: Option<Cursor>,
    /// Fetch the page before this cursor.
    pub previous: Option<Cursor>,
    /// Shared parameters.
    pub params: PaginationParams<T>,
}

impl<T> Default for TablePaginationParams<T> {
    fn default() -> Self {
        Self {
            next: None,
            previous: None,
            params: PaginationParams::default(),
        }
    }
}

impl<T> TablePaginationParams<T> {
    /// Wrap shared parameters, starting at the first page.
    pub const fn new(params: PaginationParams<T>) -> Self {
        Self {
            next: None,
            previous: None,
            params,
        }
    }

    /// Fetch the page after `cursor`.
    pub fn next(mut self, cursor: Cursor) -> Self {
        self.next = Some(cursor);
        self
    }

    /// Fetch the page before `cursor`.
    pub fn previous(mut self, cursor: Cursor) -> Self {
        self.previous = Some(cursor);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.params = self.params.limit(limit);
        self
    }

    /// Sort ascending instead of descending.
    pub fn ascending(mut self) -> Self {
        self.params = self.params.ascending();
        self
    }

    /// Paginate on a named field.
    pub fn on(mut self, field: impl Into<String>) -> Self {
        self.params = self.params.on(field);
        self
    }

    /// Restrict results to records matching `filter`.
    pub fn filter(mut self, filter: Predicate) -> Self {
        self.params = self.params.filter(filter);
        self
    }
}

/// Parameters for [`Paginator::infinite`].
#[derive(Debug, Clone)]
#[allow(clippy::exhaustive_structs)] // request data, built with struct literals
pub struct InfinitePaginationParams<T> {
    /// Fetch the page after this cursor.
    pub next: Option<Cursor>,
    /// Shared parameters.
    pub params: PaginationParams<T>,
}

impl<T> Default for InfinitePaginationParams<T> {
    fn default() -> Self {
        Self {
            next: None,
            params: PaginationParams::default(),
        }
    }
}

impl<T> InfinitePaginationParams<T> {
    /// Wrap shared parameters, starting at the first page.
    pub const fn new(params: PaginationParams<T>) -> Self {
        Self { next: None, params }
    }

    /// Fetch the page after `cursor`.
    pub fn next(mut self, cursor: Cursor) -> Self {
        self.next = Some(cursor);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.params = self.params.limit(limit);
        self
    }

    /// Sort ascending instead of descending.
    pub fn ascending(mut self) -> Self {
        self.params = self.params.ascending();
        self
    }

    /// Paginate on a named field.
    pub fn on(mut self, field: impl Into<String>) -> Self {
        self.params = self.params.on(field);
        self
    }

    /// Restrict results to records matching `filter`.
    pub fn filter(mut self, filter: Predicate) -> Self {
        self.params = self.params.filter(filter);
        self
    }
}

impl<T> From<InfinitePaginationParams<T>> for TablePaginationParams<T> {
    fn from(params: InfinitePaginationParams<T>) -> Self {
        Self {
            next: params.next,
            previous: None,
            params: params.params,
        }
    }
}

/// Runs pagination calls against a borrowed store.
///
/// Holds no mutable state: one paginator may serve concurrent callers when
/// the store is `Sync`.
pub struct Paginator<'s, S> {
    store: &'s S,
    config: PaginationConfig,
}

impl<S> fmt::Debug for Paginator<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S> Clone for Paginator<'_, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            config: self.config.clone(),
        }
    }
}

impl<'s, S: RecordStore> Paginator<'s, S> {
    /// Paginator with the default configuration.
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            config: PaginationConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PaginationConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub const fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// The underlying store.
    pub const fn store(&self) -> &'s S {
        self.store
    }

    /// Fetch one page in table mode.
    pub fn table(
        &self,
        params: &TablePaginationParams<S::Stage>,
    ) -> Result<TablePage<S::Record>, PaginationError<S::Error>> {
        table::paginate(self, params)
    }

    /// Fetch one page in infinite mode.
    pub fn infinite(
        &self,
        params: &InfinitePaginationParams<S::Stage>,
    ) -> Result<InfinitePage<S::Record>, PaginationError<S::Error>> {
        infinite::paginate(self, params)
    }

    fn check_limit(&self, limit: Option<u32>) -> Result<usize, PaginationError<S::Error>> {
        let limit = limit.unwrap_or(self.config.default_limit);
        if !self.config.accepts_limit(limit) {
            return Err(PaginationError::InvalidLimit {
                limit,
                max: self.config.max_limit,
            });
        }
        Ok(limit as usize)
    }

    fn resolve_field(&self, field: &Field) -> Result<Field, PaginationError<S::Error>> {
        match field {
            Field::PrimaryKey => Ok(Field::PrimaryKey),
            Field::Named(name) if *name == self.config.primary_key => Ok(Field::PrimaryKey),
            Field::Named(name) if !is_valid_field_name(name) => {
                Err(PaginationError::InvalidField(name.clone()))
            },
            Field::Named(_) => Ok(field.clone()),
        }
    }

    /// Validate, resolve the cursor, and run the single `limit + 1` fetch
    /// scanning in `dir`.
    fn fetch(
        &self,
        strategy: &'static str,
        params: &PaginationParams<S::Stage>,
        cursor: Option<&Cursor>,
        dir: SortDir,
    ) -> Result<Lookahead<S::Record>, PaginationError<S::Error>> {
        let limit = self.check_limit(params.limit)?;
        let field = self.resolve_field(&params.paginated_field)?;

        let cursor_filter = match cursor {
            Some(cursor) => {
                let boundary =
                    resolve_boundary(self.store, cursor, &field, self.config.verify_id_cursors)?;
                cursor_predicate(&field, &boundary, dir)
            },
            None => Predicate::match_all(),
        };
        let predicate = params.filter.clone().and_also(cursor_filter);
        let sort = SortSpec::for_field(&field, dir);
        let pk = self.config.primary_key.as_str();

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{strategy}: predicate {}", predicate.to_mongo(pk));
        }

        let rows = self
            .store
            .query(&Query {
                predicate: &predicate,
                sort: &sort,
                limit: limit.saturating_add(1),
                stages: &params.extra_stages,
            })
            .map_err(PaginationError::Store)?;

        let fetched = rows.len();
        let page = Lookahead::split(rows, limit);
        log::debug!(
            "{strategy}: field={} dir={dir:?} limit={limit} fetched={fetched} has_more={}",
            field.store_name(pk),
            page.has_more()
        );
        Ok(page)
    }
}

/// Table pagination with the default configuration.
pub fn table_pagination<S: RecordStore>(
    params: &TablePaginationParams<S::Stage>,
    store: &S,
) -> Result<TablePage<S::Record>, PaginationError<S::Error>> {
    Paginator::new(store).table(params)
}

/// Infinite pagination with the default configuration.
pub fn infinite_pagination<S: RecordStore>(
    params: &InfinitePaginationParams<S::Stage>,
    store: &S,
) -> Result<InfinitePage<S::Record>, PaginationError<S::Error>> {
    Paginator::new(store).infinite(params)
}
