//! Pagination errors.

use crate::pagination::Cursor;
use thiserror::Error;

/// Errors returned by a pagination call.
///
/// Generic over the store's error type, which is carried unchanged in
/// [`PaginationError::Store`]. No partial page is ever returned with an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PaginationError<E> {
    /// The cursor does not reference an existing record.
    #[error("cursor {0} does not reference an existing record")]
    InvalidCursor(Cursor),

    /// The page limit is zero or above the configured maximum.
    #[error("page limit {limit} is out of range (1..={})", describe_max(.max))]
    InvalidLimit {
        /// Requested limit.
        limit: u32,
        /// Configured maximum, if any.
        max: Option<u32>,
    },

    /// The paginated field name cannot be used in a store query.
    #[error("invalid paginated field name {0:?}")]
    InvalidField(String),

    /// Both `next` and `previous` were supplied to table pagination.
    #[error("`next` and `previous` cursors are mutually exclusive")]
    ConflictingCursors,

    /// The record store failed.
    #[error("record store error")]
    Store(#[source] E),
}

fn describe_max(max: &Option<u32>) -> String {
    max.map_or_else(|| "unbounded".to_string(), |m| m.to_string())
}

impl<E> PaginationError<E> {
    /// Returns `true` for errors caused by the caller's parameters.
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        !self.is_store_error()
    }

    /// Returns `true` for [`PaginationError::Store`].
    #[inline]
    pub const fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
