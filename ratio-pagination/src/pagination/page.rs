//! Page assembly: lookahead trimming, order correction, and page results.

use super::cursor::Cursor;
use crate::record::Record;
use serde::Serialize;

/// Rows fetched with one lookahead row, trimmed to the page size.
#[derive(Debug)]
pub(crate) struct Lookahead<R> {
    rows: Vec<R>,
    has_more: bool,
}

impl<R: Record> Lookahead<R> {
    /// Trim `rows` (fetched with `limit + 1`) to `limit`, remembering whether
    /// the lookahead row was present.
    pub(crate) fn split(mut rows: Vec<R>, limit: usize) -> Self {
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        Self { rows, has_more }
    }

    /// Whether rows exist beyond this page in the scan direction.
    pub(crate) const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Number of rows kept.
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// Restore logical order after an inverted scan.
    pub(crate) fn reverse(&mut self) {
        self.rows.reverse();
    }

    /// Cursor of the first row, if any.
    pub(crate) fn first_cursor(&self) -> Option<Cursor> {
        self.rows.first().map(Cursor::of)
    }

    /// Cursor of the last row, if any.
    pub(crate) fn last_cursor(&self) -> Option<Cursor> {
        self.rows.last().map(Cursor::of)
    }

    pub(crate) fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

/// A page of bidirectional (table) pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct TablePage<R> {
    /// Cursor for the page before this one.
    pub previous: Option<Cursor>,
    /// Cursor for the page after this one.
    pub next: Option<Cursor>,
    /// Records, in the caller's logical order.
    pub results: Vec<R>,
}

impl<R> TablePage<R> {
    /// Whether a following page exists.
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether a preceding page exists.
    pub const fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// A page of forward-only (infinite) pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct InfinitePage<R> {
    /// Cursor for the page after this one.
    pub next: Option<Cursor>,
    /// Records, in the caller's logical order.
    pub results: Vec<R>,
}

impl<R> InfinitePage<R> {
    /// Whether a following page exists.
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
