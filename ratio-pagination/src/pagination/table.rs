//! Bidirectional (table) pagination.
//!
//! A backward request (`previous` set) scans in the inverted physical
//! direction from its cursor and reverses the fetched rows, so every page is
//! returned in the caller's logical order.

use super::page::TablePage;
use super::{Paginator, TablePaginationParams};
use crate::error::PaginationError;
use crate::order::physical_direction;
use crate::store::RecordStore;

pub(super) fn paginate<S: RecordStore>(
    paginator: &Paginator<'_, S>,
    params: &TablePaginationParams<S::Stage>,
) -> Result<TablePage<S::Record>, PaginationError<S::Error>> {
    let (cursor, backward) = match (&params.next, &params.previous) {
        (Some(_), Some(_)) => return Err(PaginationError::ConflictingCursors),
        (Some(next), None) => (Some(next), false),
        (None, Some(previous)) => (Some(previous), true),
        (None, None) => (None, false),
    };
    let dir = physical_direction(params.params.sort_ascending, backward);

    let mut page = paginator.fetch("table", &params.params, cursor, dir)?;
    if backward {
        page.reverse();
    }

    let has_previous = params.next.is_some() || (backward && page.has_more());
    let has_next = params.previous.is_some() || page.has_more();

    Ok(TablePage {
        previous: if has_previous { page.first_cursor() } else { None },
        next: if has_next { page.last_cursor() } else { None },
        results: page.into_rows(),
    })
}
