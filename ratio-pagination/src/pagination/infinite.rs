//! Forward-only (infinite) pagination.

use super::page::InfinitePage;
use super::{InfinitePaginationParams, Paginator};
use crate::error::PaginationError;
use crate::order::SortDir;
use crate::store::RecordStore;

pub(super) fn paginate<S: RecordStore>(
    paginator: &Paginator<'_, S>,
    params: &InfinitePaginationParams<S::Stage>,
) -> Result<InfinitePage<S::Record>, PaginationError<S::Error>> {
    let dir = SortDir::from_ascending(params.params.sort_ascending);
    let page = paginator.fetch("infinite", &params.params, params.next.as_ref(), dir)?;

    Ok(InfinitePage {
        next: if page.has_more() { page.last_cursor() } else { None },
        results: page.into_rows(),
    })
}
