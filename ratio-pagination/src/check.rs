//! Accuracy checks over a full pagination walk.
//!
//! [`round_trip`] walks forward to the last page, then back along the
//! `previous` cursors, and expects every page to come back identical.
//! [`strategies_agree`] walks table (next-only) and infinite pagination side
//! by side and expects the same pages and cursors. Pages are compared by
//! primary key.

use crate::error::PaginationError;
use crate::pagination::{
    Cursor, InfinitePaginationParams, PaginationParams, Paginator, TablePage,
    TablePaginationParams,
};
use crate::record::Record;
use crate::store::RecordStore;
use crate::value::Value;
use serde::Serialize;

/// A page whose contents differ between two walks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct PageMismatch {
    /// Zero-based page index.
    pub page: usize,
    /// Primary keys seen on the reference walk.
    pub expected: Vec<Value>,
    /// Primary keys seen on the checked walk.
    pub actual: Vec<Value>,
}

/// Outcome of a check.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Pages on the reference walk.
    pub pages: usize,
    /// Records on the reference walk.
    pub records: usize,
    /// Pages that did not match.
    pub mismatches: Vec<PageMismatch>,
}

impl CheckReport {
    /// Returns `true` if every page matched.
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }

    fn compare(&mut self, page: usize, expected: &[Value], actual: Vec<Value>) {
        if expected != actual.as_slice() {
            self.mismatches.push(PageMismatch {
                page,
                expected: expected.to_vec(),
                actual,
            });
        }
    }
}

fn keys<R: Record>(results: &[R]) -> Vec<Value> {
    results.iter().map(|r| r.primary_key().clone()).collect()
}

fn table_request<T: Clone>(
    params: &PaginationParams<T>,
    next: Option<Cursor>,
    previous: Option<Cursor>,
) -> TablePaginationParams<T> {
    TablePaginationParams {
        next,
        previous,
        params: params.clone(),
    }
}

/// Walk forward through every table page, then back via `previous`.
pub fn round_trip<S>(
    paginator: &Paginator<'_, S>,
    params: &PaginationParams<S::Stage>,
) -> Result<CheckReport, PaginationError<S::Error>>
where
    S: RecordStore,
    S::Stage: Clone,
{
    let mut forward: Vec<TablePage<S::Record>> = Vec::new();
    let mut next = None;
    loop {
        let page = paginator.table(&table_request(params, next, None))?;
        next = page.next.clone();
        forward.push(page);
        if next.is_none() {
            break;
        }
    }

    let forward_keys: Vec<Vec<Value>> = forward.iter().map(|p| keys(&p.results)).collect();
    let mut report = CheckReport {
        pages: forward.len(),
        records: forward_keys.iter().map(Vec::len).sum(),
        mismatches: Vec::new(),
    };

    let mut previous = forward.last().and_then(|p| p.previous.clone());
    for (index, expected) in forward_keys.iter().enumerate().rev().skip(1) {
        let Some(cursor) = previous.take() else {
            report.compare(index, expected, Vec::new());
            continue;
        };
        let page = paginator.table(&table_request(params, None, Some(cursor)))?;
        report.compare(index, expected, keys(&page.results));
        previous = page.previous;
    }

    log::debug!(
        "round trip: {} pages, {} records, {} mismatches",
        report.pages,
        report.records,
        report.mismatches.len()
    );
    Ok(report)
}

/// Walk table (next-only) and infinite pagination in lockstep.
pub fn strategies_agree<S>(
    paginator: &Paginator<'_, S>,
    params: &PaginationParams<S::Stage>,
) -> Result<CheckReport, PaginationError<S::Error>>
where
    S: RecordStore,
    S::Stage: Clone,
{
    let mut report = CheckReport::default();
    let mut table_next = None;
    let mut infinite_next = None;

    loop {
        let table = paginator.table(&table_request(params, table_next, None))?;
        let infinite = paginator.infinite(&InfinitePaginationParams {
            next: infinite_next,
            params: params.clone(),
        })?;

        let expected = keys(&table.results);
        report.records += expected.len();
        report.compare(report.pages, &expected, keys(&infinite.results));
        report.pages += 1;

        if table.next != infinite.next {
            log::warn!(
                "page {}: table next {:?} differs from infinite next {:?}",
                report.pages - 1,
                table.next,
                infinite.next
            );
            if report.mismatches.last().is_none_or(|m| m.page != report.pages - 1) {
                report.mismatches.push(PageMismatch {
                    page: report.pages - 1,
                    expected: table.next.into_iter().map(Cursor::into_key).collect(),
                    actual: infinite.next.into_iter().map(Cursor::into_key).collect(),
                });
            }
            break;
        }

        match table.next {
            Some(cursor) => {
                infinite_next = Some(cursor.clone());
                table_next = Some(cursor);
            },
            None => break,
        }
    }

    log::debug!(
        "strategy agreement: {} pages, {} records, {} mismatches",
        report.pages,
        report.records,
        report.mismatches.len()
    );
    Ok(report)
}
