//! Shared fixtures for integration tests.

#![allow(dead_code)]

use ratio_pagination::store::Query;
use ratio_pagination::{
    Document, MemoryStage, MemoryStore, PaginationParams, Paginator, Record, RecordStore,
    TablePaginationParams, Value, compare_on,
};
use std::fmt;

/// Ratings in the canonical walk: two absent, two null, then 1 and 2.
pub fn rated_store() -> MemoryStore {
    MemoryStore::from_documents([
        Document::new(1),
        Document::new(2),
        Document::new(3).with_null("rating"),
        Document::new(4).with_null("rating"),
        Document::new(5).with("rating", 1),
        Document::new(6).with("rating", 2),
    ])
}

/// Reviews across three users with duplicate and missing ratings.
pub fn review_store() -> MemoryStore {
    MemoryStore::from_json(
        r#"[
            {"_id": 1, "user_id": "miguel", "rating": 5, "created_at": 100},
            {"_id": 2, "user_id": "ana", "rating": 3, "created_at": 101},
            {"_id": 3, "user_id": "miguel", "rating": null, "created_at": 102},
            {"_id": 4, "user_id": "miguel", "created_at": 103},
            {"_id": 5, "user_id": "joao", "rating": 5, "created_at": 104},
            {"_id": 6, "user_id": "miguel", "rating": 3, "created_at": 105},
            {"_id": 7, "user_id": "ana", "rating": 4, "created_at": 106},
            {"_id": 8, "user_id": "miguel", "rating": 5, "created_at": 107},
            {"_id": 9, "user_id": "joao", "created_at": 108},
            {"_id": 10, "user_id": "miguel", "rating": 1, "created_at": 109}
        ]"#,
    )
    .unwrap()
}

pub fn ids<R: Record>(records: &[R]) -> Vec<Value> {
    records.iter().map(|r| r.primary_key().clone()).collect()
}

pub fn int_ids(ids: &[i64]) -> Vec<Value> {
    ids.iter().copied().map(Value::Int).collect()
}

/// Every page of a forward table walk, as primary keys.
pub fn walk_forward(
    paginator: &Paginator<'_, MemoryStore>,
    params: &PaginationParams<MemoryStage>,
) -> Vec<Vec<Value>> {
    let mut pages = Vec::new();
    let mut next = None;
    loop {
        let page = paginator
            .table(&TablePaginationParams {
                next,
                previous: None,
                params: params.clone(),
            })
            .unwrap();
        pages.push(ids(&page.results));
        match page.next {
            Some(cursor) => next = Some(cursor),
            None => return pages,
        }
    }
}

/// Offset-based oracle: sort everything in memory and chunk.
pub fn oracle_pages(
    store_docs: &[Document],
    params: &PaginationParams<MemoryStage>,
) -> Vec<Vec<Value>> {
    let mut docs: Vec<&Document> = store_docs
        .iter()
        .filter(|doc| params.filter.matches(*doc))
        .collect();
    let dir = ratio_pagination::SortDir::from_ascending(params.sort_ascending);
    docs.sort_by(|a, b| dir.apply(compare_on(&params.paginated_field, *a, *b)));

    let limit = params.limit.unwrap_or(20) as usize;
    let keys: Vec<Value> = docs.iter().map(|d| d.id.clone()).collect();
    if keys.is_empty() {
        return vec![Vec::new()];
    }
    keys.chunks(limit).map(<[Value]>::to_vec).collect()
}

/// Error returned by [`FailingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDown;

impl fmt::Display for StoreDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("store is down")
    }
}

impl std::error::Error for StoreDown {}

/// Wraps a [`MemoryStore`] and fails lookups and/or queries on demand.
#[derive(Debug)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_lookups: bool,
    pub fail_queries: bool,
}

impl RecordStore for FailingStore {
    type Record = Document;
    type Stage = MemoryStage;
    type Error = StoreDown;

    fn find_by_id(&self, id: &Value) -> Result<Option<Document>, StoreDown> {
        if self.fail_lookups {
            return Err(StoreDown);
        }
        Ok(self.inner.find_by_id(id).unwrap_or_else(|never| match never {}))
    }

    fn query(&self, query: &Query<'_, MemoryStage>) -> Result<Vec<Document>, StoreDown> {
        if self.fail_queries {
            return Err(StoreDown);
        }
        Ok(self.inner.query(query).unwrap_or_else(|never| match never {}))
    }
}
