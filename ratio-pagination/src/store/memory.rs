//! In-memory record store over [`Document`]s.

use super::{Query, RecordStore};
use crate::record::Document;
use crate::value::Value;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Post-processing stage understood by [`MemoryStore`].
#[derive(Clone)]
#[non_exhaustive]
pub enum MemoryStage {
    /// Set a field on every returned document.
    Set {
        /// Field name.
        field: String,
        /// Value to store.
        value: Value,
    },
    /// Remove a field from every returned document.
    Unset {
        /// Field name.
        field: String,
    },
    /// Arbitrary per-document transformation (derived counts, joins).
    Map(Arc<dyn Fn(&mut Document) + Send + Sync>),
}

impl MemoryStage {
    /// Build a [`MemoryStage::Map`] stage.
    pub fn map(f: impl Fn(&mut Document) + Send + Sync + 'static) -> Self {
        Self::Map(Arc::new(f))
    }

    fn apply(&self, doc: &mut Document) {
        match self {
            Self::Set { field, value } => doc.set(field.clone(), value.clone()),
            Self::Unset { field } => {
                doc.unset(field);
            },
            Self::Map(f) => f(doc),
        }
    }
}

impl fmt::Debug for MemoryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { field, value } => f
                .debug_struct("Set")
                .field("field", field)
                .field("value", value)
                .finish(),
            Self::Unset { field } => f.debug_struct("Unset").field("field", field).finish(),
            Self::Map(_) => f.write_str("Map(..)"),
        }
    }
}

/// A [`RecordStore`] holding documents in memory.
///
/// Evaluates predicates with [`Predicate::matches`](crate::Predicate::matches)
/// and orders with [`SortSpec::compare`](crate::SortSpec::compare). Counts
/// point lookups and queries so callers can observe round-trips.
///
/// Documents are flat, so a dotted field name such as `stats.likes` matches a
/// key spelled that way rather than a nested path. Store adapters that render
/// with [`Predicate::to_mongo`](crate::Predicate::to_mongo) resolve the same
/// name as a path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Vec<Document>,
    lookups: AtomicUsize,
    queries: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from documents. Later documents replace earlier ones
    /// with an equivalent primary key.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut store = Self::new();
        for doc in documents {
            store.insert(doc);
        }
        store
    }

    /// Load a store from a JSON array of documents.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let documents: Vec<Document> = serde_json::from_str(json)?;
        Ok(Self::from_documents(documents))
    }

    /// Insert or replace a document, returning the replaced one.
    pub fn insert(&mut self, doc: Document) -> Option<Document> {
        match self.position(&doc.id) {
            Some(idx) => Some(std::mem::replace(&mut self.documents[idx], doc)),
            None => {
                self.documents.push(doc);
                None
            },
        }
    }

    /// Remove a document by primary key.
    pub fn remove(&mut self, id: &Value) -> Option<Document> {
        self.position(id).map(|idx| self.documents.remove(idx))
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Point lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Queries served so far.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }

    /// Reset both round-trip counters.
    pub fn reset_counters(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.queries.store(0, Ordering::Relaxed);
    }

    fn position(&self, id: &Value) -> Option<usize> {
        self.documents.iter().position(|doc| doc.id.equivalent(id))
    }
}

impl RecordStore for MemoryStore {
    type Record = Document;
    type Stage = MemoryStage;
    type Error = Infallible;

    fn find_by_id(&self, id: &Value) -> Result<Option<Document>, Infallible> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.position(id).map(|idx| self.documents[idx].clone()))
    }

    fn query(&self, query: &Query<'_, MemoryStage>) -> Result<Vec<Document>, Infallible> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let mut rows: Vec<Document> = self
            .documents
            .iter()
            .filter(|doc| query.predicate.matches(*doc))
            .cloned()
            .collect();
        rows.sort_by(|a, b| query.sort.compare(a, b));
        rows.truncate(query.limit);
        for stage in query.stages {
            rows.iter_mut().for_each(|doc| stage.apply(doc));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::SortDir;
    use crate::predicate::{Operator, Predicate, compare};
    use crate::record::{Field, FieldValue, Record};
    use crate::sort::SortSpec;

    fn store() -> MemoryStore {
        MemoryStore::from_documents([
            Document::new(1).with("user_id", "a").with("rating", 3),
            Document::new(2).with("user_id", "b").with("rating", 5),
            Document::new(3).with("user_id", "a").with("rating", 4),
            Document::new(4).with("user_id", "a"),
        ])
    }

    #[test]
    fn test_query_filters_sorts_and_limits() {
        let store = store();
        let predicate = compare(Field::named("user_id"), Operator::Eq, "a".into());
        let sort = SortSpec::for_field(&Field::named("rating"), SortDir::Desc);
        let rows = store
            .query(&Query {
                predicate: &predicate,
                sort: &sort,
                limit: 2,
                stages: &[],
            })
            .unwrap();
        let keys: Vec<_> = rows.iter().map(|d| d.id.clone()).collect();
        assert_eq!(keys, vec![Value::Int(3), Value::Int(1)]);
        assert_eq!(store.queries(), 1);
    }

    #[test]
    fn test_stages_run_after_limit() {
        let store = store();
        let sort = SortSpec::for_field(&Field::PrimaryKey, SortDir::Asc);
        let stages = [
            MemoryStage::Set {
                field: "likes".into(),
                value: Value::Int(0),
            },
            MemoryStage::Unset {
                field: "user_id".into(),
            },
            MemoryStage::map(|doc| {
                let id = doc.id.to_string();
                doc.set("id_str", id);
            }),
        ];
        let rows = store
            .query(&Query {
                predicate: &Predicate::match_all(),
                sort: &sort,
                limit: 1,
                stages: &stages,
            })
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field("likes"), FieldValue::Present(&Value::Int(0)));
        assert_eq!(rows[0].field("user_id"), FieldValue::Absent);
        assert_eq!(rows[0].field("id_str"), FieldValue::Present(&Value::from("1")));
    }

    #[test]
    fn test_insert_replaces_and_remove() {
        let mut store = store();
        let old = store.insert(Document::new(1).with("rating", 1));
        assert!(old.is_some());
        assert_eq!(store.len(), 4);
        assert!(store.remove(&Value::Int(4)).is_some());
        assert!(store.find_by_id(&Value::Int(4)).unwrap().is_none());
        assert_eq!(store.lookups(), 1);
        store.reset_counters();
        assert_eq!(store.lookups(), 0);
    }

    #[test]
    fn test_from_json() {
        let store = MemoryStore::from_json(r#"[{"_id": 1, "rating": null}, {"_id": 2}]"#).unwrap();
        assert_eq!(store.len(), 2);
        let doc = store.find_by_id(&Value::Int(1)).unwrap().unwrap();
        assert_eq!(doc.primary_key(), &Value::Int(1));
        assert_eq!(doc.field("rating"), FieldValue::Null);
    }
}
