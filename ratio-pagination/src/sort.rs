//! Compound sort specifications: paginated field plus primary-key tiebreaker.

use crate::order::{SortDir, compare_field_values};
use crate::record::{Field, Record};
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;

/// One key of a sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SortKey {
    /// Field to sort on.
    pub field: Field,
    /// Direction.
    pub dir: SortDir,
}

/// Ordered list of sort keys a store must honor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Sort on `field` then on the primary key, both in `dir`.
    ///
    /// Sorting on the primary key yields a single key.
    pub fn for_field(field: &Field, dir: SortDir) -> Self {
        let mut keys = Vec::with_capacity(2);
        if !field.is_primary_key() {
            keys.push(SortKey {
                field: field.clone(),
                dir,
            });
        }
        keys.push(SortKey {
            field: Field::PrimaryKey,
            dir,
        });
        Self { keys }
    }

    /// The sort keys in priority order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compare two records under this specification.
    ///
    /// Named fields order as absent < null < present before direction is
    /// applied, which is how a conforming store must order them.
    pub fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        self.keys
            .iter()
            .map(|key| {
                let ordering = compare_field_values(a.value_of(&key.field), b.value_of(&key.field));
                key.dir.apply(ordering)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Render as a Mongo sort document, e.g. `{"rating": -1, "_id": -1}`.
    pub fn to_mongo(&self, primary_key: &str) -> Map<String, JsonValue> {
        self.keys
            .iter()
            .map(|key| {
                (
                    key.field.store_name(primary_key).to_string(),
                    JsonValue::from(key.dir.as_mongo()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Document;

    #[test]
    fn test_primary_key_sort_has_single_key() {
        let spec = SortSpec::for_field(&Field::PrimaryKey, SortDir::Asc);
        assert_eq!(spec.keys().len(), 1);
        assert_eq!(spec.keys()[0].field, Field::PrimaryKey);
    }

    #[test]
    fn test_named_sort_appends_tiebreaker() {
        let spec = SortSpec::for_field(&Field::named("rating"), SortDir::Desc);
        assert_eq!(
            spec.keys(),
            &[
                SortKey {
                    field: Field::named("rating"),
                    dir: SortDir::Desc
                },
                SortKey {
                    field: Field::PrimaryKey,
                    dir: SortDir::Desc
                },
            ]
        );
    }

    #[test]
    fn test_to_mongo_keeps_key_order() {
        let spec = SortSpec::for_field(&Field::named("rating"), SortDir::Desc);
        let rendered = JsonValue::Object(spec.to_mongo("_id")).to_string();
        assert_eq!(rendered, r#"{"rating":-1,"_id":-1}"#);
    }

    #[test]
    fn test_compare_matches_total_order() {
        let spec = SortSpec::for_field(&Field::named("rating"), SortDir::Asc);
        let mut docs = vec![
            Document::new(6).with("rating", 2),
            Document::new(3).with_null("rating"),
            Document::new(5).with("rating", 1),
            Document::new(2),
            Document::new(4).with_null("rating"),
            Document::new(1),
        ];
        docs.sort_by(|a, b| spec.compare(a, b));
        let keys: Vec<_> = docs.iter().map(|d| d.id.clone()).collect();
        assert_eq!(keys, (1..=6).map(crate::Value::Int).collect::<Vec<_>>());
    }
}
