//! Total order over records on a paginated field.
//!
//! Records compare on `(category, value, primary key)`, where the category
//! order is fixed: absent < null < present. Descending traversal reverses the
//! whole tuple, so categories flip together with values and keys.

use crate::record::{Field, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Category of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(clippy::exhaustive_enums)] // absent, null, present is the whole domain
pub enum Category {
    /// Field missing from the record.
    Absent,
    /// Field present and null.
    Null,
    /// Field present with a non-null value.
    Present,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(clippy::exhaustive_enums)] // two directions, never more
pub enum SortDir {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDir {
    /// `Asc` when `ascending`, otherwise `Desc`.
    #[inline]
    pub const fn from_ascending(ascending: bool) -> Self {
        if ascending { Self::Asc } else { Self::Desc }
    }

    /// Returns `true` for [`SortDir::Asc`].
    #[inline]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// The opposite direction.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient an ascending comparison result.
    #[inline]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Mongo sort specifier: `1` or `-1`.
    #[inline]
    pub const fn as_mongo(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

/// The direction actually sent to the store.
///
/// Paging backward is done by scanning in the opposite direction and
/// reversing the fetched rows, so the scan is ascending exactly when one of
/// `ascending` and `backward` holds.
///
/// | ascending | backward | scan |
/// |-----------|----------|------|
/// | false     | false    | Desc |
/// | false     | true     | Asc  |
/// | true      | false    | Asc  |
/// | true      | true     | Desc |
#[inline]
pub const fn physical_direction(ascending: bool, backward: bool) -> SortDir {
    SortDir::from_ascending(ascending ^ backward)
}

/// Compare two field values ascending on `(category, value)`.
pub fn compare_field_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Present(x), FieldValue::Present(y)) => x.total_cmp(y),
        _ => a.category().cmp(&b.category()),
    }
}

/// Compare two records ascending on `field`, breaking ties by primary key.
pub fn compare_on<R: Record>(field: &Field, a: &R, b: &R) -> Ordering {
    let keys = || a.primary_key().total_cmp(b.primary_key());
    match field {
        Field::PrimaryKey => keys(),
        Field::Named(_) => compare_field_values(a.value_of(field), b.value_of(field)).then_with(keys),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Document;

    #[test]
    fn test_physical_direction_truth_table() {
        assert_eq!(physical_direction(false, false), SortDir::Desc);
        assert_eq!(physical_direction(false, true), SortDir::Asc);
        assert_eq!(physical_direction(true, false), SortDir::Asc);
        assert_eq!(physical_direction(true, true), SortDir::Desc);
    }

    #[test]
    fn test_category_order() {
        assert!(Category::Absent < Category::Null);
        assert!(Category::Null < Category::Present);
    }

    #[test]
    fn test_compare_on_named_field() {
        let rating = Field::named("rating");
        let absent = Document::new(9);
        let null = Document::new(1).with_null("rating");
        let low = Document::new(8).with("rating", 1);
        let high = Document::new(2).with("rating", 5);

        let mut docs = vec![high.clone(), null.clone(), low.clone(), absent.clone()];
        docs.sort_by(|a, b| compare_on(&rating, a, b));
        assert_eq!(docs, vec![absent.clone(), null.clone(), low.clone(), high.clone()]);

        docs.sort_by(|a, b| SortDir::Desc.apply(compare_on(&rating, a, b)));
        assert_eq!(docs, vec![high, low, null, absent]);
    }

    #[test]
    fn test_compare_on_breaks_ties_by_key() {
        let rating = Field::named("rating");
        let a = Document::new(1).with("rating", 4);
        let b = Document::new(2).with("rating", 4);
        assert_eq!(compare_on(&rating, &a, &b), Ordering::Less);
        assert_eq!(SortDir::Desc.apply(compare_on(&rating, &a, &b)), Ordering::Greater);

        let c = Document::new(3);
        let d = Document::new(4);
        assert_eq!(compare_on(&rating, &c, &d), Ordering::Less);
    }

    #[test]
    fn test_compare_on_primary_key_ignores_fields() {
        let a = Document::new(1).with("rating", 9);
        let b = Document::new(2);
        assert_eq!(compare_on(&Field::PrimaryKey, &a, &b), Ordering::Less);
    }

    #[test]
    fn test_sort_dir_helpers() {
        assert_eq!(SortDir::Asc.reverse(), SortDir::Desc);
        assert_eq!(SortDir::Desc.as_mongo(), -1);
        assert_eq!(SortDir::default(), SortDir::Desc);
        assert!(SortDir::from_ascending(true).is_ascending());
    }
}
