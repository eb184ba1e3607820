//! Keyset predicate generation.
//!
//! Given a resolved boundary record, builds the predicate selecting exactly
//! the records strictly after it in `(category, value, primary key)` order.
//! Categories order as absent < null < present, so each boundary category
//! has its own expansion:
//!
//! | Boundary | Ascending | Descending |
//! |----------|-----------|------------|
//! | `v` | `f > v` OR (`f = v` AND `pk > c`) | `f < v` OR `f` null/absent OR (`f = v` AND `pk < c`) |
//! | null | `f` present OR (`f` null AND `pk > c`) | `f` absent OR (`f` null AND `pk < c`) |
//! | absent | `f` exists OR (`f` absent AND `pk > c`) | `f` absent AND `pk < c` |
//!
//! Descending past an absent boundary only continues within the absent
//! group: nothing orders below it.

use crate::order::SortDir;
use crate::predicate::{
    Operator, Predicate, absent, and, compare, exists, is_null, null_or_absent, or, present,
};
use crate::record::Field;
use crate::value::Value;

/// The paginated-field value of a boundary record.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BoundaryValue {
    /// Field missing on the boundary record.
    Absent,
    /// Field present and null.
    Null,
    /// Field present with a non-null value.
    Present(Value),
}

/// A resolved cursor: the boundary record's key and paginated-field value.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::exhaustive_structs)] // built directly by callers of cursor_predicate
pub struct Boundary {
    /// Primary key of the boundary record.
    pub key: Value,
    /// Its value for the paginated field (unused for primary-key pagination).
    pub value: BoundaryValue,
}

/// Build the predicate selecting records strictly after `boundary` in `dir`.
pub fn cursor_predicate(field: &Field, boundary: &Boundary, dir: SortDir) -> Predicate {
    let (beyond, key_beyond) = match dir {
        SortDir::Asc => (Operator::Gt, compare(Field::PrimaryKey, Operator::Gt, boundary.key.clone())),
        SortDir::Desc => (Operator::Lt, compare(Field::PrimaryKey, Operator::Lt, boundary.key.clone())),
    };

    if field.is_primary_key() {
        return key_beyond;
    }

    let f = || field.clone();
    match (&boundary.value, dir) {
        (BoundaryValue::Present(v), SortDir::Asc) => or(vec![
            compare(f(), beyond, v.clone()),
            and(vec![compare(f(), Operator::Eq, v.clone()), key_beyond]),
        ]),
        (BoundaryValue::Present(v), SortDir::Desc) => or(vec![
            compare(f(), beyond, v.clone()),
            null_or_absent(f()),
            and(vec![compare(f(), Operator::Eq, v.clone()), key_beyond]),
        ]),
        (BoundaryValue::Null, SortDir::Asc) => {
            or(vec![present(f()), and(vec![is_null(f()), key_beyond])])
        },
        (BoundaryValue::Null, SortDir::Desc) => {
            or(vec![absent(f()), and(vec![is_null(f()), key_beyond])])
        },
        (BoundaryValue::Absent, SortDir::Asc) => {
            or(vec![exists(f()), and(vec![absent(f()), key_beyond])])
        },
        (BoundaryValue::Absent, SortDir::Desc) => and(vec![absent(f()), key_beyond]),
    }
}
