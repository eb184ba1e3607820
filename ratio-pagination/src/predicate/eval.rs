//! In-process predicate evaluation against a [`Record`].

use super::{Comparison, CompoundPredicate, LogicalOp, Operator, Predicate};
use crate::record::{FieldValue, Record};
use crate::value::Value;
use std::cmp::Ordering;

impl Predicate {
    /// Returns `true` if `record` satisfies this predicate.
    ///
    /// ```
    /// use ratio_pagination::{Document, Field, is_null};
    ///
    /// let doc = Document::new(1).with_null("rating");
    /// assert!(is_null(Field::named("rating")).matches(&doc));
    /// assert!(!is_null(Field::named("comment")).matches(&doc));
    /// ```
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Self::Compare(comparison) => comparison.matches(record),
            Self::Exists { field, exists } => {
                !matches!(record.value_of(field), FieldValue::Absent) == *exists
            },
            Self::Compound(compound) => compound.matches(record),
        }
    }
}

impl CompoundPredicate {
    fn matches<R: Record>(&self, record: &R) -> bool {
        match self.op {
            LogicalOp::And => self.predicates.iter().all(|p| p.matches(record)),
            LogicalOp::Or => self.predicates.iter().any(|p| p.matches(record)),
            LogicalOp::Not => !self.predicates.iter().all(|p| p.matches(record)),
        }
    }
}

impl Comparison {
    fn matches<R: Record>(&self, record: &R) -> bool {
        let actual = record.value_of(&self.field);
        match self.op {
            Operator::Eq => equals(actual, &self.value),
            Operator::Ne => !equals(actual, &self.value),
            Operator::Gt => ordered(actual, &self.value, Ordering::is_gt),
            Operator::Gte => ordered(actual, &self.value, Ordering::is_ge),
            Operator::Lt => ordered(actual, &self.value, Ordering::is_lt),
            Operator::Lte => ordered(actual, &self.value, Ordering::is_le),
            Operator::In => member(actual, &self.value),
            Operator::NotIn => !member(actual, &self.value),
        }
    }
}

fn equals(actual: FieldValue<'_>, expected: &Value) -> bool {
    match (actual, expected) {
        (FieldValue::Null, Value::Null) => true,
        (FieldValue::Present(v), expected) => !expected.is_null() && v.equivalent(expected),
        _ => false,
    }
}

fn ordered(actual: FieldValue<'_>, bound: &Value, accept: fn(Ordering) -> bool) -> bool {
    match actual {
        FieldValue::Present(v) if !bound.is_null() => accept(v.total_cmp(bound)),
        _ => false,
    }
}

fn member(actual: FieldValue<'_>, candidates: &Value) -> bool {
    match candidates {
        Value::Array(values) => values.iter().any(|v| equals(actual, v)),
        single => equals(actual, single),
    }
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::record::{Document, Field};

    fn rating() -> Field {
        Field::named("rating")
    }

    #[test]
    fn test_comparisons_skip_null_and_absent() {
        let null = Document::new(1).with_null("rating");
        let missing = Document::new(2);
        for op in [Operator::Gt, Operator::Gte, Operator::Lt, Operator::Lte] {
            let p = compare(rating(), op, Value::Int(3));
            assert!(!p.matches(&null), "{op:?} matched null");
            assert!(!p.matches(&missing), "{op:?} matched absent");
        }
    }

    #[test]
    fn test_range_operators() {
        let doc = Document::new(1).with("rating", 3);
        assert!(compare(rating(), Operator::Gt, Value::Int(2)).matches(&doc));
        assert!(compare(rating(), Operator::Gte, Value::Float(3.0)).matches(&doc));
        assert!(!compare(rating(), Operator::Lt, Value::Int(3)).matches(&doc));
        assert!(compare(rating(), Operator::Lte, Value::Int(3)).matches(&doc));
    }

    #[test]
    fn test_null_equality_is_present_null_only() {
        let null = Document::new(1).with_null("rating");
        let missing = Document::new(2);
        let five = Document::new(3).with("rating", 5);

        assert!(is_null(rating()).matches(&null));
        assert!(!is_null(rating()).matches(&missing));
        assert!(!is_null(rating()).matches(&five));

        assert!(present(rating()).matches(&five));
        assert!(!present(rating()).matches(&null));
        assert!(!present(rating()).matches(&missing));

        assert!(null_or_absent(rating()).matches(&null));
        assert!(null_or_absent(rating()).matches(&missing));
        assert!(!null_or_absent(rating()).matches(&five));
    }

    #[test]
    fn test_ne_is_negated_eq() {
        let missing = Document::new(2);
        assert!(compare(rating(), Operator::Ne, Value::Int(5)).matches(&missing));
    }

    #[test]
    fn test_in_and_nin() {
        let doc = Document::new(1).with("status", "active");
        let set = Value::Array(vec!["active".into(), "pending".into()]);
        assert!(compare(Field::named("status"), Operator::In, set.clone()).matches(&doc));
        assert!(!compare(Field::named("status"), Operator::NotIn, set).matches(&doc));
    }

    #[test]
    fn test_primary_key_comparison() {
        let doc = Document::new(10);
        assert!(compare(Field::PrimaryKey, Operator::Gt, Value::Int(9)).matches(&doc));
        assert!(exists(Field::PrimaryKey).matches(&doc));
    }

    #[test]
    fn test_compounds() {
        let doc = Document::new(1).with("rating", 3);
        assert!(Predicate::match_all().matches(&doc));
        assert!(!or(vec![]).matches(&doc));
        assert!(not(absent(rating())).matches(&doc));
    }
}
