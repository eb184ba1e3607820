//! Tagged predicate algebra shared by the engine and store adapters.
//!
//! A [`Predicate`] is built from three kinds of node: field comparisons,
//! existence tests, and logical compounds. Stores evaluate it directly
//! ([`Predicate::matches`]) or translate it ([`Predicate::to_mongo`]).
//!
//! # Value semantics
//!
//! | Node | Matches |
//! |------|---------|
//! | `f == null` | `f` present and null |
//! | `f == v` | `f` present and equivalent to `v` |
//! | `f != v` | everything `f == v` does not match |
//! | `f > v`, `>=`, `<`, `<=` | `f` present, non-null, and ordered against `v` |
//! | `f in [..]` | any element matches `f == element` |
//! | `f exists` | `f` present (null or not) |
//!
//! An empty AND matches every record; an empty OR matches none.

mod eval;
mod parse;
mod render;

pub use parse::{ParseError, parse_match};

use crate::record::Field;
use crate::value::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Operator {
    /// Equal: `$eq`
    Eq,
    /// Not equal: `$ne`
    Ne,
    /// Greater than: `$gt`
    Gt,
    /// Greater than or equal: `$gte`
    Gte,
    /// Less than: `$lt`
    Lt,
    /// Less than or equal: `$lte`
    Lte,
    /// Member of array: `$in`
    In,
    /// Not a member of array: `$nin`
    NotIn,
}

/// Logical operators for compound predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LogicalOp {
    /// All must match.
    And,
    /// At least one must match.
    Or,
    /// Negates its single operand.
    Not,
}

/// A field compared against a value.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Comparison {
    /// Field being compared.
    pub field: Field,
    /// Operator.
    pub op: Operator,
    /// Right-hand operand.
    pub value: Value,
}

/// Predicates combined with a logical operator.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct CompoundPredicate {
    /// How `predicates` combine.
    pub op: LogicalOp,
    /// Operands.
    pub predicates: Vec<Predicate>,
}

/// A store-evaluable predicate.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Predicate {
    /// Field comparison.
    Compare(Comparison),
    /// Field existence test.
    Exists {
        /// Field tested.
        field: Field,
        /// `true` selects records where the field is present.
        exists: bool,
    },
    /// Logical combination.
    Compound(CompoundPredicate),
}

impl Default for Predicate {
    fn default() -> Self {
        Self::match_all()
    }
}

impl Predicate {
    /// The predicate matching every record (an empty AND).
    pub const fn match_all() -> Self {
        Self::Compound(CompoundPredicate {
            op: LogicalOp::And,
            predicates: Vec::new(),
        })
    }

    /// Returns `true` for an empty AND.
    pub fn is_match_all(&self) -> bool {
        matches!(self, Self::Compound(CompoundPredicate { op: LogicalOp::And, predicates }) if predicates.is_empty())
    }

    /// AND this predicate with `other`, flattening nested ANDs and dropping
    /// match-all operands.
    ///
    /// ```
    /// use ratio_pagination::{Field, Operator, Predicate, compare};
    ///
    /// let base = compare(Field::named("user_id"), Operator::Eq, "miguel".into());
    /// assert_eq!(base.clone().and_also(Predicate::match_all()), base);
    /// ```
    pub fn and_also(self, other: Self) -> Self {
        if other.is_match_all() {
            return self;
        }
        if self.is_match_all() {
            return other;
        }
        let mut predicates = Vec::new();
        for predicate in [self, other] {
            match predicate {
                Self::Compound(CompoundPredicate {
                    op: LogicalOp::And,
                    predicates: inner,
                }) => predicates.extend(inner),
                other => predicates.push(other),
            }
        }
        and(predicates)
    }

    /// Maximum nesting depth of compound nodes.
    pub fn depth(&self) -> usize {
        match self {
            Self::Compare(_) | Self::Exists { .. } => 0,
            Self::Compound(compound) => {
                1 + compound
                    .predicates
                    .iter()
                    .map(Self::depth)
                    .max()
                    .unwrap_or(0)
            },
        }
    }
}

/// Compare `field` against `value`.
pub const fn compare(field: Field, op: Operator, value: Value) -> Predicate {
    Predicate::Compare(Comparison { field, op, value })
}

/// `field` is present (null or not).
pub const fn exists(field: Field) -> Predicate {
    Predicate::Exists { field, exists: true }
}

/// `field` is missing.
pub const fn absent(field: Field) -> Predicate {
    Predicate::Exists {
        field,
        exists: false,
    }
}

/// `field` is present and null.
pub const fn is_null(field: Field) -> Predicate {
    compare(field, Operator::Eq, Value::Null)
}

/// `field` is present and not null.
pub fn present(field: Field) -> Predicate {
    and(vec![exists(field.clone()), compare(field, Operator::Ne, Value::Null)])
}

/// `field` is null or missing.
pub fn null_or_absent(field: Field) -> Predicate {
    or(vec![is_null(field.clone()), absent(field)])
}

/// All of `predicates`.
pub const fn and(predicates: Vec<Predicate>) -> Predicate {
    Predicate::Compound(CompoundPredicate {
        op: LogicalOp::And,
        predicates,
    })
}

/// Any of `predicates`.
pub const fn or(predicates: Vec<Predicate>) -> Predicate {
    Predicate::Compound(CompoundPredicate {
        op: LogicalOp::Or,
        predicates,
    })
}

/// Negation of `predicate`.
pub fn not(predicate: Predicate) -> Predicate {
    Predicate::Compound(CompoundPredicate {
        op: LogicalOp::Not,
        predicates: vec![predicate],
    })
}
