//! Rendering predicates as Mongo-style filter documents.

use super::{Comparison, CompoundPredicate, LogicalOp, Operator, Predicate};
use crate::value::Value;
use serde_json::{Map, Value as JsonValue, json};

impl Operator {
    /// Mongo operator name, e.g. `"$gte"`.
    pub const fn as_mongo(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::In => "$in",
            Self::NotIn => "$nin",
        }
    }
}

impl Predicate {
    /// Render as a Mongo filter document with the same matching semantics.
    ///
    /// Null equality is rendered as a `$type` test so that it does not also
    /// match missing fields. The match-all predicate renders as `{}`.
    ///
    /// ```
    /// use ratio_pagination::{Field, Operator, compare};
    ///
    /// let p = compare(Field::PrimaryKey, Operator::Gt, 42.into());
    /// assert_eq!(p.to_mongo("_id").to_string(), r#"{"_id":{"$gt":42}}"#);
    /// ```
    pub fn to_mongo(&self, primary_key: &str) -> JsonValue {
        match self {
            Self::Compare(comparison) => render_comparison(comparison, primary_key),
            Self::Exists { field, exists } => {
                single(field.store_name(primary_key), json!({ "$exists": exists }))
            },
            Self::Compound(compound) => render_compound(compound, primary_key),
        }
    }
}

fn render_comparison(comparison: &Comparison, primary_key: &str) -> JsonValue {
    let name = comparison.field.store_name(primary_key);
    let condition = match (comparison.op, &comparison.value) {
        (Operator::Eq, Value::Null) => json!({ "$type": "null" }),
        (Operator::Ne, Value::Null) => json!({ "$not": { "$type": "null" } }),
        (op, value) => single(op.as_mongo(), value.to_json()),
    };
    single(name, condition)
}

fn render_compound(compound: &CompoundPredicate, primary_key: &str) -> JsonValue {
    let rendered: Vec<JsonValue> = compound
        .predicates
        .iter()
        .map(|p| p.to_mongo(primary_key))
        .collect();
    match compound.op {
        LogicalOp::And if rendered.is_empty() => JsonValue::Object(Map::new()),
        LogicalOp::And => single("$and", JsonValue::Array(rendered)),
        // `$or` rejects an empty array; NOR of match-all matches nothing
        LogicalOp::Or if rendered.is_empty() => json!({ "$nor": [{}] }),
        LogicalOp::Or => single("$or", JsonValue::Array(rendered)),
        LogicalOp::Not => single("$nor", JsonValue::Array(rendered)),
    }
}

fn single(key: &str, value: JsonValue) -> JsonValue {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), value);
    JsonValue::Object(map)
}
