//! Runtime parsing of Mongo-style `match` documents.
//!
//! Callers usually express the base filter of a list endpoint the way they
//! would write it against a document database:
//!
//! ```
//! use ratio_pagination::parse_match;
//!
//! let filter = parse_match(r#"{"user_id": "miguel", "rating": {"$gte": 3}}"#, "_id").unwrap();
//! ```
//!
//! # Supported Syntax
//!
//! | Syntax | Example |
//! |--------|---------|
//! | Implicit `$eq` | `{"user_id": "miguel"}` |
//! | Comparison | `{"rating": {"$gt": 3}}` (`$eq $ne $gt $gte $lt $lte`) |
//! | Membership | `{"status": {"$in": ["a", "b"]}}`, `$nin` |
//! | Existence | `{"comment": {"$exists": false}}` |
//! | Null type | `{"comment": {"$type": "null"}}` |
//! | Field negation | `{"rating": {"$not": {"$gt": 3}}}` |
//! | Logical | `$and`, `$or`, `$nor` (arrays), `$not` (object) |
//!
//! `{"f": null}` and `{"f": {"$eq": null}}` match a null *or* missing field,
//! and `{"f": {"$ne": null}}` matches a present non-null field, as in MongoDB.

use super::{
    Operator, Predicate, absent, and, compare, exists, is_null, not, null_or_absent, or, present,
};
use crate::record::Field;
use crate::value::Value;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Maximum nesting depth accepted from callers.
const MAX_DEPTH: usize = 16;

/// Error type for `match` document parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Invalid JSON syntax.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    /// Unknown operator (e.g., `$foo`).
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    /// Expected an object but got something else.
    #[error("expected JSON object")]
    ExpectedObject,
    /// Expected an array but got something else.
    #[error("expected JSON array")]
    ExpectedArray,
    /// Field name is empty.
    #[error("field name cannot be empty")]
    EmptyFieldName,
    /// Operator value has the wrong type.
    #[error("operator '{op}' expects {expected}")]
    InvalidOperatorValue {
        /// The operator that had the wrong value type.
        op: String,
        /// Description of what was expected.
        expected: &'static str,
    },
    /// Nesting exceeds the accepted depth.
    #[error("filter nesting exceeds {MAX_DEPTH} levels")]
    TooDeep,
}

/// Parse a Mongo-style `match` document from a JSON string.
///
/// `primary_key` names the key field (`_id` for MongoDB collections).
pub fn parse_match(json: &str, primary_key: &str) -> Result<Predicate, ParseError> {
    let value: JsonValue =
        serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    Predicate::from_mongo(&value, primary_key)
}

impl Operator {
    /// Parse from a Mongo-style operator string (e.g., `"$gte"`).
    ///
    /// ```
    /// use ratio_pagination::Operator;
    ///
    /// assert_eq!(Operator::from_mongo("$gte"), Some(Operator::Gte));
    /// assert_eq!(Operator::from_mongo("$exists"), None);
    /// ```
    pub fn from_mongo(s: &str) -> Option<Self> {
        match s {
            "$eq" => Some(Self::Eq),
            "$ne" => Some(Self::Ne),
            "$gt" => Some(Self::Gt),
            "$gte" => Some(Self::Gte),
            "$lt" => Some(Self::Lt),
            "$lte" => Some(Self::Lte),
            "$in" => Some(Self::In),
            "$nin" => Some(Self::NotIn),
            _ => None,
        }
    }
}

impl Predicate {
    /// Parse a Mongo-style filter from an already-parsed JSON value.
    ///
    /// An empty object is the match-all predicate.
    pub fn from_mongo(json: &JsonValue, primary_key: &str) -> Result<Self, ParseError> {
        Parser { primary_key }.document(json, 0)
    }
}

struct Parser<'a> {
    primary_key: &'a str,
}

impl Parser<'_> {
    fn document(&self, json: &JsonValue, depth: usize) -> Result<Predicate, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }
        let JsonValue::Object(obj) = json else {
            return Err(ParseError::ExpectedObject);
        };

        let mut predicates = Vec::with_capacity(obj.len());
        for (key, value) in obj {
            let predicate = match key.as_str() {
                "" => return Err(ParseError::EmptyFieldName),
                "$and" => and(self.documents(value, depth)?),
                "$or" => or(self.documents(value, depth)?),
                "$nor" => not(or(self.documents(value, depth)?)),
                "$not" => not(self.document(value, depth + 1)?),
                op if op.starts_with('$') => return Err(ParseError::UnknownOperator(key.clone())),
                field => self.field_condition(self.field(field), value, depth)?,
            };
            predicates.push(predicate);
        }

        Ok(match predicates.len() {
            1 => predicates.pop().unwrap_or_default(),
            _ => and(predicates),
        })
    }

    fn documents(&self, json: &JsonValue, depth: usize) -> Result<Vec<Predicate>, ParseError> {
        let JsonValue::Array(items) = json else {
            return Err(ParseError::ExpectedArray);
        };
        items.iter().map(|item| self.document(item, depth + 1)).collect()
    }

    fn field(&self, name: &str) -> Field {
        Field::resolve(Some(name), self.primary_key)
    }

    fn field_condition(
        &self,
        field: Field,
        json: &JsonValue,
        depth: usize,
    ) -> Result<Predicate, ParseError> {
        match json {
            JsonValue::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => {
                self.operators(&field, ops, depth + 1)
            },
            JsonValue::Object(_) => Err(ParseError::InvalidOperatorValue {
                op: "$eq".to_string(),
                expected: "a scalar or array value",
            }),
            JsonValue::Null => Ok(null_or_absent(field)),
            other => Ok(compare(field, Operator::Eq, scalar("$eq", other)?)),
        }
    }

    fn operators(
        &self,
        field: &Field,
        ops: &Map<String, JsonValue>,
        depth: usize,
    ) -> Result<Predicate, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep);
        }
        let mut predicates = Vec::with_capacity(ops.len());
        for (op, value) in ops {
            let predicate = match op.as_str() {
                "$exists" => match value {
                    JsonValue::Bool(true) => exists(field.clone()),
                    JsonValue::Bool(false) => absent(field.clone()),
                    _ => return Err(invalid(op, "a boolean")),
                },
                "$type" => match value {
                    JsonValue::String(t) if t == "null" => is_null(field.clone()),
                    JsonValue::Number(n) if n.as_i64() == Some(10) => is_null(field.clone()),
                    _ => return Err(invalid(op, "\"null\" or 10")),
                },
                "$not" => match value {
                    JsonValue::Object(inner) => not(self.operators(field, inner, depth + 1)?),
                    _ => return Err(invalid(op, "an operator object")),
                },
                _ => {
                    let operator = Operator::from_mongo(op)
                        .ok_or_else(|| ParseError::UnknownOperator(op.clone()))?;
                    self.comparison(field, operator, op, value)?
                },
            };
            predicates.push(predicate);
        }

        Ok(match predicates.len() {
            1 => predicates.pop().unwrap_or_default(),
            _ => and(predicates),
        })
    }

    fn comparison(
        &self,
        field: &Field,
        operator: Operator,
        op: &str,
        value: &JsonValue,
    ) -> Result<Predicate, ParseError> {
        match (operator, value) {
            (Operator::Eq, JsonValue::Null) => Ok(null_or_absent(field.clone())),
            (Operator::Ne, JsonValue::Null) => Ok(present(field.clone())),
            (Operator::In | Operator::NotIn, JsonValue::Array(_)) => {
                Ok(compare(field.clone(), operator, scalar(op, value)?))
            },
            (Operator::In | Operator::NotIn, _) => Err(invalid(op, "an array")),
            _ => Ok(compare(field.clone(), operator, scalar(op, value)?)),
        }
    }
}

fn scalar(op: &str, json: &JsonValue) -> Result<Value, ParseError> {
    Value::from_json(json).ok_or_else(|| invalid(op, "a scalar or array value"))
}

fn invalid(op: &str, expected: &'static str) -> ParseError {
    ParseError::InvalidOperatorValue {
        op: op.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Document;

    fn parse(json: &str) -> Predicate {
        parse_match(json, "_id").unwrap()
    }

    #[test]
    fn test_implicit_eq() {
        let p = parse(r#"{"user_id": "miguel"}"#);
        assert_eq!(p, compare(Field::named("user_id"), Operator::Eq, "miguel".into()));
    }

    #[test]
    fn test_multiple_fields_are_anded() {
        let p = parse(r#"{"user_id": "miguel", "rating": {"$gte": 3, "$lt": 5}}"#);
        assert_eq!(
            p,
            and(vec![
                compare(Field::named("user_id"), Operator::Eq, "miguel".into()),
                and(vec![
                    compare(Field::named("rating"), Operator::Gte, Value::Int(3)),
                    compare(Field::named("rating"), Operator::Lt, Value::Int(5)),
                ]),
            ])
        );
    }

    #[test]
    fn test_primary_key_field() {
        let p = parse(r#"{"_id": {"$gt": 10}}"#);
        assert_eq!(p, compare(Field::PrimaryKey, Operator::Gt, Value::Int(10)));
    }

    #[test]
    fn test_null_follows_mongo_semantics() {
        let p = parse(r#"{"comment": null}"#);
        assert!(p.matches(&Document::new(1)));
        assert!(p.matches(&Document::new(2).with_null("comment")));
        assert!(!p.matches(&Document::new(3).with("comment", "nice")));

        let p = parse(r#"{"comment": {"$ne": null}}"#);
        assert!(!p.matches(&Document::new(1)));
        assert!(p.matches(&Document::new(3).with("comment", "nice")));

        let p = parse(r#"{"comment": {"$type": "null"}}"#);
        assert!(!p.matches(&Document::new(1)));
        assert!(p.matches(&Document::new(2).with_null("comment")));
    }

    #[test]
    fn test_logical_operators() {
        let p = parse(r#"{"$or": [{"rating": 1}, {"rating": {"$exists": false}}]}"#);
        assert!(p.matches(&Document::new(1)));
        assert!(p.matches(&Document::new(2).with("rating", 1)));
        assert!(!p.matches(&Document::new(3).with("rating", 2)));

        let p = parse(r#"{"$nor": [{"rating": 1}]}"#);
        assert!(!p.matches(&Document::new(2).with("rating", 1)));
        assert!(p.matches(&Document::new(3).with("rating", 2)));

        let p = parse(r#"{"rating": {"$not": {"$gt": 3}}}"#);
        assert!(p.matches(&Document::new(1).with("rating", 2)));
        assert!(!p.matches(&Document::new(1).with("rating", 4)));
    }

    #[test]
    fn test_empty_document_matches_all() {
        assert!(parse("{}").is_match_all());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_match("{", "_id"), Err(ParseError::InvalidJson(_))));
        assert_eq!(parse_match("[]", "_id"), Err(ParseError::ExpectedObject));
        assert_eq!(
            parse_match(r#"{"$where": "1"}"#, "_id"),
            Err(ParseError::UnknownOperator("$where".to_string()))
        );
        assert_eq!(
            parse_match(r#"{"a": {"$regex": "x"}}"#, "_id"),
            Err(ParseError::UnknownOperator("$regex".to_string()))
        );
        assert_eq!(parse_match(r#"{"$or": {}}"#, "_id"), Err(ParseError::ExpectedArray));
        assert_eq!(parse_match(r#"{"": 1}"#, "_id"), Err(ParseError::EmptyFieldName));
        assert!(matches!(
            parse_match(r#"{"a": {"$in": 3}}"#, "_id"),
            Err(ParseError::InvalidOperatorValue { .. })
        ));
        assert!(matches!(
            parse_match(r#"{"a": {"$exists": 1}}"#, "_id"),
            Err(ParseError::InvalidOperatorValue { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut json = String::from(r#"{"a": 1}"#);
        for _ in 0..=MAX_DEPTH {
            json = format!(r#"{{"$and": [{json}]}}"#);
        }
        assert_eq!(parse_match(&json, "_id"), Err(ParseError::TooDeep));
    }
}
