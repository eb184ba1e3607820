//! Field values and their cross-type ordering.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;

/// A record field value (or primary key).
///
/// Values of different types are totally ordered by type first:
/// `Null < numbers < String < Array < Bool`. `Int` and `Float` share the
/// number bracket and compare numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Value {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// UTF-8 string (also used for hex object ids and ISO timestamps).
    String(String),
    /// Array of values.
    Array(Vec<Value>),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    const fn type_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Int(_) | Self::Float(_) => 1,
            Self::String(_) => 2,
            Self::Array(_) => 3,
            Self::Bool(_) => 4,
        }
    }

    /// Total order over all values, used for both sorting and range predicates.
    ///
    /// Numbers compare by exact mathematical value, so `-0.0` equals `0.0`
    /// and large integers never collapse onto a neighbouring float. NaN sorts
    /// past the infinity of its sign.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Int(a), Self::Float(b)) => int_float_cmp(*a, *b),
            (Self::Float(a), Self::Int(b)) => int_float_cmp(*b, *a).reverse(),
            (Self::Float(a), Self::Float(b)) => float_cmp(*a, *b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Array(a), Self::Array(b)) => a
                .iter()
                .zip(b)
                .map(|(x, y)| x.total_cmp(y))
                .find(|ord| ord.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }

    /// Equality under [`total_cmp`](Self::total_cmp) (`Int(1)` equals `Float(1.0)`).
    #[inline]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.total_cmp(other).is_eq()
    }

    /// Convert from a JSON value. Objects are not valid field values.
    ///
    /// ```
    /// use ratio_pagination::Value;
    /// use serde_json::json;
    ///
    /// assert_eq!(Value::from_json(&json!(42)), Some(Value::Int(42)));
    /// assert_eq!(Value::from_json(&json!({"a": 1})), None);
    /// ```
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            JsonValue::String(s) => Some(Self::String(s.clone())),
            JsonValue::Array(arr) => arr
                .iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Self::Array),
            JsonValue::Object(_) => None,
        }
    }

    /// Convert to a JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Array(values) => JsonValue::Array(values.iter().map(Self::to_json).collect()),
        }
    }
}

/// 2^63, the first float above `i64::MAX`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

fn int_float_cmp(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    let whole = f.floor();
    if whole >= I64_LIMIT {
        return Ordering::Less;
    }
    if whole < -I64_LIMIT {
        return Ordering::Greater;
    }
    // In range and integral, so the cast is exact.
    let whole_int = whole as i64;
    i.cmp(&whole_int).then(if f > whole {
        Ordering::Less
    } else {
        Ordering::Equal
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}
