//! Cursors: primary keys of boundary records, and their opaque token form.

use super::keyset::{Boundary, BoundaryValue};
use crate::error::PaginationError;
use crate::record::{Field, FieldValue, Record};
use crate::store::RecordStore;
use crate::value::Value;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum allowed token size in bytes (4KB).
const MAX_TOKEN_SIZE: usize = 4 * 1024;

/// The primary key of a pagination boundary record.
///
/// A cursor is never decoded into a field value directly. When paginating on
/// a named field it is *resolved* by looking the record up in the store.
///
/// For transport, [`encode`](Self::encode) turns it into an opaque URL-safe
/// token. The token is base64 of the key's JSON form, **not encryption**.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(Value);

impl Cursor {
    /// Cursor pointing at the record with primary key `key`.
    pub fn new(key: impl Into<Value>) -> Self {
        Self(key.into())
    }

    /// Cursor pointing at `record`.
    pub fn of<R: Record>(record: &R) -> Self {
        Self(record.primary_key().clone())
    }

    /// The referenced primary key.
    pub const fn key(&self) -> &Value {
        &self.0
    }

    /// Consume into the primary key.
    pub fn into_key(self) -> Value {
        self.0
    }

    /// Encode as an opaque token.
    ///
    /// ```
    /// use ratio_pagination::Cursor;
    ///
    /// let cursor = Cursor::new("65a1f0c2e4b0a1b2c3d4e5f6");
    /// let token = cursor.encode();
    /// assert_eq!(Cursor::decode(&token).unwrap(), cursor);
    /// ```
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0.to_json().to_string())
    }

    /// Decode a token produced by [`encode`](Self::encode).
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        if token.len() > MAX_TOKEN_SIZE {
            return Err(CursorError::TooLarge);
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| CursorError::InvalidBase64)?;
        let json: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|_| CursorError::InvalidFormat)?;
        match Value::from_json(&json) {
            Some(Value::Null) | None => Err(CursorError::InvalidFormat),
            Some(key) => Ok(Self(key)),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Value> for Cursor {
    fn from(key: Value) -> Self {
        Self(key)
    }
}

/// Errors decoding a cursor token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CursorError {
    /// The base64 encoding is invalid.
    #[error("invalid base64 encoding in cursor")]
    InvalidBase64,
    /// The decoded payload is not a primary key.
    #[error("invalid cursor format (expected a JSON primary key)")]
    InvalidFormat,
    /// The token exceeds the maximum allowed size.
    #[error("cursor exceeds maximum size ({}KB limit)", MAX_TOKEN_SIZE / 1024)]
    TooLarge,
}

/// Resolve a cursor into the boundary the predicate builder needs.
///
/// Named fields always cost one point lookup. Primary-key cursors are looked
/// up only when `verify` is set, to reject keys that no longer exist.
pub(crate) fn resolve_boundary<S: RecordStore>(
    store: &S,
    cursor: &Cursor,
    field: &Field,
    verify: bool,
) -> Result<Boundary, PaginationError<S::Error>> {
    if field.is_primary_key() && !verify {
        return Ok(Boundary {
            key: cursor.key().clone(),
            value: BoundaryValue::Absent,
        });
    }

    let record = store
        .find_by_id(cursor.key())
        .map_err(PaginationError::Store)?
        .ok_or_else(|| {
            log::warn!("cursor {cursor} does not resolve to a record");
            PaginationError::InvalidCursor(cursor.clone())
        })?;

    let value = match record.value_of(field) {
        FieldValue::Absent => BoundaryValue::Absent,
        FieldValue::Null => BoundaryValue::Null,
        FieldValue::Present(v) => BoundaryValue::Present(v.clone()),
    };
    Ok(Boundary {
        key: record.primary_key().clone(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Document;
    use crate::store::MemoryStore;

    #[test]
    fn test_token_roundtrip_int_and_string() {
        for cursor in [Cursor::new(42), Cursor::new("abc"), Cursor::new(-1.5)] {
            assert_eq!(Cursor::decode(&cursor.encode()).unwrap(), cursor);
        }
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = Cursor::new("??>>??").encode();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(Cursor::decode("!!!"), Err(CursorError::InvalidBase64));
        assert_eq!(
            Cursor::decode(&URL_SAFE_NO_PAD.encode("{not json")),
            Err(CursorError::InvalidFormat)
        );
        assert_eq!(Cursor::decode(&URL_SAFE_NO_PAD.encode("null")), Err(CursorError::InvalidFormat));
        assert_eq!(Cursor::decode(&"A".repeat(MAX_TOKEN_SIZE + 1)), Err(CursorError::TooLarge));
    }

    #[test]
    fn test_resolve_boundary_categories() {
        let store = MemoryStore::from_documents([
            Document::new(1),
            Document::new(2).with_null("rating"),
            Document::new(3).with("rating", 4),
        ]);
        let rating = Field::named("rating");

        let b = resolve_boundary(&store, &Cursor::new(1), &rating, true).unwrap();
        assert_eq!(b.value, BoundaryValue::Absent);
        let b = resolve_boundary(&store, &Cursor::new(2), &rating, true).unwrap();
        assert_eq!(b.value, BoundaryValue::Null);
        let b = resolve_boundary(&store, &Cursor::new(3), &rating, true).unwrap();
        assert_eq!(b.value, BoundaryValue::Present(Value::Int(4)));
        assert_eq!(store.lookups(), 3);
    }

    #[test]
    fn test_resolve_boundary_unknown_key() {
        let store = MemoryStore::from_documents([Document::new(1)]);
        let err = resolve_boundary(&store, &Cursor::new(99), &Field::PrimaryKey, true).unwrap_err();
        assert!(matches!(err, PaginationError::InvalidCursor(c) if c == Cursor::new(99)));
    }

    #[test]
    fn test_resolve_primary_key_without_verification_skips_lookup() {
        let store = MemoryStore::new();
        let b = resolve_boundary(&store, &Cursor::new(99), &Field::PrimaryKey, false).unwrap();
        assert_eq!(b.key, Value::Int(99));
        assert_eq!(store.lookups(), 0);
    }
}
