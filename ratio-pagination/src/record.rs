//! Record model: primary keys, named fields, and the three value categories.

use crate::order::Category;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A field reference: the primary key or a named field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[allow(clippy::exhaustive_enums)] // primary key or a named field
pub enum Field {
    /// The record's unique, totally-ordered primary key.
    #[default]
    PrimaryKey,
    /// A named, independently-sortable field.
    Named(String),
}

impl Field {
    /// Reference a named field.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Resolve an optional field name, treating `None` and `primary_key`
    /// as the primary key.
    pub fn resolve(name: Option<&str>, primary_key: &str) -> Self {
        match name {
            None => Self::PrimaryKey,
            Some(name) if name == primary_key => Self::PrimaryKey,
            Some(name) => Self::named(name),
        }
    }

    /// Returns `true` if this is the primary key.
    #[inline]
    pub const fn is_primary_key(&self) -> bool {
        matches!(self, Self::PrimaryKey)
    }

    /// Field name as seen by the store, using `primary_key` for the key.
    pub fn store_name<'a>(&'a self, primary_key: &'a str) -> &'a str {
        match self {
            Self::PrimaryKey => primary_key,
            Self::Named(name) => name,
        }
    }
}

/// The value of a field on a particular record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::exhaustive_enums)] // mirrors Category
pub enum FieldValue<'a> {
    /// The field is missing from the record.
    Absent,
    /// The field is present and explicitly null.
    Null,
    /// The field is present with a non-null value.
    Present(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// Classify an optional value: missing is absent, `Value::Null` is null.
    pub const fn from_option(value: Option<&'a Value>) -> Self {
        match value {
            None => Self::Absent,
            Some(Value::Null) => Self::Null,
            Some(v) => Self::Present(v),
        }
    }

    /// The value's category in the total order.
    pub const fn category(&self) -> Category {
        match self {
            Self::Absent => Category::Absent,
            Self::Null => Category::Null,
            Self::Present(_) => Category::Present,
        }
    }
}

/// A record the engine can paginate over.
///
/// Implemented by whatever entity type a [`RecordStore`](crate::RecordStore)
/// returns; the engine only ever reads the primary key and the paginated field.
pub trait Record {
    /// The record's primary key.
    fn primary_key(&self) -> &Value;

    /// The value of a named field.
    fn field(&self, name: &str) -> FieldValue<'_>;

    /// The value of any field reference, with the primary key always present.
    fn value_of(&self, field: &Field) -> FieldValue<'_> {
        match field {
            Field::PrimaryKey => FieldValue::Present(self.primary_key()),
            Field::Named(name) => self.field(name),
        }
    }
}

/// A schemaless document keyed by `_id`.
///
/// A name missing from `fields` is absent; a name mapped to [`Value::Null`]
/// is present-null. Keys are flat: `"stats.likes"` names a top-level key
/// spelled with a dot, not a path into a nested object, and nested objects
/// are not field values. Serializes as a flat JSON object:
///
/// ```
/// use ratio_pagination::{Document, FieldValue, Record, Value};
///
/// let doc: Document = serde_json::from_str(r#"{"_id": 3, "rating": null}"#).unwrap();
/// assert_eq!(doc.primary_key(), &Value::Int(3));
/// assert_eq!(doc.field("rating"), FieldValue::Null);
/// assert_eq!(doc.field("comment"), FieldValue::Absent);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Document {
    /// Primary key.
    #[serde(rename = "_id")]
    pub id: Value,
    /// All other fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Create a document with no fields.
    pub fn new(id: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set a field (builder style).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field to an explicit null (builder style).
    pub fn with_null(self, name: impl Into<String>) -> Self {
        self.with(name, Value::Null)
    }

    /// Set a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Remove a field, making it absent.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }
}

impl Record for Document {
    fn primary_key(&self) -> &Value {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        FieldValue::from_option(self.fields.get(name))
    }
}
