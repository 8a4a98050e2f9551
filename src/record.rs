//! Named-field access for rows.
//!
//! The query layer never looks inside a row except through [`Record`]. Column
//! selectors, [`where_eq`](crate::Query::where_eq), [`exists`](crate::Query::exists),
//! [`index`](crate::Query::index) and multi-column grouping all require it.

use crate::key::Key;
use serde_json::{Map, Value};

/// A row that exposes its fields by name.
pub trait Record {
    /// The value stored under `name`, or `None` when the field is absent.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Whether the row itself is null.
    fn is_null(&self) -> bool {
        false
    }

    /// The field under `name` as a [`Key`]; a missing field is [`Key::Null`].
    fn key_of(&self, name: &str) -> Key {
        self.field(name).map_or(Key::Null, Key::from)
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<R: Record> Record for Option<R> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.as_ref().and_then(|row| row.field(name))
    }

    fn is_null(&self) -> bool {
        self.as_ref().is_none_or(Record::is_null)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}
