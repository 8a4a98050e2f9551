//! The unit a [`Query`](crate::Query) carries: a value plus its context.
//!
//! Context is a fixed-shape record rather than a trailing argument list. Each
//! field is filled in by the operation that produces it and passed through
//! unchanged by every other step:
//!
//! | field     | set by                                              |
//! |-----------|-----------------------------------------------------|
//! | `key`     | [`pairs_of`](crate::pairs_of), [`group_by`](crate::Query::group_by), [`spread`](crate::Query::spread) |
//! | `ordinal` | [`group_by`](crate::Query::group_by)                |
//! | `index`   | [`enumerate`](crate::Query::enumerate)              |

use crate::key::Key;
use serde::Serialize;

/// Auxiliary per-row metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Context {
    /// Entry key of a key/value source, or the group key after grouping.
    pub key: Option<Key>,
    /// Rank of first appearance of `key` among the groups.
    pub ordinal: Option<usize>,
    /// Position recorded by `enumerate`.
    pub index: Option<usize>,
}

impl Context {
    /// Context for a `(value, key)` pair.
    pub fn keyed(key: impl Into<Key>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Context for a `(members, key, ordinal)` group.
    pub fn grouped(key: Key, ordinal: usize) -> Self {
        Self {
            key: Some(key),
            ordinal: Some(ordinal),
            index: None,
        }
    }

    /// The key, or [`Key::Null`] when none was attached.
    #[must_use]
    pub fn key_or_null(&self) -> Key {
        self.key.clone().unwrap_or(Key::Null)
    }
}

/// A value flowing through the chain with its context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Tuple<T> {
    pub value: T,
    pub context: Context,
}

impl<T> Tuple<T> {
    /// A tuple with empty context.
    pub fn new(value: T) -> Self {
        Self {
            value,
            context: Context::default(),
        }
    }

    pub fn with_context(value: T, context: Context) -> Self {
        Self { value, context }
    }

    pub fn into_parts(self) -> (T, Context) {
        (self.value, self.context)
    }
}
