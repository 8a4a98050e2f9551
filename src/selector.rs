//! Column-name or function selectors, resolved into row accessors.

use crate::key::Key;
use crate::record::Record;
use crate::tuple::Context;
use std::fmt;
use std::sync::Arc;

/// A resolved accessor: `(row, context, position) -> key`.
pub type SelectorFn<T> = Arc<dyn Fn(&T, &Context, usize) -> Key + Send + Sync>;

/// Either a field name or a function computing a key from a row.
///
/// ```
/// use ironquery::{Key, Record, Selector};
/// use serde_json::{json, Value};
///
/// let by_name: Selector<Value> = "a".into();
/// let by_fn = Selector::row(|row: &Value| row.key_of("a"));
///
/// let row = json!({"a": 7});
/// let ctx = Default::default();
/// assert_eq!(by_name.resolve()(&row, &ctx, 0), Key::from(7));
/// assert_eq!(by_fn.resolve()(&row, &ctx, 0), Key::from(7));
/// ```
pub enum Selector<T> {
    Column(String),
    Func(SelectorFn<T>),
}

impl<T> Selector<T> {
    pub fn column(name: impl Into<String>) -> Self {
        Selector::Column(name.into())
    }

    /// Selector receiving the row, its context and its position in the sequence.
    pub fn func<K, F>(f: F) -> Self
    where
        T: 'static,
        K: Into<Key>,
        F: Fn(&T, &Context, usize) -> K + Send + Sync + 'static,
    {
        Selector::Func(Arc::new(move |row: &T, ctx: &Context, pos: usize| {
            f(row, ctx, pos).into()
        }))
    }

    /// Selector receiving only the row.
    pub fn row<K, F>(f: F) -> Self
    where
        T: 'static,
        K: Into<Key>,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        Selector::Func(Arc::new(move |row: &T, _: &Context, _: usize| f(row).into()))
    }

    /// The column name, for column selectors.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Selector::Column(name) => Some(name),
            Selector::Func(_) => None,
        }
    }
}

impl<T: Record + 'static> Selector<T> {
    /// Resolve into an accessor. A column reads that field (missing is
    /// [`Key::Null`]); a function is returned as is.
    #[must_use]
    pub fn resolve(self) -> SelectorFn<T> {
        match self {
            Selector::Column(name) => {
                Arc::new(move |row: &T, _: &Context, _: usize| row.key_of(&name))
            }
            Selector::Func(f) => f,
        }
    }
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        match self {
            Selector::Column(name) => Selector::Column(name.clone()),
            Selector::Func(f) => Selector::Func(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Column(name) => f.debug_tuple("Column").field(name).finish(),
            Selector::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<T> From<&str> for Selector<T> {
    fn from(name: &str) -> Self {
        Selector::column(name)
    }
}

impl<T> From<String> for Selector<T> {
    fn from(name: String) -> Self {
        Selector::Column(name)
    }
}

impl<T> From<&String> for Selector<T> {
    fn from(name: &String) -> Self {
        Selector::Column(name.clone())
    }
}
