//! The chainable container.
//!
//! A [`Query<T>`] is an owned, ordered sequence of [`Tuple`]s. Every chain step
//! consumes the query and returns a new one built from a fresh tuple sequence;
//! clone the query first if the original is still needed. Terminal steps
//! collapse it into a `Vec`, a map or a single value.
//!
//! ```
//! use ironquery::*;
//! use serde_json::json;
//!
//! let rows = vec![json!({"a": 1, "b": "x"}), json!({"a": 2}), json!({"a": 1, "b": "y"})];
//! let picked = wrap(rows)
//!     .where_eq(&json!({"a": 1}))
//!     .exists("b")
//!     .map(|row| row["b"].clone())
//!     .to_vec();
//! assert_eq!(picked, vec![json!("x"), json!("y")]);
//! ```

use crate::key::Key;
use crate::record::Record;
use crate::tuple::{Context, Tuple};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An ordered sequence of values with per-row [`Context`].
#[derive(Clone, Debug, PartialEq)]
pub struct Query<T> {
    tuples: Vec<Tuple<T>>,
}

/// Columns checked by [`Query::exists`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Columns {
    /// No columns: keep every row that is not null.
    #[default]
    Any,
    /// Every named field must be present, not null and not NaN.
    Named(Vec<String>),
}

impl From<&str> for Columns {
    fn from(name: &str) -> Self {
        Columns::Named(vec![name.to_string()])
    }
}

impl From<String> for Columns {
    fn from(name: String) -> Self {
        Columns::Named(vec![name])
    }
}

impl From<Vec<&str>> for Columns {
    fn from(names: Vec<&str>) -> Self {
        Columns::Named(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Columns {
    fn from(names: Vec<String>) -> Self {
        Columns::Named(names)
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(names: [&str; N]) -> Self {
        Columns::Named(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<C: Into<Columns>> From<Option<C>> for Columns {
    fn from(columns: Option<C>) -> Self {
        columns.map_or(Columns::Any, Into::into)
    }
}

impl<T> Query<T> {
    /// Build a query directly from tuples.
    pub fn new(tuples: Vec<Tuple<T>>) -> Self {
        Self { tuples }
    }

    /// Wrap plain values, each with empty context.
    pub fn from_values(values: Vec<T>) -> Self {
        Self::new(values.into_iter().map(Tuple::new).collect())
    }

    #[must_use]
    pub fn tuples(&self) -> &[Tuple<T>] {
        &self.tuples
    }

    #[must_use]
    pub fn into_tuples(self) -> Vec<Tuple<T>> {
        self.tuples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Borrow the values in order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.tuples.iter().map(|t| &t.value)
    }

    // ---- chainable ----

    /// Replace each value with `f(value)`; context is kept.
    pub fn map<O, F>(self, mut f: F) -> Query<O>
    where
        F: FnMut(&T) -> O,
    {
        self.map_with_context(move |value, _| f(value))
    }

    /// Replace each value with `f(value, context)`; context is kept.
    pub fn map_with_context<O, F>(self, mut f: F) -> Query<O>
    where
        F: FnMut(&T, &Context) -> O,
    {
        Query::new(
            self.tuples
                .into_iter()
                .map(|t| {
                    let value = f(&t.value, &t.context);
                    Tuple::with_context(value, t.context)
                })
                .collect(),
        )
    }

    /// Record each tuple's position in the current sequence as `context.index`.
    #[must_use]
    pub fn enumerate(self) -> Self {
        Query::new(
            self.tuples
                .into_iter()
                .enumerate()
                .map(|(i, mut t)| {
                    t.context.index = Some(i);
                    t
                })
                .collect(),
        )
    }

    /// Drop all context, keeping only the values.
    #[must_use]
    pub fn args(self) -> Self {
        Self::from_values(self.to_vec())
    }

    /// Keep tuples whose value satisfies `pred`.
    #[must_use]
    pub fn filter<F>(self, mut pred: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.filter_with_context(move |value, _| pred(value))
    }

    /// Keep tuples for which `pred(value, context)` holds.
    #[must_use]
    pub fn filter_with_context<F>(self, mut pred: F) -> Self
    where
        F: FnMut(&T, &Context) -> bool,
    {
        Query::new(
            self.tuples
                .into_iter()
                .filter(|t| pred(&t.value, &t.context))
                .collect(),
        )
    }

    // ---- terminal ----

    /// The values in order.
    #[must_use]
    pub fn to_vec(self) -> Vec<T> {
        self.tuples.into_iter().map(|t| t.value).collect()
    }

    /// Collapse `(value, key)` tuples into a map. Later keys overwrite earlier
    /// ones; a tuple without a key is stored under [`Key::Null`].
    #[must_use]
    pub fn from_pairs(self) -> BTreeMap<Key, T> {
        let mut out = BTreeMap::new();
        for t in self.tuples {
            let (value, context) = t.into_parts();
            out.insert(context.key.unwrap_or(Key::Null), value);
        }
        out
    }

    #[must_use]
    pub fn first(self) -> Option<T> {
        self.tuples.into_iter().next().map(|t| t.value)
    }

    #[must_use]
    pub fn last(self) -> Option<T> {
        self.tuples.into_iter().next_back().map(|t| t.value)
    }
}

impl<T, K: Into<Key>> Query<(T, K)> {
    /// Turn `(value, key)` pair values back into tuples: the first element
    /// becomes the value and the second becomes `context.key`.
    #[must_use]
    pub fn spread(self) -> Query<T> {
        Query::new(
            self.tuples
                .into_iter()
                .map(|t| {
                    let ((value, key), mut context) = t.into_parts();
                    context.key = Some(key.into());
                    Tuple::with_context(value, context)
                })
                .collect(),
        )
    }
}

impl<T: Record> Query<T> {
    /// Keep rows where every field of `predicate` equals the row's field.
    ///
    /// Fields compare as [`Key`]s, the same equality grouping and indexing
    /// use, so `1` matches `1.0`. A row missing one of the fields is
    /// excluded. A predicate that is not a JSON object imposes no constraint.
    ///
    /// ```
    /// use ironquery::*;
    /// use serde_json::json;
    ///
    /// let rows = vec![json!({"a": 1}), json!({"a": 2}), json!({"b": 1})];
    /// assert_eq!(wrap(rows).where_eq(&json!({"a": 1.0})).to_vec(), vec![json!({"a": 1})]);
    /// ```
    #[must_use]
    pub fn where_eq(self, predicate: &Value) -> Self {
        let Some(fields) = predicate.as_object() else {
            return self;
        };
        let expected: Vec<(&str, Key)> = fields
            .iter()
            .map(|(name, value)| (name.as_str(), Key::from(value)))
            .collect();
        self.filter(|row| {
            expected
                .iter()
                .all(|(name, key)| row.field(name).is_some_and(|v| Key::from(v) == *key))
        })
    }

    /// Keep rows that exist, or whose named columns all hold a value.
    ///
    /// ```
    /// use ironquery::*;
    /// use serde_json::{json, Value};
    ///
    /// let rows = vec![json!({"a": 1}), Value::Null, json!({"a": null}), json!({"b": 2})];
    /// assert_eq!(wrap(rows.clone()).exists(Columns::Any).len(), 3);
    /// assert_eq!(wrap(rows).exists("a").to_vec(), vec![json!({"a": 1})]);
    /// ```
    #[must_use]
    pub fn exists(self, columns: impl Into<Columns>) -> Self {
        match columns.into() {
            Columns::Any => self.filter(|row| !row.is_null()),
            Columns::Named(names) => self.filter(|row| {
                names.iter().all(|name| match row.field(name) {
                    None | Some(Value::Null) => false,
                    Some(v) => !v.as_f64().is_some_and(f64::is_nan),
                })
            }),
        }
    }
}

impl Query<Value> {
    /// Like [`from_pairs`](Query::from_pairs), but builds a JSON object whose
    /// property names are the keys' display form.
    #[must_use]
    pub fn from_pairs_record(self) -> Map<String, Value> {
        let mut out = Map::new();
        for t in self.tuples {
            let (value, context) = t.into_parts();
            out.insert(context.key_or_null().to_string(), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerate_overwrites_previous_index() {
        let q = Query::from_values(vec!['a', 'b', 'c'])
            .enumerate()
            .filter(|c| *c != 'a')
            .enumerate();
        let indices: Vec<_> = q.tuples().iter().map(|t| t.context.index).collect();
        assert_eq!(indices, vec![Some(0), Some(1)]);
    }

    #[test]
    fn args_clears_context() {
        let q = Query::new(vec![Tuple::with_context(1, Context::keyed("k"))]).args();
        assert_eq!(q.tuples()[0].context, Context::default());
    }

    #[test]
    fn spread_moves_second_element_into_key() {
        let q = Query::from_values(vec![(10, "x"), (20, "y")]).spread();
        assert_eq!(q.clone().to_vec(), vec![10, 20]);
        assert_eq!(q.tuples()[1].context.key, Some(Key::from("y")));
    }
}
