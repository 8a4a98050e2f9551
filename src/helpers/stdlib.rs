//! Entry constructors: build a [`Query`] from native Rust and JSON data.
//!
//! ### Overview
//! - [`wrap`] -- any `IntoIterator`, or an existing `Query` (returned unchanged).
//! - [`wrap_value`] -- a JSON array.
//! - [`from_tuples`] -- a raw JSON tuple list `[[value, key?, ordinal?], ...]`.
//! - [`pairs_of`] -- a JSON object (or array) as `(value, key)` tuples.
//! - [`pairs_of_map`] -- any `(key, value)` iterator, e.g. a `HashMap` or `BTreeMap`.
//! - [`first_of`] / [`last_of`] -- first and last element of any iterable.
//!
//! ### Example
//! ```
//! use ironquery::*;
//! use serde_json::json;
//!
//! let doubled = wrap(vec![1, 2, 3]).map(|x| x * 2).to_vec();
//! assert_eq!(doubled, vec![2, 4, 6]);
//!
//! let record = pairs_of(json!({"x": 1, "y": 2}))?.from_pairs_record();
//! assert_eq!(serde_json::Value::Object(record), json!({"x": 1, "y": 2}));
//! # Ok::<(), QueryError>(())
//! ```

use crate::error::{QueryError, Result};
use crate::key::Key;
use crate::query::Query;
use crate::tuple::{Context, Tuple};
use serde_json::Value;

/// Conversion into a [`Query`].
///
/// Implemented for every `IntoIterator` and for `Query` itself, so [`wrap`]
/// accepts plain collections and already-wrapped queries alike.
pub trait IntoQuery<T> {
    fn into_query(self) -> Query<T>;
}

impl<T> IntoQuery<T> for Query<T> {
    fn into_query(self) -> Query<T> {
        self
    }
}

impl<T, I> IntoQuery<T> for I
where
    I: IntoIterator<Item = T>,
{
    fn into_query(self) -> Query<T> {
        Query::from_values(self.into_iter().collect())
    }
}

/// Wrap a source into a [`Query`], one tuple per element.
///
/// ```
/// use ironquery::*;
///
/// let q = wrap(1..=3);
/// let same = wrap(q.clone());
/// assert_eq!(q, same);
/// ```
pub fn wrap<T, S: IntoQuery<T>>(source: S) -> Query<T> {
    source.into_query()
}

/// Wrap a JSON array.
///
/// # Errors
/// [`QueryError::Construction`] when `source` is not an array.
pub fn wrap_value(source: Value) -> Result<Query<Value>> {
    match source {
        Value::Array(items) => Ok(Query::from_values(items)),
        other => Err(QueryError::Construction(format!(
            "expecting an array, not: {other}"
        ))),
    }
}

/// Build a query from a raw tuple list.
///
/// Each element must be a non-empty array `[value]`, `[value, key]` or
/// `[value, key, ordinal]`.
///
/// # Errors
/// [`QueryError::Construction`] when `source` is not an array of such tuples.
///
/// ```
/// use ironquery::*;
/// use serde_json::json;
///
/// let q = from_tuples(json!([["a", "k1"], ["b", "k2"]]))?;
/// assert_eq!(q.from_pairs_record()["k2"], json!("b"));
/// assert!(from_tuples(json!([1, 2])).is_err());
/// # Ok::<(), QueryError>(())
/// ```
pub fn from_tuples(source: Value) -> Result<Query<Value>> {
    let items = match source {
        Value::Array(items) => items,
        other => {
            return Err(QueryError::Construction(format!(
                "expecting an array of tuples, not: {other}"
            )));
        }
    };
    let tuples = items
        .into_iter()
        .map(tuple_from_value)
        .collect::<Result<Vec<_>>>()?;
    Ok(Query::new(tuples))
}

fn tuple_from_value(item: Value) -> Result<Tuple<Value>> {
    let not_a_tuple = |item: &Value| {
        QueryError::Construction(format!(
            "expecting a tuple [value, key?, ordinal?], not: {item}"
        ))
    };
    let parts = match item {
        Value::Array(parts) if (1..=3).contains(&parts.len()) => parts,
        other => return Err(not_a_tuple(&other)),
    };
    let ordinal = match parts.get(2) {
        None => None,
        Some(v) => Some(
            v.as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| not_a_tuple(&Value::Array(parts.clone())))?,
        ),
    };
    let mut parts = parts.into_iter();
    let value = parts.next().unwrap_or(Value::Null);
    let key = parts.next().map(Key::from);
    Ok(Tuple::with_context(
        value,
        Context {
            key,
            ordinal,
            index: None,
        },
    ))
}

/// Turn a JSON object into `(value, key)` tuples, in property order. Arrays
/// are accepted too and keyed by position.
///
/// # Errors
/// [`QueryError::Construction`] for any other value.
pub fn pairs_of(source: Value) -> Result<Query<Value>> {
    match source {
        Value::Object(fields) => Ok(Query::new(
            fields
                .into_iter()
                .map(|(k, v)| Tuple::with_context(v, Context::keyed(k)))
                .collect(),
        )),
        Value::Array(items) => Ok(pairs_of_map(items.into_iter().enumerate())),
        other => Err(QueryError::Construction(format!(
            "expecting an object, not: {other}"
        ))),
    }
}

/// Turn `(key, value)` entries into `(value, key)` tuples.
///
/// ```
/// use ironquery::*;
/// use std::collections::BTreeMap;
///
/// let m = BTreeMap::from([("a", 1), ("b", 2)]);
/// let back = pairs_of_map(m).map(|v| v * 10).from_pairs();
/// assert_eq!(back[&Key::from("b")], 20);
/// ```
pub fn pairs_of_map<K, V, I>(source: I) -> Query<V>
where
    K: Into<Key>,
    I: IntoIterator<Item = (K, V)>,
{
    Query::new(
        source
            .into_iter()
            .map(|(k, v)| Tuple::with_context(v, Context::keyed(k)))
            .collect(),
    )
}

/// First element of any iterable, or `None` when empty.
pub fn first_of<I: IntoIterator>(source: I) -> Option<I::Item> {
    source.into_iter().next()
}

/// Last element of any iterable, or `None` when empty.
pub fn last_of<I: IntoIterator>(source: I) -> Option<I::Item> {
    source.into_iter().last()
}
