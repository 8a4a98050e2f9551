//! Group engine: partition a query by one key or by several.
//!
//! Both paths number groups in the order their keys are first seen, starting
//! at 0, and keep members in first-seen order within each group.
//!
//! - [`Query::group_by`] / [`Query::group_by_fn`] -- one key, result stays chainable
//!   as a `Query<Vec<T>>` whose context carries `key` and `ordinal`.
//! - [`Query::group_by_columns`] -- several keys combined into a composite key,
//!   result is a plain `Vec<Group<T>>`.
//!
//! ```
//! use ironquery::*;
//! use serde_json::json;
//!
//! let rows = vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 1})];
//! let groups = wrap(rows).group_by("a").groups();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].key, Key::from(1));
//! assert_eq!(groups[0].members.len(), 2);
//! assert_eq!(groups[1].ordinal, 1);
//! ```

use crate::helpers::stdlib::wrap;
use crate::key::Key;
use crate::query::Query;
use crate::record::Record;
use crate::selector::{Selector, SelectorFn};
use crate::tuple::{Context, Tuple};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::trace;

/// One group: its members, its key and the rank of the key's first appearance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Group<T> {
    pub members: Vec<T>,
    pub key: Key,
    pub ordinal: usize,
}

/// One requested grouping key for [`Query::group_by_columns`].
pub enum KeySpec<T> {
    /// Group on a field; the composite key uses the field name.
    Column(String),
    /// Group on computed values; each pair is `(name in the composite key, selector)`.
    Named(Vec<(String, Selector<T>)>),
}

impl<T> KeySpec<T> {
    pub fn named<I, N, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<Selector<T>>,
    {
        KeySpec::Named(
            pairs
                .into_iter()
                .map(|(name, selector)| (name.into(), selector.into()))
                .collect(),
        )
    }
}

impl<T> Clone for KeySpec<T> {
    fn clone(&self) -> Self {
        match self {
            KeySpec::Column(name) => KeySpec::Column(name.clone()),
            KeySpec::Named(pairs) => KeySpec::Named(pairs.clone()),
        }
    }
}

impl<T> From<&str> for KeySpec<T> {
    fn from(name: &str) -> Self {
        KeySpec::Column(name.to_string())
    }
}

impl<T> From<String> for KeySpec<T> {
    fn from(name: String) -> Self {
        KeySpec::Column(name)
    }
}

/// Accumulates groups in first-seen order.
struct Grouper<T> {
    slots: HashMap<Key, usize>,
    groups: Vec<(Vec<T>, Key)>,
}

impl<T> Grouper<T> {
    fn new() -> Self {
        Self {
            slots: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn push(&mut self, key: Key, member: T) {
        match self.slots.entry(key) {
            Entry::Occupied(slot) => self.groups[*slot.get()].0.push(member),
            Entry::Vacant(slot) => {
                let key = slot.key().clone();
                slot.insert(self.groups.len());
                self.groups.push((vec![member], key));
            }
        }
    }

    fn finish(self) -> impl Iterator<Item = Group<T>> {
        self.groups
            .into_iter()
            .enumerate()
            .map(|(ordinal, (members, key))| Group {
                members,
                key,
                ordinal,
            })
    }
}

impl<T> Query<T> {
    /// Group by a computed key. `f` receives the row, its context and its
    /// position in the current sequence.
    pub fn group_by_fn<K, F>(self, mut f: F) -> Query<Vec<T>>
    where
        K: Into<Key>,
        F: FnMut(&T, &Context, usize) -> K,
    {
        self.group_with(move |row, ctx, pos| f(row, ctx, pos).into())
    }

    fn group_with<F>(self, mut key_of: F) -> Query<Vec<T>>
    where
        F: FnMut(&T, &Context, usize) -> Key,
    {
        let rows = self.len();
        let mut grouper = Grouper::new();
        for (pos, t) in self.into_tuples().into_iter().enumerate() {
            let key = key_of(&t.value, &t.context, pos);
            grouper.push(key, t.value);
        }
        let out: Vec<Tuple<Vec<T>>> = grouper
            .finish()
            .map(|g| Tuple::with_context(g.members, Context::grouped(g.key, g.ordinal)))
            .collect();
        trace!(rows, groups = out.len(), "single-key group");
        Query::new(out)
    }
}

impl<T: Record + 'static> Query<T> {
    /// Group by one column or selector.
    pub fn group_by(self, selector: impl Into<Selector<T>>) -> Query<Vec<T>> {
        let key_of = selector.into().resolve();
        self.group_with(move |row, ctx, pos| key_of(row, ctx, pos))
    }

    /// Group by several keys at once.
    ///
    /// Keys are sorted by name before the composite key is built, so the
    /// request order does not matter. The result is not re-wrapped; pass it
    /// to [`wrap`] to keep chaining.
    ///
    /// ```
    /// use ironquery::*;
    /// use serde_json::json;
    ///
    /// let rows = vec![
    ///     json!({"a": 1, "b": "x"}),
    ///     json!({"a": 1, "b": "y"}),
    ///     json!({"a": 1, "b": "x"}),
    /// ];
    /// let groups = wrap(rows).group_by_columns(["b", "a"]);
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0].key, Key::from(&json!({"a": 1, "b": "x"})));
    /// ```
    pub fn group_by_columns<I, S>(self, specs: I) -> Vec<Group<T>>
    where
        I: IntoIterator<Item = S>,
        S: Into<KeySpec<T>>,
    {
        let specs: Vec<KeySpec<T>> = specs.into_iter().map(Into::into).collect();
        let table: Vec<(SelectorFn<T>, String)> = wrap(specs)
            .map(|spec| match spec.clone() {
                KeySpec::Column(name) => vec![(Selector::Column(name.clone()).resolve(), name)],
                KeySpec::Named(pairs) => pairs
                    .into_iter()
                    .map(|(name, selector)| (selector.resolve(), name))
                    .collect(),
            })
            .flatten()
            .sort_by_key(|(_, name)| name.clone())
            .spread()
            .into_tuples()
            .into_iter()
            .map(|t| {
                let (selector, context) = t.into_parts();
                let name = context.key.and_then(|k| k.as_str().map(str::to_string));
                (selector, name.unwrap_or_default())
            })
            .collect();

        let rows = self.len();
        let mut grouper = Grouper::new();
        for (pos, t) in self.into_tuples().into_iter().enumerate() {
            let key = Key::Composite(
                table
                    .iter()
                    .map(|(selector, name)| {
                        (name.clone(), selector(&t.value, &t.context, pos))
                    })
                    .collect(),
            );
            grouper.push(key, t.value);
        }
        let groups: Vec<Group<T>> = grouper.finish().collect();
        trace!(rows, keys = table.len(), groups = groups.len(), "multi-key group");
        groups
    }
}

impl<T> Query<Vec<T>> {
    /// Read `(members, key, ordinal)` tuples back into [`Group`]s.
    ///
    /// Tuples without an ordinal are numbered by position.
    #[must_use]
    pub fn groups(self) -> Vec<Group<T>> {
        self.into_tuples()
            .into_iter()
            .enumerate()
            .map(|(pos, t)| {
                let (members, context) = t.into_parts();
                Group {
                    members,
                    ordinal: context.ordinal.unwrap_or(pos),
                    key: context.key.unwrap_or(Key::Null),
                }
            })
            .collect()
    }
}
