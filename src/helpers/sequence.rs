//! Bulk sequence primitives lifted into chain steps.
//!
//! Every method here materializes the query to a plain `Vec`, runs a
//! `Vec -> Vec` function over it and wraps the result again, so context from
//! earlier steps is dropped. [`Query::lift`] is the general form; the rest are
//! the common primitives built on it.
//!
//! ## Provided methods
//! - [`lift`](Query::lift) -- apply any `Vec<T> -> Vec<U>` function
//! - [`chunk`](Query::chunk), [`flatten`](Query::flatten)
//! - [`unzip`](Query::unzip) / [`zip`](Query::zip)
//! - [`sort`](Query::sort), [`sort_by`](Query::sort_by), [`sort_by_key`](Query::sort_by_key)
//! - [`limit`](Query::limit), [`append`](Query::append), [`reverse`](Query::reverse)
//!
//! ## Example
//! ```
//! use ironquery::*;
//!
//! let out = wrap(vec![5, 3, 1, 4, 2])
//!     .sort()
//!     .chunk(2)
//!     .map(|pair| pair.iter().sum::<i32>())
//!     .reverse()
//!     .to_vec();
//! assert_eq!(out, vec![5, 7, 3]);
//! ```

use crate::key::Key;
use crate::query::Query;
use crate::record::Record;
use crate::selector::{Selector, SelectorFn};
use crate::tuple::Context;

/// Split into consecutive chunks of `size`; a size of 0 yields nothing.
pub(crate) fn chunk_vec<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(items.len().div_ceil(size));
    let mut current = Vec::with_capacity(size);
    for item in items {
        current.push(item);
        if current.len() == size {
            out.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Regroup rows by position: output row `i` holds element `i` of every input
/// row, up to the longest row; short rows contribute `None`.
pub(crate) fn unzip_vec<T: Clone>(rows: &[Vec<T>]) -> Vec<Vec<Option<T>>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|i| rows.iter().map(|row| row.get(i).cloned()).collect())
        .collect()
}

/// Stable ascending sort on the selectors' keys, compared in turn.
pub(crate) fn sort_with<T>(items: Vec<T>, selectors: &[SelectorFn<T>]) -> Vec<T> {
    let ctx = Context::default();
    let mut keyed: Vec<(Vec<Key>, T)> = items
        .into_iter()
        .enumerate()
        .map(|(pos, item)| {
            let keys = selectors.iter().map(|s| s(&item, &ctx, pos)).collect();
            (keys, item)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}

impl<T> Query<T> {
    /// Run a plain `Vec -> Vec` function as a chain step.
    ///
    /// ```
    /// use ironquery::*;
    ///
    /// let evens = wrap(1..=6).lift(|v| v.into_iter().filter(|n| n % 2 == 0).collect());
    /// assert_eq!(evens.to_vec(), vec![2, 4, 6]);
    /// ```
    pub fn lift<U, F>(self, f: F) -> Query<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        Query::from_values(f(self.to_vec()))
    }

    /// Consecutive chunks of `size` values; the last may be shorter.
    pub fn chunk(self, size: usize) -> Query<Vec<T>> {
        self.lift(|items| chunk_vec(items, size))
    }

    /// The first `n` values.
    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        self.lift(|items| items.into_iter().take(n).collect())
    }

    /// Add one value at the end.
    #[must_use]
    pub fn append(self, value: T) -> Self {
        self.lift(|mut items| {
            items.push(value);
            items
        })
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.lift(|mut items| {
            items.reverse();
            items
        })
    }

    /// Stable sort by a computed key.
    #[must_use]
    pub fn sort_by_key<K, F>(self, f: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.lift(|mut items| {
            items.sort_by_key(f);
            items
        })
    }
}

impl<T: Ord> Query<T> {
    /// Stable ascending sort of the values themselves.
    #[must_use]
    pub fn sort(self) -> Self {
        self.lift(|mut items| {
            items.sort();
            items
        })
    }
}

impl<T: Record + 'static> Query<T> {
    /// Stable ascending sort on a column or selector; missing values sort last.
    #[must_use]
    pub fn sort_by(self, selector: impl Into<Selector<T>>) -> Self {
        let selectors = [selector.into().resolve()];
        self.lift(|items| sort_with(items, &selectors))
    }
}

impl<T> Query<Vec<T>> {
    /// Splice nested values one level deep.
    pub fn flatten(self) -> Query<T> {
        self.lift(|rows| rows.into_iter().flatten().collect())
    }
}

impl<T: Clone> Query<Vec<T>> {
    /// Transpose rows into columns, padding short rows with `None`.
    ///
    /// ```
    /// use ironquery::*;
    ///
    /// let cols = wrap(vec![vec![1, 2], vec![3]]).unzip().to_vec();
    /// assert_eq!(cols, vec![vec![Some(1), Some(3)], vec![Some(2), None]]);
    /// ```
    pub fn unzip(self) -> Query<Vec<Option<T>>> {
        self.lift(|rows| unzip_vec(&rows))
    }

    /// Same as [`unzip`](Query::unzip).
    pub fn zip(self) -> Query<Vec<Option<T>>> {
        self.unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_handles_remainder_and_zero() {
        assert_eq!(
            chunk_vec(vec![1, 2, 3, 4, 5], 2),
            vec![vec![1, 2], vec![3, 4], vec![5]]
        );
        assert!(chunk_vec(vec![1, 2], 0).is_empty());
        assert!(chunk_vec(Vec::<u8>::new(), 3).is_empty());
    }

    #[test]
    fn unzip_pads_short_rows() {
        let rows = vec![vec!['a', 'b', 'c'], vec!['d']];
        assert_eq!(
            unzip_vec(&rows),
            vec![
                vec![Some('a'), Some('d')],
                vec![Some('b'), None],
                vec![Some('c'), None],
            ]
        );
    }

    #[test]
    fn sort_with_is_stable() {
        let items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        let by_first: SelectorFn<(i32, char)> =
            std::sync::Arc::new(|t: &(i32, char), _: &Context, _: usize| Key::from(t.0));
        let out = sort_with(items, &[by_first]);
        assert_eq!(out, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }
}
