//! Assertion functions for query outputs and the group/index laws.

use crate::group::Group;
use crate::key::Key;
use crate::query::Query;
use crate::record::Record;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics if the collections differ in length or content.
///
/// # Example
///
/// ```
/// use ironquery::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
}

/// Assert that two collections hold the same elements, counting repeats,
/// in any order.
///
/// Only `PartialEq` is required, so JSON values can be compared.
///
/// # Panics
///
/// Panics if an element is missing or extra.
///
/// # Example
///
/// ```
/// use ironquery::testing::assert_collections_unordered_equal;
/// use serde_json::json;
///
/// assert_collections_unordered_equal(&[json!(2), json!(1)], &[json!(1), json!(2)]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );

    let mut unused: Vec<&T> = expected.iter().collect();
    for item in actual {
        match unused.iter().position(|e| *e == item) {
            Some(pos) => {
                unused.swap_remove(pos);
            }
            None => panic!(
                "Unexpected element: {item:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
            ),
        }
    }
}

/// Assert a query's values, in order, without consuming it.
///
/// # Panics
///
/// Panics if the values differ from `expected`.
pub fn assert_query_values<T: Debug + PartialEq>(query: &Query<T>, expected: &[T]) {
    let actual: Vec<&T> = query.values().collect();
    let expected: Vec<&T> = expected.iter().collect();
    assert_collections_equal(&actual, &expected);
}

/// Assert that all elements satisfy a predicate.
///
/// # Panics
///
/// Panics at the first element failing the predicate.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}"
        );
    }
}

/// Assert that `groups` partition `input`: group sizes add up to the input
/// length and every input element lands in exactly one group.
///
/// # Panics
///
/// Panics if the groups lose, duplicate or invent elements, or if a group is
/// empty.
pub fn assert_group_partition<T: Debug + PartialEq>(input: &[T], groups: &[Group<T>]) {
    let total: usize = groups.iter().map(|g| g.members.len()).sum();
    assert_eq!(
        total,
        input.len(),
        "Group sizes add up to {total}, input has {} rows",
        input.len()
    );
    for g in groups {
        assert!(!g.members.is_empty(), "Empty group for key {}", g.key);
    }
    let members: Vec<&T> = groups.iter().flat_map(|g| g.members.iter()).collect();
    let input: Vec<&T> = input.iter().collect();
    assert_collections_unordered_equal(&members, &input);
}

/// Assert that group ordinals are `0, 1, 2, ...` in output order and that no
/// key repeats.
///
/// # Panics
///
/// Panics on the first out-of-place ordinal or repeated key.
pub fn assert_first_seen_ordinals<T>(groups: &[Group<T>]) {
    for (i, g) in groups.iter().enumerate() {
        assert_eq!(g.ordinal, i, "Group {} has ordinal {}", g.key, g.ordinal);
        assert!(
            !groups[..i].iter().any(|earlier| earlier.key == g.key),
            "Key {} appears in more than one group",
            g.key
        );
    }
}

/// Assert that `index` maps each row's `column` key to that row, and holds
/// nothing else.
///
/// # Panics
///
/// Panics if sizes differ or a row is not stored under its own key.
pub fn assert_index_bijection<T>(rows: &[T], index: &BTreeMap<Key, T>, column: &str)
where
    T: Debug + PartialEq + Record,
{
    assert_eq!(
        index.len(),
        rows.len(),
        "Index has {} entries for {} rows",
        index.len(),
        rows.len()
    );
    for row in rows {
        let key = row.key_of(column);
        assert_eq!(
            index.get(&key),
            Some(row),
            "Row not stored under its key {key}"
        );
    }
}
