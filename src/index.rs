//! Unique index: a key -> row map that refuses duplicate keys.

use crate::error::{QueryError, Result};
use crate::key::Key;
use crate::query::Query;
use crate::record::Record;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{debug, trace};

impl<T: Record> Query<T> {
    /// Index rows on `column`.
    ///
    /// # Errors
    /// Returns [`QueryError::Uniqueness`] as soon as a second row carries a key
    /// already seen; no partial index is returned.
    ///
    /// ```
    /// use ironquery::*;
    /// use serde_json::json;
    ///
    /// let rows = vec![json!({"id": 1, "v": "a"}), json!({"id": 2, "v": "b"})];
    /// let idx = wrap(rows).index("id")?;
    /// assert_eq!(idx[&Key::from(2)], json!({"id": 2, "v": "b"}));
    ///
    /// let dup = vec![json!({"id": 1, "v": "a"}), json!({"id": 1, "v": "b"})];
    /// assert!(matches!(wrap(dup).index("id"), Err(QueryError::Uniqueness { .. })));
    /// # Ok::<(), QueryError>(())
    /// ```
    pub fn index(self, column: &str) -> Result<BTreeMap<Key, T>> {
        let mut out = BTreeMap::new();
        for row in self.to_vec() {
            match out.entry(row.key_of(column)) {
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
                Entry::Occupied(slot) => {
                    debug!(column, key = %slot.key(), "duplicate index key");
                    return Err(QueryError::Uniqueness {
                        column: column.to_string(),
                        key: slot.key().clone(),
                    });
                }
            }
        }
        trace!(column, rows = out.len(), "built unique index");
        Ok(out)
    }
}
