//! Equi-join of JSON record lists, built on the group engine.
//!
//! The right side is grouped on its join column and collapsed into a lookup
//! map; every left row is then merged with each right row in its group. Output
//! order is left rows in order, and within one left row, its matches in the
//! order they appeared on the right.
//!
//! By default a left row with no match is an error
//! ([`QueryError::Lookup`]); [`JoinConfig`] selects an inner or left join
//! instead.
//!
//! ```
//! use ironquery::*;
//! use serde_json::json;
//!
//! let users = vec![json!({"uid": 1, "name": "ann"})];
//! let orders = vec![json!({"user": 1, "item": "pen"}), json!({"user": 1, "item": "ink"})];
//!
//! let rows = join(users, "uid", orders, "user")?;
//! assert_eq!(rows, vec![
//!     json!({"user": 1, "item": "pen", "uid": 1, "name": "ann"}),
//!     json!({"user": 1, "item": "ink", "uid": 1, "name": "ann"}),
//! ]);
//! # Ok::<(), QueryError>(())
//! ```

use crate::config::{JoinConfig, Precedence, Unmatched};
use crate::error::{QueryError, Result};
use crate::helpers::stdlib::wrap;
use crate::query::Query;
use crate::record::Record;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Join with the default (strict) configuration.
///
/// # Errors
/// [`QueryError::Lookup`] for the first left row without a matching right row.
pub fn join<A, B>(list_a: A, prop_a: &str, list_b: B, prop_b: &str) -> Result<Vec<Value>>
where
    A: IntoIterator<Item = Value>,
    B: IntoIterator<Item = Value>,
{
    join_with(list_a, prop_a, list_b, prop_b, &JoinConfig::default())
}

/// Join with an explicit [`JoinConfig`].
///
/// # Errors
/// [`QueryError::Lookup`] when `config.unmatched` is [`Unmatched::Fail`] and a
/// left row has no match.
pub fn join_with<A, B>(
    list_a: A,
    prop_a: &str,
    list_b: B,
    prop_b: &str,
    config: &JoinConfig,
) -> Result<Vec<Value>>
where
    A: IntoIterator<Item = Value>,
    B: IntoIterator<Item = Value>,
{
    let lookup = wrap(list_b).group_by(prop_b).from_pairs();
    let mut out = Vec::new();
    let mut unmatched = 0usize;
    for row_a in list_a {
        let key = row_a.key_of(prop_a);
        match lookup.get(&key) {
            Some(rows_b) => {
                out.extend(
                    rows_b
                        .iter()
                        .map(|row_b| merge(&row_a, row_b, config.precedence)),
                );
            }
            None => match config.unmatched {
                Unmatched::Fail => {
                    debug!(column = prop_a, key = %key, "join lookup failed");
                    return Err(QueryError::Lookup {
                        column: prop_a.to_string(),
                        key,
                    });
                }
                Unmatched::Skip => unmatched += 1,
                Unmatched::Keep => {
                    unmatched += 1;
                    out.push(row_a);
                }
            },
        }
    }
    trace!(
        right_keys = lookup.len(),
        rows = out.len(),
        unmatched,
        "joined"
    );
    Ok(out)
}

/// Merge two rows into one object. Non-object rows contribute no fields.
fn merge(row_a: &Value, row_b: &Value, precedence: Precedence) -> Value {
    let (first, second) = match precedence {
        Precedence::Left => (row_b, row_a),
        Precedence::Right => (row_a, row_b),
    };
    let mut fields = Map::new();
    for row in [first, second] {
        if let Some(obj) = row.as_object() {
            fields.extend(obj.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    Value::Object(fields)
}

impl Query<Value> {
    /// Chainable [`join`]: this query is the left side.
    ///
    /// # Errors
    /// See [`join`].
    pub fn join<B>(self, prop_a: &str, list_b: B, prop_b: &str) -> Result<Query<Value>>
    where
        B: IntoIterator<Item = Value>,
    {
        self.join_with(prop_a, list_b, prop_b, &JoinConfig::default())
    }

    /// Chainable [`join_with`].
    ///
    /// # Errors
    /// See [`join_with`].
    pub fn join_with<B>(
        self,
        prop_a: &str,
        list_b: B,
        prop_b: &str,
        config: &JoinConfig,
    ) -> Result<Query<Value>>
    where
        B: IntoIterator<Item = Value>,
    {
        join_with(self.to_vec(), prop_a, list_b, prop_b, config).map(Query::from_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn right_precedence_keeps_right_fields() {
        let a = json!({"k": 1, "v": "left"});
        let b = json!({"k": 1, "v": "right"});
        assert_eq!(merge(&a, &b, Precedence::Left)["v"], json!("left"));
        assert_eq!(merge(&a, &b, Precedence::Right)["v"], json!("right"));
    }

    #[test]
    fn non_object_rows_contribute_nothing() {
        let merged = merge(&json!({"a": 1}), &json!(7), Precedence::Left);
        assert_eq!(merged, json!({"a": 1}));
    }
}
