//! Named operations over JSON rows, dispatched by [`Query::apply`].
//!
//! Each entry lifts a plain `Vec<Value> -> Vec<Value>` function into a chain
//! step: the query is materialized, the function runs over the values and the
//! result is wrapped again with empty context. The table is fixed at compile
//! time; use [`operations`] to list it.
//!
//! | name | arguments | result |
//! |------|-----------|--------|
//! | `flatten` | | arrays spliced one level |
//! | `chunk` | `size = 1` | arrays of `size` values |
//! | `unzip`, `zip` | | columns of array rows, padded with null |
//! | `sortBy`, `sort` | columns or selectors | stable ascending sort |
//! | `limit` | `n = 1` | first `n` values |
//! | `join` | `prop_a, list_b, prop_b` | merged rows |
//! | `append` | `value` | one extra value at the end |
//! | `reverse` | | reversed order |
//!
//! ```
//! use ironquery::*;
//! use serde_json::json;
//!
//! let q = wrap_value(json!([[1, 2], 3, [4]]))?;
//! let out = q.apply("flatten", &[])?.apply("chunk", &[2.into()])?.to_vec();
//! assert_eq!(out, vec![json!([1, 2]), json!([3, 4])]);
//!
//! assert!(matches!(
//!     wrap_value(json!([]))?.apply("shuffle", &[]),
//!     Err(QueryError::UnknownOperation(_))
//! ));
//! # Ok::<(), QueryError>(())
//! ```

use crate::error::{QueryError, Result};
use crate::helpers::sequence::{chunk_vec, sort_with, unzip_vec};
use crate::join::join;
use crate::key::Key;
use crate::query::Query;
use crate::selector::{Selector, SelectorFn};
use crate::tuple::Context;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Signature of a registered operation.
pub type LiftedFn = fn(Vec<Value>, &[Arg]) -> Result<Vec<Value>>;

/// One argument passed through [`Query::apply`].
#[derive(Clone, Debug)]
pub enum Arg {
    Value(Value),
    /// A function selector, for `sortBy`.
    Selector(Selector<Value>),
}

impl Arg {
    fn as_value(&self) -> Option<&Value> {
        match self {
            Arg::Value(v) => Some(v),
            Arg::Selector(_) => None,
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Value(Value::from(s))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Value(Value::String(s))
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Value(Value::from(n))
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Value(Value::from(n))
    }
}

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        Arg::Value(Value::from(n))
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg::Value(Value::Bool(b))
    }
}

impl From<Vec<Value>> for Arg {
    fn from(items: Vec<Value>) -> Self {
        Arg::Value(Value::Array(items))
    }
}

impl From<Selector<Value>> for Arg {
    fn from(s: Selector<Value>) -> Self {
        Arg::Selector(s)
    }
}

/// A registry entry.
#[derive(Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub summary: &'static str,
    pub func: LiftedFn,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// Every registered operation, in documentation order.
pub static OPERATIONS: &[Operation] = &[
    Operation {
        name: "flatten",
        summary: "splice array values one level deep",
        func: flatten,
    },
    Operation {
        name: "chunk",
        summary: "split into arrays of `size` values (default 1)",
        func: chunk,
    },
    Operation {
        name: "unzip",
        summary: "regroup array values by position, padding with null",
        func: unzip,
    },
    Operation {
        name: "zip",
        summary: "alias of unzip",
        func: unzip,
    },
    Operation {
        name: "sortBy",
        summary: "stable ascending sort by columns or selectors",
        func: sort_by,
    },
    Operation {
        name: "sort",
        summary: "alias of sortBy",
        func: sort_by,
    },
    Operation {
        name: "limit",
        summary: "keep the first `n` values (default 1)",
        func: limit,
    },
    Operation {
        name: "join",
        summary: "equi-join with a second row list: prop_a, list_b, prop_b",
        func: join_op,
    },
    Operation {
        name: "append",
        summary: "add one value at the end",
        func: append,
    },
    Operation {
        name: "reverse",
        summary: "reverse the order",
        func: reverse,
    },
];

/// Find an operation by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

#[must_use]
pub fn operations() -> &'static [Operation] {
    OPERATIONS
}

/// Registered names, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    OPERATIONS.iter().map(|op| op.name)
}

impl Query<Value> {
    /// Run a registered operation by name.
    ///
    /// # Errors
    /// [`QueryError::UnknownOperation`] for an unregistered name, or whatever
    /// the operation itself returns.
    pub fn apply(self, name: &str, args: &[Arg]) -> Result<Query<Value>> {
        let op = lookup(name)
            .ok_or_else(|| QueryError::UnknownOperation(name.to_string()))?;
        let rows = self.len();
        let out = (op.func)(self.to_vec(), args)?;
        debug!(
            operation = op.name,
            args = args.len(),
            rows,
            out = out.len(),
            "applied"
        );
        Ok(Query::from_values(out))
    }
}

/// Optional integer argument at `pos`; null or absent means `default`.
fn int_arg(operation: &str, args: &[Arg], pos: usize, default: i64) -> Result<i64> {
    match args.get(pos) {
        None => Ok(default),
        Some(Arg::Value(Value::Null)) => Ok(default),
        Some(Arg::Value(v)) => v
            .as_i64()
            .or_else(|| v.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| {
                QueryError::invalid_argument(operation, format!("expecting a number, not: {v}"))
            }),
        Some(Arg::Selector(_)) => Err(QueryError::invalid_argument(
            operation,
            "expecting a number, not a selector",
        )),
    }
}

fn str_arg<'a>(operation: &str, args: &'a [Arg], pos: usize) -> Result<&'a str> {
    args.get(pos)
        .and_then(Arg::as_value)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            QueryError::invalid_argument(operation, format!("argument {pos} must be a column name"))
        })
}

fn flatten(rows: Vec<Value>, _: &[Arg]) -> Result<Vec<Value>> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            Value::Array(items) => out.extend(items),
            other => out.push(other),
        }
    }
    Ok(out)
}

fn chunk(rows: Vec<Value>, args: &[Arg]) -> Result<Vec<Value>> {
    let size = int_arg("chunk", args, 0, 1)?;
    let size = usize::try_from(size).unwrap_or(0);
    Ok(chunk_vec(rows, size).into_iter().map(Value::Array).collect())
}

fn unzip(rows: Vec<Value>, _: &[Arg]) -> Result<Vec<Value>> {
    let arrays: Vec<Vec<Value>> = rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Array(items) => Some(items),
            _ => None,
        })
        .collect();
    Ok(unzip_vec(&arrays)
        .into_iter()
        .map(|column| {
            Value::Array(column.into_iter().map(Option::unwrap_or_default).collect())
        })
        .collect())
}

fn sort_by(rows: Vec<Value>, args: &[Arg]) -> Result<Vec<Value>> {
    let mut selectors: Vec<SelectorFn<Value>> = Vec::new();
    for arg in args {
        match arg {
            Arg::Selector(s) => selectors.push(s.clone().resolve()),
            Arg::Value(Value::String(name)) => {
                selectors.push(Selector::column(name.clone()).resolve());
            }
            Arg::Value(Value::Array(names)) => {
                for name in names {
                    let name = name.as_str().ok_or_else(|| {
                        QueryError::invalid_argument(
                            "sortBy",
                            format!("expecting a column name, not: {name}"),
                        )
                    })?;
                    selectors.push(Selector::column(name).resolve());
                }
            }
            Arg::Value(Value::Null) => {}
            Arg::Value(other) => {
                return Err(QueryError::invalid_argument(
                    "sortBy",
                    format!("expecting a column name or selector, not: {other}"),
                ));
            }
        }
    }
    if selectors.is_empty() {
        selectors.push(Arc::new(|row: &Value, _: &Context, _: usize| Key::from(row)));
    }
    Ok(sort_with(rows, &selectors))
}

fn limit(rows: Vec<Value>, args: &[Arg]) -> Result<Vec<Value>> {
    let n = int_arg("limit", args, 0, 1)?;
    let n = usize::try_from(n).unwrap_or(0);
    Ok(rows.into_iter().take(n).collect())
}

fn join_op(rows: Vec<Value>, args: &[Arg]) -> Result<Vec<Value>> {
    let prop_a = str_arg("join", args, 0)?;
    let list_b = match args.get(1).and_then(Arg::as_value) {
        Some(Value::Array(items)) => items.clone(),
        _ => {
            return Err(QueryError::invalid_argument(
                "join",
                "argument 1 must be an array of rows",
            ));
        }
    };
    let prop_b = str_arg("join", args, 2)?;
    join(rows, prop_a, list_b, prop_b)
}

fn append(mut rows: Vec<Value>, args: &[Arg]) -> Result<Vec<Value>> {
    let value = match args.first() {
        None => Value::Null,
        Some(Arg::Value(v)) => v.clone(),
        Some(Arg::Selector(_)) => {
            return Err(QueryError::invalid_argument(
                "append",
                "expecting a value, not a selector",
            ));
        }
    };
    rows.push(value);
    Ok(rows)
}

fn reverse(mut rows: Vec<Value>, _: &[Arg]) -> Result<Vec<Value>> {
    rows.reverse();
    Ok(rows)
}
