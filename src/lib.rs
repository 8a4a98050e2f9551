//! # Ironquery
//!
//! A **fluent query layer** over in-memory collections. Wrap a `Vec`, a map or a
//! JSON array into a [`Query`], chain transformations, and collapse the result
//! into a `Vec`, a map or a single value.
//!
//! ## Key Features
//!
//! - **Chainable API** - every step consumes the query and returns a new one
//! - **Per-row context** - values carry an optional key, group ordinal and index
//! - **Grouping** - by one column or selector, or by several into a composite key
//! - **Unique indexing** - key -> row maps that refuse duplicates
//! - **Joins** - equi-join of JSON row lists, strict by default, configurable
//! - **Named operations** - a static registry of lifted sequence operations
//!   dispatched by name with [`Query::apply`]
//!
//! ## Quick Start
//!
//! ```
//! use ironquery::*;
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"team": "red", "score": 3}),
//!     json!({"team": "blue", "score": 5}),
//!     json!({"team": "red", "score": 4}),
//! ];
//!
//! let totals = wrap(rows)
//!     .group_by("team")
//!     .map(|members| members.iter().filter_map(|r| r["score"].as_i64()).sum::<i64>())
//!     .from_pairs();
//!
//! assert_eq!(totals[&Key::from("red")], 7);
//! assert_eq!(totals[&Key::from("blue")], 5);
//! ```
//!
//! ## Core Concepts
//!
//! ### Query and Tuple
//!
//! A [`Query<T>`] is an ordered sequence of [`Tuple`]s: a value plus a
//! [`Context`]. Element-wise steps ([`map`](Query::map),
//! [`filter`](Query::filter)) keep context; [`enumerate`](Query::enumerate)
//! records positions; grouping sets `key` and `ordinal`; bulk steps built on
//! [`lift`](Query::lift) start over with empty context.
//!
//! ### Rows and keys
//!
//! Field-based steps need rows that implement [`Record`] (`serde_json::Value`
//! and JSON maps do). Every grouping or index key is a [`Key`]: hashable,
//! totally ordered, with null last.
//!
//! ### Selectors
//!
//! A [`Selector`] is a column name or a function of `(row, context, position)`.
//!
//! ## Module Overview
//!
//! - [`query`] - `Query`, element-wise steps and terminals
//! - [`group`] - single- and multi-key grouping
//! - [`index`] - unique index
//! - [`join`] - equi-join of row lists
//! - [`registry`] - named lifted operations
//! - [`helpers`] - entry constructors and typed sequence primitives
//! - [`config`] - join behavior
//! - [`testing`] - assertions and fixtures for tests

pub mod config;
pub mod error;
pub mod group;
pub mod helpers;
pub mod index;
pub mod join;
pub mod key;
pub mod query;
pub mod record;
pub mod registry;
pub mod selector;
pub mod testing;
pub mod tuple;

// General re-exports
pub use config::{JoinConfig, Precedence, Unmatched};
pub use error::{QueryError, Result};
pub use group::{Group, KeySpec};
pub use helpers::*;
pub use join::{join, join_with};
pub use key::{Key, Numeric};
pub use query::{Columns, Query};
pub use record::Record;
pub use registry::{Arg, LiftedFn, OPERATIONS, Operation, lookup, operations};
pub use selector::{Selector, SelectorFn};
pub use tuple::{Context, Tuple};
