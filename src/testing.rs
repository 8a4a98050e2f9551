//! Testing utilities for code built on queries.
//!
//! - **Assertions**: compare query outputs and check the grouping and index laws
//! - **Fixtures**: small JSON row sets for grouping, indexing and joins
//!
//! # Quick Start
//!
//! ```
//! use ironquery::*;
//! use ironquery::testing::*;
//!
//! let rows = sample_people();
//! let groups = wrap(rows.clone()).group_by("city").groups();
//!
//! assert_group_partition(&rows, &groups);
//! assert_first_seen_ordinals(&groups);
//! ```
//!
//! # Assertion Functions
//!
//! - [`assert_collections_equal`]: exact, order-dependent comparison
//! - [`assert_collections_unordered_equal`]: same elements in any order
//! - [`assert_query_values`]: a query's values against a slice
//! - [`assert_all`]: every element satisfies a predicate
//! - [`assert_group_partition`]: groups are a partition of the input
//! - [`assert_first_seen_ordinals`]: ordinals count up from 0
//! - [`assert_index_bijection`]: an index holds every row once under its key

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
