//! Tunables for operations with more than one reasonable behavior.
//!
//! Defaults reproduce the strict behavior: a join fails on the first left row
//! without a match, and left-hand fields win on name collisions.
//!
//! ```
//! use ironquery::config::{JoinConfig, Unmatched};
//!
//! let cfg = JoinConfig { unmatched: Unmatched::Keep, ..Default::default() };
//! assert_eq!(cfg, JoinConfig::left());
//! ```

use serde::{Deserialize, Serialize};

/// What a join does with a left row that has no matching right rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unmatched {
    /// Fail with [`QueryError::Lookup`](crate::QueryError::Lookup).
    #[default]
    Fail,
    /// Drop the row (inner join).
    Skip,
    /// Emit the left row unmerged (left join).
    Keep,
}

/// Which side's field survives when both rows define it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precedence {
    #[default]
    Left,
    Right,
}

/// Join behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    pub unmatched: Unmatched,
    pub precedence: Precedence,
}

impl JoinConfig {
    /// Fail on unmatched left rows (the default).
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Drop unmatched left rows.
    #[must_use]
    pub fn inner() -> Self {
        Self {
            unmatched: Unmatched::Skip,
            ..Self::default()
        }
    }

    /// Keep unmatched left rows as they are.
    #[must_use]
    pub fn left() -> Self {
        Self {
            unmatched: Unmatched::Keep,
            ..Self::default()
        }
    }
}
