pub(crate) mod sequence;
pub(crate) mod stdlib;

// Sequence primitives are inherent methods on `Query`; only the entry functions need re-exporting.
pub use stdlib::*;
