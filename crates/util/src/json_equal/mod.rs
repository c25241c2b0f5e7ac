//! JSON equality utilities.
//!
//! Deep comparison of JSON values, optionally skipping bookkeeping keys
//! such as the per-instance `_weight`.

mod deep_equal;

pub use deep_equal::{deep_equal, deep_equal_ignoring};
