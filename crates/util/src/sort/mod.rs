//! Sorting utilities.
//!
//! Stable insertion sorts. Widget instances are re-sorted by weight on every
//! rebuild and equal weights must keep their submission order, so only
//! stable algorithms live here.

mod insertion;

pub use insertion::{insertion_sort_by, insertion_sort_by_key};
