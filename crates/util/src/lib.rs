//! vactory-util - Shared helpers for the vactory crates.
//!
//! Small, dependency-light building blocks used by both the API key
//! access check and the dynamic field composer.

pub mod is_empty;
pub mod json_equal;
pub mod path;
pub mod sort;
pub mod strings;

// Re-exports for convenience
pub use is_empty::{is_blank, is_empty_value, non_blank};
pub use json_equal::{deep_equal, deep_equal_ignoring};
pub use path::get;
pub use sort::{insertion_sort_by, insertion_sort_by_key};
pub use strings::{plain_text_len, replace_index_token, replace_trailing_index_token, strip_tags};
