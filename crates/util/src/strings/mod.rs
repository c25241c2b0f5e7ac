//! String utilities.
//!
//! Markup stripping for length checks and the `{i}` / `{index}` name
//! placeholder used by repeated form components.

mod index_token;
mod markup;

pub use index_token::{has_index_token, replace_index_token, replace_trailing_index_token};
pub use markup::{plain_text_len, strip_tags};
