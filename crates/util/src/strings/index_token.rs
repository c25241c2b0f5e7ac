use std::sync::OnceLock;

fn index_token_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"\{(i|index)\}").unwrap())
}

fn trailing_index_token_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"\{(i|index)\}$").unwrap())
}

/// Returns `true` if `name` contains an `{i}` or `{index}` placeholder.
pub fn has_index_token(name: &str) -> bool {
    index_token_regex().is_match(name)
}

/// Substitutes every `{i}` / `{index}` placeholder in `name` with `index`.
///
/// # Examples
///
/// ```
/// use vactory_util::strings::replace_index_token;
///
/// assert_eq!(replace_index_token("components[{i}]", "2"), "components[2]");
/// assert_eq!(
///     replace_index_token("components[{i}][show_image]", "0"),
///     "components[0][show_image]"
/// );
/// assert_eq!(replace_index_token("slide_{index}", "2"), "slide_2");
/// ```
pub fn replace_index_token(name: &str, index: &str) -> String {
    index_token_regex().replace_all(name, index).into_owned()
}

/// Substitutes a trailing `{i}` / `{index}` placeholder with `index`.
///
/// Used for group names, where only a suffix placeholder is honoured.
///
/// ```
/// use vactory_util::strings::replace_trailing_index_token;
///
/// assert_eq!(replace_trailing_index_token("cta_{index}", "1"), "cta_1");
/// assert_eq!(replace_trailing_index_token("{i}_cta", "1"), "{i}_cta");
/// ```
pub fn replace_trailing_index_token(name: &str, index: &str) -> String {
    trailing_index_token_regex().replace(name, index).into_owned()
}
