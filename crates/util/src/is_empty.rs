use serde_json::Value;

/// Returns `true` when a candidate string carries no content.
///
/// The empty string and `"0"` are blank; whitespace is content.
///
/// # Examples
///
/// ```
/// use vactory_util::is_empty::is_blank;
///
/// assert!(is_blank(""));
/// assert!(is_blank("0"));
/// assert!(!is_blank(" "));
/// assert!(!is_blank("00"));
/// ```
pub fn is_blank(s: &str) -> bool {
    s.is_empty() || s == "0"
}

/// Filters out blank candidates, so present-but-empty behaves like absent.
///
/// # Examples
///
/// ```
/// use vactory_util::is_empty::non_blank;
///
/// assert_eq!(non_blank(Some("key")), Some("key"));
/// assert_eq!(non_blank(Some("")), None);
/// assert_eq!(non_blank(None), None);
/// ```
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !is_blank(s))
}

/// Check if a submitted form value is empty.
///
/// `null`, `false`, the empty string, the empty array and the empty object
/// are empty. Numbers are never empty, `0` is a real answer.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(_) => false,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
