//! Path lookup in JSON documents.
//!
//! A path is a list of steps; object steps are keys, array steps are
//! decimal indices. Form element names such as `components[0][title]`
//! translate to the path `["components", "0", "title"]`.

use serde_json::Value;

/// Get a value from a JSON document by path.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vactory_util::path::get;
///
/// let doc = json!({"components": [{"title": "Hero"}]});
/// assert_eq!(get(&doc, &["components", "0", "title"]), Some(&json!("Hero")));
/// assert_eq!(get(&doc, &["components", "1", "title"]), None);
/// ```
pub fn get<'a, S: AsRef<str>>(val: &'a Value, path: &[S]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        let step = step.as_ref();
        match current {
            Value::Array(arr) => {
                let idx: usize = step.parse().ok()?;
                current = arr.get(idx)?;
            }
            Value::Object(map) => {
                current = map.get(step)?;
            }
            _ => return None,
        }
    }
    Some(current)
}
