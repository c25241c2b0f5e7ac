use serde_json::{Map, Value};

/// Performs a deep equality check between two JSON values.
///
/// Object key order is not significant; array order is.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vactory_util::json_equal::deep_equal;
///
/// let a = json!({"title": "Hero", "tags": [1, 2]});
/// let b = json!({"tags": [1, 2], "title": "Hero"});
/// assert!(deep_equal(&a, &b));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    deep_equal_ignoring(a, b, &[])
}

/// Deep equality that skips the given object keys at every depth.
///
/// A key listed in `ignored` may be present on one side only.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vactory_util::json_equal::deep_equal_ignoring;
///
/// let stored = json!([{"title": "A"}]);
/// let rebuilt = json!([{"title": "A", "_weight": 1}]);
/// assert!(deep_equal_ignoring(&stored, &rebuilt, &["_weight"]));
/// ```
pub fn deep_equal_ignoring(a: &Value, b: &Value, ignored: &[&str]) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a
                    .iter()
                    .zip(arr_b)
                    .all(|(x, y)| deep_equal_ignoring(x, y, ignored))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => objects_equal(obj_a, obj_b, ignored),

        _ => false,
    }
}

fn objects_equal(a: &Map<String, Value>, b: &Map<String, Value>, ignored: &[&str]) -> bool {
    let relevant = |key: &String| !ignored.contains(&key.as_str());
    if a.keys().filter(|k| relevant(k)).count() != b.keys().filter(|k| relevant(k)).count() {
        return false;
    }
    for (key, val_a) in a.iter().filter(|(k, _)| relevant(k)) {
        match b.get(key) {
            Some(val_b) if deep_equal_ignoring(val_a, val_b, ignored) => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_scalars() {
        assert!(deep_equal(&json!(1), &json!(1)));
        assert!(deep_equal(&json!("a"), &json!("a")));
        assert!(!deep_equal(&json!(1), &json!("1")));
        assert!(!deep_equal(&json!(null), &json!(false)));
    }

    #[test]
    fn test_array_order_matters() {
        assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!deep_equal(&json!([1]), &json!([1, 1])));
    }

    #[test]
    fn test_object_key_order_ignored() {
        assert!(deep_equal(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn test_ignored_keys_nested() {
        let a = json!({"0": {"title": "x"}, "extra_field": {"intro": "y"}});
        let b = json!({"0": {"title": "x", "_weight": 4}, "extra_field": {"intro": "y"}});
        assert!(deep_equal_ignoring(&a, &b, &["_weight"]));
        assert!(!deep_equal(&a, &b));
    }

    #[test]
    fn test_ignored_keys_do_not_hide_real_diffs() {
        let a = json!({"title": "x", "_weight": 1});
        let b = json!({"title": "y", "_weight": 1});
        assert!(!deep_equal_ignoring(&a, &b, &["_weight"]));
    }
}
