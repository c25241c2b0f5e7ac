//! The serialized widget data blob.
//!
//! A blob is a JSON array of component objects, or an object keyed by
//! component index that may also carry the shared `extra_field` entry:
//!
//! ```json
//! {"0": {"title": "A", "_weight": 2}, "1": {"title": "B"}, "extra_field": {"intro": "..."}}
//! ```

use crate::error::ComposeError;
use serde_json::{Map, Value};
use tracing::warn;
use vactory_util::insertion_sort_by_key;

/// Reserved key of the shared extra-field data.
pub const EXTRA_FIELD_KEY: &str = "extra_field";

/// Per-component ordering key.
pub const WEIGHT_KEY: &str = "_weight";

/// One repetition of a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetInstance {
    pub index: usize,
    pub weight: i64,
    /// Field values, without `_weight`.
    pub values: Map<String, Value>,
}

impl WidgetInstance {
    /// A blank component at `index` with the default weight `index + 1`.
    pub fn empty(index: usize) -> Self {
        WidgetInstance {
            index,
            weight: index as i64 + 1,
            values: Map::new(),
        }
    }

    /// The component as stored: its values plus `_weight`.
    pub fn to_value(&self) -> Value {
        let mut out = self.values.clone();
        out.insert(WEIGHT_KEY.to_string(), Value::from(self.weight));
        Value::Object(out)
    }
}

/// Parsed blob: components in blob order and the extra-field singleton.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetData {
    /// Component values and explicit weights, in blob order.
    pub components: Vec<(Map<String, Value>, Option<i64>)>,
    pub extra_field: Option<Value>,
}

impl WidgetData {
    pub fn parse(blob: &str) -> Result<Self, ComposeError> {
        let value: Value = serde_json::from_str(blob)
            .map_err(|e| ComposeError::client(format!("Invalid widget data: {e}")))?;
        WidgetData::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ComposeError> {
        let (entries, extra_field): (Vec<(String, Value)>, Option<Value>) = match value {
            Value::Array(items) => (
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
                None,
            ),
            Value::Object(mut map) => {
                let extra = map.shift_remove(EXTRA_FIELD_KEY);
                (map.into_iter().collect(), extra)
            }
            Value::Null => (Vec::new(), None),
            _ => {
                return Err(ComposeError::client(
                    "Invalid widget data: expected an object or an array",
                ))
            }
        };

        let mut components = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            let Value::Object(mut values) = entry else {
                warn!(key = %key, "skipping non-object widget data entry");
                continue;
            };
            let weight = values.shift_remove(WEIGHT_KEY).as_ref().and_then(parse_weight);
            components.push((values, weight));
        }
        Ok(WidgetData {
            components,
            extra_field,
        })
    }

    /// Turns the components into ordered instances.
    ///
    /// Components without a weight get one from a counter that starts at 1
    /// and only advances when it is used: weights `[None, 5, None]` become
    /// `[1, 5, 2]`. Instances are then stable-sorted by weight and
    /// renumbered.
    pub fn into_instances(self) -> (Vec<WidgetInstance>, Option<Value>) {
        let mut next_default = 1;
        let mut instances: Vec<WidgetInstance> = self
            .components
            .into_iter()
            .enumerate()
            .map(|(index, (values, weight))| {
                let weight = weight.unwrap_or_else(|| {
                    let w = next_default;
                    next_default += 1;
                    w
                });
                WidgetInstance {
                    index,
                    weight,
                    values,
                }
            })
            .collect();
        reorder(&mut instances);
        (instances, self.extra_field)
    }
}

/// Weights arrive as numbers or numeric strings.
fn parse_weight(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Stable sort by weight ascending, then renumber indices densely.
///
/// Equal weights keep their current relative order.
pub fn reorder(instances: &mut [WidgetInstance]) {
    insertion_sort_by_key(instances, |i| i.weight);
    for (index, instance) in instances.iter_mut().enumerate() {
        instance.index = index;
    }
}

/// Serializes instances and the extra-field singleton back into a blob.
///
/// Without extra-field data the blob is an array; with it, an object
/// keyed `"0".."n-1"` plus `extra_field`.
pub fn to_blob_value(instances: &[WidgetInstance], extra_field: Option<&Value>) -> Value {
    match extra_field {
        None => Value::Array(instances.iter().map(WidgetInstance::to_value).collect()),
        Some(extra) => {
            let mut out = Map::new();
            for instance in instances {
                out.insert(instance.index.to_string(), instance.to_value());
            }
            out.insert(EXTRA_FIELD_KEY.to_string(), extra.clone());
            Value::Object(out)
        }
    }
}
