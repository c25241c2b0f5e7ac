//! Validation of submitted component values.
//!
//! Errors are collected, never raised: one pass reports every problem so
//! the form can be rebuilt with all of them attached.

use crate::composer::ComposerState;
use crate::data::EXTRA_FIELD_KEY;
use crate::form::{element_name, COMPONENTS_KEY};
use crate::schema::{FieldDef, FieldSpec, FieldType, WidgetSchema};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;
use vactory_util::{is_empty_value, plain_text_len};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Element path, e.g. `["components", "0", "title"]`.
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: Vec<String>, message: impl Into<String>) -> Self {
        ValidationError {
            path,
            message: message.into(),
        }
    }

    /// Element name the error is attached to.
    pub fn name(&self) -> String {
        element_name(&self.path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name(), self.message)
    }
}

/// Length of a submitted value as counted against `maxlength`.
///
/// `text_format` values are `{value, format}`; their markup and line
/// breaks do not count.
fn value_len(kind: &FieldType, value: &Value) -> Option<usize> {
    match (kind, value) {
        (FieldType::TextFormat, Value::Object(v)) => {
            v.get("value").and_then(Value::as_str).map(plain_text_len)
        }
        (FieldType::TextFormat, Value::String(s)) => Some(plain_text_len(s)),
        (_, Value::String(s)) => Some(s.chars().count()),
        _ => None,
    }
}

fn is_missing(kind: &FieldType, value: Option<&Value>) -> bool {
    match (kind, value) {
        (_, None) => true,
        (FieldType::TextFormat, Some(Value::Object(v))) => {
            v.get("value").map_or(true, is_empty_value)
        }
        (_, Some(v)) => is_empty_value(v),
    }
}

fn check_field(
    def: &FieldDef,
    value: Option<&Value>,
    path: Vec<String>,
    errors: &mut Vec<ValidationError>,
) {
    if def.is_required() && is_missing(&def.kind, value) {
        let label = if def.label.is_empty() {
            path.last().cloned().unwrap_or_default()
        } else {
            def.label.clone()
        };
        errors.push(ValidationError::new(path, format!("{label} field is required.")));
        return;
    }
    let (Some(max), Some(value)) = (def.max_length(), value) else {
        return;
    };
    if let Some(len) = value_len(&def.kind, value) {
        if len > max {
            errors.push(ValidationError::new(
                path,
                format!(
                    "{} cannot be longer than {max} characters but is currently {len} characters long.",
                    def.label
                ),
            ));
        }
    }
}

fn check_section(
    fields: &IndexMap<String, FieldSpec>,
    values: Option<&Map<String, Value>>,
    parents: &[String],
    errors: &mut Vec<ValidationError>,
) {
    let path = |steps: &[&str]| {
        let mut p = parents.to_vec();
        p.extend(steps.iter().map(|s| s.to_string()));
        p
    };
    for (field_id, spec) in fields {
        let value = values.and_then(|v| v.get(field_id));
        match spec {
            FieldSpec::Field(def) => check_field(def, value, path(&[field_id.as_str()]), errors),
            FieldSpec::Group(group) => {
                for (key, def) in &group.children {
                    let child = value.and_then(|g| g.get(key));
                    check_field(def, child, path(&[field_id.as_str(), key.as_str()]), errors);
                }
            }
        }
    }
}

/// Checks every component and the extra fields against the schema.
pub fn validate(schema: &WidgetSchema, state: &ComposerState) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !schema.extra_fields.is_empty() {
        let parents = [COMPONENTS_KEY.to_string(), EXTRA_FIELD_KEY.to_string()];
        let values = state.extra_field().and_then(Value::as_object);
        check_section(&schema.extra_fields, values, &parents, &mut errors);
    }
    for instance in state.instances() {
        let parents = [COMPONENTS_KEY.to_string(), instance.index.to_string()];
        check_section(&schema.fields, Some(&instance.values), &parents, &mut errors);
    }
    debug!(widget = %schema.id, errors = errors.len(), "widget data validated");
    errors
}

/// Validates and records the result on the state.
///
/// Returns `true` when the state is valid.
pub fn validate_into(schema: &WidgetSchema, state: &mut ComposerState) -> bool {
    let errors = validate(schema, state);
    let valid = errors.is_empty();
    state.set_errors(errors);
    valid
}
