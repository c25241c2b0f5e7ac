//! Widget schemas.
//!
//! A schema is static configuration: the widget's fields in display order,
//! the shared extra fields, and whether the widget repeats. Ids prefixed
//! with `group_` denote groups of fields rendered together.

use crate::error::ConfigurationError;
use crate::states::{parse_conditions, VisibilityRule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix of group ids.
pub const GROUP_PREFIX: &str = "group_";

/// Group keys that describe the group itself rather than a child field.
const GROUP_TITLE: &str = "g_title";
const GROUP_NAME: &str = "g_name";
const GROUP_CONDITIONS: &str = "g_conditions";

/// Key inside `extra_fields` holding the wrapper weight.
const EXTRA_WEIGHT: &str = "weight";

/// Element type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Textarea,
    TextFormat,
    Number,
    Select,
    Checkbox,
    Checkboxes,
    Radios,
    UrlExtended,
    Date,
    Image,
    File,
    Video,
    RemoteVideo,
    /// Any other element plugin, passed through to the renderer.
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::TextFormat => "text_format",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Checkboxes => "checkboxes",
            FieldType::Radios => "radios",
            FieldType::UrlExtended => "url_extended",
            FieldType::Date => "date",
            FieldType::Image => "image",
            FieldType::File => "file",
            FieldType::Video => "video",
            FieldType::RemoteVideo => "remote_video",
            FieldType::Other(name) => name,
        }
    }

    /// Media fields get a storage name so repeated instances never share
    /// an upload slot.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            FieldType::Image | FieldType::File | FieldType::Video | FieldType::RemoteVideo
        )
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" | "textfield" => FieldType::Text,
            "textarea" => FieldType::Textarea,
            "text_format" => FieldType::TextFormat,
            "number" => FieldType::Number,
            "select" => FieldType::Select,
            "checkbox" => FieldType::Checkbox,
            "checkboxes" => FieldType::Checkboxes,
            "radios" => FieldType::Radios,
            "url_extended" => FieldType::UrlExtended,
            "date" => FieldType::Date,
            "image" => FieldType::Image,
            "file" => FieldType::File,
            "video" => FieldType::Video,
            "remote_video" => FieldType::RemoteVideo,
            _ => FieldType::Other(name),
        }
    }
}

impl From<FieldType> for String {
    fn from(kind: FieldType) -> Self {
        kind.as_str().to_string()
    }
}

/// A single typed field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub kind: FieldType,
    pub label: String,
    /// Element options (`required`, `maxlength`, `#options`, ...), passed
    /// through to the renderer.
    pub options: Map<String, Value>,
    pub rules: Vec<VisibilityRule>,
}

impl FieldDef {
    pub fn new(kind: FieldType, label: impl Into<String>) -> Self {
        FieldDef {
            kind,
            label: label.into(),
            options: Map::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    pub fn is_required(&self) -> bool {
        self.options
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn max_length(&self) -> Option<usize> {
        self.options
            .get("maxlength")
            .and_then(loose_usize_value)
    }
}

/// Fields rendered together in a collapsible wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDef {
    pub title: String,
    /// Element name, may end in an `{i}` / `{index}` placeholder.
    pub name_template: Option<String>,
    pub rules: Vec<VisibilityRule>,
    pub children: IndexMap<String, FieldDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    Field(FieldDef),
    Group(GroupDef),
}

/// A widget definition.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSchema {
    pub id: String,
    pub name: String,
    pub multiple: bool,
    /// Maximum number of components of a multiple widget.
    pub limit: Option<usize>,
    pub category: Option<String>,
    pub screenshot: Option<String>,
    pub enabled: bool,
    pub fields: IndexMap<String, FieldSpec>,
    pub extra_fields: IndexMap<String, FieldSpec>,
    /// Ordering weight of the extra fields wrapper.
    pub extra_weight: Option<i64>,
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "loose_bool")]
    multiple: bool,
    #[serde(default, deserialize_with = "loose_usize")]
    limit: Option<usize>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    screenshot: Option<String>,
    #[serde(default = "enabled_by_default", deserialize_with = "loose_bool")]
    enabled: bool,
    #[serde(default)]
    fields: Map<String, Value>,
    #[serde(default)]
    extra_fields: Map<String, Value>,
}

fn enabled_by_default() -> bool {
    true
}

/// Accepts `true`/`false` as well as `0`/`1`.
fn loose_bool<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && s != "false",
        _ => false,
    })
}

/// Reads a non-negative integer given as a number or a numeric string.
fn loose_usize_value(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn loose_usize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(loose_usize_value(&value))
}

#[derive(Deserialize)]
struct RawField {
    #[serde(rename = "type")]
    kind: FieldType,
    #[serde(default)]
    label: String,
    #[serde(default)]
    options: Map<String, Value>,
    #[serde(default)]
    conditions: Option<Value>,
}

impl WidgetSchema {
    /// Parses a schema document. The `id` member of the document, when
    /// present, overrides `id`.
    pub fn from_value(id: &str, value: Value) -> Result<Self, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidSchema {
            widget: id.to_string(),
            reason,
        };
        let raw: RawSchema = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
        let id = raw.id.unwrap_or_else(|| id.to_string());

        let fields = parse_fields(&id, raw.fields)?;
        let mut extra_weight = None;
        let mut extra = raw.extra_fields;
        if let Some(weight) = extra.shift_remove(EXTRA_WEIGHT) {
            extra_weight = weight.as_i64();
        }
        let extra_fields = parse_fields(&id, extra)?;

        Ok(WidgetSchema {
            id,
            name: raw.name,
            multiple: raw.multiple,
            limit: raw.limit,
            category: raw.category.filter(|c| !c.is_empty()),
            screenshot: raw.screenshot.filter(|s| !s.is_empty()),
            enabled: raw.enabled,
            fields,
            extra_fields,
            extra_weight,
        })
    }

    pub fn from_json_str(id: &str, text: &str) -> Result<Self, ConfigurationError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| ConfigurationError::InvalidSchema {
                widget: id.to_string(),
                reason: e.to_string(),
            })?;
        WidgetSchema::from_value(id, value)
    }

    /// Provider part of a `provider:name` widget id.
    pub fn provider(&self) -> &str {
        self.id.split_once(':').map_or(self.id.as_str(), |(p, _)| p)
    }

    /// Looks up a component field or group.
    pub fn field(&self, field_id: &str) -> Result<&FieldSpec, ConfigurationError> {
        self.fields
            .get(field_id)
            .ok_or_else(|| ConfigurationError::UnknownField {
                widget: self.id.clone(),
                field: field_id.to_string(),
            })
    }

    /// Looks up a field by id, or a group child by `[group_id, child_id]`.
    pub fn resolve(&self, path: &[&str]) -> Result<&FieldDef, ConfigurationError> {
        let unknown = || ConfigurationError::UnknownField {
            widget: self.id.clone(),
            field: path.join("."),
        };
        match (path, path.first().map(|id| self.field(id)).transpose()?) {
            ([_], Some(FieldSpec::Field(def))) => Ok(def),
            ([_, child], Some(FieldSpec::Group(group))) => {
                group.children.get(*child).ok_or_else(unknown)
            }
            _ => Err(unknown()),
        }
    }
}

fn parse_fields(
    widget: &str,
    raw: Map<String, Value>,
) -> Result<IndexMap<String, FieldSpec>, ConfigurationError> {
    let mut fields = IndexMap::with_capacity(raw.len());
    for (field_id, value) in raw {
        let spec = if field_id.starts_with(GROUP_PREFIX) {
            FieldSpec::Group(parse_group(widget, &field_id, value)?)
        } else {
            FieldSpec::Field(parse_field(widget, &field_id, value)?)
        };
        fields.insert(field_id, spec);
    }
    Ok(fields)
}

fn parse_field(widget: &str, field_id: &str, value: Value) -> Result<FieldDef, ConfigurationError> {
    let raw: RawField =
        serde_json::from_value(value).map_err(|e| ConfigurationError::InvalidSchema {
            widget: widget.to_string(),
            reason: format!("field {field_id}: {e}"),
        })?;
    let rules = match &raw.conditions {
        Some(conditions) => parse_conditions(conditions)?,
        None => Vec::new(),
    };
    Ok(FieldDef {
        kind: raw.kind,
        label: raw.label,
        options: raw.options,
        rules,
    })
}

fn parse_group(widget: &str, group_id: &str, value: Value) -> Result<GroupDef, ConfigurationError> {
    let Value::Object(mut members) = value else {
        return Err(ConfigurationError::InvalidSchema {
            widget: widget.to_string(),
            reason: format!("group {group_id} must be an object"),
        });
    };
    let title = members
        .shift_remove(GROUP_TITLE)
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let name_template = members
        .shift_remove(GROUP_NAME)
        .and_then(|v| v.as_str().map(str::to_string));
    let rules = match members.shift_remove(GROUP_CONDITIONS) {
        Some(conditions) => parse_conditions(&conditions)?,
        None => Vec::new(),
    };
    let mut children = IndexMap::with_capacity(members.len());
    for (child_id, child) in members {
        let def = parse_field(widget, &format!("{group_id}.{child_id}"), child)?;
        children.insert(child_id, def);
    }
    Ok(GroupDef {
        title,
        name_template,
        rules,
        children,
    })
}
