//! Composition of the element tree handed to the renderer.

use crate::composer::ComposerState;
use crate::data::EXTRA_FIELD_KEY;
use crate::naming::{derive_field_name, COMPONENT_PREFIX, EXTRA_PREFIX};
use crate::schema::{FieldDef, FieldSpec, FieldType, GroupDef, WidgetSchema};
use crate::states::{rules_for_index, serialize_rules, VisibilityRule};
use crate::validate::ValidationError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use vactory_util::replace_trailing_index_token;

/// Root of every element path.
pub const COMPONENTS_KEY: &str = "components";

/// Index placeholder value used inside the shared extra fields.
const EXTRA_INDEX: &str = "1";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldElement {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    /// Element name, e.g. `components[0][title]`.
    pub name: String,
    pub parents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
    #[serde(
        rename = "states",
        serialize_with = "serialize_rules",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rules: Vec<VisibilityRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupElement {
    pub key: String,
    pub title: String,
    /// Resolved `g_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "states",
        serialize_with = "serialize_rules",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub rules: Vec<VisibilityRule>,
    pub children: Vec<FieldElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    Field(FieldElement),
    Group(GroupElement),
}

impl Element {
    pub fn key(&self) -> &str {
        match self {
            Element::Field(f) => &f.key,
            Element::Group(g) => &g.key,
        }
    }

    /// Field elements in display order, descending into groups.
    pub fn fields(&self) -> Vec<&FieldElement> {
        match self {
            Element::Field(f) => vec![f],
            Element::Group(g) => g.children.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrapper {
    Fieldset,
    /// Collapsible and draggable, used by multiple widgets.
    Details,
}

/// One composed repetition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub index: usize,
    pub title: String,
    pub wrapper: Wrapper,
    /// Present on multiple widgets only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    pub elements: Vec<Element>,
}

/// The shared extra fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowActions {
    pub add_more: bool,
    pub remove_one: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedForm {
    pub widget_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<ExtraSection>,
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<RowActions>,
    /// Serialized state, round-tripped by the renderer.
    pub data: String,
    /// Paths of `text_format` elements, checked by validation.
    pub text_format_paths: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ComposedForm {
    /// Looks up a field element by its element name.
    pub fn find(&self, name: &str) -> Option<&FieldElement> {
        let extra = self.extra.iter().flat_map(|e| e.elements.iter());
        let components = self.components.iter().flat_map(|c| c.elements.iter());
        extra
            .chain(components)
            .flat_map(Element::fields)
            .find(|f| f.name == name)
    }
}

/// Builds `components[0][title]` from `["components", "0", "title"]`.
pub fn element_name(parents: &[String]) -> String {
    let mut parts = parents.iter();
    let mut name = parts.next().cloned().unwrap_or_default();
    for part in parts {
        name.push('[');
        name.push_str(part);
        name.push(']');
    }
    name
}

/// Where a section's values and names come from.
struct Scope<'a> {
    widget_id: &'a str,
    /// Path prefix of the section, e.g. `["components", "0"]`.
    parents: Vec<String>,
    /// Substituted for `{i}` / `{index}` placeholders.
    index_token: String,
    /// Index appended to storage name parts; `None` for extra fields.
    storage_index: Option<String>,
    storage_prefix: char,
    values: Option<&'a Map<String, Value>>,
}

impl Scope<'_> {
    fn path(&self, steps: &[&str]) -> Vec<String> {
        let mut path = self.parents.clone();
        path.extend(steps.iter().map(|s| s.to_string()));
        path
    }

    fn storage_name(&self, kind: &FieldType, parts: &[&str]) -> Option<String> {
        if !kind.is_media() {
            return None;
        }
        let mut parts = parts.to_vec();
        if let Some(index) = &self.storage_index {
            parts.push(index);
        }
        Some(derive_field_name(self.storage_prefix, self.widget_id, &parts))
    }
}

fn field_element(
    scope: &Scope<'_>,
    key: &str,
    def: &FieldDef,
    path: Vec<String>,
    default_value: Option<Value>,
    storage_parts: &[&str],
    text_format_paths: &mut Vec<Vec<String>>,
) -> FieldElement {
    if def.kind == FieldType::TextFormat {
        text_format_paths.push(path.clone());
    }
    FieldElement {
        key: key.to_string(),
        kind: def.kind.clone(),
        label: def.label.clone(),
        name: element_name(&path),
        parents: path,
        default_value,
        options: def.options.clone(),
        rules: rules_for_index(&def.rules, &scope.index_token),
        storage_name: scope.storage_name(&def.kind, storage_parts),
    }
}

fn group_element(
    scope: &Scope<'_>,
    group_id: &str,
    group: &GroupDef,
    text_format_paths: &mut Vec<Vec<String>>,
) -> GroupElement {
    let group_values = scope.values.and_then(|v| v.get(group_id));
    let children = group
        .children
        .iter()
        .map(|(key, def)| {
            let default_value = group_values.and_then(|g| g.get(key)).cloned();
            field_element(
                scope,
                key,
                def,
                scope.path(&[group_id, key.as_str()]),
                default_value,
                &[key.as_str(), group_id],
                text_format_paths,
            )
        })
        .collect();
    GroupElement {
        key: group_id.to_string(),
        title: group.title.clone(),
        name: group
            .name_template
            .as_deref()
            .map(|t| replace_trailing_index_token(t, &scope.index_token)),
        rules: rules_for_index(&group.rules, &scope.index_token),
        children,
    }
}

fn section_elements(
    scope: &Scope<'_>,
    fields: &IndexMap<String, FieldSpec>,
    text_format_paths: &mut Vec<Vec<String>>,
) -> Vec<Element> {
    fields
        .iter()
        .map(|(field_id, spec)| match spec {
            FieldSpec::Field(def) => {
                let default_value = scope.values.and_then(|v| v.get(field_id)).cloned();
                Element::Field(field_element(
                    scope,
                    field_id,
                    def,
                    scope.path(&[field_id.as_str()]),
                    default_value,
                    &[field_id.as_str()],
                    text_format_paths,
                ))
            }
            FieldSpec::Group(group) => {
                Element::Group(group_element(scope, field_id, group, text_format_paths))
            }
        })
        .collect()
}

/// Composes the element tree for every component of `state`.
///
/// Schema order is preserved within each component; components appear in
/// index order.
pub fn build(schema: &WidgetSchema, state: &ComposerState) -> ComposedForm {
    let mut text_format_paths = Vec::new();

    let extra = if schema.extra_fields.is_empty() {
        None
    } else {
        let values = state.extra_field().and_then(Value::as_object);
        let scope = Scope {
            widget_id: &schema.id,
            parents: vec![COMPONENTS_KEY.to_string(), EXTRA_FIELD_KEY.to_string()],
            index_token: EXTRA_INDEX.to_string(),
            storage_index: None,
            storage_prefix: EXTRA_PREFIX,
            values,
        };
        Some(ExtraSection {
            weight: schema.extra_weight,
            elements: section_elements(&scope, &schema.extra_fields, &mut text_format_paths),
        })
    };

    let components = state
        .instances()
        .iter()
        .map(|instance| {
            let index = instance.index.to_string();
            let scope = Scope {
                widget_id: &schema.id,
                parents: vec![COMPONENTS_KEY.to_string(), index.clone()],
                index_token: index.clone(),
                storage_index: Some(index),
                storage_prefix: COMPONENT_PREFIX,
                values: Some(&instance.values),
            };
            let (title, wrapper, weight) = if schema.multiple {
                (
                    format!("Component {}", instance.index + 1),
                    Wrapper::Details,
                    Some(instance.weight),
                )
            } else {
                ("Component".to_string(), Wrapper::Fieldset, None)
            };
            Component {
                index: instance.index,
                title,
                wrapper,
                weight,
                elements: section_elements(&scope, &schema.fields, &mut text_format_paths),
            }
        })
        .collect::<Vec<_>>();

    let actions = schema.multiple.then(|| RowActions {
        add_more: state.can_add_more(schema),
        remove_one: state.can_remove(),
    });

    debug!(
        widget = %schema.id,
        components = components.len(),
        extra = extra.is_some(),
        "widget form composed"
    );

    ComposedForm {
        widget_id: schema.id.clone(),
        title: schema.name.clone(),
        extra,
        components,
        actions,
        data: state.to_blob(),
        text_format_paths,
        errors: state.errors().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_name() {
        let parents: Vec<String> = vec!["components".into(), "2".into(), "title".into()];
        assert_eq!(element_name(&parents), "components[2][title]");
        assert_eq!(element_name(&["solo".to_string()]), "solo");
        assert_eq!(element_name(&[]), "");
    }

    #[test]
    fn test_single_widget_has_no_weight_or_actions() {
        let schema = WidgetSchema::from_value(
            "w",
            json!({"name": "W", "fields": {"title": {"type": "text", "label": "Title"}}}),
        )
        .unwrap();
        let state = ComposerState::initialize(None, None, 1);
        let form = build(&schema, &state);
        assert_eq!(form.components.len(), 1);
        assert_eq!(form.components[0].weight, None);
        assert_eq!(form.components[0].wrapper, Wrapper::Fieldset);
        assert!(form.actions.is_none());
        assert!(form.extra.is_none());
    }

    #[test]
    fn test_serialized_element_carries_states() {
        let schema = WidgetSchema::from_value(
            "w",
            json!({"name": "W", "fields": {
                "title": {"type": "text", "label": "Title",
                          "conditions": {"visible": {"components[{i}][on]": {"checked": true}}}}
            }}),
        )
        .unwrap();
        let state = ComposerState::initialize(None, None, 1);
        let form = build(&schema, &state);
        let out = serde_json::to_value(&form.components[0].elements[0]).unwrap();
        assert_eq!(out["element"], json!("field"));
        assert_eq!(out["type"], json!("text"));
        assert_eq!(
            out["states"],
            json!({"visible": {"[name=\"components[0][on]\"]": {"checked": true}}})
        );
    }
}
