//! Per-request composer state and the row operations on it.

use crate::data::{reorder, to_blob_value, WidgetData, WidgetInstance, EXTRA_FIELD_KEY};
use crate::error::ComposeError;
use crate::form::COMPONENTS_KEY;
use crate::schema::WidgetSchema;
use crate::validate::ValidationError;
use serde_json::{Map, Value};
use tracing::debug;

/// Result of a row operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    Added { index: usize },
    Removed { index: usize },
    /// Already at the row floor; nothing removed.
    Clamped,
    /// Validation errors are pending; nothing removed.
    Blocked,
}

/// State of one form-rebuild cycle: the components in display order,
/// the shared extra-field data and the pending validation errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerState {
    instances: Vec<WidgetInstance>,
    extra_field: Option<Value>,
    errors: Vec<ValidationError>,
    min_rows: usize,
}

impl ComposerState {
    /// Builds the state from the prior data blob, if any.
    ///
    /// Without a requested row count the row count is the number of
    /// components found in the blob, or 1 when there is no blob at all. A requested
    /// count pads with blank components or drops trailing ones. The
    /// result never has fewer than `min_rows` rows.
    pub fn initialize(
        prior: Option<WidgetData>,
        requested_rows: Option<usize>,
        min_rows: usize,
    ) -> Self {
        let had_blob = prior.is_some();
        let (mut instances, extra_field) = match prior {
            Some(data) => data.into_instances(),
            None => (Vec::new(), None),
        };
        let found = instances.len();
        let rows = requested_rows
            .unwrap_or(if had_blob { found } else { 1 })
            .max(min_rows);
        instances.truncate(rows);
        while instances.len() < rows {
            instances.push(WidgetInstance::empty(instances.len()));
        }
        debug!(found, rows, "composer state initialized");
        ComposerState {
            instances,
            extra_field,
            errors: Vec::new(),
            min_rows,
        }
    }

    /// Parses `blob` and initializes from it.
    pub fn from_blob(
        blob: Option<&str>,
        requested_rows: Option<usize>,
        min_rows: usize,
    ) -> Result<Self, ComposeError> {
        let prior = blob.map(WidgetData::parse).transpose()?;
        Ok(ComposerState::initialize(prior, requested_rows, min_rows))
    }

    pub fn rows(&self) -> usize {
        self.instances.len()
    }

    pub fn instances(&self) -> &[WidgetInstance] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Option<&WidgetInstance> {
        self.instances.get(index)
    }

    pub fn extra_field(&self) -> Option<&Value> {
        self.extra_field.as_ref()
    }

    pub fn min_rows(&self) -> usize {
        self.min_rows
    }

    /// Appends a blank component. Allowed even with pending errors.
    pub fn add_one(&mut self) -> RowChange {
        let index = self.instances.len();
        self.instances.push(WidgetInstance::empty(index));
        RowChange::Added { index }
    }

    /// Removes the highest-index component.
    ///
    /// Refused while validation errors are pending, and clamped at the
    /// row floor.
    pub fn remove_one(&mut self) -> RowChange {
        if self.has_errors() {
            return RowChange::Blocked;
        }
        if self.instances.len() <= self.min_rows {
            return RowChange::Clamped;
        }
        match self.instances.pop() {
            Some(removed) => RowChange::Removed {
                index: removed.index,
            },
            None => RowChange::Clamped,
        }
    }

    /// Whether another component may be added under the widget limit.
    pub fn can_add_more(&self, schema: &WidgetSchema) -> bool {
        schema.limit.map_or(true, |limit| self.rows() < limit)
    }

    pub fn can_remove(&self) -> bool {
        self.rows() > self.min_rows
    }

    /// Changes a component's weight; takes effect on [`reorder`](Self::reorder).
    pub fn set_weight(&mut self, index: usize, weight: i64) -> bool {
        match self.instances.get_mut(index) {
            Some(instance) => {
                instance.weight = weight;
                true
            }
            None => false,
        }
    }

    /// Stable sort by weight ascending, renumbering indices.
    pub fn reorder(&mut self) {
        reorder(&mut self.instances);
    }

    /// Replaces the state with submitted component values.
    ///
    /// `components` has the blob shape. Submitted `_weight`s are honoured
    /// and the components re-sorted; the row count follows the submission.
    pub fn apply_submission(&mut self, components: Value) -> Result<(), ComposeError> {
        let data = WidgetData::from_value(components)?;
        let (instances, extra_field) = data.into_instances();
        self.instances = instances;
        if extra_field.is_some() {
            self.extra_field = extra_field;
        }
        while self.instances.len() < self.min_rows {
            self.instances.push(WidgetInstance::empty(self.instances.len()));
        }
        Ok(())
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn set_errors(&mut self, errors: Vec<ValidationError>) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// The state in blob shape, `_weight` included.
    pub fn to_value(&self) -> Value {
        to_blob_value(&self.instances, self.extra_field.as_ref())
    }

    pub fn to_blob(&self) -> String {
        self.to_value().to_string()
    }

    /// Values addressed the way element names address them, for the
    /// rule engine: `{"components": {"0": {...}, "extra_field": {...}}}`.
    pub fn form_values(&self) -> Value {
        let mut components = Map::new();
        for instance in &self.instances {
            components.insert(
                instance.index.to_string(),
                Value::Object(instance.values.clone()),
            );
        }
        if let Some(extra) = &self.extra_field {
            components.insert(EXTRA_FIELD_KEY.to_string(), extra.clone());
        }
        let mut values = Map::new();
        values.insert(COMPONENTS_KEY.to_string(), Value::Object(components));
        Value::Object(values)
    }
}
