//! The two-step composer dialog: pick a widget, then fill its components.

use crate::catalog::{CategoryGroup, WidgetCatalog};
use crate::composer::{ComposerState, RowChange};
use crate::error::ComposeError;
use crate::form::{build, ComposedForm};
use crate::request::ModalRequest;
use crate::schema::WidgetSchema;
use crate::settings::DynamicFieldSettings;
use crate::store::SchemaStore;
use crate::validate::validate_into;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    Dropdown,
    /// Thumbnail tabs, one per category.
    Templates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSelection {
    pub field_id: String,
    pub mode: SelectMode,
    pub groups: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ModalStep {
    SelectWidget(WidgetSelection),
    Form(ComposedForm),
}

/// Button pressed on the component form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    AddMore,
    RemoveOne,
}

/// Outcome of submitting the component form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation failed; the form is rebuilt with the errors attached.
    Invalid(ComposedForm),
    /// Data to store on the host field.
    Accepted { widget_id: String, data: String },
}

pub struct ModalComposer<S> {
    store: S,
    settings: DynamicFieldSettings,
    allowed_providers: Option<Vec<String>>,
}

impl<S: SchemaStore> ModalComposer<S> {
    pub fn new(store: S, settings: DynamicFieldSettings) -> Self {
        ModalComposer {
            store,
            settings,
            allowed_providers: None,
        }
    }

    /// Restricts the selection step to widgets of these providers.
    pub fn with_allowed_providers(mut self, providers: Vec<String>) -> Self {
        self.allowed_providers = Some(providers);
        self
    }

    pub fn settings(&self) -> &DynamicFieldSettings {
        &self.settings
    }

    fn schema(&self, request: &ModalRequest) -> Result<Option<WidgetSchema>, ComposeError> {
        match &request.widget_id {
            Some(id) => Ok(Some(self.store.load_schema(id)?)),
            None => Ok(None),
        }
    }

    fn state(
        &self,
        request: &ModalRequest,
        requested_rows: Option<usize>,
    ) -> Result<ComposerState, ComposeError> {
        ComposerState::from_blob(request.data.as_deref(), requested_rows, self.settings.row_floor)
    }

    /// Lists the selectable widgets.
    pub fn select_widget(&self, field_id: &str) -> Result<WidgetSelection, ComposeError> {
        let catalog = WidgetCatalog::from_store(&self.store)?;
        let mode = if self.settings.is_dropdown_select_templates {
            SelectMode::Dropdown
        } else {
            SelectMode::Templates
        };
        Ok(WidgetSelection {
            field_id: field_id.to_string(),
            mode,
            groups: catalog.by_category(self.allowed_providers.as_deref()),
        })
    }

    /// Opens the dialog: the widget selection without a widget id, the
    /// component form otherwise.
    pub fn open(
        &self,
        request: &ModalRequest,
        requested_rows: Option<usize>,
    ) -> Result<ModalStep, ComposeError> {
        let Some(schema) = self.schema(request)? else {
            debug!(field = %request.field_id, "no widget selected yet");
            return Ok(ModalStep::SelectWidget(self.select_widget(&request.field_id)?));
        };
        let state = self.state(request, requested_rows)?;
        Ok(ModalStep::Form(build(&schema, &state)))
    }

    /// Applies an add or remove button to the submitted components and
    /// rebuilds the form.
    pub fn row_action(
        &self,
        request: &ModalRequest,
        components: Value,
        action: RowAction,
    ) -> Result<ComposedForm, ComposeError> {
        let schema = self.require_schema(request)?;
        let mut state = self.state(request, None)?;
        state.apply_submission(components)?;
        let change = match action {
            RowAction::AddMore => state.add_one(),
            RowAction::RemoveOne => {
                validate_into(&schema, &mut state);
                state.remove_one()
            }
        };
        if change == RowChange::Blocked {
            debug!(widget = %schema.id, "removal blocked by validation errors");
        }
        Ok(build(&schema, &state))
    }

    /// Validates the submitted components.
    pub fn submit(
        &self,
        request: &ModalRequest,
        components: Value,
    ) -> Result<Submission, ComposeError> {
        let schema = self.require_schema(request)?;
        let mut state = self.state(request, None)?;
        state.apply_submission(components)?;
        if !validate_into(&schema, &mut state) {
            return Ok(Submission::Invalid(build(&schema, &state)));
        }
        info!(widget = %schema.id, field = %request.field_id, rows = state.rows(), "widget data accepted");
        Ok(Submission::Accepted {
            widget_id: schema.id,
            data: state.to_blob(),
        })
    }

    fn require_schema(&self, request: &ModalRequest) -> Result<WidgetSchema, ComposeError> {
        self.schema(request)?
            .ok_or_else(|| ComposeError::client("The \"widget_id\" query parameter is required."))
    }
}
