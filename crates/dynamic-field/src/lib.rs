//! Dynamic field composer.
//!
//! Builds the nested, ordered form of a widget from its declarative
//! [`WidgetSchema`] and the data blob saved by a previous edit. A widget
//! marked `multiple` repeats its fields once per component; components are
//! ordered by `_weight` and can be added, removed and reordered. Fields of
//! `extra_fields` appear once, above the components.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use vactory_dynamic_field::{build, ComposerState, WidgetSchema};
//!
//! let schema = WidgetSchema::from_value(
//!     "vactory:cards",
//!     json!({
//!         "name": "Cards",
//!         "multiple": true,
//!         "fields": {"title": {"type": "text", "label": "Title"}}
//!     }),
//! )
//! .unwrap();
//!
//! let blob = r#"[{"title": "B", "_weight": 2}, {"title": "A", "_weight": 1}]"#;
//! let state = ComposerState::from_blob(Some(blob), None, 1).unwrap();
//! let form = build(&schema, &state);
//!
//! assert_eq!(form.components.len(), 2);
//! let first = form.find("components[0][title]").unwrap();
//! assert_eq!(first.default_value, Some(json!("A")));
//! ```

pub mod catalog;
pub mod composer;
pub mod data;
pub mod error;
pub mod form;
pub mod modal;
pub mod naming;
pub mod request;
pub mod schema;
pub mod settings;
pub mod states;
pub mod store;
pub mod validate;

pub use catalog::{CategoryGroup, WidgetCatalog, WidgetSummary, FALLBACK_CATEGORY};
pub use composer::{ComposerState, RowChange};
pub use data::{WidgetData, WidgetInstance, EXTRA_FIELD_KEY, WEIGHT_KEY};
pub use error::{ComposeError, ConfigurationError};
pub use form::{build, Component, ComposedForm, Element, ExtraSection, FieldElement, GroupElement};
pub use modal::{ModalComposer, ModalStep, RowAction, SelectMode, Submission, WidgetSelection};
pub use naming::{derive_field_name, storage_name, STORAGE_NAME_LEN};
pub use request::ModalRequest;
pub use schema::{FieldDef, FieldSpec, FieldType, GroupDef, WidgetSchema};
pub use settings::DynamicFieldSettings;
pub use states::{Condition, RuleEngine, VisibilityRule};
pub use store::{InMemorySchemas, JsonDirSchemas, SchemaStore};
pub use validate::{validate, validate_into, ValidationError};
