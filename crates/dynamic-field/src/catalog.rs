//! Widget listing for the selection step.

use crate::error::ConfigurationError;
use crate::schema::WidgetSchema;
use crate::store::SchemaStore;
use indexmap::IndexMap;
use serde::Serialize;

/// Category of widgets declaring none.
pub const FALLBACK_CATEGORY: &str = "Others";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetSummary {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    pub multiple: bool,
}

impl From<&WidgetSchema> for WidgetSummary {
    fn from(schema: &WidgetSchema) -> Self {
        WidgetSummary {
            id: schema.id.clone(),
            name: schema.name.clone(),
            provider: schema.provider().to_string(),
            screenshot: schema.screenshot.clone(),
            multiple: schema.multiple,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub widgets: Vec<WidgetSummary>,
}

/// Snapshot of the widgets of a store.
#[derive(Debug, Clone, Default)]
pub struct WidgetCatalog {
    schemas: Vec<WidgetSchema>,
}

impl WidgetCatalog {
    pub fn new(schemas: Vec<WidgetSchema>) -> Self {
        WidgetCatalog { schemas }
    }

    pub fn from_store(store: &dyn SchemaStore) -> Result<Self, ConfigurationError> {
        Ok(WidgetCatalog::new(store.list()?))
    }

    pub fn get(&self, widget_id: &str) -> Option<&WidgetSchema> {
        self.schemas.iter().find(|s| s.id == widget_id)
    }

    /// Enabled widgets grouped by category.
    ///
    /// Categories keep their first-seen order, except the fallback
    /// category which always comes last. With `allowed_providers`, only
    /// widgets whose provider is listed are kept.
    pub fn by_category(&self, allowed_providers: Option<&[String]>) -> Vec<CategoryGroup> {
        let mut groups: IndexMap<String, Vec<WidgetSummary>> = IndexMap::new();
        let visible = self.schemas.iter().filter(|s| s.enabled).filter(|s| {
            allowed_providers.map_or(true, |allowed| allowed.iter().any(|p| p == s.provider()))
        });
        for schema in visible {
            let category = schema
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(FALLBACK_CATEGORY);
            groups
                .entry(category.to_string())
                .or_default()
                .push(WidgetSummary::from(schema));
        }
        if let Some(others) = groups.shift_remove(FALLBACK_CATEGORY) {
            groups.insert(FALLBACK_CATEGORY.to_string(), others);
        }
        groups
            .into_iter()
            .map(|(category, widgets)| CategoryGroup { category, widgets })
            .collect()
    }
}
