//! Where widget schemas come from.

use crate::error::ConfigurationError;
use crate::schema::WidgetSchema;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read-only source of widget schemas.
pub trait SchemaStore: Send + Sync {
    /// Loads one schema; an unknown id is a [`ConfigurationError::UnknownWidget`].
    fn load_schema(&self, widget_id: &str) -> Result<WidgetSchema, ConfigurationError>;

    /// Every schema, ordered by widget id.
    fn list(&self) -> Result<Vec<WidgetSchema>, ConfigurationError>;
}

impl<S: SchemaStore + ?Sized> SchemaStore for &S {
    fn load_schema(&self, widget_id: &str) -> Result<WidgetSchema, ConfigurationError> {
        (**self).load_schema(widget_id)
    }

    fn list(&self) -> Result<Vec<WidgetSchema>, ConfigurationError> {
        (**self).list()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySchemas {
    schemas: BTreeMap<String, WidgetSchema>,
}

impl InMemorySchemas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema: WidgetSchema) -> Option<WidgetSchema> {
        self.schemas.insert(schema.id.clone(), schema)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl FromIterator<WidgetSchema> for InMemorySchemas {
    fn from_iter<T: IntoIterator<Item = WidgetSchema>>(iter: T) -> Self {
        let mut store = InMemorySchemas::new();
        for schema in iter {
            store.insert(schema);
        }
        store
    }
}

impl SchemaStore for InMemorySchemas {
    fn load_schema(&self, widget_id: &str) -> Result<WidgetSchema, ConfigurationError> {
        self.schemas
            .get(widget_id)
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownWidget(widget_id.to_string()))
    }

    fn list(&self) -> Result<Vec<WidgetSchema>, ConfigurationError> {
        Ok(self.schemas.values().cloned().collect())
    }
}

/// A directory of JSON schema documents, one per widget.
///
/// The file of `provider:name` is `provider_name.json`. A document's `id`
/// member overrides the id taken from its file name.
#[derive(Debug, Clone)]
pub struct JsonDirSchemas {
    dir: PathBuf,
}

impl JsonDirSchemas {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let dir = dir.as_ref().to_path_buf();
        if !fs::metadata(&dir)?.is_dir() {
            return Err(ConfigurationError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("{} is not a directory", dir.display()),
            )));
        }
        Ok(JsonDirSchemas { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, widget_id: &str, path: &Path) -> Result<WidgetSchema, ConfigurationError> {
        let text = fs::read_to_string(path)?;
        WidgetSchema::from_json_str(widget_id, &text)
    }
}

pub fn schema_file_name(widget_id: &str) -> String {
    format!("{}.json", widget_id.replace(':', "_"))
}

/// Widget ids never address anything outside the store directory.
fn is_plain_id(widget_id: &str) -> bool {
    !widget_id.is_empty()
        && !widget_id.starts_with('.')
        && !widget_id.contains(|c: char| c == '/' || c == '\\')
}

impl SchemaStore for JsonDirSchemas {
    fn load_schema(&self, widget_id: &str) -> Result<WidgetSchema, ConfigurationError> {
        if !is_plain_id(widget_id) {
            return Err(ConfigurationError::UnknownWidget(widget_id.to_string()));
        }
        let path = self.dir.join(schema_file_name(widget_id));
        match self.read(widget_id, &path) {
            Err(ConfigurationError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                Err(ConfigurationError::UnknownWidget(widget_id.to_string()))
            }
            other => other,
        }
    }

    fn list(&self) -> Result<Vec<WidgetSchema>, ConfigurationError> {
        let mut entries: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping schema file with a non UTF-8 name");
                continue;
            };
            entries.push((stem.to_string(), path));
        }
        entries.sort();
        debug!(dir = %self.dir.display(), schemas = entries.len(), "listing widget schemas");
        entries
            .iter()
            .map(|(id, path)| self.read(id, path))
            .collect()
    }
}
