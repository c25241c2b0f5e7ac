//! Key registry: the stored keys and the lookup index built from them.

use crate::error::AuthError;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A configured API key and the account that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiKeyRecord {
    pub key: String,
    /// Uuid of the owning account.
    #[serde(alias = "user_uuid")]
    pub owner_id: String,
    /// Informational label, never used for matching.
    #[serde(default)]
    pub label: Option<String>,
}

impl ApiKeyRecord {
    pub fn new(key: impl Into<String>, owner_id: impl Into<String>) -> Self {
        ApiKeyRecord {
            key: key.into(),
            owner_id: owner_id.into(),
            label: None,
        }
    }
}

/// Source of the configured keys.
pub trait KeyStore {
    fn load_all(&self) -> Result<Vec<ApiKeyRecord>, AuthError>;
}

impl KeyStore for Vec<ApiKeyRecord> {
    fn load_all(&self) -> Result<Vec<ApiKeyRecord>, AuthError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    api_key: Vec<ApiKeyRecord>,
}

/// Keys declared as `[[api_key]]` tables in a TOML document.
///
/// ```toml
/// [[api_key]]
/// key = "abc"
/// user_uuid = "6f1c..."
/// label = "frontend"
/// ```
#[derive(Debug, Clone)]
pub enum TomlKeyStore {
    Inline(String),
    File(PathBuf),
}

impl TomlKeyStore {
    pub fn inline(text: impl Into<String>) -> Self {
        TomlKeyStore::Inline(text.into())
    }

    pub fn file(path: impl AsRef<Path>) -> Self {
        TomlKeyStore::File(path.as_ref().to_path_buf())
    }
}

impl KeyStore for TomlKeyStore {
    fn load_all(&self) -> Result<Vec<ApiKeyRecord>, AuthError> {
        let text = match self {
            TomlKeyStore::Inline(text) => text.clone(),
            TomlKeyStore::File(path) => std::fs::read_to_string(path)?,
        };
        let doc: RegistryDocument = toml::from_str(&text)?;
        Ok(doc.api_key)
    }
}

/// Exact-match index from key to record.
///
/// Built once at load time. When a key occurs more than once the first
/// record is kept: the first match is authoritative even if its owner no
/// longer resolves.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    by_key: HashMap<String, ApiKeyRecord>,
}

impl KeyIndex {
    pub fn build(records: impl IntoIterator<Item = ApiKeyRecord>) -> Self {
        let mut by_key = HashMap::new();
        for record in records {
            match by_key.entry(record.key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(first) => {
                    warn!(
                        kept_owner = %first.get().owner_id,
                        ignored_owner = %record.owner_id,
                        "duplicate api key in registry, keeping first record"
                    );
                }
            }
        }
        debug!(keys = by_key.len(), "api key index built");
        KeyIndex { by_key }
    }

    pub fn load(store: &dyn KeyStore) -> Result<Self, AuthError> {
        Ok(KeyIndex::build(store.load_all()?))
    }

    pub fn get(&self, key: &str) -> Option<&ApiKeyRecord> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_lookup_is_exact() {
        let index = KeyIndex::build(vec![ApiKeyRecord::new("abc", "u1")]);
        assert!(index.get("abc").is_some());
        assert!(index.get("ABC").is_none());
        assert!(index.get("abc ").is_none());
    }

    #[test]
    fn test_duplicate_key_keeps_first() {
        let index = KeyIndex::build(vec![
            ApiKeyRecord::new("dup", "first"),
            ApiKeyRecord::new("dup", "second"),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("dup").map(|r| r.owner_id.as_str()), Some("first"));
    }

    #[test]
    fn test_toml_store_accepts_user_uuid_alias() {
        let store = TomlKeyStore::inline(
            r#"
            [[api_key]]
            key = "k1"
            user_uuid = "u1"
            label = "frontend"

            [[api_key]]
            key = "k2"
            owner_id = "u2"
            "#,
        );
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].owner_id, "u1");
        assert_eq!(records[0].label.as_deref(), Some("frontend"));
        assert_eq!(records[1].owner_id, "u2");
    }

    #[test]
    fn test_toml_store_empty_document() {
        let store = TomlKeyStore::inline("");
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_toml_store_rejects_missing_owner() {
        let store = TomlKeyStore::inline("[[api_key]]\nkey = \"k\"\n");
        assert!(matches!(store.load_all(), Err(AuthError::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = TomlKeyStore::file("/definitely/not/here/keys.toml");
        assert!(matches!(store.load_all(), Err(AuthError::Io(_))));
    }
}
