use vactory_api_key_auth::{
    ApiKeyAccessCheck, ApiKeyRecord, InMemoryAccounts, KeyIndex, Principal,
};

/// Registry used across the suites:
/// - `editor-key` belongs to an existing account,
/// - `orphan-key` belongs to a deleted account.
pub fn registry() -> Vec<ApiKeyRecord> {
    vec![
        ApiKeyRecord::new("editor-key", "uuid-editor"),
        ApiKeyRecord::new("orphan-key", "uuid-deleted"),
    ]
}

pub fn accounts() -> InMemoryAccounts {
    InMemoryAccounts::from_iter([
        Principal::new("uuid-editor").with_name("editor"),
        Principal::new("uuid-admin").with_name("admin"),
    ])
}

pub fn access_check() -> ApiKeyAccessCheck<InMemoryAccounts> {
    ApiKeyAccessCheck::new(KeyIndex::build(registry()), accounts())
}
