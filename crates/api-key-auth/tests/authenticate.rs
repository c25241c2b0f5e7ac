mod common;

use vactory_api_key_auth::{
    authenticate, AccessResult, AccountStore, ApiKeyRecord, ApiRequest, AuthError, KeyIndex, KeyStore,
    Principal, TomlKeyStore,
};

#[test]
fn key_with_account_is_allowed_with_owner() {
    let check = common::access_check();
    let req = ApiRequest::new().with_header("apikey", "editor-key");
    match check.access(&req) {
        AccessResult::Allowed(principal) => {
            assert_eq!(principal.id, "uuid-editor");
            assert_eq!(principal.name.as_deref(), Some("editor"));
        }
        AccessResult::Forbidden => panic!("expected access"),
    }
}

#[test]
fn unknown_key_is_forbidden() {
    let check = common::access_check();
    let req = ApiRequest::new().with_body_field("api_key", "nope");
    assert_eq!(check.access(&req), AccessResult::Forbidden);
}

#[test]
fn orphaned_key_is_forbidden() {
    let check = common::access_check();
    let req = ApiRequest::new().with_query("api_key", "orphan-key");
    assert_eq!(check.access(&req), AccessResult::Forbidden);
}

#[test]
fn missing_key_is_forbidden() {
    let check = common::access_check();
    assert_eq!(check.access(&ApiRequest::new()), AccessResult::Forbidden);
    let blank = ApiRequest::new().with_header("apikey", "");
    assert_eq!(check.access(&blank), AccessResult::Forbidden);
}

#[test]
fn body_key_decides_even_when_header_key_is_valid() {
    // The body value takes precedence, so a bad body key is not rescued by a
    // good header key.
    let check = common::access_check();
    let req = ApiRequest::new()
        .with_body_field("api_key", "nope")
        .with_header("apikey", "editor-key");
    assert_eq!(check.access(&req), AccessResult::Forbidden);
}

#[test]
fn first_duplicate_is_authoritative_even_if_dangling() {
    let index = KeyIndex::build(vec![
        ApiKeyRecord::new("shared", "uuid-deleted"),
        ApiKeyRecord::new("shared", "uuid-editor"),
    ]);
    let accounts = common::accounts();
    let req = ApiRequest::new().with_query("api_key", "shared");
    assert_eq!(authenticate(&req, &index, &accounts), AccessResult::Forbidden);
}

/// Account store that fails the test if it is ever consulted.
struct Untouchable;

impl AccountStore for Untouchable {
    fn find_by_owner_id(&self, owner_id: &str) -> Option<Principal> {
        panic!("account store consulted for {owner_id}");
    }
}

#[test]
fn missing_key_never_reaches_account_store() {
    let index = KeyIndex::build(common::registry());
    assert_eq!(
        authenticate(&ApiRequest::new(), &index, &Untouchable),
        AccessResult::Forbidden
    );
    let unknown = ApiRequest::new().with_header("apikey", "nope");
    assert_eq!(authenticate(&unknown, &index, &Untouchable), AccessResult::Forbidden);
}

#[test]
fn registry_loaded_from_toml() {
    let store = TomlKeyStore::inline(
        r#"
        [[api_key]]
        key = "editor-key"
        user_uuid = "uuid-editor"
        "#,
    );
    let index = KeyIndex::load(&store).unwrap();
    assert_eq!(index.len(), 1);

    let accounts = common::accounts();
    let req = ApiRequest::new().with_header("ApiKey", "editor-key");
    assert!(authenticate(&req, &index, &accounts).is_allowed());
}

#[test]
fn in_memory_registry_round_trips() {
    let records = common::registry();
    assert_eq!(records.load_all().unwrap(), common::registry());
}

#[test]
fn registry_loaded_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_keys.toml");
    std::fs::write(
        &path,
        "[[api_key]]\nkey = \"orphan-key\"\nowner_id = \"uuid-deleted\"\nlabel = \"old client\"\n",
    )
    .unwrap();
    let index = KeyIndex::load(&TomlKeyStore::file(&path)).unwrap();
    let record = index.get("orphan-key").unwrap();
    assert_eq!(record.owner_id, "uuid-deleted");
    assert_eq!(record.label.as_deref(), Some("old client"));

    let missing = TomlKeyStore::file(dir.path().join("absent.toml"));
    assert!(matches!(KeyIndex::load(&missing), Err(AuthError::Io(_))));
}

#[test]
fn malformed_registry_is_a_config_error() {
    let store = TomlKeyStore::inline("[[api_key]]\nkey = 7\n");
    assert!(matches!(KeyIndex::load(&store), Err(AuthError::Config(_))));
}
