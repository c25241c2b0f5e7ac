//! Account lookup.

use std::collections::HashMap;

/// A resolved account identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Account uuid, matched against [`ApiKeyRecord::owner_id`](crate::ApiKeyRecord).
    pub id: String,
    pub name: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Principal {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Account store consulted once a key has matched.
pub trait AccountStore: Send + Sync {
    fn find_by_owner_id(&self, owner_id: &str) -> Option<Principal>;
}

/// Accounts held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    accounts: HashMap<String, Principal>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, principal: Principal) -> Option<Principal> {
        self.accounts.insert(principal.id.clone(), principal)
    }

    pub fn remove(&mut self, id: &str) -> Option<Principal> {
        self.accounts.remove(id)
    }
}

impl FromIterator<Principal> for InMemoryAccounts {
    fn from_iter<I: IntoIterator<Item = Principal>>(iter: I) -> Self {
        let mut store = InMemoryAccounts::new();
        for principal in iter {
            store.insert(principal);
        }
        store
    }
}

impl AccountStore for InMemoryAccounts {
    fn find_by_owner_id(&self, owner_id: &str) -> Option<Principal> {
        self.accounts.get(owner_id).cloned()
    }
}

impl<S: AccountStore + ?Sized> AccountStore for &S {
    fn find_by_owner_id(&self, owner_id: &str) -> Option<Principal> {
        (**self).find_by_owner_id(owner_id)
    }
}
