//! The access decision.

use crate::accounts::{AccountStore, Principal};
use crate::error::Forbidden;
use crate::extract::extract_key;
use crate::registry::KeyIndex;
use crate::request::ApiRequest;
use tracing::{debug, warn};

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessResult {
    Allowed(Principal),
    Forbidden,
}

impl AccessResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessResult::Allowed(_))
    }

    pub fn into_result(self) -> Result<Principal, Forbidden> {
        match self {
            AccessResult::Allowed(principal) => Ok(principal),
            AccessResult::Forbidden => Err(Forbidden),
        }
    }
}

/// Resolves the request's API key to the owning account.
///
/// 1. No key in the request: forbidden, the index is not consulted.
/// 2. Key not registered: forbidden.
/// 3. Key registered but its owner has no account: forbidden.
/// 4. Otherwise the owner's principal is allowed.
pub fn authenticate(
    request: &ApiRequest,
    index: &KeyIndex,
    accounts: &dyn AccountStore,
) -> AccessResult {
    let Some(key) = extract_key(request) else {
        debug!("no api key in request");
        return AccessResult::Forbidden;
    };
    let Some(record) = index.get(key) else {
        debug!("api key not registered");
        return AccessResult::Forbidden;
    };
    match accounts.find_by_owner_id(&record.owner_id) {
        Some(principal) => AccessResult::Allowed(principal),
        None => {
            warn!(owner = %record.owner_id, "api key owner has no account");
            AccessResult::Forbidden
        }
    }
}

/// Access check for API key protected routes.
///
/// Owns the key index and the account store; share it between requests.
pub struct ApiKeyAccessCheck<A> {
    index: KeyIndex,
    accounts: A,
}

impl<A: AccountStore> ApiKeyAccessCheck<A> {
    pub fn new(index: KeyIndex, accounts: A) -> Self {
        ApiKeyAccessCheck { index, accounts }
    }

    pub fn index(&self) -> &KeyIndex {
        &self.index
    }

    /// Checks access for the request without touching it.
    pub fn access(&self, request: &ApiRequest) -> AccessResult {
        authenticate(request, &self.index, &self.accounts)
    }

    /// Checks access and attaches the principal to the request context.
    ///
    /// On rejection the request is left untouched and [`Forbidden`] maps
    /// to an HTTP 403.
    pub fn guard<'r>(&self, request: &'r mut ApiRequest) -> Result<&'r Principal, Forbidden> {
        let principal = self.access(request).into_result()?;
        Ok(request.attach_principal(principal))
    }
}
