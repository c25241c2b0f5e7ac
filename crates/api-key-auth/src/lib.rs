//! API key access check.
//!
//! Protects routes with an API key supplied in the request body, the query
//! string or an `apikey` header. A key is resolved against a [`KeyIndex`]
//! built from a [`KeyStore`], then its owner against an [`AccountStore`].
//! The caller only ever sees [`AccessResult::Allowed`] or
//! [`AccessResult::Forbidden`].
//!
//! # Example
//!
//! ```
//! use vactory_api_key_auth::{
//!     ApiKeyAccessCheck, ApiKeyRecord, ApiRequest, InMemoryAccounts, KeyIndex, Principal,
//! };
//!
//! let index = KeyIndex::build(vec![ApiKeyRecord::new("s3cret", "user-1")]);
//! let accounts = InMemoryAccounts::from_iter([Principal::new("user-1")]);
//! let check = ApiKeyAccessCheck::new(index, accounts);
//!
//! let mut request = ApiRequest::new().with_header("ApiKey", "s3cret");
//! let principal = check.guard(&mut request).unwrap();
//! assert_eq!(principal.id, "user-1");
//! ```

pub mod access;
pub mod accounts;
pub mod error;
pub mod extract;
pub mod registry;
pub mod request;

pub use access::{authenticate, AccessResult, ApiKeyAccessCheck};
pub use accounts::{AccountStore, InMemoryAccounts, Principal};
pub use error::{AuthError, Forbidden};
pub use extract::{extract_key, find_key, KeySource, API_KEY_FIELD, API_KEY_HEADER};
pub use registry::{ApiKeyRecord, KeyIndex, KeyStore, TomlKeyStore};
pub use request::ApiRequest;
