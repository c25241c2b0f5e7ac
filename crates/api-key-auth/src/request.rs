//! Transport-neutral view of an inbound request.

use crate::accounts::Principal;
use std::collections::HashMap;

/// The parts of an inbound request the access check reads, plus the
/// request context the resolved [`Principal`] is attached to.
///
/// Header names are case-insensitive; they are stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    body: HashMap<String, String>,
    query: HashMap<String, String>,
    headers: HashMap<String, String>,
    principal: Option<Principal>,
}

impl ApiRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn body_field(&self, name: &str) -> Option<&str> {
        self.body.get(name).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// The principal attached by a successful access check.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub(crate) fn attach_principal(&mut self, principal: Principal) -> &Principal {
        self.principal.insert(principal)
    }
}
