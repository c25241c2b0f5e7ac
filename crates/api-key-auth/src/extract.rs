//! Credential extraction.

use crate::request::ApiRequest;
use tracing::debug;
use vactory_util::non_blank;

/// Body field and query parameter carrying the key.
pub const API_KEY_FIELD: &str = "api_key";

/// Header carrying the key.
pub const API_KEY_HEADER: &str = "apikey";

/// Where a key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Body,
    Query,
    Header,
}

/// Finds the API key candidate and the source it came from.
///
/// Sources are tried in order: body field `api_key`, query parameter
/// `api_key`, header `apikey`. The first non-blank value wins; an empty
/// value or `"0"` is skipped as if it were absent.
pub fn find_key(request: &ApiRequest) -> Option<(&str, KeySource)> {
    let found = non_blank(request.body_field(API_KEY_FIELD))
        .map(|k| (k, KeySource::Body))
        .or_else(|| non_blank(request.query_param(API_KEY_FIELD)).map(|k| (k, KeySource::Query)))
        .or_else(|| non_blank(request.header(API_KEY_HEADER)).map(|k| (k, KeySource::Header)));
    if let Some((_, source)) = found {
        debug!(?source, "api key candidate found");
    }
    found
}

/// Extracts the API key from a request, see [`find_key`] for precedence.
pub fn extract_key(request: &ApiRequest) -> Option<&str> {
    find_key(request).map(|(key, _)| key)
}
