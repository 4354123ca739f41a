//! Search URL construction.

use url::form_urlencoded::byte_serialize;

/// Appends a form-encoded `query` to `base_url`.
///
/// `base_url` is expected to end with the query parameter, e.g.
/// `https://www.google.com/search?q=`. Spaces become `+`.
#[must_use]
pub fn build_search_url(base_url: &str, query: &str) -> String {
    let encoded: String = byte_serialize(query.trim().as_bytes()).collect();
    format!("{base_url}{encoded}")
}
