use urlencoding::encode;

/// Build the search URL for a query by appending the percent-encoded query
/// text to the configured base URL.
#[must_use]
pub fn build_search_url(base_url: &str, query: &str) -> String {
    format!("{base_url}{}", encode(query))
}
