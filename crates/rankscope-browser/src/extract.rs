use rankscope_core::Sku;
use regex::Regex;
use std::sync::OnceLock;

/// Extract the SKU from a product href.
///
/// Matches a `/product/<slug>-<digits>/` path segment and returns the digits.
/// Hrefs that don't match the pattern yield `None` and are dropped by the
/// caller; they are filtered input, not errors.
pub fn extract_sku(href: &str) -> Option<Sku> {
    static SKU_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        SKU_PATTERN.get_or_init(|| Regex::new(r"/product/[^/]+-(\d+)/").expect("valid regex"));

    let digits = pattern.captures(href)?.get(1)?.as_str();
    Sku::new(digits).ok()
}
