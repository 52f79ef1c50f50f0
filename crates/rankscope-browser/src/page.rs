//! A live search-results tab exposed as a [`ResultFeed`].
//!
//! Snapshots are taken by evaluating a collector script against the full
//! page (not an incremental diff), so every round re-observes the whole
//! loaded prefix. The script returns a JSON-stringified array of product
//! hrefs; anything else is a decode failure, never silently coerced.

use crate::error::{BrowserError, Result};
use crate::extract::extract_sku;
use crate::feed::ResultFeed;
use chromiumoxide::Page;
use rankscope_core::config::BrowserConfig;
use rankscope_core::Sku;
use tokio::time::{sleep, Instant};

/// Collects hrefs of all product links currently in the DOM, tile order.
const JS_COLLECT_PRODUCT_LINKS: &str = r#"
(() => {
    const tiles = document.querySelectorAll('[class*="tile-root"]');
    const products = [];
    for (const tile of tiles) {
        const link = tile.querySelector('a[href*="/product/"]');
        if (link) {
            products.push(link.href);
        }
    }
    return JSON.stringify(products);
})()
"#;

/// Dumps selector hit counts and page dimensions when results never appear,
/// to diagnose selector drift and blank renders.
const JS_PAGE_DEBUG: &str = r#"
(() => {
    const results = {};
    results.tile_root = document.querySelectorAll('[class*="tile-root"]').length;
    results.product_card = document.querySelectorAll('[class*="product-card"]').length;
    results.search_result = document.querySelectorAll('[class*="search-result"]').length;
    results.product_links = document.querySelectorAll('a[href*="/product/"]').length;
    results.all_links = document.querySelectorAll('a').length;
    results.body_length = document.body.innerHTML.length;
    results.url = window.location.href;
    return JSON.stringify(results);
})()
"#;

/// One open search-results tab.
pub struct SearchPage {
    page: Page,
    config: BrowserConfig,
}

impl SearchPage {
    /// Wrap an open CDP page.
    #[must_use]
    pub fn new(page: Page, config: BrowserConfig) -> Self {
        Self { page, config }
    }

    /// Wait for the first results to render.
    ///
    /// Polls the collector script until it reports at least one product link
    /// or the configured timeout expires. On timeout, dumps page diagnostics
    /// at warn level and returns `Ok(None)`.
    pub async fn wait_for_results(&self) -> Result<Option<usize>> {
        let timeout = self.config.results_wait_timeout();
        tracing::debug!("Waiting for results (timeout={timeout:?})");

        let start = Instant::now();
        while start.elapsed() < timeout {
            let hrefs = self.product_hrefs().await?;
            if !hrefs.is_empty() {
                tracing::debug!("Results appeared: {} items", hrefs.len());
                return Ok(Some(hrefs.len()));
            }
            sleep(self.config.results_poll_interval()).await;
        }

        tracing::warn!("Timeout waiting for results - dumping page structure");
        match self.eval_value(JS_PAGE_DEBUG).await {
            Ok(debug_info) => tracing::warn!("Page debug info: {debug_info}"),
            Err(e) => tracing::warn!("Page debug dump failed: {e}"),
        }

        Ok(None)
    }

    /// Product hrefs currently in the DOM, tile order.
    async fn product_hrefs(&self) -> Result<Vec<String>> {
        let value = self.eval_value(JS_COLLECT_PRODUCT_LINKS).await?;
        decode_href_array(&value)
    }

    /// Evaluate a script and return its JSON value.
    async fn eval_value(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::EvaluationError(e.to_string()))?;

        result
            .value()
            .cloned()
            .ok_or_else(|| BrowserError::EvaluationError("script returned no value".to_string()))
    }

    /// Evaluate a script for its side effect, ignoring the result value.
    async fn eval_unit(&self, script: &str) -> Result<()> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::EvaluationError(e.to_string()))?;
        Ok(())
    }

    /// Evaluate a script expected to yield a number.
    async fn eval_number(&self, script: &str) -> Result<i64> {
        let value = self.eval_value(script).await?;
        value
            .as_f64()
            .map(|n| n as i64)
            .ok_or_else(|| BrowserError::DecodeError(format!("expected number, got {value}")))
    }
}

#[async_trait::async_trait]
impl ResultFeed for SearchPage {
    async fn snapshot(&self) -> Result<Vec<Sku>> {
        let hrefs = self.product_hrefs().await?;
        tracing::debug!("Snapshot: {} hrefs in DOM", hrefs.len());
        Ok(hrefs.iter().filter_map(|h| extract_sku(h)).collect())
    }

    async fn advance(&self, step: i64) -> Result<()> {
        self.eval_unit(&format!("window.scrollBy(0, {step})")).await
    }

    async fn scroll_position(&self) -> Result<i64> {
        self.eval_number("window.scrollY").await
    }

    async fn content_height(&self) -> Result<i64> {
        self.eval_number("document.documentElement.scrollHeight")
            .await
    }

    async fn close(self) -> Result<()> {
        self.page
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }
}

/// Decode the collector script's result: a JSON string holding an array
/// of hrefs. Any other shape is a decode failure.
fn decode_href_array(value: &serde_json::Value) -> Result<Vec<String>> {
    let raw = value.as_str().ok_or_else(|| {
        BrowserError::DecodeError(format!("expected JSON-stringified array, got {value}"))
    })?;

    serde_json::from_str(raw)
        .map_err(|e| BrowserError::DecodeError(format!("malformed href array: {e}")))
}
