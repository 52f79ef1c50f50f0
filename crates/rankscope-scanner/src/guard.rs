//! Load guard: bounded retry around one query's scan.
//!
//! Search pages sometimes come up with a partial render (CDN hiccups,
//! slow hydration). The guard opens a fresh feed per attempt, discards the
//! attempt entirely when the initial load is not trustworthy, and accepts
//! the locator's outcome otherwise. Scan state never survives a retry.

use crate::error::Result;
use crate::locator::locate;
use crate::url::build_search_url;
use async_trait::async_trait;
use rankscope_browser::{BrowserError, ResultFeed};
use rankscope_core::config::{LocatorConfig, SearchConfig};
use rankscope_core::{Outcome, Sku};
use tokio::time::sleep;

/// Result of opening a feed and waiting for its initial content.
#[derive(Debug)]
pub enum FeedStart<F> {
    /// The feed rendered initial content.
    Ready {
        /// The open feed
        feed: F,
        /// Items visible when the wait completed
        initial_items: usize,
    },
    /// The initial-content wait expired without anything rendering.
    TimedOut,
}

/// Opens fresh result feeds for search URLs.
///
/// Implemented for the live browser engine in [`crate::session`]; tests
/// implement it with scripted sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Concrete feed type produced by this source.
    type Feed: ResultFeed;

    /// Navigate to `url` and wait for initial content.
    async fn open(&self, url: &str) -> std::result::Result<FeedStart<Self::Feed>, BrowserError>;
}

/// Wraps one query's scan in a bounded retry loop.
pub struct LoadGuard<'a, S: FeedSource> {
    source: &'a S,
    search: &'a SearchConfig,
    locator: &'a LocatorConfig,
}

impl<'a, S: FeedSource> LoadGuard<'a, S> {
    /// Create a guard over `source` with the given settings.
    #[must_use]
    pub fn new(source: &'a S, search: &'a SearchConfig, locator: &'a LocatorConfig) -> Self {
        Self {
            source,
            search,
            locator,
        }
    }

    /// Scan the results of `query` for `target`.
    ///
    /// An incomplete initial load (the content wait timing out, or fewer
    /// initial items than `min_initial_results`) discards the feed and all
    /// scan state and retries, up to `max_retries` attempts. A persistent
    /// incomplete signal degrades to `NotFound`. Any other locator outcome,
    /// including a genuine `NotFound`, is accepted as final on the attempt
    /// that produced it. Feed I/O errors propagate to the caller.
    pub async fn search(&self, target: &Sku, query: &str) -> Result<Outcome> {
        let url = build_search_url(&self.search.base_url, query);
        tracing::info!("Query: {query}");
        tracing::debug!("URL: {url}");

        for attempt in 1..=self.search.max_retries {
            if attempt > 1 {
                tracing::info!(
                    "Retry {}/{} for query: {query}",
                    attempt - 1,
                    self.search.max_retries
                );
                sleep(self.search.retry_delay()).await;
            }

            match self.source.open(&url).await? {
                FeedStart::TimedOut => {
                    tracing::warn!("No results loaded for query: {query}");
                    continue;
                }
                FeedStart::Ready {
                    feed,
                    initial_items,
                } => {
                    let min = self.search.min_initial_results;
                    if min > 0 && initial_items < min {
                        tracing::warn!(
                            "Page incomplete ({initial_items} items, expected >= {min}), reloading"
                        );
                        if let Err(e) = feed.close().await {
                            tracing::debug!("Failed to close incomplete feed: {e}");
                        }
                        continue;
                    }

                    let outcome = locate(&feed, target, self.locator).await;
                    if let Err(e) = feed.close().await {
                        tracing::debug!("Failed to close feed: {e}");
                    }
                    return outcome;
                }
            }
        }

        tracing::warn!(
            "Initial load incomplete after {} attempts for query: {query}",
            self.search.max_retries
        );
        Ok(Outcome::NotFound { total_seen: 0 })
    }
}
