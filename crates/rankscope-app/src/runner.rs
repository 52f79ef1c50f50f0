//! Outer batch loop.
//!
//! Queries are processed strictly sequentially (at most one scan is in
//! flight) while the write pipeline drains concurrently. A query's result
//! is enqueued before the next query's scan begins; it does not wait to be
//! written.

use crate::pipeline::{WriteJob, WritePipeline};
use rankscope_core::config::AppConfig;
use rankscope_core::{Outcome, SkuEntry};
use rankscope_scanner::{FeedSource, LoadGuard};
use tracing::{error, info, warn};

/// Per-run outcome counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Queries processed
    pub queries: usize,
    /// Targets located
    pub found: usize,
    /// Feeds that genuinely ended without the target
    pub not_found: usize,
    /// Scans that hit the item ceiling
    pub overflowed: usize,
}

/// Sequential batch runner over one feed source.
pub struct BatchRunner<'a, S: FeedSource> {
    source: &'a S,
    config: &'a AppConfig,
    pipeline: &'a WritePipeline,
}

impl<'a, S: FeedSource> BatchRunner<'a, S> {
    /// Create a runner.
    #[must_use]
    pub fn new(source: &'a S, config: &'a AppConfig, pipeline: &'a WritePipeline) -> Self {
        Self {
            source,
            config,
            pipeline,
        }
    }

    /// Process every query of every entry, in sheet order.
    ///
    /// A scan error degrades that one query to the not-found sentinel and
    /// never aborts its siblings.
    pub async fn run(&self, entries: &[SkuEntry]) -> BatchSummary {
        let guard = LoadGuard::new(self.source, &self.config.search, &self.config.locator);
        let mut summary = BatchSummary::default();

        for entry in entries {
            info!(
                "Processing SKU {} ({} queries)",
                entry.sku,
                entry.queries.len()
            );

            for query in &entry.queries {
                let outcome = match guard.search(&entry.sku, &query.text).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(
                            "Scan failed for SKU {} query '{}': {e}",
                            entry.sku, query.text
                        );
                        Outcome::NotFound { total_seen: 0 }
                    }
                };

                summary.queries += 1;
                match outcome {
                    Outcome::Found { position, .. } => {
                        summary.found += 1;
                        info!("Position {position} -> writing to row {}", query.row);
                    }
                    Outcome::NotFound { total_seen } => {
                        summary.not_found += 1;
                        warn!(
                            "SKU {} not found in {total_seen} items for query '{}'",
                            entry.sku, query.text
                        );
                    }
                    Outcome::Overflow { total_seen } => {
                        summary.overflowed += 1;
                        warn!(
                            "SKU {} past the {total_seen}-item ceiling for query '{}'",
                            entry.sku, query.text
                        );
                    }
                }

                self.pipeline.enqueue(WriteJob {
                    row: query.row,
                    value: outcome.cell_value(),
                    found: outcome.is_found(),
                });
            }
        }

        summary
    }
}
