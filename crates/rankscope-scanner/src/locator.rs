//! Rank location over a scroll-driven results feed.
//!
//! This module provides the incremental scan that assigns first-seen
//! positions to every distinct item a feed reports, until the target SKU
//! turns up, the feed stops growing, or the item ceiling is reached.
//! Snapshots re-observe the whole loaded prefix every round, so position
//! assignment must be idempotent under repeats.

use crate::error::Result;
use rankscope_browser::ResultFeed;
use rankscope_core::config::LocatorConfig;
use rankscope_core::{Outcome, Sku};
use std::collections::HashMap;
use tokio::time::sleep;

/// Deduplicated first-seen positions for one scan.
///
/// Once a SKU is assigned a position, that position never changes, no
/// matter how many later snapshots re-report it.
#[derive(Debug, Default)]
pub struct RankTable {
    positions: HashMap<Sku, usize>,
}

impl RankTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next position to `sku` if it has not been seen yet.
    ///
    /// Returns the newly assigned 1-based position, or `None` when the SKU
    /// already holds one.
    pub fn assign(&mut self, sku: Sku) -> Option<usize> {
        if self.positions.contains_key(&sku) {
            return None;
        }
        let position = self.positions.len() + 1;
        self.positions.insert(sku, position);
        Some(position)
    }

    /// Position of `sku`, if assigned.
    #[must_use]
    pub fn position_of(&self, sku: &Sku) -> Option<usize> {
        self.positions.get(sku).copied()
    }

    /// Number of distinct SKUs observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no SKUs have been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Scan `feed` for `target`, assigning first-seen positions round by round.
///
/// Each round takes a full snapshot, assigns positions to unseen SKUs in
/// snapshot order, and short-circuits the moment the target is assigned;
/// the scan never continues past it. A round that discovers nothing new
/// bumps a stale counter; `stale_threshold` consecutive stale rounds mean
/// the feed has genuinely ended (`NotFound`). Reaching `max_items` distinct
/// SKUs stops the scan mid-snapshot (`Overflow`), so items past the ceiling
/// are never assigned. Rounds with growth pause `min_delay` before
/// advancing, stale rounds pause the longer `load_wait` to give lazy
/// content time to arrive.
pub async fn locate<F: ResultFeed>(
    feed: &F,
    target: &Sku,
    config: &LocatorConfig,
) -> Result<Outcome> {
    tracing::info!("Searching for SKU {target}");
    tracing::debug!(
        "Params: max_items={}, scroll_step={}, stale_threshold={}",
        config.max_items,
        config.scroll_step,
        config.stale_threshold
    );

    let height = feed.content_height().await?;
    let scroll_y = feed.scroll_position().await?;
    tracing::debug!("Initial page state: contentHeight={height}, scrollY={scroll_y}");

    let mut table = RankTable::new();
    let mut stale_rounds: u32 = 0;
    let mut advance_count: u32 = 0;

    loop {
        if table.len() >= config.max_items {
            tracing::info!("Reached max_items ceiling ({}), stopping scan", config.max_items);
            return Ok(Outcome::Overflow {
                total_seen: table.len(),
            });
        }

        let prev_len = table.len();
        let snapshot = feed.snapshot().await?;

        let mut new_this_round = 0usize;
        for sku in snapshot {
            if let Some(position) = table.assign(sku.clone()) {
                new_this_round += 1;
                tracing::debug!("New SKU at position {position}: {sku}");

                if sku == *target {
                    tracing::info!("Found SKU {target} at position {position}");
                    return Ok(Outcome::Found {
                        position,
                        total_seen: table.len(),
                    });
                }

                if table.len() >= config.max_items {
                    tracing::info!(
                        "Reached max_items ceiling ({}), stopping scan",
                        config.max_items
                    );
                    return Ok(Outcome::Overflow {
                        total_seen: table.len(),
                    });
                }
            }
        }

        if new_this_round > 0 {
            tracing::info!(
                "Progress: {}/{} positions checked (+{} new)",
                table.len(),
                config.max_items,
                new_this_round
            );
        }

        if table.len() == prev_len {
            stale_rounds += 1;
            tracing::debug!(
                "No new items, stale_rounds={}/{}",
                stale_rounds,
                config.stale_threshold
            );
            if stale_rounds >= config.stale_threshold {
                tracing::info!(
                    "End of results after {} advances, {} items",
                    advance_count,
                    table.len()
                );
                return Ok(Outcome::NotFound {
                    total_seen: table.len(),
                });
            }
            sleep(config.load_wait()).await;
        } else {
            stale_rounds = 0;
            sleep(config.min_delay()).await;
        }

        advance_count += 1;
        let scroll_before = feed.scroll_position().await?;
        feed.advance(config.scroll_step).await?;
        let scroll_after = feed.scroll_position().await?;
        tracing::debug!(
            "Advance #{advance_count}: requested={}px, actual={}px (scrollY: {scroll_before} -> {scroll_after})",
            config.scroll_step,
            scroll_after - scroll_before
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku(s: &str) -> Sku {
        Sku::new(s).expect("valid SKU")
    }

    #[test]
    fn test_rank_table_first_seen_order() {
        let mut table = RankTable::new();
        assert_eq!(table.assign(sku("11")), Some(1));
        assert_eq!(table.assign(sku("22")), Some(2));
        assert_eq!(table.assign(sku("33")), Some(3));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_rank_table_idempotent_assignment() {
        let mut table = RankTable::new();
        assert_eq!(table.assign(sku("11")), Some(1));
        assert_eq!(table.assign(sku("22")), Some(2));

        // Re-observing an item must never move it
        assert_eq!(table.assign(sku("11")), None);
        assert_eq!(table.assign(sku("22")), None);
        assert_eq!(table.position_of(&sku("11")), Some(1));
        assert_eq!(table.position_of(&sku("22")), Some(2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_rank_table_unseen() {
        let table = RankTable::new();
        assert!(table.is_empty());
        assert_eq!(table.position_of(&sku("42")), None);
    }
}
