use crate::error::Result;
use rankscope_core::Sku;

/// The scroll-driven results feed for one search query.
///
/// Implemented by [`crate::SearchPage`] over a live CDP tab; tests implement
/// it with scripted in-memory feeds.
#[async_trait::async_trait]
pub trait ResultFeed: Send + Sync {
    /// Read the SKUs of all currently visible items, in DOM order.
    ///
    /// Successive snapshots re-observe the whole loaded prefix, so repeats
    /// across calls are expected.
    async fn snapshot(&self) -> Result<Vec<Sku>>;

    /// Request more content by advancing the feed `step` units.
    async fn advance(&self, step: i64) -> Result<()>;

    /// Current scroll offset. Diagnostics only, never a control input.
    async fn scroll_position(&self) -> Result<i64>;

    /// Current rendered content height. Diagnostics only.
    async fn content_height(&self) -> Result<i64>;

    /// Release the feed's underlying resources.
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
