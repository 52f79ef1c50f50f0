//! Feed opening over the live browser engine.

use crate::guard::{FeedSource, FeedStart};
use async_trait::async_trait;
use rankscope_browser::{BrowserEngine, BrowserError, ResultFeed, SearchPage};
use tokio::time::sleep;

#[async_trait]
impl FeedSource for BrowserEngine {
    type Feed = SearchPage;

    async fn open(&self, url: &str) -> Result<FeedStart<SearchPage>, BrowserError> {
        let page = self.open_search(url).await?;

        // Let the first render settle before polling for results
        sleep(self.settings().initial_wait()).await;

        match page.wait_for_results().await? {
            Some(initial_items) => Ok(FeedStart::Ready {
                feed: page,
                initial_items,
            }),
            None => {
                if let Err(e) = page.close().await {
                    tracing::debug!("Failed to close timed-out page: {e}");
                }
                Ok(FeedStart::TimedOut)
            }
        }
    }
}
