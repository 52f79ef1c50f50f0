use crate::error::{BrowserError, Result};
use crate::page::SearchPage;
use chromiumoxide::browser::BrowserConfig as ChromiumConfig;
use chromiumoxide::browser::Browser;
use futures_util::stream::StreamExt;
use rankscope_core::config::BrowserConfig;
use std::time::Duration;

/// Browser automation engine
pub struct BrowserEngine {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserEngine {
    /// Launch a browser with default settings.
    pub async fn new() -> Result<Self> {
        Self::launch(&BrowserConfig::default()).await
    }

    /// Launch a browser with the given settings.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(config.window_width, config.window_height)
            .request_timeout(Duration::from_secs(config.navigation_timeout_secs));

        if !config.headless {
            builder = builder.with_head();
        }

        let chromium_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(chromium_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            config: config.clone(),
        })
    }

    /// Open a search-results page in a fresh tab.
    pub async fn open_search(&self, url: &str) -> Result<SearchPage> {
        tracing::debug!("Opening search page: {url}");
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;

        Ok(SearchPage::new(page, self.config.clone()))
    }

    /// The settings the engine was launched with.
    #[must_use]
    pub fn settings(&self) -> &BrowserConfig {
        &self.config
    }

    /// Close the browser process.
    pub async fn shutdown(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }
}
