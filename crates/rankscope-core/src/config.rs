//! Configuration management for Rankscope.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/rankscope/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Search and retry settings
    pub search: SearchConfig,
    /// Rank-locator scan settings
    pub locator: LocatorConfig,
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Google Sheets settings
    pub sheets: SheetsConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `RANKSCOPE_HEADLESS`: Override browser headless mode (true/false)
    /// - `RANKSCOPE_MAX_ITEMS`: Override the locator item ceiling
    /// - `RANKSCOPE_SPREADSHEET_ID`: Override the spreadsheet id
    /// - `RANKSCOPE_SHEET_NAME`: Override the worksheet name
    /// - `RANKSCOPE_CREDENTIALS_PATH`: Override the service-account key path
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Override from environment
        if let Ok(val) = std::env::var("RANKSCOPE_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("RANKSCOPE_MAX_ITEMS") {
            if let Ok(max_items) = val.parse() {
                config.locator.max_items = max_items;
                tracing::debug!("Override locator.max_items from env: {}", max_items);
            }
        }

        if let Ok(val) = std::env::var("RANKSCOPE_SPREADSHEET_ID") {
            tracing::debug!("Override sheets.spreadsheet_id from env");
            config.sheets.spreadsheet_id = val;
        }

        if let Ok(val) = std::env::var("RANKSCOPE_SHEET_NAME") {
            tracing::debug!("Override sheets.sheet_name from env");
            config.sheets.sheet_name = val;
        }

        if let Ok(val) = std::env::var("RANKSCOPE_CREDENTIALS_PATH") {
            tracing::debug!("Override sheets.credentials_path from env");
            config.sheets.credentials_path = PathBuf::from(val);
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/rankscope/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "rankscope", "rankscope").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/rankscope`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "rankscope", "rankscope").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Search and load-guard retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search URL prefix the percent-encoded query is appended to
    pub base_url: String,
    /// Attempts per query when the initial load is incomplete
    pub max_retries: u32,
    /// Delay between attempts in milliseconds
    pub retry_delay_ms: u64,
    /// Minimum items the initial load must show to be trusted
    /// (0 disables the check)
    pub min_initial_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.ozon.ru/search/?text=".to_string(),
            max_retries: 3,
            retry_delay_ms: 1000,
            min_initial_results: 0,
        }
    }
}

impl SearchConfig {
    /// Delay between load-guard attempts.
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Rank-locator scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Ceiling on distinct items scanned per query
    pub max_items: usize,
    /// Scroll magnitude in pixels per advance
    pub scroll_step: i64,
    /// Pause after a round that discovered new items, in milliseconds
    pub min_delay_ms: u64,
    /// Pause after a round with no new items, in milliseconds
    pub load_wait_ms: u64,
    /// Consecutive no-growth rounds before declaring end of feed
    pub stale_threshold: u32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            max_items: 1000,
            scroll_step: 2000,
            min_delay_ms: 150,
            load_wait_ms: 500,
            stale_threshold: 5,
        }
    }
}

impl LocatorConfig {
    /// Pause after a round that discovered new items.
    #[must_use]
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    /// Pause after a round with no new items.
    #[must_use]
    pub fn load_wait(&self) -> Duration {
        Duration::from_millis(self.load_wait_ms)
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
    /// Settle pause after opening a search page, in milliseconds
    pub initial_wait_ms: u64,
    /// Bounded wait for first results to render, in seconds
    pub results_wait_timeout_secs: u64,
    /// Poll interval while waiting for first results, in milliseconds
    pub results_poll_interval_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            navigation_timeout_secs: 30,
            initial_wait_ms: 3000,
            results_wait_timeout_secs: 10,
            results_poll_interval_ms: 500,
        }
    }
}

impl BrowserConfig {
    /// Settle pause after opening a search page.
    #[must_use]
    pub fn initial_wait(&self) -> Duration {
        Duration::from_millis(self.initial_wait_ms)
    }

    /// Bounded wait for first results to render.
    #[must_use]
    pub fn results_wait_timeout(&self) -> Duration {
        Duration::from_secs(self.results_wait_timeout_secs)
    }

    /// Poll interval while waiting for first results.
    #[must_use]
    pub fn results_poll_interval(&self) -> Duration {
        Duration::from_millis(self.results_poll_interval_ms)
    }
}

/// Google Sheets settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Spreadsheet id (the key in the sheet URL)
    pub spreadsheet_id: String,
    /// Worksheet name inside the spreadsheet
    pub sheet_name: String,
    /// Path to the Google service-account credentials JSON
    pub credentials_path: PathBuf,
    /// Sheets API endpoint (overridable for tests)
    pub api_base_url: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            sheet_name: String::new(),
            credentials_path: PathBuf::from("credentials.json"),
            api_base_url: "https://sheets.googleapis.com".to_string(),
        }
    }
}
