//! Rankscope Core - Foundation crate for the Rankscope rank tracker.
//!
//! This crate provides shared types, error handling, and configuration
//! management that all other Rankscope crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`Sku`, `Outcome`, `SkuEntry`)
//!
//! # Example
//!
//! ```rust
//! use rankscope_core::{AppConfig, Outcome};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.locator.max_items, 1000);
//!
//! let outcome = Outcome::Found { position: 3, total_seen: 3 };
//! assert_eq!(outcome.cell_value(), "3");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, LocatorConfig, SearchConfig, SheetsConfig};
pub use error::{ConfigError, ConfigResult, RankscopeError, Result};
pub use types::{Outcome, SearchQuery, Sku, SkuEntry, NOT_FOUND_SENTINEL};
