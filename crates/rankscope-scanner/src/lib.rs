//! Rankscope Scanner - Rank discovery over lazily-loaded search feeds.
//!
//! This crate provides the scan engine: an incremental, stateful crawl over
//! a scroll-driven results feed that deduplicates re-rendered items, decides
//! when the feed has truly ended versus merely stalled, detects incomplete
//! initial loads, and bounds the number of items scanned.
//!
//! # Features
//!
//! - First-seen position assignment, idempotent under re-renders
//! - Stale-round termination that absorbs rendering jitter
//! - Item ceiling with a distinct overflow outcome
//! - Bounded retry on incomplete initial loads, discarding all scan state
//!
//! # Example
//!
//! ```rust,ignore
//! use rankscope_scanner::LoadGuard;
//!
//! let guard = LoadGuard::new(&engine, &config.search, &config.locator);
//! let outcome = guard.search(&sku, "wireless headphones").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod guard;
pub mod locator;
pub mod session;
#[allow(missing_docs)]
pub mod url;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use guard::{FeedSource, FeedStart, LoadGuard};
pub use locator::{locate, RankTable};
pub use url::build_search_url;
