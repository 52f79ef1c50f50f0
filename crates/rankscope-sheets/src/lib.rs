//! Rankscope Sheets - Google Sheets adapter.
//!
//! Reads the (SKU, query) batch from the configured worksheet and persists
//! discovered positions back to it, one cell per query row, through the
//! Sheets v4 REST API with service-account authentication.

pub mod auth;
pub mod batch;
pub mod client;
pub mod error;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use batch::parse_batch;
pub use client::SheetsClient;
pub use error::{Result, SheetsError};
