//! Shared types used across the Rankscope application.
//!
//! This module defines common newtypes and enums that provide type safety
//! and clear domain modeling.

use crate::error::RankscopeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Sentinel written to the sheet when a SKU was not found within the
/// scanned prefix of the results feed.
pub const NOT_FOUND_SENTINEL: &str = "1000+";

/// Newtype for product SKU identifiers with validation.
///
/// SKUs are the numeric identifiers embedded in marketplace product URLs,
/// 1-20 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sku(String);

impl Sku {
    /// Create a new `Sku` from a string.
    ///
    /// # Errors
    /// Returns error if the SKU is not 1-20 ASCII digits.
    pub fn new(sku: impl Into<String>) -> Result<Self, RankscopeError> {
        let sku = sku.into();
        Self::validate(&sku)?;
        Ok(Self(sku))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate SKU format: 1-20 ASCII digits.
    fn validate(sku: &str) -> Result<(), RankscopeError> {
        static SKU_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = SKU_REGEX.get_or_init(|| Regex::new(r"^\d{1,20}$").expect("valid regex"));

        if regex.is_match(sku) {
            Ok(())
        } else {
            Err(RankscopeError::Validation(format!(
                "invalid SKU: must be 1-20 digits, got '{sku}'"
            )))
        }
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal result of scanning one query's results feed for a target SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Outcome {
    /// Target was observed; `position` is its first-seen 1-based rank.
    Found {
        /// First-seen 1-based rank of the target
        position: usize,
        /// Distinct items observed when the scan stopped
        total_seen: usize,
    },
    /// The feed ended (stale rounds exhausted) without observing the target.
    NotFound {
        /// Distinct items observed when the scan stopped
        total_seen: usize,
    },
    /// The scan hit the configured item ceiling without observing the target.
    Overflow {
        /// Distinct items observed when the scan stopped (== the ceiling)
        total_seen: usize,
    },
}

impl Outcome {
    /// Whether the target SKU was located.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Distinct items observed when the scan stopped.
    #[must_use]
    pub fn total_seen(&self) -> usize {
        match self {
            Self::Found { total_seen, .. }
            | Self::NotFound { total_seen }
            | Self::Overflow { total_seen } => *total_seen,
        }
    }

    /// The value persisted to the sheet: the decimal position when found,
    /// the `"1000+"` sentinel otherwise.
    #[must_use]
    pub fn cell_value(&self) -> String {
        match self {
            Self::Found { position, .. } => position.to_string(),
            Self::NotFound { .. } | Self::Overflow { .. } => NOT_FOUND_SENTINEL.to_string(),
        }
    }
}

/// One search query attached to a SKU, with the sheet row its result
/// is written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query text typed into the marketplace search box
    pub text: String,
    /// 1-based sheet row the result cell lives on
    pub row: u32,
}

/// A SKU together with its search queries, as read from the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuEntry {
    /// The product SKU to locate
    pub sku: Sku,
    /// 1-based sheet row the SKU itself lives on
    pub row: u32,
    /// Queries to scan, in sheet order
    pub queries: Vec<SearchQuery>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sku_valid() {
        let valid = vec!["1", "123456", "98765432109876543210"];
        for sku in valid {
            assert!(Sku::new(sku).is_ok(), "Failed for: {sku}");
        }
    }

    #[test]
    fn test_sku_invalid() {
        let too_long = "1".repeat(21);
        let invalid = vec![
            "",                // Empty
            "abc123",          // Letters
            "123 456",         // Space
            "-123",            // Sign
            too_long.as_str(), // Too long
        ];

        for sku in invalid {
            assert!(Sku::new(sku).is_err(), "Should fail for: {sku}");
        }
    }

    #[test]
    fn test_sku_display() {
        let sku = Sku::new("123456").expect("valid SKU");
        assert_eq!(sku.to_string(), "123456");
        assert_eq!(sku.as_str(), "123456");
    }

    #[test]
    fn test_outcome_cell_value() {
        let found = Outcome::Found {
            position: 42,
            total_seen: 42,
        };
        assert_eq!(found.cell_value(), "42");
        assert!(found.is_found());

        let not_found = Outcome::NotFound { total_seen: 17 };
        assert_eq!(not_found.cell_value(), NOT_FOUND_SENTINEL);
        assert!(!not_found.is_found());

        let overflow = Outcome::Overflow { total_seen: 1000 };
        assert_eq!(overflow.cell_value(), NOT_FOUND_SENTINEL);
        assert!(!overflow.is_found());
    }

    #[test]
    fn test_outcome_total_seen() {
        assert_eq!(
            Outcome::Found {
                position: 3,
                total_seen: 5
            }
            .total_seen(),
            5
        );
        assert_eq!(Outcome::NotFound { total_seen: 9 }.total_seen(), 9);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = Outcome::Found {
            position: 7,
            total_seen: 7,
        };
        let json = serde_json::to_string(&outcome).expect("serialize outcome");
        assert!(json.contains("\"found\""));

        let parsed: Outcome = serde_json::from_str(&json).expect("deserialize outcome");
        assert_eq!(parsed, outcome);
    }
}
