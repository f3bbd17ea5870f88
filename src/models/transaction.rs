//! Review transaction model
//!
//! A row in the review queue: the raw bank description, the category the
//! classifier proposed, how confident it was, and whether a person has
//! accepted or corrected that label.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Category given to freshly uploaded rows
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Confidence given to uploaded text rows
pub const UPLOAD_CONFIDENCE: f64 = 0.5;

/// Review state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Accepted,
    Corrected,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Accepted => write!(f, "Accepted"),
            Self::Corrected => write!(f, "Corrected"),
        }
    }
}

/// Coarse bucket for a classifier confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.9 {
            Self::High
        } else if confidence >= 0.7 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A transaction awaiting (or past) human review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewTransaction {
    pub id: TransactionId,

    /// Raw description as it appeared on the statement
    pub raw: String,

    /// Category label, snake_case
    pub category: String,

    /// Classifier confidence in 0.0..=1.0
    pub confidence: f64,

    #[serde(default)]
    pub status: ReviewStatus,

    pub amount: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl ReviewTransaction {
    pub fn new(
        raw: impl Into<String>,
        category: impl Into<String>,
        confidence: f64,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            raw: raw.into(),
            category: category.into(),
            confidence: confidence.clamp(0.0, 1.0),
            status: ReviewStatus::Pending,
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::of(self.confidence)
    }

    /// Keep the proposed label
    pub fn accept(&mut self) {
        self.status = ReviewStatus::Accepted;
        self.updated_at = Utc::now();
    }

    /// Replace the label; `category` must already be normalized
    pub fn correct(&mut self, category: String) {
        self.category = category;
        self.status = ReviewStatus::Corrected;
        self.updated_at = Utc::now();
    }

    /// The rows every new queue starts with
    pub fn demo_rows() -> Vec<Self> {
        [
            ("STARBUCKS COFFEE #1234", "coffee_dining", 0.95, 450),
            ("AMAZON MKTPLACE PMT", "shopping", 0.88, 1200),
            ("SHELL OIL 56789012345", "fuel", 0.92, 6000),
            ("WALMART SUPERCENTER", "groceries", 0.85, 3200),
            ("UBER TRIP HELP.UBER.COM", "transport", 0.9, 1500),
        ]
        .into_iter()
        .map(|(raw, category, confidence, amount)| {
            Self::new(raw, category, confidence, Money::from_major(amount))
        })
        .collect()
    }
}

/// Normalize a user-typed category label
///
/// Trims, collapses each whitespace run to `_` and lowercases.
/// `"Dining  Out"` becomes `"dining_out"`. Returns `None` if nothing is left.
pub fn normalize_category(label: &str) -> Option<String> {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }
    Some(words.join("_").to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_pending() {
        let txn = ReviewTransaction::new("RAW", "unknown", 0.5, Money::zero());
        assert_eq!(txn.status, ReviewStatus::Pending);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let txn = ReviewTransaction::new("RAW", "unknown", 1.7, Money::zero());
        assert_eq!(txn.confidence, 1.0);
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceBand::of(0.95), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::of(0.9), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::of(0.85), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::of(0.7), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::of(0.5), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::of(0.0), ConfidenceBand::Low);
    }

    #[test]
    fn test_accept_and_correct() {
        let mut txn = ReviewTransaction::new("UBER", "transport", 0.9, Money::zero());
        txn.accept();
        assert_eq!(txn.status, ReviewStatus::Accepted);

        txn.correct("travel".into());
        assert_eq!(txn.status, ReviewStatus::Corrected);
        assert_eq!(txn.category, "travel");
    }

    #[test]
    fn test_demo_rows() {
        let rows = ReviewTransaction::demo_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].raw, "STARBUCKS COFFEE #1234");
        assert_eq!(rows[2].category, "fuel");
        assert_eq!(rows[2].amount, Money::from_major(6000));
        assert!(rows.iter().all(|r| r.status == ReviewStatus::Pending));
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("Dining  Out"), Some("dining_out".into()));
        assert_eq!(normalize_category("  Fuel "), Some("fuel".into()));
        assert_eq!(normalize_category("Kids\tSchool Fees"), Some("kids_school_fees".into()));
        assert_eq!(normalize_category("   "), None);
        assert_eq!(normalize_category(""), None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ReviewStatus::Corrected).unwrap();
        assert_eq!(json, "\"corrected\"");
    }
}
