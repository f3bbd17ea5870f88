//! Core data models for Tally

pub mod ids;
pub mod money;
pub mod transaction;

pub use ids::TransactionId;
pub use money::Money;
pub use transaction::{
    normalize_category, ConfidenceBand, ReviewStatus, ReviewTransaction, UNKNOWN_CATEGORY,
    UPLOAD_CONFIDENCE,
};
