//! Service layer for Tally
//!
//! Business rules on top of the storage layer: the review queue actions and
//! the spending insights computed from it.

pub mod insights;
pub mod review;

pub use insights::{
    format_category_name, overview, summarize_by_category, CategorySummary, ReviewOverview,
};
pub use review::{ReviewFilter, ReviewService};
