//! Display formatting for terminal output

pub mod insights;
pub mod transaction;

pub use insights::{format_bar, format_insights};
pub use transaction::{format_review_details, format_review_queue, format_review_row};
