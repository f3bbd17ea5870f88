//! Export for Tally
//!
//! - CSV: the review queue, one row per transaction (spreadsheet-compatible)
//! - JSON: the queue plus its category summary, with a schema version

pub mod csv;
pub mod json;

pub use self::csv::export_review_csv;
pub use self::json::{export_review_json, ReviewExport, EXPORT_SCHEMA_VERSION};
