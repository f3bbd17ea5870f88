//! JSON export of the review queue
//!
//! Carries the rows, the category summary and a schema version so the file
//! can be checked before anything reads it back.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{TallyError, TallyResult};
use crate::models::ReviewTransaction;
use crate::services::{overview, summarize_by_category, CategorySummary, ReviewOverview};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct ReviewExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    /// Signed-in user who ran the export
    pub exported_by: String,
    pub overview: ReviewOverview,
    pub categories: Vec<CategorySummary>,
    pub transactions: Vec<ReviewTransaction>,
}

impl ReviewExport {
    pub fn new(rows: Vec<ReviewTransaction>, exported_by: impl Into<String>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_by: exported_by.into(),
            overview: overview(&rows),
            categories: summarize_by_category(&rows),
            transactions: rows,
        }
    }
}

/// Write the export as pretty-printed JSON
pub fn export_review_json<W: Write>(export: &ReviewExport, writer: &mut W) -> TallyResult<()> {
    serde_json::to_writer_pretty(&mut *writer, export)
        .map_err(|e| TallyError::Export(format!("Failed to write JSON: {}", e)))?;
    writeln!(writer).map_err(|e| TallyError::Export(e.to_string()))?;
    Ok(())
}
