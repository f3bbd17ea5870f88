//! CSV export of the review queue

use std::io::Write;

use crate::error::{TallyError, TallyResult};
use crate::models::ReviewTransaction;

const HEADER: [&str; 7] = [
    "ID",
    "Description",
    "Category",
    "Confidence",
    "Status",
    "Amount",
    "Updated",
];

/// Write every row, in queue order, as CSV
pub fn export_review_csv<W: Write>(rows: &[ReviewTransaction], writer: W) -> TallyResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;

    for txn in rows {
        out.write_record([
            txn.id.as_uuid().to_string(),
            txn.raw.clone(),
            txn.category.clone(),
            format!("{:.2}", txn.confidence),
            txn.status.to_string(),
            format!("{:.2}", txn.amount.minor() as f64 / 100.0),
            txn.updated_at.to_rfc3339(),
        ])?;
    }

    out.flush()
        .map_err(|e| TallyError::Export(format!("Failed to flush CSV: {}", e)))
}
