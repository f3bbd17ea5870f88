//! Review queue display formatting

use crate::models::{ConfidenceBand, ReviewStatus, ReviewTransaction};
use crate::services::format_category_name;

fn status_icon(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Pending => " ",
        ReviewStatus::Accepted => "✓",
        ReviewStatus::Corrected => "✎",
    }
}

fn band_label(band: ConfidenceBand) -> &'static str {
    match band {
        ConfidenceBand::High => "high",
        ConfidenceBand::Medium => "med",
        ConfidenceBand::Low => "low",
    }
}

/// Format one queue row
pub fn format_review_row(txn: &ReviewTransaction, currency: &str) -> String {
    format!(
        "{} {} {} {} {:>4} {:3} {:>12}",
        status_icon(txn.status),
        txn.id,
        truncate(&txn.raw, 28),
        truncate(&format_category_name(&txn.category), 16),
        format!("{:.0}%", txn.confidence * 100.0),
        band_label(txn.confidence_band()),
        txn.amount.format_with_symbol(currency)
    )
}

/// Format the whole queue with a header
pub fn format_review_queue(rows: &[ReviewTransaction], currency: &str) -> String {
    if rows.is_empty() {
        return "No transactions to review.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:12} {:28} {:16} {:>8} {:>12}\n",
        "", "ID", "Description", "Category", "Conf", "Amount"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for txn in rows {
        output.push_str(&format_review_row(txn, currency));
        output.push('\n');
    }

    output
}

/// Format one row in full
pub fn format_review_details(txn: &ReviewTransaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Description: {}\n", txn.raw));
    output.push_str(&format!(
        "Category:    {} ({})\n",
        format_category_name(&txn.category),
        txn.category
    ));
    output.push_str(&format!(
        "Confidence:  {:.0}% ({})\n",
        txn.confidence * 100.0,
        band_label(txn.confidence_band())
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Status:      {}\n", txn.status));
    output.push_str(&format!(
        "Updated:     {}\n",
        txn.updated_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

/// Pad or cut to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
