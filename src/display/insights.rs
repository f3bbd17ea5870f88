//! Insights formatting for terminal output

use crate::services::{format_category_name, CategorySummary, ReviewOverview};

const BAR_WIDTH: usize = 20;

/// Proportional bar, `width` cells wide
pub fn format_bar(value: i64, max_value: i64, width: usize) -> String {
    if max_value <= 0 || value <= 0 {
        return " ".repeat(width);
    }

    let filled = ((value as f64 / max_value as f64) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Spending by category followed by review progress
pub fn format_insights(
    summaries: &[CategorySummary],
    overview: &ReviewOverview,
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str("Spending by Category\n");
    output.push_str(&"═".repeat(60));
    output.push('\n');

    if summaries.is_empty() {
        output.push_str("No transactions yet.\n");
    } else {
        let max = summaries
            .iter()
            .map(|s| s.total.minor())
            .max()
            .unwrap_or(0);

        for summary in summaries {
            output.push_str(&format!(
                "{:18} {} {:>14} ({})\n",
                format_category_name(&summary.category),
                format_bar(summary.total.minor(), max, BAR_WIDTH),
                summary.total.format_with_symbol(currency),
                summary.count
            ));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Reviewed {} of {} ({} accepted, {} corrected, {} pending)\n",
        overview.reviewed(),
        overview.total,
        overview.accepted,
        overview.corrected,
        overview.pending
    ));
    output.push_str(&format!(
        "Total spend: {}\n",
        overview.amount.format_with_symbol(currency)
    ));

    output
}
