//! Insights CLI command

use crate::config::Settings;
use crate::display::format_insights;
use crate::error::TallyResult;
use crate::services::{overview, summarize_by_category, ReviewService};
use crate::storage::Storage;

/// Print spending by category and review progress
pub fn handle_insights_command(storage: &Storage, settings: &Settings) -> TallyResult<()> {
    ReviewService::new(storage).ensure_seeded(settings.seed_demo_transactions)?;
    let rows = storage.transactions.get_all()?;

    print!(
        "{}",
        format_insights(
            &summarize_by_category(&rows),
            &overview(&rows),
            &settings.currency_symbol
        )
    );
    Ok(())
}
