//! Spending insights over the review queue

use std::collections::HashMap;

use crate::models::{Money, ReviewStatus, ReviewTransaction};

/// Label used for rows with an empty category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Spending total for one category
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub total: Money,
}

/// Review progress counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReviewOverview {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub corrected: usize,
    pub amount: Money,
}

impl ReviewOverview {
    pub fn reviewed(&self) -> usize {
        self.accepted + self.corrected
    }
}

/// Group rows by category, largest total first
///
/// Categories with equal totals keep the order they first appear in.
pub fn summarize_by_category(rows: &[ReviewTransaction]) -> Vec<CategorySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for row in rows {
        let key = if row.category.is_empty() {
            UNCATEGORIZED
        } else {
            row.category.as_str()
        };

        let slot = *index.entry(key).or_insert_with(|| {
            summaries.push(CategorySummary {
                category: key.to_string(),
                count: 0,
                total: Money::zero(),
            });
            summaries.len() - 1
        });

        summaries[slot].count += 1;
        summaries[slot].total += row.amount;
    }

    summaries.sort_by(|a, b| b.total.cmp(&a.total));
    summaries
}

pub fn overview(rows: &[ReviewTransaction]) -> ReviewOverview {
    rows.iter().fold(ReviewOverview::default(), |mut acc, row| {
        acc.total += 1;
        acc.amount += row.amount;
        match row.status {
            ReviewStatus::Pending => acc.pending += 1,
            ReviewStatus::Accepted => acc.accepted += 1,
            ReviewStatus::Corrected => acc.corrected += 1,
        }
        acc
    })
}

/// Turn `coffee_dining` into `Coffee Dining`
pub fn format_category_name(category: &str) -> String {
    let mut out = String::with_capacity(category.len());
    let mut at_word_start = true;

    for ch in category.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_ascii_alphanumeric() {
            if at_word_start {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }

    out
}
