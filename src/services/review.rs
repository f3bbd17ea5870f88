//! Review queue service
//!
//! Seeding, importing uploads, and the accept/correct actions. Every change
//! is saved immediately and written to the audit log.

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::error::{TallyError, TallyResult};
use crate::ingest::UploadRecord;
use crate::models::{
    normalize_category, Money, ReviewStatus, ReviewTransaction, TransactionId, UNKNOWN_CATEGORY,
    UPLOAD_CONFIDENCE,
};
use crate::storage::Storage;

/// Options for filtering the queue
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub status: Option<ReviewStatus>,
    pub limit: Option<usize>,
}

impl ReviewFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ReviewStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Service for the review queue
pub struct ReviewService<'a> {
    storage: &'a Storage,
    actor: Option<String>,
}

impl<'a> ReviewService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            actor: None,
        }
    }

    /// Attribute audit entries to a signed-in user
    pub fn as_user(mut self, username: impl Into<String>) -> Self {
        self.actor = Some(username.into());
        self
    }

    /// Create the queue file on first use, optionally with the demo rows
    ///
    /// Returns true if demo rows were added.
    pub fn ensure_seeded(&self, seed_demo: bool) -> TallyResult<bool> {
        if self.storage.transactions.exists() {
            return Ok(false);
        }

        if seed_demo {
            self.storage
                .transactions
                .prepend(ReviewTransaction::demo_rows())?;
        }
        self.storage.transactions.save()?;
        tracing::debug!(seeded = seed_demo, "created review queue");
        Ok(seed_demo)
    }

    pub fn list(&self, filter: ReviewFilter) -> TallyResult<Vec<ReviewTransaction>> {
        let mut rows = self.storage.transactions.get_all()?;

        if let Some(status) = filter.status {
            rows.retain(|t| t.status == status);
        }
        if let Some(limit) = filter.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }

    /// Add uploaded records to the front of the queue
    ///
    /// Rows start pending under the `unknown` category. Placeholder records
    /// for unparsed files get zero confidence. An empty batch changes nothing.
    pub fn import(&self, records: Vec<UploadRecord>) -> TallyResult<Vec<ReviewTransaction>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<ReviewTransaction> = records
            .into_iter()
            .map(|record| {
                let confidence = if record.placeholder {
                    0.0
                } else {
                    UPLOAD_CONFIDENCE
                };
                let mut row =
                    ReviewTransaction::new(record.raw, UNKNOWN_CATEGORY, confidence, Money::zero());
                row.amount = demo_amount(&row.id);
                row
            })
            .collect();

        self.storage.transactions.prepend(rows.clone())?;
        self.storage.transactions.save()?;

        let entries: Vec<AuditEntry> = rows
            .iter()
            .map(|row| {
                AuditEntry::new(Operation::Create, EntityType::Transaction, row.id.to_string())
                    .by(self.actor.as_deref())
                    .with_summary(format!("imported: {}", row.raw))
            })
            .collect();
        self.storage.log_batch(&entries)?;

        Ok(rows)
    }

    /// Keep the proposed category
    pub fn accept(&self, identifier: &str) -> TallyResult<ReviewTransaction> {
        let mut row = self.find_required(identifier)?;
        row.accept();
        self.save_change(&row, format!("accepted: {}", row.category))?;
        Ok(row)
    }

    /// Replace the category with a user-supplied label
    pub fn correct(&self, identifier: &str, label: &str) -> TallyResult<ReviewTransaction> {
        let category = normalize_category(label)
            .ok_or_else(|| TallyError::Validation("Category cannot be empty".into()))?;

        let mut row = self.find_required(identifier)?;
        let previous = row.category.clone();
        row.correct(category);
        self.save_change(&row, format!("category: {} -> {}", previous, row.category))?;
        Ok(row)
    }

    fn find_required(&self, identifier: &str) -> TallyResult<ReviewTransaction> {
        self.storage
            .transactions
            .find(identifier)?
            .ok_or_else(|| TallyError::transaction_not_found(identifier))
    }

    fn save_change(&self, row: &ReviewTransaction, summary: String) -> TallyResult<()> {
        self.storage.transactions.upsert(row.clone())?;
        self.storage.transactions.save()?;
        self.storage.log(
            AuditEntry::new(Operation::Update, EntityType::Transaction, row.id.to_string())
                .by(self.actor.as_deref())
                .with_summary(summary),
        )
    }
}

/// Stand-in amount for uploads, which carry no amount of their own
///
/// Derived from the random id, so it lands in 100..2100 whole units.
fn demo_amount(id: &TransactionId) -> Money {
    let spread = (id.as_uuid().as_u128() % 2000) as i64;
    Money::from_major(100 + spread)
}
