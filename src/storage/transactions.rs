//! Review queue repository
//!
//! Keeps the queue in display order (newest uploads first) and persists it
//! to `transactions.json`.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TallyError;
use crate::models::ReviewTransaction;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct QueueData {
    transactions: Vec<ReviewTransaction>,
}

/// Repository for review transactions
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<ReviewTransaction>>,
}

fn lock_err(e: impl std::fmt::Display) -> TallyError {
    TallyError::Storage(format!("Failed to acquire lock: {}", e))
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Has the queue ever been saved?
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the queue from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), TallyError> {
        let file_data: QueueData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_err)?;
        *data = file_data.transactions;
        Ok(())
    }

    pub fn save(&self) -> Result<(), TallyError> {
        let data = self.data.read().map_err(lock_err)?;
        let file_data = QueueData {
            transactions: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All rows in queue order
    pub fn get_all(&self) -> Result<Vec<ReviewTransaction>, TallyError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.clone())
    }

    /// Find a row by full UUID or `txn-xxxxxxxx` short form
    pub fn find(&self, identifier: &str) -> Result<Option<ReviewTransaction>, TallyError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.iter().find(|t| t.id.matches(identifier)).cloned())
    }

    /// Replace a row with the same id, or append it if new
    pub fn upsert(&self, txn: ReviewTransaction) -> Result<(), TallyError> {
        let mut data = self.data.write().map_err(lock_err)?;
        match data.iter_mut().find(|t| t.id == txn.id) {
            Some(existing) => *existing = txn,
            None => data.push(txn),
        }
        Ok(())
    }

    /// Put a batch at the front of the queue, keeping the batch's order
    pub fn prepend(&self, batch: Vec<ReviewTransaction>) -> Result<(), TallyError> {
        let mut data = self.data.write().map_err(lock_err)?;
        data.splice(0..0, batch);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, TallyError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}
