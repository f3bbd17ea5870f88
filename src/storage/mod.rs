//! Storage layer for Tally
//!
//! - `kv`: the key-value store behind accounts and sessions
//! - `transactions`: the review queue
//! - `file_io`: atomic JSON reads and writes shared by both

pub mod file_io;
pub mod kv;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use transactions::TransactionRepository;

use crate::audit::{AuditEntry, AuditLogger};
use crate::auth::{CredentialStore, PasswordScheme};
use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Main storage coordinator
pub struct Storage {
    paths: TallyPaths,
    pub transactions: TransactionRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }

    /// Load everything that lives in memory between commands
    pub fn load_all(&self) -> Result<(), TallyError> {
        self.transactions.load()
    }

    /// A credential store over the on-disk key-value file
    pub fn credentials(&self, scheme: PasswordScheme) -> CredentialStore<JsonFileStore> {
        CredentialStore::with_scheme(JsonFileStore::new(self.paths.store_file()), scheme)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Append one entry to the audit log
    pub fn log(&self, entry: AuditEntry) -> Result<(), TallyError> {
        self.audit.log(&entry)
    }

    /// Append several entries to the audit log with one flush
    pub fn log_batch(&self, entries: &[AuditEntry]) -> Result<(), TallyError> {
        self.audit.log_batch(entries)
    }
}
