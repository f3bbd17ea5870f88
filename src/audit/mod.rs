//! Audit logging for Tally
//!
//! Records account, session and review-queue changes in an append-only
//! JSONL file next to the settings.
//!
//! ```rust,ignore
//! use tally::audit::{AuditEntry, AuditLogger, EntityType, Operation};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::new(Operation::Create, EntityType::Account, "a@b.co"))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
