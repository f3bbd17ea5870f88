//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the service layer.
//! Everything except `auth` and `config` needs a signed-in session.

pub mod audit;
pub mod auth;
pub mod export;
pub mod insights;
pub mod transaction;

pub use audit::{handle_audit_command, AuditArgs};
pub use auth::{handle_auth_command, require_session, AuthCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use insights::handle_insights_command;
pub use transaction::{handle_transaction_command, StatusFilter, TransactionCommands};
