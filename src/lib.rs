//! Tally - terminal review queue for categorized bank transactions
//!
//! Statement lines are pulled out of uploaded CSV or text files, queued with
//! the category a classifier proposed, and accepted or corrected by a
//! signed-in user. Accounts and the active session live in a local
//! key-value file; nothing talks to a server.
//!
//! # Architecture
//!
//! - `config`: Paths and settings
//! - `error`: Custom error types
//! - `models`: Review transactions, ids and money
//! - `storage`: Key-value store, queue repository and atomic file writes
//! - `auth`: Sign-up, sign-in and session restore over the key-value store
//! - `ingest`: Line extraction from uploaded files
//! - `services`: Review queue actions and spending insights
//! - `audit`: Audit logging
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use tally::auth::PasswordScheme;
//! use tally::config::paths::TallyPaths;
//! use tally::storage::Storage;
//!
//! let storage = Storage::new(TallyPaths::new()?)?;
//! let mut store = storage.credentials(PasswordScheme::Base64);
//! store.signup("me@example.com", "Str0ng!pass")?;
//! ```

pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{TallyError, TallyResult};
