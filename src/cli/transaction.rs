//! Review queue CLI commands

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::display::{format_review_details, format_review_queue};
use crate::error::{TallyError, TallyResult};
use crate::ingest::{ingest_batch, UploadedFile};
use crate::models::ReviewStatus;
use crate::services::{ReviewFilter, ReviewService};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Pending,
    Accepted,
    Corrected,
}

impl From<StatusFilter> for ReviewStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Pending => ReviewStatus::Pending,
            StatusFilter::Accepted => ReviewStatus::Accepted,
            StatusFilter::Corrected => ReviewStatus::Corrected,
        }
    }
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List the review queue, newest uploads first
    List {
        /// Only show rows with this status
        #[arg(short, long, value_enum)]
        status: Option<StatusFilter>,
        /// Number of rows to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one transaction in full
    Show {
        /// Transaction ID (txn-xxxxxxxx or full UUID)
        id: String,
    },
    /// Accept the proposed category
    Accept {
        /// Transaction ID (txn-xxxxxxxx or full UUID)
        id: String,
    },
    /// Replace the category
    Correct {
        /// Transaction ID (txn-xxxxxxxx or full UUID)
        id: String,
        /// New category, e.g. "dining out"
        #[arg(required = true, num_args = 1..)]
        category: Vec<String>,
    },
    /// Add statement files to the queue
    Upload {
        /// CSV or text files; other files are queued as placeholders
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },
}

/// Handle a transaction command for the signed-in user
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    username: &str,
    cmd: TransactionCommands,
) -> TallyResult<()> {
    let service = ReviewService::new(storage).as_user(username);
    service.ensure_seeded(settings.seed_demo_transactions)?;
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::List { status, limit } => {
            let mut filter = ReviewFilter::new();
            if let Some(status) = status {
                filter = filter.status(status.into());
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let rows = service.list(filter)?;
            print!("{}", format_review_queue(&rows, currency));
        }

        TransactionCommands::Show { id } => {
            let txn = storage
                .transactions
                .find(&id)?
                .ok_or_else(|| TallyError::transaction_not_found(&id))?;
            print!("{}", format_review_details(&txn, currency));
        }

        TransactionCommands::Accept { id } => {
            let txn = service.accept(&id)?;
            println!("Accepted {}: {}", txn.id, txn.category);
        }

        TransactionCommands::Correct { id, category } => {
            let txn = service.correct(&id, &category.join(" "))?;
            println!("Corrected {}: {}", txn.id, txn.category);
        }

        TransactionCommands::Upload { files } => {
            let uploads = files
                .iter()
                .map(|path| UploadedFile::from_path(path))
                .collect::<TallyResult<Vec<_>>>()?;

            let records = ingest_batch(&uploads);
            let placeholders = records.iter().filter(|r| r.placeholder).count();
            let imported = service.import(records)?;

            if imported.is_empty() {
                println!("No transactions found in {} file(s).", uploads.len());
            } else {
                println!(
                    "Queued {} transaction(s) from {} file(s).",
                    imported.len(),
                    uploads.len()
                );
                if placeholders > 0 {
                    println!(
                        "  {} file(s) could not be parsed and were added as placeholders.",
                        placeholders
                    );
                }
            }
        }
    }

    Ok(())
}
