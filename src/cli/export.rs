//! CLI command for exporting the review queue

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::export::{export_review_csv, export_review_json, ReviewExport};
use crate::models::ReviewTransaction;
use crate::services::ReviewService;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// One row per transaction
    Csv,
    /// Transactions plus category summary
    Json,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path; prints to stdout if omitted
    pub output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,
}

/// Handle the export command for the signed-in user
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    username: &str,
    args: ExportArgs,
) -> TallyResult<()> {
    ReviewService::new(storage).ensure_seeded(settings.seed_demo_transactions)?;
    let rows = storage.transactions.get_all()?;
    let count = rows.len();

    match &args.output {
        Some(output) => {
            let file = File::create(output).map_err(|e| {
                TallyError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(rows, username, args.format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| TallyError::Export(e.to_string()))?;

            storage.log(
                AuditEntry::new(
                    Operation::Create,
                    EntityType::Export,
                    output.display().to_string(),
                )
                .by(Some(username))
                .with_summary(format!("{} transactions", count)),
            )?;
            println!("Exported {} transactions to: {}", count, output.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_export(rows, username, args.format, &mut lock)?;
        }
    }

    Ok(())
}

fn write_export<W: Write>(
    rows: Vec<ReviewTransaction>,
    username: &str,
    format: ExportFormat,
    writer: &mut W,
) -> TallyResult<()> {
    match format {
        ExportFormat::Csv => export_review_csv(&rows, writer),
        ExportFormat::Json => export_review_json(&ReviewExport::new(rows, username), writer),
    }
}
