use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tally::cli::{
    handle_audit_command, handle_auth_command, handle_export_command, handle_insights_command,
    handle_transaction_command, require_session, AuditArgs, AuthCommands, ExportArgs,
    TransactionCommands,
};
use tally::config::{paths::TallyPaths, settings::Settings};
use tally::storage::Storage;

/// Environment variable holding the log filter, e.g. `TALLY_LOG=debug`
const LOG_ENV: &str = "TALLY_LOG";

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Review and correct categorized bank transactions",
    long_about = "Tally keeps a local review queue of bank transactions with the \
                  category a classifier proposed. Upload statement CSVs, accept or \
                  correct each label, and see where the money went."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign up, sign in and out
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Review queue commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Spending by category
    Insights,

    /// Export the review queue
    Export(ExportArgs),

    /// Show recent audit log entries
    Audit(AuditArgs),

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let paths = TallyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "storage ready");

    match cli.command {
        Some(Commands::Auth(cmd)) => {
            handle_auth_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Txn(cmd)) => {
            let username = require_session(&storage, &settings)?;
            handle_transaction_command(&storage, &settings, &username, cmd)?;
        }
        Some(Commands::Insights) => {
            require_session(&storage, &settings)?;
            handle_insights_command(&storage, &settings)?;
        }
        Some(Commands::Export(args)) => {
            let username = require_session(&storage, &settings)?;
            handle_export_command(&storage, &settings, &username, args)?;
        }
        Some(Commands::Audit(args)) => {
            require_session(&storage, &settings)?;
            handle_audit_command(&storage, args)?;
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("Tally Configuration");
            println!("===================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Store file:        {}", paths.store_file().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Password scheme:  {}", settings.password_scheme);
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Seed demo rows:   {}", settings.seed_demo_transactions);
        }
        None => {
            println!("Tally - review categorized bank transactions");
            println!();
            println!("Run 'tally --help' for usage information.");
            println!("Run 'tally auth signup <email>' to get started.");
        }
    }

    Ok(())
}
