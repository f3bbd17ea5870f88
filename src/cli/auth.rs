//! Account and session CLI commands

use clap::Subcommand;

use crate::audit::{AuditEntry, EntityType, Operation};
use crate::auth::{normalize_username, strength_label, validate_password, Secret};
use crate::config::Settings;
use crate::error::{TallyError, TallyResult};
use crate::storage::Storage;

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and sign in
    Signup {
        /// Email address
        email: String,
        /// Password (prompted for if omitted)
        #[arg(short, long, env = "TALLY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign in to an existing account
    Signin {
        /// Email address
        email: String,
        /// Password (prompted for if omitted)
        #[arg(short, long, env = "TALLY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out of the current session
    Signout,
    /// Show who is signed in
    Whoami,
    /// Rate a password without creating an account
    Strength {
        /// Password to rate (prompted for if omitted)
        password: Option<String>,
    },
}

/// Handle an auth command
pub fn handle_auth_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AuthCommands,
) -> TallyResult<()> {
    let mut store = storage.credentials(settings.password_scheme);

    match cmd {
        AuthCommands::Signup { email, password } => {
            let password = match password {
                Some(p) => Secret::new(p),
                None => prompt_new_password()?,
            };

            store.signup(&email, &password)?;
            let username = normalize_username(&email);
            tracing::info!(%username, "account created");

            record_activity(
                storage,
                &[
                    AuditEntry::new(Operation::Create, EntityType::Account, &username)
                        .by(Some(username.as_str()))
                        .with_summary(format!("scheme: {}", settings.password_scheme)),
                    AuditEntry::new(Operation::Create, EntityType::Session, &username)
                        .by(Some(username.as_str())),
                ],
            );

            println!("Created account: {}", username);
            println!("Signed in as {}", username);
        }

        AuthCommands::Signin { email, password } => {
            let password = match password {
                Some(p) => Secret::new(p),
                None => prompt_password("Password: ")?,
            };

            store.signin(&email, &password)?;
            let username = normalize_username(&email);
            tracing::info!(%username, "signed in");

            record_activity(
                storage,
                &[AuditEntry::new(Operation::Create, EntityType::Session, &username)
                    .by(Some(username.as_str()))],
            );

            println!("Signed in as {}", username);
        }

        AuthCommands::Signout => match store.restore_session() {
            Some(username) => {
                store.signout();
                record_activity(
                    storage,
                    &[AuditEntry::new(Operation::Delete, EntityType::Session, &username)
                        .by(Some(username.as_str()))],
                );
                println!("Signed out {}", username);
            }
            None => {
                store.signout();
                println!("Not signed in.");
            }
        },

        AuthCommands::Whoami => match store.restore_session() {
            Some(username) => {
                println!("{}", username);
                if let Some(session) = store.session() {
                    if let Some(started) = session.started_at() {
                        println!("  Signed in: {}", started.format("%Y-%m-%d %H:%M UTC"));
                    }
                }
            }
            None => println!("Not signed in."),
        },

        AuthCommands::Strength { password } => {
            let password = match password {
                Some(p) => Secret::new(p),
                None => prompt_password("Password: ")?,
            };
            let check = validate_password(&password);

            println!("Strength: {} ({}/4)", strength_label(check.score), check.score);
            match check.message {
                Some(message) => println!("  {}", message),
                None => println!("  Meets the password rules."),
            }
        }
    }

    Ok(())
}

/// The signed-in username, or an error telling the user to sign in
pub fn require_session(storage: &Storage, settings: &Settings) -> TallyResult<String> {
    storage
        .credentials(settings.password_scheme)
        .restore_session()
        .ok_or(TallyError::NotSignedIn)
}

/// Append account activity to the audit log
///
/// The account or session change is already persisted by the time this runs,
/// so a failed write is reported and the command still succeeds.
fn record_activity(storage: &Storage, entries: &[AuditEntry]) {
    if let Err(e) = storage.log_batch(entries) {
        tracing::warn!(error = %e, "could not record account activity in the audit log");
    }
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> TallyResult<Secret> {
    loop {
        let first = prompt_password("Password: ")?;
        let check = validate_password(&first);
        if !check.valid {
            println!("{} Please try again.", check.message.unwrap_or_default());
            continue;
        }

        let second = prompt_password("Confirm password: ")?;
        if first.as_str() != second.as_str() {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        return Ok(first);
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> TallyResult<Secret> {
    rpassword::prompt_password(prompt)
        .map(Secret::from)
        .map_err(|e| TallyError::Io(format!("Failed to read password: {}", e)))
}
