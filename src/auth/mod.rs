//! Local sign-up / sign-in
//!
//! Accounts are email-shaped usernames with a password that must pass the
//! strength rules in [`validators`]. Everything is persisted through a
//! [`crate::storage::kv::KeyValueStore`]; there is no server involved.

pub mod encoding;
pub mod secret;
pub mod store;
pub mod validators;

pub use encoding::{PasswordEncoder, PasswordScheme};
pub use secret::Secret;
pub use store::{CredentialRecord, CredentialStore, Session, SESSION_KEY, USERS_KEY};
pub use validators::{
    is_valid_email, normalize_username, strength_label, validate_password, PasswordCheck,
};

use thiserror::Error;

/// Which form produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Signup,
    Signin,
}

impl AuthFlow {
    fn invalid_email_message(self) -> &'static str {
        match self {
            AuthFlow::Signup => "Please enter a valid email address",
            AuthFlow::Signin => "Enter a valid email address",
        }
    }
}

/// Why a sign-up or sign-in was refused
///
/// All variants except `Encoding` are ordinary input problems meant to be
/// shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The username is not an email address; the wording depends on the flow
    #[error("{}", .0.invalid_email_message())]
    InvalidUsername(AuthFlow),

    /// Strength check failed; `score` feeds the strength meter
    #[error("{message}")]
    WeakPassword { score: u8, message: String },

    #[error("An account with this email already exists")]
    UsernameTaken,

    #[error("Password required")]
    MissingPassword,

    #[error("No account found for this email")]
    UnknownUser,

    #[error("Incorrect password")]
    WrongPassword,

    /// The password encoder itself failed (Argon2 only)
    #[error("Could not encode password: {0}")]
    Encoding(String),
}
