//! Password encoders
//!
//! The credential map never holds the password as typed. What it holds
//! instead depends on the [`PasswordScheme`]:
//!
//! - `base64`: a reversible encoding of the UTF-8 bytes. This only keeps
//!   the password from being readable at a glance; anyone with the store
//!   file can decode it. Sign-in compares `encode(candidate)` with the
//!   stored string.
//! - `argon2`: a salted Argon2id PHC string, checked with Argon2
//!   verification.
//!
//! Base64 is the default so stores written by the browser demo keep working.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Turns passwords into their stored form and checks candidates against it
pub trait PasswordEncoder {
    /// Produce the stored representation of a password
    fn encode(&self, password: &str) -> Result<String, AuthError>;

    /// Does `candidate` match the stored representation?
    fn verify(&self, candidate: &str, stored: &str) -> bool {
        matches!(self.encode(candidate), Ok(encoded) if encoded == stored)
    }
}

/// Reversible base64 placeholder, not suitable for real credentials
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Encoder;

impl PasswordEncoder for Base64Encoder {
    fn encode(&self, password: &str) -> Result<String, AuthError> {
        Ok(STANDARD.encode(password.as_bytes()))
    }
}

/// Salted Argon2id hashing
#[derive(Default)]
pub struct Argon2Encoder {
    argon2: Argon2<'static>,
}

impl PasswordEncoder for Argon2Encoder {
    fn encode(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }

    fn verify(&self, candidate: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => self
                .argon2
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored credential is not an Argon2 hash");
                false
            }
        }
    }
}

/// Which encoder new stores use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    #[default]
    Base64,
    Argon2,
}

impl PasswordScheme {
    pub fn encoder(self) -> Box<dyn PasswordEncoder> {
        match self {
            Self::Base64 => Box::new(Base64Encoder),
            Self::Argon2 => Box::new(Argon2Encoder::default()),
        }
    }
}

impl std::fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64 => write!(f, "base64"),
            Self::Argon2 => write!(f, "argon2"),
        }
    }
}
