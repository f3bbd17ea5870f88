//! Local credential store
//!
//! Accounts and the active session live in a [`KeyValueStore`] under two
//! keys. The store keeps the signed-in user in memory as well; that copy is
//! what callers consult after [`CredentialStore::restore_session`].
//!
//! A restored session is trusted as-is. It is not checked against the
//! credential map, so deleting an account does not sign its session out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::encoding::{PasswordEncoder, PasswordScheme};
use super::validators::{is_valid_email, normalize_username, validate_password};
use super::{AuthError, AuthFlow};
use crate::storage::kv::{read_as, write_as, KeyValueStore};

/// Key holding the username → credential map
pub const USERS_KEY: &str = "demo_auth_users";

/// Key holding the active session
pub const SESSION_KEY: &str = "demo_auth_session";

/// Stored credential for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Encoded password, see [`super::encoding`]
    pub password: String,
}

/// The persisted sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Normalized username
    pub username: String,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
}

impl Session {
    fn start(username: String) -> Self {
        Self {
            username,
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// When the session began, if a timestamp was recorded
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        if self.created_at <= 0 {
            return None;
        }
        DateTime::from_timestamp_millis(self.created_at)
    }
}

type CredentialMap = BTreeMap<String, CredentialRecord>;

/// Validates, stores and authenticates accounts; owns the one active session
pub struct CredentialStore<S: KeyValueStore> {
    kv: S,
    encoder: Box<dyn PasswordEncoder>,
    session: Option<Session>,
}

impl<S: KeyValueStore> CredentialStore<S> {
    /// Create a store with a specific encoder; no session is active yet
    pub fn new(kv: S, encoder: Box<dyn PasswordEncoder>) -> Self {
        Self {
            kv,
            encoder,
            session: None,
        }
    }

    pub fn with_scheme(kv: S, scheme: PasswordScheme) -> Self {
        Self::new(kv, scheme.encoder())
    }

    /// The underlying key-value store
    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Register a new account and sign it in
    pub fn signup(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if !is_valid_email(username) {
            return Err(AuthError::InvalidUsername(AuthFlow::Signup));
        }

        let check = validate_password(password);
        if !check.valid {
            return Err(AuthError::WeakPassword {
                score: check.score,
                message: check.message.unwrap_or_default(),
            });
        }

        let key = normalize_username(username);
        let mut users = self.load_users();
        if users.contains_key(&key) {
            return Err(AuthError::UsernameTaken);
        }

        let encoded = self.encoder.encode(password)?;
        users.insert(key.clone(), CredentialRecord { password: encoded });
        write_as(&self.kv, USERS_KEY, &users);

        self.start_session(key);
        Ok(())
    }

    /// Authenticate an existing account and make it the active session
    pub fn signin(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if !is_valid_email(username) {
            return Err(AuthError::InvalidUsername(AuthFlow::Signin));
        }
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let key = normalize_username(username);
        let users = self.load_users();
        let record = users.get(&key).ok_or(AuthError::UnknownUser)?;

        if !self.encoder.verify(password, &record.password) {
            return Err(AuthError::WrongPassword);
        }

        self.start_session(key);
        Ok(())
    }

    /// Forget the active session, persisted and in memory
    pub fn signout(&mut self) {
        self.kv.remove(SESSION_KEY);
        self.session = None;
    }

    /// Pick up a session persisted by an earlier run
    ///
    /// Returns the signed-in username if a well-formed session exists.
    pub fn restore_session(&mut self) -> Option<String> {
        let session: Session = read_as(&self.kv, SESSION_KEY)?;
        if session.username.trim().is_empty() {
            return None;
        }
        let username = session.username.clone();
        self.session = Some(session);
        Some(username)
    }

    /// The signed-in username, if any
    pub fn current_user(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.username.as_str())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Is there a credential record for this username?
    pub fn is_registered(&self, username: &str) -> bool {
        self.load_users()
            .contains_key(&normalize_username(username))
    }

    fn load_users(&self) -> CredentialMap {
        read_as(&self.kv, USERS_KEY).unwrap_or_default()
    }

    fn start_session(&mut self, username: String) {
        let session = Session::start(username);
        write_as(&self.kv, SESSION_KEY, &session);
        self.session = Some(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::encoding::Base64Encoder;
    use crate::storage::kv::{JsonFileStore, MemoryStore};
    use serde_json::json;
    use tempfile::TempDir;

    const GOOD_PASSWORD: &str = "Aa1!aaaa";

    fn memory_store() -> CredentialStore<MemoryStore> {
        CredentialStore::new(MemoryStore::new(), Box::new(Base64Encoder))
    }

    #[test]
    fn test_signup_rejects_non_email() {
        let mut store = memory_store();
        assert_eq!(
            store.signup("not-an-email", GOOD_PASSWORD),
            Err(AuthError::InvalidUsername(AuthFlow::Signup))
        );
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_signup_then_signin() {
        let mut store = memory_store();
        store.signup("a@b.co", GOOD_PASSWORD).unwrap();
        assert_eq!(store.current_user(), Some("a@b.co"));

        store.signout();
        store.signin("a@b.co", GOOD_PASSWORD).unwrap();
        assert_eq!(store.current_user(), Some("a@b.co"));
    }

    #[test]
    fn test_signup_weak_password_reports_score() {
        let mut store = memory_store();
        let err = store.signup("a@b.co", "password1").unwrap_err();
        match err {
            AuthError::WeakPassword { score, .. } => assert_eq!(score, 2),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!store.is_registered("a@b.co"));
    }

    #[test]
    fn test_signup_duplicate_after_normalization() {
        let mut store = memory_store();
        store.signup("A@B.com", GOOD_PASSWORD).unwrap();
        assert_eq!(
            store.signup("a@b.com", GOOD_PASSWORD),
            Err(AuthError::UsernameTaken)
        );
    }

    #[test]
    fn test_usernames_stored_normalized() {
        let mut store = memory_store();
        store.signup("  Mixed.Case@Example.COM ", GOOD_PASSWORD).unwrap();

        let users = store.kv().get(USERS_KEY).unwrap();
        assert!(users.get("mixed.case@example.com").is_some());
        assert_eq!(store.current_user(), Some("mixed.case@example.com"));
    }

    #[test]
    fn test_stored_password_is_encoded() {
        let mut store = memory_store();
        store.signup("a@b.co", GOOD_PASSWORD).unwrap();

        let users = store.kv().get(USERS_KEY).unwrap();
        assert_eq!(users["a@b.co"]["password"], json!("QWExIWFhYWE="));
    }

    #[test]
    fn test_signin_errors() {
        let mut store = memory_store();
        store.signup("a@b.co", GOOD_PASSWORD).unwrap();
        store.signout();

        assert_eq!(
            store.signin("nope", GOOD_PASSWORD),
            Err(AuthError::InvalidUsername(AuthFlow::Signin))
        );
        assert_eq!(store.signin("a@b.co", ""), Err(AuthError::MissingPassword));
        assert_eq!(store.signin("x@y.io", GOOD_PASSWORD), Err(AuthError::UnknownUser));
        assert_eq!(store.signin("a@b.co", "Aa1!aaab"), Err(AuthError::WrongPassword));
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_signin_skips_strength_rules() {
        let kv = MemoryStore::new();
        // An account created before the strength rules existed
        kv.set(USERS_KEY, json!({"old@b.co": {"password": Base64Encoder.encode("weak").unwrap()}}));
        let mut store = CredentialStore::new(kv, Box::new(Base64Encoder));

        store.signin("OLD@b.co", "weak").unwrap();
        assert_eq!(store.current_user(), Some("old@b.co"));
    }

    #[test]
    fn test_signin_replaces_session() {
        let mut store = memory_store();
        store.signup("first@b.co", GOOD_PASSWORD).unwrap();
        store.signup("second@b.co", GOOD_PASSWORD).unwrap();
        assert_eq!(store.current_user(), Some("second@b.co"));

        store.signin("first@b.co", GOOD_PASSWORD).unwrap();
        let persisted = store.kv().get(SESSION_KEY).unwrap();
        assert_eq!(persisted["username"], json!("first@b.co"));
        assert!(persisted["createdAt"].as_i64().unwrap() > 0);
    }

    #[test]
    fn test_signout_is_idempotent() {
        let mut store = memory_store();
        store.signout();
        store.signup("a@b.co", GOOD_PASSWORD).unwrap();
        store.signout();
        store.signout();
        assert!(store.current_user().is_none());
        assert!(store.kv().get(SESSION_KEY).is_none());
    }

    #[test]
    fn test_restore_session_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut first =
            CredentialStore::new(JsonFileStore::new(path.clone()), Box::new(Base64Encoder));
        first.signup("a@b.co", GOOD_PASSWORD).unwrap();

        let mut second = CredentialStore::new(JsonFileStore::new(path), Box::new(Base64Encoder));
        assert!(second.current_user().is_none());
        assert_eq!(second.restore_session(), Some("a@b.co".to_string()));
        assert_eq!(second.current_user(), Some("a@b.co"));
    }

    #[test]
    fn test_signout_then_restore_yields_nobody() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut store =
            CredentialStore::new(JsonFileStore::new(path.clone()), Box::new(Base64Encoder));
        store.signup("a@b.co", GOOD_PASSWORD).unwrap();
        store.signout();

        let mut next = CredentialStore::new(JsonFileStore::new(path), Box::new(Base64Encoder));
        assert!(next.restore_session().is_none());
        assert!(next.current_user().is_none());
    }

    #[test]
    fn test_restore_trusts_session_without_account() {
        let kv = MemoryStore::new();
        kv.set(SESSION_KEY, json!({"username": "ghost@b.co", "createdAt": 1}));
        let mut store = CredentialStore::new(kv, Box::new(Base64Encoder));

        assert_eq!(store.restore_session(), Some("ghost@b.co".to_string()));
        assert!(!store.is_registered("ghost@b.co"));
        assert_eq!(store.session().unwrap().started_at().unwrap().timestamp_millis(), 1);
    }

    #[test]
    fn test_session_without_timestamp_has_no_start() {
        let kv = MemoryStore::new();
        kv.set(SESSION_KEY, json!({"username": "a@b.co"}));
        let mut store = CredentialStore::new(kv, Box::new(Base64Encoder));

        store.restore_session().unwrap();
        assert!(store.session().unwrap().started_at().is_none());
    }

    #[test]
    fn test_restore_ignores_malformed_session() {
        for bad in [json!("a@b.co"), json!({"username": ""}), json!({"user": "a@b.co"})] {
            let kv = MemoryStore::new();
            kv.set(SESSION_KEY, bad.clone());
            let mut store = CredentialStore::new(kv, Box::new(Base64Encoder));
            assert!(store.restore_session().is_none(), "{}", bad);
        }
    }

    // Fail-open policy: a corrupt credential map reads as "no accounts".
    #[test]
    fn test_corrupt_credential_map_reads_as_empty() {
        let kv = MemoryStore::new();
        kv.set(USERS_KEY, json!("garbage"));
        let mut store = CredentialStore::new(kv, Box::new(Base64Encoder));

        assert_eq!(store.signin("a@b.co", GOOD_PASSWORD), Err(AuthError::UnknownUser));
        store.signup("a@b.co", GOOD_PASSWORD).unwrap();
    }

    #[test]
    fn test_argon2_scheme_end_to_end() {
        let mut store = CredentialStore::with_scheme(MemoryStore::new(), PasswordScheme::Argon2);
        store.signup("a@b.co", GOOD_PASSWORD).unwrap();
        store.signout();

        assert_eq!(store.signin("a@b.co", "Aa1!aaab"), Err(AuthError::WrongPassword));
        store.signin("a@b.co", GOOD_PASSWORD).unwrap();
    }
}
