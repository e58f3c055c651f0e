//! Login session: who is signed in.
//!
//! A session is an explicit value created on login and torn down on logout.
//! Catalog commands ask for the current session before touching the store
//! and refuse to run without one.

use jiff::Timestamp;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::storage::{Storage, StorageError};

/// An account allowed to sign in, as configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Account {
    pub email: String,

    /// Hex SHA-256 digest of the password.
    pub password_sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Uuid,
    pub email: String,
    pub started_at: Timestamp,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not signed in; run `pubdesk login` first")]
    NotSignedIn,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Hex SHA-256 of `password`, the form stored in config.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Check credentials against `accounts` and start a new session.
pub fn login(
    storage: &Storage,
    accounts: &[Account],
    email: &str,
    password: &str,
) -> Result<Session, SessionError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(SessionError::MissingCredentials);
    }

    let digest = password_digest(password);
    let known = accounts.iter().any(|a| {
        a.email.trim().eq_ignore_ascii_case(email)
            && a.password_sha256.trim().eq_ignore_ascii_case(&digest)
    });
    if !known {
        return Err(SessionError::InvalidCredentials);
    }

    let session = Session {
        token: Uuid::new_v4(),
        email: email.to_string(),
        started_at: Timestamp::now(),
    };
    storage.save_session(&session)?;
    info!(email = %session.email, "signed in");
    Ok(session)
}

/// End the current session. Returns whether one was active.
pub fn logout(storage: &Storage) -> Result<bool, SessionError> {
    let ended = storage.clear_session()?;
    if ended {
        info!("signed out");
    }
    Ok(ended)
}

/// The active session, or [`SessionError::NotSignedIn`].
pub fn current(storage: &Storage) -> Result<Session, SessionError> {
    storage.load_session()?.ok_or(SessionError::NotSignedIn)
}
