//
//  homebox-cli
//  auth/mod.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Authentication Module
//!
//! Authentication for Homebox is username/password login against
//! `POST /api/v1/users/login`, which returns an opaque bearer token with an
//! expiry timestamp. This module provides:
//!
//! - [`Credentials`]: a username/password pair, held only long enough to log in
//! - [`Token`]: the session token and its expiry
//! - [`CredentialProvider`]: the injectable seam through which the client
//!   obtains credentials, keeping interactive prompting out of the core
//! - [`KeyringStore`]: secure persistence of passwords in the OS keyring
//!
//! ## Module Structure
//!
//! - [`login`]: the login request itself (token extraction, error mapping)
//! - [`keyring`]: secure credential storage using the system keyring
//!
//! ## Example
//!
//! ```rust,no_run
//! use homebox_cli::auth::{KeyringStore, StaticCredentials};
//!
//! fn store_and_use() -> homebox_cli::Result<()> {
//!     let store = KeyringStore::new("homebox-cli");
//!     store.store("user@example.com", "hunter2")?;
//!
//!     let provider = StaticCredentials::new("user@example.com", "hunter2");
//!     Ok(())
//! }
//! ```

mod keyring;
pub mod login;

pub use keyring::{KeyringStore, DEFAULT_SERVICE};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;

/// A username/password pair used for login.
///
/// Credentials are not retained by the client after a successful login; only
/// the resulting [`Token`] is kept in memory. Persistent storage goes through
/// [`KeyringStore`], never plain files.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The Homebox account username (usually an email address).
    pub username: String,
    /// The account password.
    pub password: String,
}

impl Credentials {
    /// Creates a new credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// A bearer token returned by the login endpoint.
///
/// Homebox returns the token with a `Bearer ` prefix and an `expiresAt`
/// timestamp; [`login::login`] strips the prefix before constructing this.
#[derive(Debug, Clone)]
pub struct Token {
    /// The raw token value, without the `Bearer ` prefix.
    pub value: String,
    /// When the server will stop accepting the token, if reported.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Expiry leeway: tokens within this window of expiring are treated as
    /// already expired so an in-flight request does not race the deadline.
    const LEEWAY_SECS: i64 = 30;

    /// Creates a token without expiry information.
    ///
    /// Used when seeding a client with an externally obtained token.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expires_at: None,
        }
    }

    /// Returns `true` if the token is expired or about to expire.
    ///
    /// Tokens without an expiry timestamp are assumed valid until the server
    /// rejects them (which triggers the dispatcher's single re-auth retry).
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(exp) => exp - chrono::Duration::seconds(Self::LEEWAY_SECS) <= Utc::now(),
            None => false,
        }
    }
}

/// Source of credentials for the client.
///
/// The authenticator itself never prompts interactively; that responsibility
/// sits at the CLI boundary, which implements this trait with a dialoguer
/// prompt. Library consumers and tests use [`StaticCredentials`].
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Produces credentials for a login attempt.
    ///
    /// Called whenever the client needs to (re-)authenticate: on the first
    /// request, and once more if the server rejects the held token. Returns
    /// [`crate::Error::NoCredentials`] when none can be supplied.
    async fn credentials(&self) -> Result<Credentials>;
}

/// A fixed username/password provider.
///
/// The simplest [`CredentialProvider`]: returns the same pair every time.
/// Useful for scripts, library consumers, and tests.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Creates a provider that always yields the given pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn credentials(&self) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }
}

/// A provider backed by the system keyring.
///
/// Looks up the password for a known username in the [`KeyringStore`]. Does
/// not prompt; if no entry exists, the caller gets
/// [`crate::Error::NoCredentials`] and is expected to run `hbx auth login`.
pub struct StoredCredentials {
    store: KeyringStore,
    username: String,
}

impl StoredCredentials {
    /// Creates a provider reading the password for `username` from `store`.
    pub fn new(store: KeyringStore, username: impl Into<String>) -> Self {
        Self {
            store,
            username: username.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StoredCredentials {
    async fn credentials(&self) -> Result<Credentials> {
        match self.store.get(&self.username)? {
            Some(password) => Ok(Credentials::new(self.username.clone(), password)),
            None => Err(crate::Error::NoCredentials(format!(
                "no stored password for '{}'; run `hbx auth login`",
                self.username
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_without_expiry_is_not_expired() {
        assert!(!Token::new("abc").is_expired());
    }

    #[test]
    fn token_past_expiry_is_expired() {
        let token = Token {
            value: "abc".to_string(),
            expires_at: Some(Utc::now() - chrono::Duration::hours(1)),
        };
        assert!(token.is_expired());
    }

    #[test]
    fn token_inside_leeway_window_is_expired() {
        let token = Token {
            value: "abc".to_string(),
            expires_at: Some(Utc::now() + chrono::Duration::seconds(5)),
        };
        assert!(token.is_expired());
    }

    #[tokio::test]
    async fn static_provider_returns_fixed_pair() {
        let provider = StaticCredentials::new("user", "pass");
        let creds = provider.credentials().await.unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.password, "pass");
    }
}
