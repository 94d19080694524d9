//
//  homebox-cli
//  auth/keyring.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Secure Credential Storage Module
//!
//! Passwords are persisted in the system's native keyring service, keyed by
//! `(service name, username)`. The service name defaults to `homebox-cli`
//! but is configurable so several Homebox instances can keep separate
//! credential sets.
//!
//! ## Platform Support
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Failure Model
//!
//! A missing entry is a normal outcome and comes back as `Ok(None)`. Only
//! backend failures (no secret service daemon, access denied) surface as
//! [`crate::Error::CredentialStore`]; they are never silently swallowed.

use keyring::Entry;

use crate::Result;

/// Default service name under which credentials are grouped in the keyring.
pub const DEFAULT_SERVICE: &str = "homebox-cli";

/// Secure credential storage using the system's native keyring service.
///
/// # Example
///
/// ```rust,no_run
/// use homebox_cli::auth::KeyringStore;
///
/// fn manage_credentials() -> homebox_cli::Result<()> {
///     let store = KeyringStore::default();
///
///     store.store("user@example.com", "hunter2")?;
///
///     if let Some(password) = store.get("user@example.com")? {
///         println!("found a stored password");
///     }
///
///     store.delete("user@example.com")?;
///     Ok(())
/// }
/// ```
///
/// # Notes
///
/// - The keyring may require user interaction (password, biometrics) on
///   first access.
/// - Entries persist across application restarts and system reboots.
/// - On Linux, a secret service daemon must be running.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    /// The service name identifying this application in the keyring.
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE)
    }
}

impl KeyringStore {
    /// Creates a store scoped to the given service name.
    ///
    /// No keyring access occurs during construction; the backend is touched
    /// only when methods are called.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// The service name this store operates under.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Stores a password for a username, overwriting any existing entry.
    ///
    /// # Errors
    ///
    /// [`crate::Error::CredentialStore`] if the keyring backend is
    /// unavailable or the write fails.
    pub fn store(&self, username: &str, password: &str) -> Result<()> {
        let entry = Entry::new(&self.service, username)?;
        entry.set_password(password)?;
        Ok(())
    }

    /// Retrieves the password stored for a username.
    ///
    /// Returns `Ok(None)` when no entry exists; absence is not an error.
    pub fn get(&self, username: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, username)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the entry for a username.
    ///
    /// Idempotent: deleting a non-existent entry succeeds.
    pub fn delete(&self, username: &str) -> Result<()> {
        let entry = Entry::new(&self.service, username)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_store() -> KeyringStore {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeyringStore::new("homebox-cli-test")
    }

    #[test]
    fn round_trip_returns_identical_password() {
        let store = mock_store();
        store.store("alice@example.com", "s3cret").unwrap();
        let got = store.get("alice@example.com").unwrap();
        assert_eq!(got.as_deref(), Some("s3cret"));
    }

    #[test]
    fn get_missing_entry_is_none() {
        let store = mock_store();
        assert!(store.get("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn delete_then_get_is_none() {
        let store = mock_store();
        store.store("bob@example.com", "pw").unwrap();
        store.delete("bob@example.com").unwrap();
        assert!(store.get("bob@example.com").unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = mock_store();
        store.delete("ghost@example.com").unwrap();
        store.delete("ghost@example.com").unwrap();
    }
}
