//
//  homebox-cli
//  error.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Error Taxonomy
//!
//! This module defines the typed error surface of the library. Every failure
//! a caller can observe maps onto one of the [`Error`] variants; the request
//! dispatcher never converts an error into a default value.
//!
//! ## Retryability
//!
//! - [`Error::Connection`] is transient and safe to retry with backoff.
//! - [`Error::InvalidCredentials`] and [`Error::AuthenticationFailed`] require
//!   user action (new credentials).
//! - [`Error::Api`] carries the original status and body for the caller to
//!   inspect; no retry policy is applied by the client itself beyond the
//!   single 401 re-authentication step.

use reqwest::StatusCode;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors surfaced by the Homebox client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure: DNS resolution, connection refused, TLS,
    /// or request timeout. Retryable by the caller.
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// The login endpoint rejected the supplied username/password.
    #[error("invalid credentials: the server rejected the login")]
    InvalidCredentials,

    /// A request was rejected with 401 and re-authenticating once did not
    /// resolve it. The retry is bounded to avoid live-lock against a
    /// permanently rejecting server.
    #[error("authentication failed: token was rejected even after re-authenticating")]
    AuthenticationFailed,

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {path}")]
    NotFound {
        /// The request path that produced the 404.
        path: String,
    },

    /// Any other non-2xx, non-401 API response.
    #[error("API error ({status}): {body}")]
    Api {
        /// The HTTP status code returned by the server.
        status: u16,
        /// The raw response body, for diagnostics.
        body: String,
    },

    /// The secure credential store backend is unavailable or the operation
    /// failed. Distinct from a missing entry, which is a normal `None`.
    #[error("credential store error: {0}")]
    CredentialStore(#[from] keyring::Error),

    /// No credentials were available and the credential provider could not
    /// supply any (e.g. prompting disabled).
    #[error("no credentials available: {0}")]
    NoCredentials(String),

    /// Configuration could not be loaded, parsed, or saved.
    #[error("config error: {0}")]
    Config(String),

    /// A response body could not be decoded as the expected JSON shape.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// Local filesystem failure (attachment save, config write).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization failure for a request body.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classifies a transport error from reqwest.
    ///
    /// Decode failures keep their own variant so callers can tell a broken
    /// network from a schema mismatch.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err)
        } else {
            Error::Connection(err)
        }
    }

    /// Builds the appropriate error for a non-2xx, non-401 response.
    pub(crate) fn from_status(status: StatusCode, path: &str, body: String) -> Self {
        if status == StatusCode::NOT_FOUND {
            Error::NotFound {
                path: path.to_string(),
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                body,
            }
        }
    }

    /// Returns `true` if this error indicates a missing resource.
    ///
    /// Callers commonly branch on existence checks; this avoids matching on
    /// the variant at every call site.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns `true` for authentication-related failures.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Error::InvalidCredentials | Error::AuthenticationFailed | Error::NoCredentials(_)
        )
    }
}
