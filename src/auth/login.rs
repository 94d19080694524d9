//
//  homebox-cli
//  auth/login.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Login Authenticator
//!
//! A single operation: exchange a username/password pair for a bearer token
//! via `POST /users/login`. Homebox returns the token prefixed with
//! `Bearer `, so the prefix is stripped before the token is cached.
//!
//! Error mapping follows the client's taxonomy:
//!
//! | Outcome | Error |
//! |---------|-------|
//! | 401 / 403 | [`crate::Error::InvalidCredentials`] |
//! | transport failure | [`crate::Error::Connection`] |
//! | other non-2xx | [`crate::Error::Api`] |
//! | 2xx without a token | [`crate::Error::Api`] |

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Credentials, Token};
use crate::{Error, Result};

/// Request body for the login endpoint.
///
/// `stayLoggedIn` requests a longer-lived token, matching how the upstream
/// web UI authenticates.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(rename = "stayLoggedIn")]
    stay_logged_in: bool,
}

/// Response body from the login endpoint.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: String,
    #[serde(default, rename = "expiresAt")]
    expires_at: Option<DateTime<Utc>>,
}

/// Authenticates against `{base_url}/users/login` and returns the token.
///
/// This function is pure request/response: it never prompts and never touches
/// the keyring. Credential acquisition happens behind
/// [`super::CredentialProvider`].
pub async fn login(http: &Client, base_url: &str, credentials: &Credentials) -> Result<Token> {
    let url = format!("{}/users/login", base_url);
    let body = LoginRequest {
        username: &credentials.username,
        password: &credentials.password,
        stay_logged_in: true,
    };

    debug!(username = %credentials.username, "logging in");

    let response = http
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(Error::Connection)?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::InvalidCredentials);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    let parsed: LoginResponse = response.json().await.map_err(Error::from_reqwest)?;

    // The server hands the token back as "Bearer <value>".
    let value = parsed
        .token
        .strip_prefix("Bearer ")
        .unwrap_or(&parsed.token)
        .trim()
        .to_string();

    if value.is_empty() {
        return Err(Error::Api {
            status: status.as_u16(),
            body: "login succeeded but no token was returned".to_string(),
        });
    }

    Ok(Token {
        value,
        expires_at: parsed.expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("user@example.com", "hunter2")
    }

    #[tokio::test]
    async fn login_strips_bearer_prefix_and_parses_expiry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/users/login")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "username": "user@example.com",
                "password": "hunter2",
                "stayLoggedIn": true,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"Bearer abc123","expiresAt":"2099-01-01T00:00:00Z"}"#)
            .create_async()
            .await;

        let base = format!("{}/api/v1", server.url());
        let token = login(&Client::new(), &base, &creds()).await.unwrap();

        assert_eq!(token.value, "abc123");
        assert!(token.expires_at.is_some());
        assert!(!token.is_expired());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_login_is_invalid_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/users/login")
            .with_status(401)
            .create_async()
            .await;

        let base = format!("{}/api/v1", server.url());
        let err = login(&Client::new(), &base, &creds()).await.unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/users/login")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let base = format!("{}/api/v1", server.url());
        match login(&Client::new(), &base, &creds()).await.unwrap_err() {
            Error::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_token_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/users/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":""}"#)
            .create_async()
            .await;

        let base = format!("{}/api/v1", server.url());
        let err = login(&Client::new(), &base, &creds()).await.unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
    }
}
