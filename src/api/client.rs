//
//  homebox-cli
//  api/client.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # HTTP Client Wrapper for the Homebox API
//!
//! This module provides [`HomeboxClient`], the core HTTP client. It owns the
//! session (base URL plus cached bearer token) and the generic request
//! dispatcher every resource wrapper funnels through.
//!
//! ## Dispatch Behavior
//!
//! 1. If no valid token is held, obtain credentials from the injected
//!    [`CredentialProvider`] and log in.
//! 2. Attach `Authorization: Bearer <token>` to the request.
//! 3. Issue the HTTP call against `base_url + path`.
//! 4. On 401, invalidate the held token, re-authenticate exactly once, and
//!    retry the original request exactly once. A second 401 surfaces as
//!    [`Error::AuthenticationFailed`]; the retry is bounded so a permanently
//!    rejecting server cannot live-lock the client.
//! 5. On other non-2xx statuses, fail with [`Error::NotFound`] (404) or
//!    [`Error::Api`]. Success responses are parsed as JSON or returned as
//!    raw bytes depending on the helper used.
//!
//! ## Concurrency
//!
//! The token slot is guarded by a `tokio::sync::Mutex`, so a client may be
//! shared across tasks: concurrent refreshes are serialized and only one
//! login is performed per expiry.

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{login, CredentialProvider, Token};
use crate::{Error, Result};

/// Versioned path prefix all Homebox endpoints live under.
const API_PREFIX: &str = "/api/v1";

/// Default request timeout when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A response from the generic [`HomeboxClient::request`] primitive.
///
/// The upstream API mostly speaks JSON, but a handful of endpoints (label
/// sheets, attachment downloads, the bill-of-materials report) return raw
/// bytes. The generic primitive sniffs the `Content-Type` header and hands
/// back whichever shape applies.
#[derive(Debug)]
pub enum Payload {
    /// A JSON response body.
    Json(serde_json::Value),
    /// A non-JSON response body (file downloads, CSV exports).
    Bytes(Vec<u8>),
    /// An empty body (e.g. 204 No Content).
    Empty,
}

/// The main HTTP client for the Homebox API.
///
/// Holds the normalized base URL, the underlying `reqwest` client, the
/// cached session token, and the credential provider used to (re-)login.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use homebox_cli::api::HomeboxClient;
/// use homebox_cli::auth::StaticCredentials;
///
/// let client = HomeboxClient::new(
///     "https://homebox.example.com",
///     Box::new(StaticCredentials::new("user@example.com", "hunter2")),
/// )?;
/// # Ok::<(), homebox_cli::Error>(())
/// ```
///
/// # Notes
///
/// - The base URL may be given with or without the `/api/v1` suffix; it is
///   normalized either way.
/// - The token is held only in memory. Credentials persist in the keyring,
///   tokens do not outlive the process.
pub struct HomeboxClient {
    /// The underlying HTTP client.
    http: Client,
    /// Normalized base URL, ending in `/api/v1` with no trailing slash.
    base_url: String,
    /// The cached session token. `None` until the first authenticated call.
    token: Mutex<Option<Token>>,
    /// Source of credentials for login and re-login.
    provider: Box<dyn CredentialProvider>,
}

impl HomeboxClient {
    /// Creates a client with the default request timeout (30 seconds).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL is not a valid HTTP(S) URL,
    /// or if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, provider: Box<dyn CredentialProvider>) -> Result<Self> {
        Self::with_timeout(base_url, provider, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(
        base_url: &str,
        provider: Box<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token: Mutex::new(None),
            provider,
        })
    }

    /// Seeds the session with an existing token.
    ///
    /// Useful when a token was obtained out of band. The client still falls
    /// back to the credential provider if the server rejects it.
    pub fn with_token(self, token: &str) -> Self {
        Self {
            token: Mutex::new(Some(Token::new(token))),
            ..self
        }
    }

    /// The normalized base URL this client talks to, including `/api/v1`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forces a fresh login, replacing any held token.
    ///
    /// Used by `hbx auth login` to validate credentials eagerly instead of
    /// waiting for the first resource call.
    pub async fn authenticate(&self) -> Result<()> {
        let mut guard = self.token.lock().await;
        let credentials = self.provider.credentials().await?;
        let token = login::login(&self.http, &self.base_url, &credentials).await?;
        *guard = Some(token);
        Ok(())
    }

    /// Returns the current token value, logging in first if none is held.
    ///
    /// The mutex is held across the login await so concurrent callers do not
    /// race each other into duplicate logins.
    async fn ensure_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            if !token.is_expired() {
                return Ok(token.value.clone());
            }
            debug!("held token is expired, re-authenticating");
        }
        let credentials = self.provider.credentials().await?;
        let token = login::login(&self.http, &self.base_url, &credentials).await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    /// Drops the held token so the next call re-authenticates.
    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    /// The generic dispatch loop all helpers go through.
    ///
    /// `build` constructs the request from the HTTP client and the full URL;
    /// it is a `Fn` (not `FnOnce`) because the single 401 retry must rebuild
    /// the request, including multipart bodies.
    async fn dispatch<F>(&self, path: &str, build: F) -> Result<Response>
    where
        F: Fn(&Client, &str) -> RequestBuilder,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut reauthenticated = false;

        loop {
            let token = self.ensure_token().await?;
            let response = build(&self.http, &url)
                .bearer_auth(&token)
                .header(header::ACCEPT, HeaderValue::from_static("application/json"))
                .send()
                .await
                .map_err(Error::Connection)?;

            if response.status() == StatusCode::UNAUTHORIZED {
                if reauthenticated {
                    return Err(Error::AuthenticationFailed);
                }
                warn!(%path, "token rejected, re-authenticating once");
                reauthenticated = true;
                self.invalidate_token().await;
                continue;
            }

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::from_status(status, path, body));
            }

            return Ok(response);
        }
    }

    /// GET a path and deserialize the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.dispatch(path, |http, url| http.get(url)).await?;
        response.json().await.map_err(Error::from_reqwest)
    }

    /// GET a path with query parameters and deserialize the JSON response.
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .dispatch(path, |http, url| http.get(url).query(query))
            .await?;
        response.json().await.map_err(Error::from_reqwest)
    }

    /// GET a path and return the raw response bytes.
    ///
    /// Used for file downloads: attachments, printable labels, and the
    /// bill-of-materials export.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self.dispatch(path, |http, url| http.get(url)).await?;
        let bytes = response.bytes().await.map_err(Error::from_reqwest)?;
        Ok(bytes.to_vec())
    }

    /// GET a path without attaching credentials.
    ///
    /// Only `/status` is reachable this way; everything else 401s.
    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(Error::Connection)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, path, body));
        }
        response.json().await.map_err(Error::from_reqwest)
    }

    /// POST a JSON body and deserialize the JSON response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .dispatch(path, |http, url| http.post(url).json(body))
            .await?;
        response.json().await.map_err(Error::from_reqwest)
    }

    /// POST a JSON body, discarding any response body.
    ///
    /// For endpoints that reply 204 or with a body the caller does not need
    /// (e.g. `POST /notifiers/test`).
    pub async fn post_no_content<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + Sync,
    {
        self.dispatch(path, |http, url| http.post(url).json(body))
            .await?;
        Ok(())
    }

    /// PUT a JSON body and deserialize the JSON response.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let response = self
            .dispatch(path, |http, url| http.put(url).json(body))
            .await?;
        response.json().await.map_err(Error::from_reqwest)
    }

    /// DELETE a path. Tolerates both 200 and 204 responses.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.dispatch(path, |http, url| http.delete(url)).await?;
        Ok(())
    }

    /// POST a multipart form and deserialize the JSON response.
    ///
    /// The form is produced by a closure because `multipart::Form` is not
    /// clonable; the dispatcher may need to rebuild it for the 401 retry.
    pub async fn post_multipart<T, F>(&self, path: &str, form: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> reqwest::multipart::Form,
    {
        let response = self
            .dispatch(path, |http, url| http.post(url).multipart(form()))
            .await?;
        response.json().await.map_err(Error::from_reqwest)
    }

    /// The generic request primitive: any method, any path, optional JSON body.
    ///
    /// Backs `hbx api` and mirrors how the upstream API is explored by hand.
    /// The response is parsed as JSON when the `Content-Type` says so,
    /// otherwise returned as raw bytes.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Payload> {
        let response = self
            .dispatch(path, |http, url| {
                let request = http.request(method.clone(), url);
                match &body {
                    Some(json) => request.json(json),
                    None => request,
                }
            })
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Payload::Empty);
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("json"))
            .unwrap_or(false);

        if is_json {
            let value = response.json().await.map_err(Error::from_reqwest)?;
            Ok(Payload::Json(value))
        } else {
            let bytes = response.bytes().await.map_err(Error::from_reqwest)?;
            if bytes.is_empty() {
                Ok(Payload::Empty)
            } else {
                Ok(Payload::Bytes(bytes.to_vec()))
            }
        }
    }
}

/// Normalizes a user-supplied base URL.
///
/// Trims trailing slashes and appends the `/api/v1` prefix when missing, so
/// both `https://host` and `https://host/api/v1` are accepted.
fn normalize_base_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| Error::Config(format!("invalid base URL '{base_url}': {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::Config(format!(
            "invalid base URL '{base_url}': expected http or https"
        )));
    }

    if trimmed.ends_with(API_PREFIX) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{API_PREFIX}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    async fn login_mock(server: &mut mockito::Server, token: &str) -> mockito::Mock {
        server
            .mock("POST", "/api/v1/users/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"token":"Bearer {token}"}}"#))
            .create_async()
            .await
    }

    fn client_for(server: &mockito::Server) -> HomeboxClient {
        HomeboxClient::new(
            &server.url(),
            Box::new(StaticCredentials::new("user@example.com", "hunter2")),
        )
        .unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(
            normalize_base_url("https://box.example.com/").unwrap(),
            "https://box.example.com/api/v1"
        );
        assert_eq!(
            normalize_base_url("https://box.example.com/api/v1").unwrap(),
            "https://box.example.com/api/v1"
        );
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("ftp://box.example.com").is_err());
    }

    #[tokio::test]
    async fn requests_carry_the_login_token() {
        let mut server = mockito::Server::new_async().await;
        let login = login_mock(&mut server, "tok-1").await;
        let resource = server
            .mock("GET", "/api/v1/labels")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server);
        let labels: Vec<serde_json::Value> = client.get("/labels").await.unwrap();
        assert!(labels.is_empty());

        login.assert_async().await;
        resource.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_token_triggers_one_reauth_and_one_retry() {
        let mut server = mockito::Server::new_async().await;
        let login = login_mock(&mut server, "fresh").await;
        let stale = server
            .mock("GET", "/api/v1/items/abc")
            .match_header("authorization", "Bearer stale")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let fresh = server
            .mock("GET", "/api/v1/items/abc")
            .match_header("authorization", "Bearer fresh")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"abc"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server).with_token("stale");
        let value: serde_json::Value = client.get("/items/abc").await.unwrap();
        assert_eq!(value["id"], "abc");

        // Exactly one re-authentication, exactly one retry.
        login.assert_async().await;
        stale.assert_async().await;
        fresh.assert_async().await;
    }

    #[tokio::test]
    async fn persistent_401_fails_after_exactly_one_retry() {
        let mut server = mockito::Server::new_async().await;
        let login = server
            .mock("POST", "/api/v1/users/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"Bearer fresh"}"#)
            .expect(1)
            .create_async()
            .await;
        let rejecting = server
            .mock("GET", "/api/v1/items")
            .with_status(401)
            .expect(2)
            .create_async()
            .await;

        let client = client_for(&server).with_token("stale");
        let err = client.get::<serde_json::Value>("/items").await.unwrap_err();
        assert!(matches!(err, Error::AuthenticationFailed));

        // One original attempt plus one retry, not zero, not unbounded.
        rejecting.assert_async().await;
        login.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_surfaced_with_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        login_mock(&mut server, "tok").await;
        server
            .mock("GET", "/api/v1/items")
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = client_for(&server);
        match client.get::<serde_json::Value>("/items").await.unwrap_err() {
            Error::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        login_mock(&mut server, "tok").await;
        server
            .mock("GET", "/api/v1/items/ghost")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get::<serde_json::Value>("/items/ghost")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn generic_request_sniffs_content_type() {
        let mut server = mockito::Server::new_async().await;
        login_mock(&mut server, "tok").await;
        server
            .mock("GET", "/api/v1/reporting/bill-of-materials")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("id,name\n1,hammer\n")
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/status")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"health":true}"#)
            .create_async()
            .await;

        let client = client_for(&server);

        match client
            .request(Method::GET, "/reporting/bill-of-materials", None)
            .await
            .unwrap()
        {
            Payload::Bytes(bytes) => assert!(bytes.starts_with(b"id,name")),
            other => panic!("expected bytes, got {other:?}"),
        }

        match client.request(Method::GET, "/status", None).await.unwrap() {
            Payload::Json(value) => assert_eq!(value["health"], true),
            other => panic!("expected json, got {other:?}"),
        }
    }
}
