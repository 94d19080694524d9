//
//  homebox-cli
//  api/notifiers.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Notifier types and operations.
//!
//! Notifiers are webhook URLs (shoutrrr-style) the server calls for
//! scheduled-maintenance reminders. The test endpoint fires a message at a
//! URL without saving anything.

use serde::{Deserialize, Serialize};

use super::HomeboxClient;
use crate::Result;

/// A configured notification webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notifier {
    /// Opaque notifier ID.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Webhook URL.
    #[serde(default)]
    pub url: String,

    /// Whether the notifier is enabled.
    #[serde(default, rename = "isActive")]
    pub is_active: bool,

    /// ISO 8601 creation timestamp.
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,

    /// ISO 8601 last-update timestamp.
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Request payload for creating or updating a notifier.
#[derive(Debug, Clone, Serialize)]
pub struct NotifierData {
    /// Display name. Required.
    pub name: String,

    /// Webhook URL. Required.
    pub url: String,

    /// Whether the notifier should be active.
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl HomeboxClient {
    /// Fetches all notifiers. `GET /notifiers`.
    pub async fn list_notifiers(&self) -> Result<Vec<Notifier>> {
        self.get("/notifiers").await
    }

    /// Creates a notifier. `POST /notifiers`.
    pub async fn create_notifier(&self, data: &NotifierData) -> Result<Notifier> {
        self.post("/notifiers", data).await
    }

    /// Updates a notifier. `PUT /notifiers/{id}`.
    pub async fn update_notifier(&self, notifier_id: &str, data: &NotifierData) -> Result<Notifier> {
        self.put(&format!("/notifiers/{notifier_id}"), data).await
    }

    /// Deletes a notifier. `DELETE /notifiers/{id}`.
    pub async fn delete_notifier(&self, notifier_id: &str) -> Result<()> {
        self.delete(&format!("/notifiers/{notifier_id}")).await
    }

    /// Sends a test message to a webhook URL without storing it.
    /// `POST /notifiers/test?url=...`.
    pub async fn test_notifier(&self, url: &str) -> Result<()> {
        let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
        self.post_no_content(&format!("/notifiers/test?url={encoded}"), &serde_json::json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HomeboxClient;
    use crate::auth::StaticCredentials;

    async fn server_with_login() -> mockito::ServerGuard {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/users/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"tok"}"#)
            .create_async()
            .await;
        server
    }

    fn client(server: &mockito::Server) -> HomeboxClient {
        HomeboxClient::new(&server.url(), Box::new(StaticCredentials::new("u", "p"))).unwrap()
    }

    #[tokio::test]
    async fn test_endpoint_url_is_percent_encoded() {
        let mut server = server_with_login().await;
        let mock = server
            .mock("POST", "/api/v1/notifiers/test")
            .match_query(mockito::Matcher::UrlEncoded(
                "url".to_string(),
                "discord://token@channel".to_string(),
            ))
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        client(&server)
            .test_notifier("discord://token@channel")
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_sends_active_flag() {
        let mut server = server_with_login().await;
        let mock = server
            .mock("POST", "/api/v1/notifiers")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "name": "ops",
                "url": "slack://hook",
                "isActive": true
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"n1","name":"ops","url":"slack://hook","isActive":true}"#)
            .create_async()
            .await;

        let created = client(&server)
            .create_notifier(&NotifierData {
                name: "ops".to_string(),
                url: "slack://hook".to_string(),
                is_active: true,
            })
            .await
            .unwrap();
        assert_eq!(created.id, "n1");
        mock.assert_async().await;
    }
}
