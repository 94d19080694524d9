//
//  homebox-cli
//  api/labels.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Label types and operations.
//!
//! Labels are flat tags attached to items. Besides plain CRUD, this module
//! carries the unused-label cleanup the CLI exposes as `hbx label prune`:
//! collect the label IDs referenced by any item, subtract them from the full
//! label list, and optionally delete the remainder.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

use super::HomeboxClient;
use crate::Result;

/// A label as embedded inside item responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSummary {
    /// Opaque label ID.
    pub id: String,

    /// Human-readable label name.
    #[serde(default)]
    pub name: String,
}

/// A full label record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Opaque label ID.
    pub id: String,

    /// Human-readable label name.
    pub name: String,

    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// ISO 8601 creation timestamp.
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,

    /// ISO 8601 last-update timestamp.
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Request payload for creating or updating a label.
#[derive(Debug, Clone, Serialize)]
pub struct LabelData {
    /// The label name. Required.
    pub name: String,

    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional display color (hex string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl HomeboxClient {
    /// Fetches all labels. `GET /labels`.
    pub async fn list_labels(&self) -> Result<Vec<Label>> {
        self.get("/labels").await
    }

    /// Fetches a single label by ID. `GET /labels/{id}`.
    pub async fn get_label(&self, label_id: &str) -> Result<Label> {
        self.get(&format!("/labels/{label_id}")).await
    }

    /// Creates a label. `POST /labels`.
    pub async fn create_label(&self, data: &LabelData) -> Result<Label> {
        self.post("/labels", data).await
    }

    /// Updates a label. `PUT /labels/{id}`.
    pub async fn update_label(&self, label_id: &str, data: &LabelData) -> Result<Label> {
        self.put(&format!("/labels/{label_id}"), data).await
    }

    /// Deletes a label by ID. `DELETE /labels/{id}`.
    pub async fn delete_label(&self, label_id: &str) -> Result<()> {
        self.delete(&format!("/labels/{label_id}")).await
    }

    /// Finds labels not referenced by any item.
    ///
    /// Fetches all labels and all items, then returns the labels whose ID
    /// never appears among the items' label references, preserving the
    /// order of the label listing.
    pub async fn find_unused_labels(&self) -> Result<Vec<Label>> {
        let labels = self.list_labels().await?;
        let items = self.list_all_items().await?;

        let used: HashSet<&str> = items
            .iter()
            .flat_map(|item| item.labels.iter())
            .map(|label| label.id.as_str())
            .collect();

        Ok(labels
            .into_iter()
            .filter(|label| !used.contains(label.id.as_str()))
            .collect())
    }

    /// Deletes every unused label, returning the deleted records.
    pub async fn prune_unused_labels(&self) -> Result<Vec<Label>> {
        let unused = self.find_unused_labels().await?;
        for label in &unused {
            self.delete_label(&label.id).await?;
            info!(name = %label.name, id = %label.id, "deleted unused label");
        }
        Ok(unused)
    }
}

#[cfg(test)]
mod tests {
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
        HomeboxClient::new(
            &server.url(),
            Box::new(StaticCredentials::new("u", "p")),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn unused_labels_are_the_set_difference() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/labels")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id":"l1","name":"tools"},
                    {"id":"l2","name":"unused"},
                    {"id":"l3","name":"kitchen"}
                ]"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/items")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items":[
                    {"id":"i1","name":"hammer","labels":[{"id":"l1","name":"tools"}]},
                    {"id":"i2","name":"pan","labels":[{"id":"l3","name":"kitchen"}]}
                ],"page":1,"pageSize":100,"total":2}"#,
            )
            .create_async()
            .await;

        let unused = client(&server).find_unused_labels().await.unwrap();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].id, "l2");
        assert_eq!(unused[0].name, "unused");
    }

    #[tokio::test]
    async fn prune_deletes_each_unused_label() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/labels")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"l9","name":"stale"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/items")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items":[],"page":1,"pageSize":100,"total":0}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/api/v1/labels/l9")
            .with_status(204)
            .expect(1)
            .create_async()
            .await;

        let pruned = client(&server).prune_unused_labels().await.unwrap();
        assert_eq!(pruned.len(), 1);
        delete.assert_async().await;
    }
}
