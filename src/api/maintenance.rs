//
//  homebox-cli
//  api/maintenance.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Maintenance log types and operations.
//!
//! Maintenance entries record work done on an item (servicing, repairs)
//! with an optional cost. Entries are created under an item but updated
//! and deleted through the top-level `/maintenance` collection.

use serde::{Deserialize, Serialize};

use super::HomeboxClient;
use crate::Result;

/// A maintenance log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceEntry {
    /// Opaque entry ID.
    pub id: String,

    /// Short name of the work performed.
    #[serde(default)]
    pub name: String,

    /// Longer free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Cost of the work, reported as a decimal string.
    #[serde(default)]
    pub cost: Option<String>,

    /// Date the work was completed, ISO 8601.
    #[serde(default, rename = "completedDate")]
    pub completed_date: Option<String>,

    /// Date the work is scheduled for, ISO 8601.
    #[serde(default, rename = "scheduledDate")]
    pub scheduled_date: Option<String>,

    /// Owning item ID, present on the aggregated listing.
    #[serde(default, rename = "itemID")]
    pub item_id: Option<String>,

    /// Owning item name, present on the aggregated listing.
    #[serde(default, rename = "itemName")]
    pub item_name: Option<String>,
}

/// Request payload for creating or updating a maintenance entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaintenanceData {
    /// Short name of the work. Required.
    pub name: String,

    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Cost as a decimal string, e.g. `"12.50"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,

    /// Completion date, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none", rename = "completedDate")]
    pub completed_date: Option<String>,

    /// Scheduled date, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none", rename = "scheduledDate")]
    pub scheduled_date: Option<String>,
}

impl HomeboxClient {
    /// Fetches every maintenance entry across all items. `GET /maintenance`.
    pub async fn list_maintenance(&self) -> Result<Vec<MaintenanceEntry>> {
        self.get("/maintenance").await
    }

    /// Fetches the maintenance log of one item.
    /// `GET /items/{id}/maintenance`.
    pub async fn item_maintenance(&self, item_id: &str) -> Result<Vec<MaintenanceEntry>> {
        self.get(&format!("/items/{item_id}/maintenance")).await
    }

    /// Adds a maintenance entry to an item. `POST /items/{id}/maintenance`.
    pub async fn create_maintenance(
        &self,
        item_id: &str,
        data: &MaintenanceData,
    ) -> Result<MaintenanceEntry> {
        self.post(&format!("/items/{item_id}/maintenance"), data)
            .await
    }

    /// Updates a maintenance entry. `PUT /maintenance/{id}`.
    pub async fn update_maintenance(
        &self,
        entry_id: &str,
        data: &MaintenanceData,
    ) -> Result<MaintenanceEntry> {
        self.put(&format!("/maintenance/{entry_id}"), data).await
    }

    /// Deletes a maintenance entry. `DELETE /maintenance/{id}`.
    pub async fn delete_maintenance(&self, entry_id: &str) -> Result<()> {
        self.delete(&format!("/maintenance/{entry_id}")).await
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
    async fn listing_decodes_cost_and_item_fields() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/maintenance")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":"m1","name":"oil change","cost":"42.50",
                     "completedDate":"2025-03-01T00:00:00Z",
                     "itemID":"i1","itemName":"mower"}]"#,
            )
            .create_async()
            .await;

        let entries = client(&server).list_maintenance().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cost.as_deref(), Some("42.50"));
        assert_eq!(entries[0].item_name.as_deref(), Some("mower"));
    }

    #[test]
    fn payload_omits_absent_fields() {
        let data = MaintenanceData {
            name: "belt swap".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"name":"belt swap"}"#);
    }
}
