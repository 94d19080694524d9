//
//  homebox-cli
//  api/reporting.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Reporting and statistics operations.
//!
//! The bill-of-materials export comes back as raw CSV bytes; the group
//! statistics endpoints return small typed summaries of the whole inventory.

use serde::{Deserialize, Serialize};

use super::HomeboxClient;
use crate::Result;

/// Aggregate statistics for the whole group. `GET /groups/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupStatistics {
    /// Total number of items.
    #[serde(default, rename = "totalItems")]
    pub total_items: i64,

    /// Total number of locations.
    #[serde(default, rename = "totalLocations")]
    pub total_locations: i64,

    /// Total number of labels.
    #[serde(default, rename = "totalLabels")]
    pub total_labels: i64,

    /// Total number of users in the group.
    #[serde(default, rename = "totalUsers")]
    pub total_users: i64,

    /// Number of items with an active warranty.
    #[serde(default, rename = "totalWithWarranty")]
    pub total_with_warranty: i64,

    /// Sum of item purchase prices.
    #[serde(default, rename = "totalItemPrice")]
    pub total_item_price: f64,
}

/// Item count and value grouped by one label or location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerTotal {
    /// Label or location ID.
    pub id: String,

    /// Label or location name.
    #[serde(default)]
    pub name: String,

    /// Total purchase price of the items under it.
    #[serde(default)]
    pub total: f64,
}

/// Inventory value over time. `GET /groups/statistics/purchase-price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueOverTime {
    /// Value at the start of the window.
    #[serde(default, rename = "valueAtStart")]
    pub value_at_start: f64,

    /// Value at the end of the window.
    #[serde(default, rename = "valueAtEnd")]
    pub value_at_end: f64,

    /// Per-purchase data points inside the window.
    #[serde(default)]
    pub entries: Vec<ValueOverTimeEntry>,
}

/// One data point in [`ValueOverTime`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueOverTimeEntry {
    /// Item name.
    #[serde(default)]
    pub name: String,

    /// Purchase date, ISO 8601.
    #[serde(default)]
    pub date: String,

    /// Purchase price.
    #[serde(default)]
    pub value: f64,
}

impl HomeboxClient {
    /// Exports the full inventory as CSV. `GET /reporting/bill-of-materials`.
    ///
    /// Returned as raw bytes so the caller can write them straight to disk.
    pub async fn bill_of_materials(&self) -> Result<Vec<u8>> {
        self.get_bytes("/reporting/bill-of-materials").await
    }

    /// Fetches aggregate group statistics. `GET /groups/statistics`.
    pub async fn group_statistics(&self) -> Result<GroupStatistics> {
        self.get("/groups/statistics").await
    }

    /// Fetches item totals per label. `GET /groups/statistics/labels`.
    pub async fn label_statistics(&self) -> Result<Vec<OrganizerTotal>> {
        self.get("/groups/statistics/labels").await
    }

    /// Fetches item totals per location. `GET /groups/statistics/locations`.
    pub async fn location_statistics(&self) -> Result<Vec<OrganizerTotal>> {
        self.get("/groups/statistics/locations").await
    }

    /// Fetches inventory value over time.
    /// `GET /groups/statistics/purchase-price`.
    pub async fn purchase_price_statistics(&self) -> Result<ValueOverTime> {
        self.get("/groups/statistics/purchase-price").await
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
    async fn bill_of_materials_returns_raw_csv() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/reporting/bill-of-materials")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("Name,Quantity\nhammer,1\n")
            .create_async()
            .await;

        let csv = client(&server).bill_of_materials().await.unwrap();
        assert_eq!(csv, b"Name,Quantity\nhammer,1\n");
    }

    #[tokio::test]
    async fn group_statistics_decode() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/groups/statistics")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"totalItems":42,"totalLocations":7,"totalLabels":5,
                    "totalUsers":2,"totalWithWarranty":3,"totalItemPrice":199.99}"#,
            )
            .create_async()
            .await;

        let stats = client(&server).group_statistics().await.unwrap();
        assert_eq!(stats.total_items, 42);
        assert_eq!(stats.total_item_price, 199.99);
    }
}
