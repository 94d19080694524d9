//
//  homebox-cli
//  api/items.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Item types and operations.
//!
//! Items are the central inventory resource. The listing endpoint paginates
//! with `page`/`pageSize` query parameters and reports the overall `total`;
//! [`HomeboxClient::list_all_items`] is the one aggregation loop in the
//! client, concatenating pages in order until the listing is exhausted.

use serde::{Deserialize, Serialize};

use super::attachments::Attachment;
use super::labels::LabelSummary;
use super::locations::LocationSummary;
use super::HomeboxClient;
use crate::Result;

/// Page size used by [`HomeboxClient::list_all_items`].
const DEFAULT_PAGE_SIZE: i64 = 100;

/// An item as returned by the listing and asset-lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Opaque item ID.
    pub id: String,

    /// Human-readable item name.
    pub name: String,

    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Quantity on hand.
    #[serde(default)]
    pub quantity: i64,

    /// Whether the item is archived.
    #[serde(default)]
    pub archived: bool,

    /// Whether the item is insured.
    #[serde(default)]
    pub insured: bool,

    /// The human-assigned asset identifier, distinct from `id`.
    #[serde(default, rename = "assetId")]
    pub asset_id: Option<String>,

    /// Purchase price as reported by the server (a decimal string).
    #[serde(default, rename = "purchasePrice")]
    pub purchase_price: Option<String>,

    /// Where the item is stored.
    #[serde(default)]
    pub location: Option<LocationSummary>,

    /// Labels attached to the item.
    #[serde(default)]
    pub labels: Vec<LabelSummary>,

    /// ISO 8601 last-update timestamp.
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// One page of the item listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPage {
    /// Items in this page, in server order.
    #[serde(default)]
    pub items: Vec<ItemSummary>,

    /// 1-indexed page number.
    #[serde(default)]
    pub page: i64,

    /// Requested page size.
    #[serde(default, rename = "pageSize")]
    pub page_size: i64,

    /// Total number of items across all pages.
    #[serde(default)]
    pub total: i64,
}

/// A full item record. `GET /items/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDetails {
    /// Opaque item ID.
    pub id: String,

    /// Human-readable item name.
    pub name: String,

    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Quantity on hand.
    #[serde(default)]
    pub quantity: i64,

    /// Whether the item is archived.
    #[serde(default)]
    pub archived: bool,

    /// The human-assigned asset identifier.
    #[serde(default, rename = "assetId")]
    pub asset_id: Option<String>,

    /// Manufacturer serial number.
    #[serde(default, rename = "serialNumber")]
    pub serial_number: Option<String>,

    /// Manufacturer model number.
    #[serde(default, rename = "modelNumber")]
    pub model_number: Option<String>,

    /// Manufacturer name.
    #[serde(default)]
    pub manufacturer: Option<String>,

    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,

    /// Where the item is stored.
    #[serde(default)]
    pub location: Option<LocationSummary>,

    /// Labels attached to the item.
    #[serde(default)]
    pub labels: Vec<LabelSummary>,

    /// Attachments on the item (photos, manuals, receipts…).
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Warranty expiry, if tracked.
    #[serde(default, rename = "warrantyExpires")]
    pub warranty_expires: Option<String>,
}

/// An element of an item's location path. `GET /items/{id}/path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathElement {
    /// Opaque node ID.
    pub id: String,

    /// Node display name.
    pub name: String,

    /// Node kind: `"location"` or `"item"`.
    #[serde(default, rename = "type")]
    pub node_type: String,
}

/// Query parameters for a single listing page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemsQuery {
    /// Free-text search query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// 1-indexed page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none", rename = "pageSize")]
    pub page_size: Option<i64>,
}

/// Request payload for creating an item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemCreate {
    /// The item name. Required.
    pub name: String,

    /// Description, sent as an empty string when absent (upstream requires
    /// the field to be present).
    #[serde(default)]
    pub description: String,

    /// The location to store the item at.
    #[serde(skip_serializing_if = "Option::is_none", rename = "locationId")]
    pub location_id: Option<String>,

    /// IDs of labels to attach.
    #[serde(default, rename = "labelIds")]
    pub label_ids: Vec<String>,
}

/// Request payload for updating an item. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemUpdate {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    /// Archive or unarchive the item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// New asset identifier.
    #[serde(skip_serializing_if = "Option::is_none", rename = "assetId")]
    pub asset_id: Option<String>,

    /// New location.
    #[serde(skip_serializing_if = "Option::is_none", rename = "locationId")]
    pub location_id: Option<String>,

    /// Replacement label set.
    #[serde(skip_serializing_if = "Option::is_none", rename = "labelIds")]
    pub label_ids: Option<Vec<String>>,
}

impl HomeboxClient {
    /// Fetches one page of the item listing. `GET /items`.
    pub async fn list_items(&self, query: &ItemsQuery) -> Result<ItemPage> {
        self.get_with_query("/items", query).await
    }

    /// Fetches every item, looping the paginated listing.
    ///
    /// Pages are requested in ascending order and concatenated as-is, so the
    /// result preserves page order and in-page order. The loop stops when a
    /// page comes back short, empty, or the reported total is reached.
    pub async fn list_all_items(&self) -> Result<Vec<ItemSummary>> {
        self.list_all_items_paged(DEFAULT_PAGE_SIZE).await
    }

    /// [`Self::list_all_items`] with an explicit page size.
    pub async fn list_all_items_paged(&self, page_size: i64) -> Result<Vec<ItemSummary>> {
        let mut all = Vec::new();
        let mut page = 1i64;

        loop {
            let query = ItemsQuery {
                page: Some(page),
                page_size: Some(page_size),
                ..Default::default()
            };
            let result = self.list_items(&query).await?;
            let fetched = result.items.len() as i64;
            all.extend(result.items);

            let reached_total = result.total > 0 && all.len() as i64 >= result.total;
            if fetched == 0 || fetched < page_size || reached_total {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// Fetches all archived items.
    ///
    /// The listing endpoint does not filter on archived state, so this
    /// fetches everything and filters client-side.
    pub async fn list_archived_items(&self) -> Result<Vec<ItemSummary>> {
        let items = self.list_all_items().await?;
        Ok(items.into_iter().filter(|item| item.archived).collect())
    }

    /// Fetches a single item by ID. `GET /items/{id}`.
    pub async fn get_item(&self, item_id: &str) -> Result<ItemDetails> {
        self.get(&format!("/items/{item_id}")).await
    }

    /// Looks up items by their human-assigned asset ID. `GET /assets/{id}`.
    ///
    /// Asset IDs are not unique by construction, so this returns a list.
    pub async fn get_items_by_asset(&self, asset_id: &str) -> Result<Vec<ItemSummary>> {
        let page: ItemPage = self.get(&format!("/assets/{asset_id}")).await?;
        Ok(page.items)
    }

    /// Fetches the location path from the root down to an item.
    /// `GET /items/{id}/path`.
    pub async fn item_path(&self, item_id: &str) -> Result<Vec<PathElement>> {
        self.get(&format!("/items/{item_id}/path")).await
    }

    /// Fetches the custom field names in use. `GET /items/fields`.
    pub async fn item_fields(&self) -> Result<Vec<String>> {
        self.get("/items/fields").await
    }

    /// Fetches the custom field values in use. `GET /items/fields/values`.
    pub async fn item_field_values(&self) -> Result<Vec<String>> {
        self.get("/items/fields/values").await
    }

    /// Creates an item. `POST /items`.
    pub async fn create_item(&self, data: &ItemCreate) -> Result<ItemSummary> {
        self.post("/items", data).await
    }

    /// Updates an item. `PUT /items/{id}`.
    pub async fn update_item(&self, item_id: &str, data: &ItemUpdate) -> Result<ItemDetails> {
        self.put(&format!("/items/{item_id}"), data).await
    }

    /// Deletes an item by ID. `DELETE /items/{id}`.
    pub async fn delete_item(&self, item_id: &str) -> Result<()> {
        self.delete(&format!("/items/{item_id}")).await
    }

    /// Downloads the printable label sheet for an item as raw bytes.
    /// `GET /labelmaker/item/{id}`.
    pub async fn item_label_sheet(&self, item_id: &str) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/labelmaker/item/{item_id}")).await
    }

    /// Downloads the printable label sheet for an asset number as raw bytes.
    /// `GET /labelmaker/assets/{n}`.
    pub async fn asset_label_sheet(&self, asset_id: &str) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/labelmaker/assets/{asset_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use mockito::Matcher;

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

    fn page_body(ids: &[&str], page: i64, total: i64) -> String {
        let items: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id":"{id}","name":"item {id}"}}"#))
            .collect();
        format!(
            r#"{{"items":[{}],"page":{page},"pageSize":2,"total":{total}}}"#,
            items.join(",")
        )
    }

    async fn page_mock(server: &mut mockito::Server, page: i64, body: String) -> mockito::Mock {
        server
            .mock("GET", "/api/v1/items")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), page.to_string()),
                Matcher::UrlEncoded("pageSize".into(), "2".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn list_all_concatenates_pages_in_order() {
        let mut server = server_with_login().await;
        let p1 = page_mock(&mut server, 1, page_body(&["a", "b"], 1, 6)).await;
        let p2 = page_mock(&mut server, 2, page_body(&["c", "d"], 2, 6)).await;
        let p3 = page_mock(&mut server, 3, page_body(&["e", "f"], 3, 6)).await;

        let items = client(&server).list_all_items_paged(2).await.unwrap();

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);

        p1.assert_async().await;
        p2.assert_async().await;
        p3.assert_async().await;
    }

    #[tokio::test]
    async fn list_all_stops_on_short_page() {
        let mut server = server_with_login().await;
        // The server does not report a total; a short page ends the loop.
        let p1 = page_mock(&mut server, 1, page_body(&["a", "b"], 1, 0)).await;
        let p2 = page_mock(&mut server, 2, page_body(&["c"], 2, 0)).await;

        let items = client(&server).list_all_items_paged(2).await.unwrap();
        assert_eq!(items.len(), 3);

        p1.assert_async().await;
        p2.assert_async().await;
    }

    #[tokio::test]
    async fn list_all_handles_empty_inventory() {
        let mut server = server_with_login().await;
        let p1 = page_mock(&mut server, 1, page_body(&[], 1, 0)).await;

        let items = client(&server).list_all_items_paged(2).await.unwrap();
        assert!(items.is_empty());
        p1.assert_async().await;
    }

    #[tokio::test]
    async fn archived_filter_is_applied_client_side() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/items")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items":[
                    {"id":"a","name":"kept","archived":false},
                    {"id":"b","name":"boxed","archived":true}
                ],"page":1,"pageSize":100,"total":2}"#,
            )
            .create_async()
            .await;

        let archived = client(&server).list_archived_items().await.unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].id, "b");
    }

    #[tokio::test]
    async fn asset_lookup_unwraps_the_page_envelope() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/assets/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items":[{"id":"i1","name":"drill","assetId":"42"}],"page":1,"pageSize":1,"total":1}"#)
            .create_async()
            .await;

        let items = client(&server).get_items_by_asset("42").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].asset_id.as_deref(), Some("42"));
    }
}
