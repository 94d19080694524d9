//
//  homebox-cli
//  api/locations.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Location types and operations.
//!
//! Locations form a hierarchy (house → room → shelf). The flat listing and
//! the `/locations/tree` endpoint expose the same data in two shapes; both
//! are wrapped here, along with CRUD and the printable location label sheet.

use serde::{Deserialize, Serialize};

use super::HomeboxClient;
use crate::Result;

/// A location as embedded inside item responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSummary {
    /// Opaque location ID.
    pub id: String,

    /// Human-readable location name.
    #[serde(default)]
    pub name: String,
}

/// A full location record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Opaque location ID.
    pub id: String,

    /// Human-readable location name.
    pub name: String,

    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// The parent location, absent for top-level locations.
    #[serde(default)]
    pub parent: Option<LocationSummary>,

    /// Direct child locations, present on detail responses.
    #[serde(default)]
    pub children: Vec<LocationSummary>,

    /// Number of items stored at this location, when reported.
    #[serde(default, rename = "itemCount")]
    pub item_count: Option<i64>,
}

/// A node in the location tree. `GET /locations/tree`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Opaque node ID (a location or item ID depending on `node_type`).
    pub id: String,

    /// Node display name.
    pub name: String,

    /// Node kind: `"location"` or `"item"`.
    #[serde(default, rename = "type")]
    pub node_type: String,

    /// Child nodes.
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

/// Request payload for creating or updating a location.
#[derive(Debug, Clone, Serialize)]
pub struct LocationData {
    /// The location name. Required.
    pub name: String,

    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional parent location ID.
    #[serde(skip_serializing_if = "Option::is_none", rename = "parentId")]
    pub parent_id: Option<String>,
}

/// Query parameters for the tree endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeQuery {
    /// Include items as leaf nodes, not just locations.
    #[serde(rename = "withItems")]
    pub with_items: bool,
}

impl HomeboxClient {
    /// Fetches all locations as a flat list. `GET /locations`.
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.get("/locations").await
    }

    /// Fetches a single location by ID. `GET /locations/{id}`.
    pub async fn get_location(&self, location_id: &str) -> Result<Location> {
        self.get(&format!("/locations/{location_id}")).await
    }

    /// Fetches the location hierarchy. `GET /locations/tree`.
    pub async fn location_tree(&self, query: &TreeQuery) -> Result<Vec<TreeNode>> {
        self.get_with_query("/locations/tree", query).await
    }

    /// Creates a location. `POST /locations`.
    pub async fn create_location(&self, data: &LocationData) -> Result<Location> {
        self.post("/locations", data).await
    }

    /// Updates a location. `PUT /locations/{id}`.
    pub async fn update_location(&self, location_id: &str, data: &LocationData) -> Result<Location> {
        self.put(&format!("/locations/{location_id}"), data).await
    }

    /// Deletes a location by ID. `DELETE /locations/{id}`.
    pub async fn delete_location(&self, location_id: &str) -> Result<()> {
        self.delete(&format!("/locations/{location_id}")).await
    }

    /// Downloads the printable label sheet for a location as raw bytes.
    /// `GET /labelmaker/location/{id}`.
    pub async fn location_label_sheet(&self, location_id: &str) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/labelmaker/location/{location_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_nodes_nest_recursively() {
        let json = r#"[{
            "id":"root","name":"Garage","type":"location",
            "children":[{"id":"shelf","name":"Shelf A","type":"location","children":[]}]
        }]"#;
        let tree: Vec<TreeNode> = serde_json::from_str(json).unwrap();
        assert_eq!(tree[0].children[0].name, "Shelf A");
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn location_data_omits_absent_fields() {
        let data = LocationData {
            name: "Attic".to_string(),
            description: None,
            parent_id: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"name":"Attic"}"#);
    }
}
