//
//  homebox-cli
//  api/attachments.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Attachment types and operations.
//!
//! Attachments hang off items: photos, manuals, receipts, warranties. Upload
//! is a multipart POST carrying the file bytes plus `type` and `name` fields;
//! download returns the raw bytes, optionally saved to disk under a
//! sanitized, collision-tolerant filename.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use super::HomeboxClient;
use crate::util::{default_download_dir, sanitize_filename, unique_path};
use crate::{Error, Result};

/// The attachment categories the upstream API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Product manual, defaults to a PDF filename on download.
    Manual,
    /// Item photo.
    Photo,
    /// Purchase receipt.
    Receipt,
    /// Generic attachment.
    Attachment,
    /// Warranty document.
    Warranty,
}

impl AttachmentKind {
    /// All accepted kind names, for CLI help and validation messages.
    pub const NAMES: [&'static str; 5] = ["manual", "photo", "receipt", "attachment", "warranty"];
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manual => "manual",
            Self::Photo => "photo",
            Self::Receipt => "receipt",
            Self::Attachment => "attachment",
            Self::Warranty => "warranty",
        };
        f.write_str(name)
    }
}

impl FromStr for AttachmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "photo" => Ok(Self::Photo),
            "receipt" => Ok(Self::Receipt),
            "attachment" => Ok(Self::Attachment),
            "warranty" => Ok(Self::Warranty),
            other => Err(format!(
                "invalid attachment type '{other}', expected one of: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

/// The document backing an attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Opaque document ID.
    pub id: String,

    /// Document title, used as the download filename.
    #[serde(default)]
    pub title: String,

    /// Server-side storage path; its extension hints the file type.
    #[serde(default)]
    pub path: String,
}

/// An attachment record as embedded in item details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Opaque attachment ID.
    pub id: String,

    /// Attachment category, kept as a raw string since servers have grown
    /// the set over time.
    #[serde(default, rename = "type")]
    pub attachment_type: String,

    /// Whether this is the item's primary attachment (shown as thumbnail).
    #[serde(default)]
    pub primary: bool,

    /// The backing document.
    #[serde(default)]
    pub document: Option<Document>,
}

impl Attachment {
    /// Derives a safe local filename for this attachment.
    ///
    /// Uses the document title when present (falling back to the attachment
    /// ID), sanitized for the host filesystem. The extension comes from the
    /// server-side document path; when that gives nothing, photos default to
    /// `.png` and everything else to `.pdf`.
    pub fn local_filename(&self) -> String {
        let raw_title = self
            .document
            .as_ref()
            .filter(|d| !d.title.is_empty())
            .map(|d| d.title.clone())
            .unwrap_or_else(|| self.id.clone());

        let stem = match raw_title.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
            _ => raw_title.clone(),
        };
        let stem = sanitize_filename(&stem);

        let path_ext = self
            .document
            .as_ref()
            .and_then(|d| Path::new(&d.path).extension())
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"));

        let extension = match path_ext {
            Some(ext) => ext,
            None if self.attachment_type == "photo" => ".png".to_string(),
            None => ".pdf".to_string(),
        };

        format!("{stem}{extension}")
    }
}

/// Request payload for updating an attachment's metadata.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttachmentUpdate {
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub kind: Option<AttachmentKind>,

    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Mark (or unmark) as the item's primary attachment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

impl HomeboxClient {
    /// Fetches the attachments of an item.
    ///
    /// There is no standalone listing endpoint; attachments ride along on
    /// the item detail response.
    pub async fn list_attachments(&self, item_id: &str) -> Result<Vec<Attachment>> {
        let item = self.get_item(item_id).await?;
        Ok(item.attachments)
    }

    /// Uploads a file as an attachment. `POST /items/{id}/attachments`.
    ///
    /// The multipart form carries the file bytes (with a MIME type guessed
    /// from the filename extension) plus `type` and `name` text fields.
    pub async fn upload_attachment(
        &self,
        item_id: &str,
        file: &Path,
        kind: AttachmentKind,
        name: &str,
    ) -> Result<ItemDetailsEnvelope> {
        let bytes = tokio::fs::read(file).await?;
        let mime = guess_mime(name);
        let name = name.to_string();
        let kind = kind.to_string();

        debug!(item = %item_id, file = %name, %mime, "uploading attachment");

        self.post_multipart(&format!("/items/{item_id}/attachments"), move || {
            let part = reqwest::multipart::Part::bytes(bytes.clone()).file_name(name.clone());
            // guess_mime only returns well-formed constants
            let part = match part.mime_str(mime) {
                Ok(part) => part,
                Err(_) => reqwest::multipart::Part::bytes(bytes.clone()).file_name(name.clone()),
            };
            reqwest::multipart::Form::new()
                .part("file", part)
                .text("type", kind.clone())
                .text("name", name.clone())
        })
        .await
    }

    /// Downloads an attachment's raw bytes.
    /// `GET /items/{id}/attachments/{attachment_id}`.
    pub async fn download_attachment(&self, item_id: &str, attachment_id: &str) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/items/{item_id}/attachments/{attachment_id}"))
            .await
    }

    /// Downloads an attachment and writes it to disk.
    ///
    /// The filename is derived from the attachment's document title (see
    /// [`Attachment::local_filename`]); pre-existing files are not clobbered,
    /// a ` (n)` suffix is appended instead. When `directory` is `None` the
    /// platform Downloads directory is used.
    ///
    /// Returns the path the file was written to.
    pub async fn save_attachment(
        &self,
        item_id: &str,
        attachment_id: &str,
        directory: Option<&Path>,
    ) -> Result<PathBuf> {
        let attachments = self.list_attachments(item_id).await?;
        let attachment = attachments
            .iter()
            .find(|a| a.id == attachment_id)
            .ok_or_else(|| Error::NotFound {
                path: format!("/items/{item_id}/attachments/{attachment_id}"),
            })?;

        let bytes = self.download_attachment(item_id, attachment_id).await?;

        let dir = match directory {
            Some(dir) => dir.to_path_buf(),
            None => default_download_dir(),
        };
        std::fs::create_dir_all(&dir)?;

        let target = unique_path(&dir.join(attachment.local_filename()));
        std::fs::write(&target, &bytes)?;
        Ok(target)
    }

    /// Updates an attachment's metadata.
    /// `PUT /items/{id}/attachments/{attachment_id}`.
    pub async fn update_attachment(
        &self,
        item_id: &str,
        attachment_id: &str,
        update: &AttachmentUpdate,
    ) -> Result<ItemDetailsEnvelope> {
        self.put(
            &format!("/items/{item_id}/attachments/{attachment_id}"),
            update,
        )
        .await
    }

    /// Deletes an attachment.
    /// `DELETE /items/{id}/attachments/{attachment_id}`.
    pub async fn delete_attachment(&self, item_id: &str, attachment_id: &str) -> Result<()> {
        self.delete(&format!("/items/{item_id}/attachments/{attachment_id}"))
            .await
    }
}

/// The upstream returns the whole updated item from attachment mutations.
pub type ItemDetailsEnvelope = super::items::ItemDetails;

/// Guesses a MIME type from a filename extension.
///
/// Covers the formats the upload endpoint accepts; anything unrecognized
/// falls back to `application/octet-stream`.
fn guess_mime(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;

    fn attachment(kind: &str, title: &str, path: &str) -> Attachment {
        Attachment {
            id: "att-1".to_string(),
            attachment_type: kind.to_string(),
            primary: false,
            document: Some(Document {
                id: "doc-1".to_string(),
                title: title.to_string(),
                path: path.to_string(),
            }),
        }
    }

    #[test]
    fn filename_uses_document_extension() {
        let att = attachment("photo", "front view.jpg", "/data/documents/abc.jpg");
        assert_eq!(att.local_filename(), "front view.jpg");
    }

    #[test]
    fn filename_defaults_by_kind_when_path_has_no_extension() {
        let photo = attachment("photo", "front view", "");
        assert_eq!(photo.local_filename(), "front view.png");

        let manual = attachment("manual", "user guide", "");
        assert_eq!(manual.local_filename(), "user guide.pdf");
    }

    #[test]
    fn filename_is_sanitized() {
        let att = attachment("manual", "a/b:c*manual", "/data/documents/x.pdf");
        assert_eq!(att.local_filename(), "a_b_c_manual.pdf");
    }

    #[test]
    fn filename_falls_back_to_attachment_id() {
        let att = Attachment {
            id: "att-9".to_string(),
            attachment_type: "receipt".to_string(),
            primary: false,
            document: None,
        };
        assert_eq!(att.local_filename(), "att-9.pdf");
    }

    #[test]
    fn mime_guessing_covers_supported_formats() {
        assert_eq!(guess_mime("photo.JPG"), "image/jpeg");
        assert_eq!(guess_mime("scan.pdf"), "application/pdf");
        assert_eq!(guess_mime("mystery.bin"), "application/octet-stream");
    }

    #[test]
    fn kind_round_trips_through_str() {
        for name in AttachmentKind::NAMES {
            let kind: AttachmentKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), name);
        }
        assert!("video".parse::<AttachmentKind>().is_err());
    }

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
    async fn save_attachment_writes_sanitized_unique_file() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/items/i1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"i1","name":"drill","attachments":[
                    {"id":"att-1","type":"manual","primary":false,
                     "document":{"id":"d1","title":"drill: manual","path":"/data/documents/d1.pdf"}}
                ]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/items/i1/attachments/att-1")
            .with_status(200)
            .with_header("content-type", "application/pdf")
            .with_body("%PDF-fake")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = client(&server)
            .save_attachment("i1", "att-1", Some(dir.path()))
            .await
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "drill_ manual.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-fake");
    }

    #[tokio::test]
    async fn save_attachment_unknown_id_is_not_found() {
        let mut server = server_with_login().await;
        server
            .mock("GET", "/api/v1/items/i1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"i1","name":"drill","attachments":[]}"#)
            .create_async()
            .await;

        let err = client(&server)
            .save_attachment("i1", "ghost", Some(Path::new("/tmp")))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
