//
//  homebox-cli
//  api/mod.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Homebox API
//!
//! The HTTP client and per-resource convenience wrappers.
//!
//! [`client::HomeboxClient`] owns the session and the generic dispatcher;
//! each resource module adds typed operations onto it as thin, stateless
//! `impl` blocks. A wrapper builds a fixed path, delegates to the dispatcher,
//! and returns a typed record. No wrapper holds state of its own.
//!
//! ## Resource Modules
//!
//! - [`items`]: inventory items, pagination, asset-ID lookup
//! - [`labels`]: labels and unused-label cleanup
//! - [`locations`]: locations and the location tree
//! - [`attachments`]: item attachments (multipart upload, raw download)
//! - [`maintenance`]: maintenance log entries
//! - [`notifiers`]: notification webhooks
//! - [`reporting`]: bill-of-materials export and group statistics
//! - [`instance`]: server status and currency information

pub mod attachments;
pub mod client;
pub mod instance;
pub mod items;
pub mod labels;
pub mod locations;
pub mod maintenance;
pub mod notifiers;
pub mod reporting;

pub use client::{HomeboxClient, Payload};
