//
//  homebox-cli
//  cli/api.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Raw API passthrough for endpoints the CLI has no wrapper for.
//!
//! ```text
//! hbx api GET /items/fields
//! hbx api POST /labels --data '{"name":"garden"}'
//! hbx api GET /reporting/bill-of-materials > bom.csv
//! ```

use std::io::Write;

use anyhow::{bail, Result};
use clap::Args;
use reqwest::Method;

use crate::api::Payload;
use crate::output::write_json;

use super::{build_client, GlobalOptions};

/// Make raw API requests.
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// HTTP method (GET, POST, PUT, DELETE, ...)
    pub method: String,

    /// Endpoint path, relative to /api/v1 (e.g. /items)
    pub path: String,

    /// JSON request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let method: Method = match self.method.to_uppercase().parse() {
            Ok(method) => method,
            Err(_) => bail!("invalid HTTP method '{}'", self.method),
        };

        let body = match &self.data {
            Some(data) => Some(serde_json::from_str(data)?),
            None => None,
        };

        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        let client = build_client(global)?;
        match client.request(method, &path, body).await? {
            Payload::Json(value) => write_json(&value)?,
            Payload::Bytes(bytes) => std::io::stdout().lock().write_all(&bytes)?,
            Payload::Empty => {}
        }
        Ok(())
    }
}
