//
//  homebox-cli
//  cli/status.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Server status command. Works without stored credentials since `/status`
//! is an open endpoint.

use anyhow::Result;
use clap::Args;

use crate::api::HomeboxClient;
use crate::auth::StaticCredentials;
use crate::output::write_json;

use super::{resolve_base_url, GlobalOptions};

/// Show server status.
#[derive(Args, Debug)]
pub struct StatusCommand {}

impl StatusCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let base_url = resolve_base_url(global)?;
        let client = HomeboxClient::new(&base_url, Box::new(StaticCredentials::new("", "")))?;

        let summary = client.status().await?;
        if global.json {
            write_json(&summary)?;
            return Ok(());
        }

        println!("Server:  {}", client.base_url());
        println!("Healthy: {}", if summary.health { "yes" } else { "no" });
        if !summary.title.is_empty() {
            println!("Title:   {}", summary.title);
        }
        if !summary.build.version.is_empty() {
            println!("Version: {}", summary.build.version);
        }
        Ok(())
    }
}
