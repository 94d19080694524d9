//
//  homebox-cli
//  cli/mod.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! CLI command definitions using clap derive macros.
//!
//! Each resource gets its own subcommand module; shared plumbing (building
//! an authenticated client, interactive prompts) lives here.

mod api;
mod attachment;
mod auth;
mod item;
mod label;
mod location;
mod maintenance;
mod notifier;
mod report;
mod status;

pub use api::ApiCommand;
pub use attachment::AttachmentCommand;
pub use auth::AuthCommand;
pub use item::ItemCommand;
pub use label::LabelCommand;
pub use location::LocationCommand;
pub use maintenance::MaintenanceCommand;
pub use notifier::NotifierCommand;
pub use report::ReportCommand;
pub use status::StatusCommand;

use anyhow::{bail, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};

use crate::api::HomeboxClient;
use crate::auth::{CredentialProvider, Credentials, KeyringStore};
use crate::config::Config;
use crate::error::Error;

/// Homebox CLI - Work with a Homebox inventory from the command line
#[derive(Parser, Debug)]
#[command(
    name = "hbx",
    version,
    about = "Work with a Homebox inventory from the command line",
    long_about = "hbx is a CLI for the Homebox self-hosted inventory manager.\n\n\
                  It brings items, labels, locations, attachments, and more to your terminal.",
    propagate_version = true,
    after_help = "Use 'hbx <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Homebox server URL
    #[arg(long, short = 'u', global = true, env = "HBX_BASE_URL")]
    pub url: Option<String>,

    /// Account username (email)
    #[arg(long, global = true, env = "HBX_USERNAME")]
    pub username: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "HBX_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with a Homebox server
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage inventory items
    #[command(visible_alias = "i")]
    Item(ItemCommand),

    /// Manage labels
    Label(LabelCommand),

    /// Manage locations
    #[command(visible_alias = "loc")]
    Location(LocationCommand),

    /// Manage item attachments
    #[command(visible_alias = "att")]
    Attachment(AttachmentCommand),

    /// Manage maintenance logs
    #[command(visible_alias = "maint")]
    Maintenance(MaintenanceCommand),

    /// Manage notification webhooks
    Notifier(NotifierCommand),

    /// Exports and statistics
    Report(ReportCommand),

    /// Make raw API requests
    Api(ApiCommand),

    /// Show server status
    Status(StatusCommand),

    /// Print version information
    Version,
}

/// Credential source used by resource commands: the OS keyring first, an
/// interactive password prompt as fallback.
struct CliCredentials {
    store: KeyringStore,
    username: String,
    allow_prompt: bool,
}

#[async_trait]
impl CredentialProvider for CliCredentials {
    async fn credentials(&self) -> crate::Result<Credentials> {
        if let Some(password) = self.store.get(&self.username)? {
            return Ok(Credentials::new(&self.username, &password));
        }

        if !self.allow_prompt {
            return Err(Error::NoCredentials(self.username.clone()));
        }

        let password = prompt_password(&format!("Password for {}", self.username))
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(Credentials::new(&self.username, &password))
    }
}

/// Builds an authenticated client from the global flags and the config file.
///
/// Flags win over config values. Fails with a pointer at `hbx auth login`
/// when the server URL or username is still unknown.
pub(crate) fn build_client(global: &GlobalOptions) -> Result<HomeboxClient> {
    let config = Config::load()?;

    let base_url = match global.url.clone().or_else(|| config.base_url.clone()) {
        Some(url) => url,
        None => bail!("no server URL configured; run 'hbx auth login' or pass --url"),
    };
    let username = match global.username.clone().or_else(|| config.username.clone()) {
        Some(username) => username,
        None => bail!("no username configured; run 'hbx auth login' or pass --username"),
    };

    let provider = CliCredentials {
        store: KeyringStore::new(config.service_name()),
        username,
        allow_prompt: !global.no_prompt,
    };

    Ok(HomeboxClient::with_timeout(
        &base_url,
        Box::new(provider),
        config.timeout(),
    )?)
}

/// Resolves the server URL without requiring credentials.
pub(crate) fn resolve_base_url(global: &GlobalOptions) -> Result<String> {
    let config = Config::load()?;
    match global.url.clone().or(config.base_url) {
        Some(url) => Ok(url),
        None => bail!("no server URL configured; run 'hbx auth login' or pass --url"),
    }
}

// Interactive prompt helpers, thin wrappers over dialoguer.

pub(crate) fn prompt_input(message: &str) -> Result<String> {
    let value: String = dialoguer::Input::new().with_prompt(message).interact_text()?;
    Ok(value.trim().to_string())
}

pub(crate) fn prompt_password(message: &str) -> Result<String> {
    Ok(dialoguer::Password::new().with_prompt(message).interact()?)
}

pub(crate) fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    Ok(dialoguer::Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?)
}
