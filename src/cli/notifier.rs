//
//  homebox-cli
//  cli/notifier.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Notification webhook commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::notifiers::NotifierData;
use crate::output::{format_bool, write_json, TableBuilder};

use super::{build_client, GlobalOptions};

/// Manage notification webhooks.
#[derive(Args, Debug)]
pub struct NotifierCommand {
    #[command(subcommand)]
    pub command: NotifierSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NotifierSubcommand {
    /// List notifiers
    #[command(visible_alias = "ls")]
    List,

    /// Create a notifier
    Create(CreateArgs),

    /// Update a notifier
    Update(UpdateArgs),

    /// Delete a notifier
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Send a test message to a webhook URL
    Test(TestArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Display name
    pub name: String,

    /// Webhook URL (shoutrrr format)
    pub url: String,

    /// Create the notifier disabled
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Notifier ID
    pub id: String,

    /// New display name
    #[arg(long)]
    pub name: String,

    /// New webhook URL
    #[arg(long)]
    pub url: String,

    /// Disable the notifier
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Notifier ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    /// Webhook URL to test
    pub url: String,
}

impl NotifierCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            NotifierSubcommand::List => {
                let notifiers = client.list_notifiers().await?;
                if global.json {
                    write_json(&notifiers)?;
                    return Ok(());
                }
                let mut table = TableBuilder::new().headers(["ID", "Name", "URL", "Active"]);
                for notifier in &notifiers {
                    table = table.row([
                        notifier.id.clone(),
                        notifier.name.clone(),
                        notifier.url.clone(),
                        format_bool(notifier.is_active, console::colors_enabled()),
                    ]);
                }
                table.print();
                Ok(())
            }
            NotifierSubcommand::Create(args) => {
                let notifier = client
                    .create_notifier(&NotifierData {
                        name: args.name.clone(),
                        url: args.url.clone(),
                        is_active: !args.inactive,
                    })
                    .await?;
                if global.json {
                    write_json(&notifier)?;
                } else {
                    println!("Created notifier {} ({})", notifier.name, notifier.id);
                }
                Ok(())
            }
            NotifierSubcommand::Update(args) => {
                let notifier = client
                    .update_notifier(
                        &args.id,
                        &NotifierData {
                            name: args.name.clone(),
                            url: args.url.clone(),
                            is_active: !args.inactive,
                        },
                    )
                    .await?;
                if global.json {
                    write_json(&notifier)?;
                } else {
                    println!("Updated notifier {} ({})", notifier.name, notifier.id);
                }
                Ok(())
            }
            NotifierSubcommand::Delete(args) => {
                client.delete_notifier(&args.id).await?;
                println!("Deleted notifier {}", args.id);
                Ok(())
            }
            NotifierSubcommand::Test(args) => {
                client.test_notifier(&args.url).await?;
                println!("Test message sent to {}", args.url);
                Ok(())
            }
        }
    }
}
