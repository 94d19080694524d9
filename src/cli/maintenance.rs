//
//  homebox-cli
//  cli/maintenance.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Maintenance log commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::maintenance::MaintenanceData;
use crate::output::{format_opt, write_json, TableBuilder};

use super::{build_client, GlobalOptions};

/// Manage maintenance logs.
#[derive(Args, Debug)]
pub struct MaintenanceCommand {
    #[command(subcommand)]
    pub command: MaintenanceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceSubcommand {
    /// List maintenance entries, for one item or across the inventory
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Add a maintenance entry to an item
    Add(AddArgs),

    /// Update a maintenance entry
    Update(UpdateArgs),

    /// Delete a maintenance entry
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Limit to one item's log
    #[arg(long, short = 'i')]
    pub item: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Item ID
    pub item: String,

    /// Short name of the work
    pub name: String,

    /// Longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Cost, e.g. 12.50
    #[arg(long)]
    pub cost: Option<String>,

    /// Completion date (ISO 8601)
    #[arg(long)]
    pub completed: Option<String>,

    /// Scheduled date (ISO 8601)
    #[arg(long)]
    pub scheduled: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Entry ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: String,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New cost
    #[arg(long)]
    pub cost: Option<String>,

    /// New completion date (ISO 8601)
    #[arg(long)]
    pub completed: Option<String>,

    /// New scheduled date (ISO 8601)
    #[arg(long)]
    pub scheduled: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entry ID
    pub id: String,
}

impl MaintenanceCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            MaintenanceSubcommand::List(args) => {
                let entries = match &args.item {
                    Some(item) => client.item_maintenance(item).await?,
                    None => client.list_maintenance().await?,
                };
                if global.json {
                    write_json(&entries)?;
                    return Ok(());
                }
                let mut table =
                    TableBuilder::new().headers(["ID", "Name", "Item", "Cost", "Completed"]);
                for entry in &entries {
                    table = table.row([
                        entry.id.clone(),
                        entry.name.clone(),
                        format_opt(entry.item_name.as_deref()),
                        format_opt(entry.cost.as_deref()),
                        format_opt(entry.completed_date.as_deref()),
                    ]);
                }
                table.print();
                Ok(())
            }
            MaintenanceSubcommand::Add(args) => {
                let entry = client
                    .create_maintenance(
                        &args.item,
                        &MaintenanceData {
                            name: args.name.clone(),
                            description: args.description.clone(),
                            cost: args.cost.clone(),
                            completed_date: args.completed.clone(),
                            scheduled_date: args.scheduled.clone(),
                        },
                    )
                    .await?;
                if global.json {
                    write_json(&entry)?;
                } else {
                    println!("Added maintenance entry {} ({})", entry.name, entry.id);
                }
                Ok(())
            }
            MaintenanceSubcommand::Update(args) => {
                let entry = client
                    .update_maintenance(
                        &args.id,
                        &MaintenanceData {
                            name: args.name.clone(),
                            description: args.description.clone(),
                            cost: args.cost.clone(),
                            completed_date: args.completed.clone(),
                            scheduled_date: args.scheduled.clone(),
                        },
                    )
                    .await?;
                if global.json {
                    write_json(&entry)?;
                } else {
                    println!("Updated maintenance entry {} ({})", entry.name, entry.id);
                }
                Ok(())
            }
            MaintenanceSubcommand::Delete(args) => {
                client.delete_maintenance(&args.id).await?;
                println!("Deleted maintenance entry {}", args.id);
                Ok(())
            }
        }
    }
}
