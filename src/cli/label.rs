//
//  homebox-cli
//  cli/label.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Label commands, including unused-label cleanup.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::labels::LabelData;
use crate::output::{format_opt, write_json, TableBuilder};

use super::{build_client, prompt_confirm, GlobalOptions};

/// Manage labels.
#[derive(Args, Debug)]
pub struct LabelCommand {
    #[command(subcommand)]
    pub command: LabelSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LabelSubcommand {
    /// List labels
    #[command(visible_alias = "ls")]
    List,

    /// Show one label
    Get(GetArgs),

    /// Create a label
    Create(CreateArgs),

    /// Update a label
    Update(UpdateArgs),

    /// Delete a label
    #[command(visible_alias = "rm")]
    Delete(GetArgs),

    /// List labels not attached to any item
    Unused,

    /// Delete labels not attached to any item
    Prune(PruneArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Label ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Label name
    pub name: String,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Display color (hex string)
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Label ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: String,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New display color (hex string)
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl LabelCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            LabelSubcommand::List => {
                let labels = client.list_labels().await?;
                if global.json {
                    write_json(&labels)?;
                    return Ok(());
                }
                let mut table = TableBuilder::new().headers(["ID", "Name", "Description"]);
                for label in &labels {
                    table = table.row([
                        label.id.clone(),
                        label.name.clone(),
                        format_opt(label.description.as_deref()),
                    ]);
                }
                table.print();
                Ok(())
            }
            LabelSubcommand::Get(args) => {
                let label = client.get_label(&args.id).await?;
                write_json(&label)?;
                Ok(())
            }
            LabelSubcommand::Create(args) => {
                let label = client
                    .create_label(&LabelData {
                        name: args.name.clone(),
                        description: args.description.clone(),
                        color: args.color.clone(),
                    })
                    .await?;
                if global.json {
                    write_json(&label)?;
                } else {
                    println!("Created label {} ({})", label.name, label.id);
                }
                Ok(())
            }
            LabelSubcommand::Update(args) => {
                let label = client
                    .update_label(
                        &args.id,
                        &LabelData {
                            name: args.name.clone(),
                            description: args.description.clone(),
                            color: args.color.clone(),
                        },
                    )
                    .await?;
                if global.json {
                    write_json(&label)?;
                } else {
                    println!("Updated label {} ({})", label.name, label.id);
                }
                Ok(())
            }
            LabelSubcommand::Delete(args) => {
                client.delete_label(&args.id).await?;
                println!("Deleted label {}", args.id);
                Ok(())
            }
            LabelSubcommand::Unused => {
                let unused = client.find_unused_labels().await?;
                if global.json {
                    write_json(&unused)?;
                    return Ok(());
                }
                if unused.is_empty() {
                    println!("No unused labels");
                    return Ok(());
                }
                let mut table = TableBuilder::new().headers(["ID", "Name"]);
                for label in &unused {
                    table = table.row([label.id.clone(), label.name.clone()]);
                }
                table.print();
                Ok(())
            }
            LabelSubcommand::Prune(args) => {
                let unused = client.find_unused_labels().await?;
                if unused.is_empty() {
                    println!("No unused labels");
                    return Ok(());
                }

                if !args.yes && !global.no_prompt {
                    let names: Vec<&str> = unused.iter().map(|l| l.name.as_str()).collect();
                    println!("Unused labels: {}", names.join(", "));
                    if !prompt_confirm(
                        &format!("Delete {} unused label(s)?", unused.len()),
                        false,
                    )? {
                        return Ok(());
                    }
                }

                for label in &unused {
                    client.delete_label(&label.id).await?;
                    println!("Deleted label {} ({})", label.name, label.id);
                }
                Ok(())
            }
        }
    }
}
