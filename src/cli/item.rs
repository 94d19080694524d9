//
//  homebox-cli
//  cli/item.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Inventory item commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::items::{ItemCreate, ItemUpdate, ItemsQuery};
use crate::output::{format_bool, format_opt, truncate, write_json, TableBuilder};

use super::{build_client, GlobalOptions};

/// Manage inventory items.
#[derive(Args, Debug)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ItemSubcommand {
    /// List items
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one item in full
    Get(GetArgs),

    /// Look up an item by its asset ID
    Asset(AssetArgs),

    /// Show the location path of an item
    Path(GetArgs),

    /// Create an item
    Create(CreateArgs),

    /// Update an item
    Update(UpdateArgs),

    /// Delete an item
    #[command(visible_alias = "rm")]
    Delete(GetArgs),

    /// List custom field names in use
    Fields,

    /// List custom field values in use
    FieldValues,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Search query
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Show only archived items
    #[arg(long)]
    pub archived: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Item ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct AssetArgs {
    /// Asset ID, e.g. 000-001
    pub asset_id: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Item name
    pub name: String,

    /// Location ID the item lives at
    #[arg(long, short = 'l')]
    pub location: String,

    /// Description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,

    /// Label IDs to attach
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Item ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New location ID
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// New quantity
    #[arg(long)]
    pub quantity: Option<i64>,

    /// Archive or unarchive
    #[arg(long)]
    pub archived: Option<bool>,
}

impl ItemCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            ItemSubcommand::List(args) => {
                let items = if args.archived {
                    client.list_archived_items().await?
                } else if let Some(query) = &args.query {
                    let page = client
                        .list_items(&ItemsQuery {
                            q: Some(query.clone()),
                            ..Default::default()
                        })
                        .await?;
                    page.items
                } else {
                    client.list_all_items().await?
                };

                if global.json {
                    write_json(&items)?;
                    return Ok(());
                }

                let mut table = TableBuilder::new().headers([
                    "ID", "Name", "Qty", "Location", "Labels", "Archived",
                ]);
                for item in &items {
                    let labels: Vec<&str> =
                        item.labels.iter().map(|l| l.name.as_str()).collect();
                    table = table.row([
                        item.id.clone(),
                        truncate(&item.name, 40),
                        item.quantity.to_string(),
                        format_opt(item.location.as_ref().map(|l| l.name.as_str())),
                        labels.join(", "),
                        format_bool(item.archived, console::colors_enabled()),
                    ]);
                }
                table.print();
                Ok(())
            }
            ItemSubcommand::Get(args) => {
                let item = client.get_item(&args.id).await?;
                write_json(&item)?;
                Ok(())
            }
            ItemSubcommand::Asset(args) => {
                let items = client.get_items_by_asset(&args.asset_id).await?;
                write_json(&items)?;
                Ok(())
            }
            ItemSubcommand::Path(args) => {
                let path = client.item_path(&args.id).await?;
                if global.json {
                    write_json(&path)?;
                } else {
                    let names: Vec<&str> = path.iter().map(|p| p.name.as_str()).collect();
                    println!("{}", names.join(" > "));
                }
                Ok(())
            }
            ItemSubcommand::Create(args) => {
                let item = client
                    .create_item(&ItemCreate {
                        name: args.name.clone(),
                        description: args.description.clone(),
                        location_id: Some(args.location.clone()),
                        label_ids: args.labels.clone(),
                    })
                    .await?;
                if global.json {
                    write_json(&item)?;
                } else {
                    println!("Created item {} ({})", item.name, item.id);
                }
                Ok(())
            }
            ItemSubcommand::Update(args) => {
                let item = client
                    .update_item(
                        &args.id,
                        &ItemUpdate {
                            name: args.name.clone(),
                            description: args.description.clone(),
                            location_id: args.location.clone(),
                            quantity: args.quantity,
                            archived: args.archived,
                            ..Default::default()
                        },
                    )
                    .await?;
                if global.json {
                    write_json(&item)?;
                } else {
                    println!("Updated item {} ({})", item.name, item.id);
                }
                Ok(())
            }
            ItemSubcommand::Delete(args) => {
                client.delete_item(&args.id).await?;
                println!("Deleted item {}", args.id);
                Ok(())
            }
            ItemSubcommand::Fields => {
                let fields = client.item_fields().await?;
                if global.json {
                    write_json(&fields)?;
                } else {
                    for field in &fields {
                        println!("{field}");
                    }
                }
                Ok(())
            }
            ItemSubcommand::FieldValues => {
                let values = client.item_field_values().await?;
                if global.json {
                    write_json(&values)?;
                } else {
                    for value in &values {
                        println!("{value}");
                    }
                }
                Ok(())
            }
        }
    }
}
