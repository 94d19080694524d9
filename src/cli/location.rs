//
//  homebox-cli
//  cli/location.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Location commands, including the indented tree view.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::locations::{LocationData, TreeNode, TreeQuery};
use crate::output::{format_opt, write_json, TableBuilder};

use super::{build_client, GlobalOptions};

/// Manage locations.
#[derive(Args, Debug)]
pub struct LocationCommand {
    #[command(subcommand)]
    pub command: LocationSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LocationSubcommand {
    /// List locations
    #[command(visible_alias = "ls")]
    List,

    /// Show one location
    Get(GetArgs),

    /// Show the location hierarchy as a tree
    Tree(TreeArgs),

    /// Create a location
    Create(CreateArgs),

    /// Update a location
    Update(UpdateArgs),

    /// Delete a location
    #[command(visible_alias = "rm")]
    Delete(GetArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Location ID
    pub id: String,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Include items as leaf nodes
    #[arg(long)]
    pub with_items: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Location name
    pub name: String,

    /// Description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Parent location ID
    #[arg(long, short = 'p')]
    pub parent: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Location ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: String,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// New parent location ID
    #[arg(long, short = 'p')]
    pub parent: Option<String>,
}

impl LocationCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            LocationSubcommand::List => {
                let locations = client.list_locations().await?;
                if global.json {
                    write_json(&locations)?;
                    return Ok(());
                }
                let mut table = TableBuilder::new().headers(["ID", "Name", "Items"]);
                for location in &locations {
                    table = table.row([
                        location.id.clone(),
                        location.name.clone(),
                        location
                            .item_count
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                    ]);
                }
                table.print();
                Ok(())
            }
            LocationSubcommand::Get(args) => {
                let location = client.get_location(&args.id).await?;
                if global.json {
                    write_json(&location)?;
                    return Ok(());
                }
                println!("{} ({})", location.name, location.id);
                if let Some(description) = &location.description {
                    println!("  {description}");
                }
                println!(
                    "  Parent: {}",
                    format_opt(location.parent.as_ref().map(|p| p.name.as_str()))
                );
                if !location.children.is_empty() {
                    let children: Vec<&str> =
                        location.children.iter().map(|c| c.name.as_str()).collect();
                    println!("  Children: {}", children.join(", "));
                }
                Ok(())
            }
            LocationSubcommand::Tree(args) => {
                let tree = client
                    .location_tree(&TreeQuery {
                        with_items: args.with_items,
                    })
                    .await?;
                if global.json {
                    write_json(&tree)?;
                    return Ok(());
                }
                for node in &tree {
                    print_tree(node, 0);
                }
                Ok(())
            }
            LocationSubcommand::Create(args) => {
                let location = client
                    .create_location(&LocationData {
                        name: args.name.clone(),
                        description: args.description.clone(),
                        parent_id: args.parent.clone(),
                    })
                    .await?;
                if global.json {
                    write_json(&location)?;
                } else {
                    println!("Created location {} ({})", location.name, location.id);
                }
                Ok(())
            }
            LocationSubcommand::Update(args) => {
                let location = client
                    .update_location(
                        &args.id,
                        &LocationData {
                            name: args.name.clone(),
                            description: args.description.clone(),
                            parent_id: args.parent.clone(),
                        },
                    )
                    .await?;
                if global.json {
                    write_json(&location)?;
                } else {
                    println!("Updated location {} ({})", location.name, location.id);
                }
                Ok(())
            }
            LocationSubcommand::Delete(args) => {
                client.delete_location(&args.id).await?;
                println!("Deleted location {}", args.id);
                Ok(())
            }
        }
    }
}

/// Prints a tree node and its children with two-space indentation.
fn print_tree(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    if node.node_type == "item" {
        println!("{indent}- {}", node.name);
    } else {
        println!("{indent}{}", node.name);
    }
    for child in &node.children {
        print_tree(child, depth + 1);
    }
}
