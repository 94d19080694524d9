//
//  homebox-cli
//  cli/report.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Export and statistics commands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::output::{write_json, TableBuilder};
use crate::util::format_size;

use super::{build_client, GlobalOptions};

/// Exports and statistics.
#[derive(Args, Debug)]
pub struct ReportCommand {
    #[command(subcommand)]
    pub command: ReportSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportSubcommand {
    /// Export the inventory as CSV
    Bom(BomArgs),

    /// Show aggregate inventory statistics
    Stats,

    /// Show item totals per label
    Labels,

    /// Show item totals per location
    Locations,

    /// Show inventory value over time
    Value,
}

#[derive(Args, Debug)]
pub struct BomArgs {
    /// File to write the CSV to (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl ReportCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            ReportSubcommand::Bom(args) => {
                let csv = client.bill_of_materials().await?;
                match &args.output {
                    Some(path) => {
                        std::fs::write(path, &csv)?;
                        println!("Wrote {} ({})", path.display(), format_size(csv.len() as u64));
                    }
                    None => {
                        std::io::stdout().lock().write_all(&csv)?;
                    }
                }
                Ok(())
            }
            ReportSubcommand::Stats => {
                let stats = client.group_statistics().await?;
                if global.json {
                    write_json(&stats)?;
                    return Ok(());
                }
                println!("Items:          {}", stats.total_items);
                println!("Locations:      {}", stats.total_locations);
                println!("Labels:         {}", stats.total_labels);
                println!("Users:          {}", stats.total_users);
                println!("Under warranty: {}", stats.total_with_warranty);
                println!("Total value:    {:.2}", stats.total_item_price);
                Ok(())
            }
            ReportSubcommand::Labels => {
                let totals = client.label_statistics().await?;
                print_totals(global, "Label", &totals)
            }
            ReportSubcommand::Locations => {
                let totals = client.location_statistics().await?;
                print_totals(global, "Location", &totals)
            }
            ReportSubcommand::Value => {
                let value = client.purchase_price_statistics().await?;
                if global.json {
                    write_json(&value)?;
                    return Ok(());
                }
                println!("Value at start: {:.2}", value.value_at_start);
                println!("Value at end:   {:.2}", value.value_at_end);
                if !value.entries.is_empty() {
                    let mut table = TableBuilder::new().headers(["Date", "Item", "Value"]);
                    for entry in &value.entries {
                        table = table.row([
                            entry.date.clone(),
                            entry.name.clone(),
                            format!("{:.2}", entry.value),
                        ]);
                    }
                    table.print();
                }
                Ok(())
            }
        }
    }
}

fn print_totals(
    global: &GlobalOptions,
    kind: &str,
    totals: &[crate::api::reporting::OrganizerTotal],
) -> Result<()> {
    if global.json {
        write_json(&totals)?;
        return Ok(());
    }
    let mut table = TableBuilder::new().headers([kind, "Total"]);
    for total in totals {
        table = table.row([total.name.clone(), format!("{:.2}", total.total)]);
    }
    table.print();
    Ok(())
}
