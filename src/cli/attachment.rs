//
//  homebox-cli
//  cli/attachment.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Item attachment commands: upload, download, metadata updates.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::attachments::{AttachmentKind, AttachmentUpdate};
use crate::output::{format_bool, format_opt, write_json, TableBuilder};
use crate::util::format_size;

use super::{build_client, GlobalOptions};

/// Manage item attachments.
#[derive(Args, Debug)]
pub struct AttachmentCommand {
    #[command(subcommand)]
    pub command: AttachmentSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AttachmentSubcommand {
    /// List an item's attachments
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Upload a file as an attachment
    Upload(UploadArgs),

    /// Download an attachment to disk
    #[command(visible_alias = "dl")]
    Download(DownloadArgs),

    /// Update attachment metadata
    Update(UpdateArgs),

    /// Delete an attachment
    #[command(visible_alias = "rm")]
    Delete(RefArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Item ID
    pub item: String,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Item ID
    pub item: String,

    /// File to upload
    pub file: PathBuf,

    /// Attachment type
    #[arg(long, short = 't', default_value = "attachment")]
    pub kind: AttachmentKindArg,

    /// Name to store the file under (defaults to the file name)
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Item ID
    pub item: String,

    /// Attachment ID
    pub attachment: String,

    /// Directory to write into (defaults to the Downloads directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Item ID
    pub item: String,

    /// Attachment ID
    pub attachment: String,

    /// New attachment type
    #[arg(long, short = 't')]
    pub kind: Option<AttachmentKindArg>,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// Mark as the primary attachment
    #[arg(long)]
    pub primary: Option<bool>,
}

#[derive(Args, Debug)]
pub struct RefArgs {
    /// Item ID
    pub item: String,

    /// Attachment ID
    pub attachment: String,
}

/// Newtype so clap can parse [`AttachmentKind`] with a helpful error.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentKindArg(pub AttachmentKind);

impl std::str::FromStr for AttachmentKindArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(AttachmentKindArg)
    }
}

impl AttachmentCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = build_client(global)?;
        match &self.command {
            AttachmentSubcommand::List(args) => {
                let attachments = client.list_attachments(&args.item).await?;
                if global.json {
                    write_json(&attachments)?;
                    return Ok(());
                }
                let mut table =
                    TableBuilder::new().headers(["ID", "Type", "Title", "Primary"]);
                for attachment in &attachments {
                    table = table.row([
                        attachment.id.clone(),
                        attachment.attachment_type.clone(),
                        format_opt(attachment.document.as_ref().map(|d| d.title.as_str())),
                        format_bool(attachment.primary, console::colors_enabled()),
                    ]);
                }
                table.print();
                Ok(())
            }
            AttachmentSubcommand::Upload(args) => {
                let name = match &args.name {
                    Some(name) => name.clone(),
                    None => match args.file.file_name().and_then(|n| n.to_str()) {
                        Some(name) => name.to_string(),
                        None => bail!("cannot derive a file name from {}", args.file.display()),
                    },
                };

                let item = client
                    .upload_attachment(&args.item, &args.file, args.kind.0, &name)
                    .await?;
                if global.json {
                    write_json(&item)?;
                } else {
                    println!("Uploaded {name} to item {}", item.name);
                }
                Ok(())
            }
            AttachmentSubcommand::Download(args) => {
                let path = client
                    .save_attachment(&args.item, &args.attachment, args.output.as_deref())
                    .await?;
                let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                println!("Saved {} ({})", path.display(), format_size(size));
                Ok(())
            }
            AttachmentSubcommand::Update(args) => {
                let item = client
                    .update_attachment(
                        &args.item,
                        &args.attachment,
                        &AttachmentUpdate {
                            kind: args.kind.map(|k| k.0),
                            title: args.title.clone(),
                            primary: args.primary,
                        },
                    )
                    .await?;
                if global.json {
                    write_json(&item)?;
                } else {
                    println!("Updated attachment {}", args.attachment);
                }
                Ok(())
            }
            AttachmentSubcommand::Delete(args) => {
                client.delete_attachment(&args.item, &args.attachment).await?;
                println!("Deleted attachment {}", args.attachment);
                Ok(())
            }
        }
    }
}
