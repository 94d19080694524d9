//
//  homebox-cli
//  output/mod.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Output Module
//!
//! Terminal output formatting for the CLI:
//!
//! - **Table format**: human-readable tables for interactive use
//! - **JSON format**: machine-readable output for scripting, selected with
//!   the global `--json` flag
//!
//! ## Example
//!
//! ```rust,ignore
//! use homebox_cli::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["ID", "Name", "Qty"])
//!     .row(["a1", "hammer", "1"])
//!     .print();
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table, the default for interactive sessions.
    #[default]
    Table,
    /// Pretty-printed JSON for scripting.
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}
