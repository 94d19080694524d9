//
//  homebox-cli
//  lib.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! # Homebox CLI Library
//!
//! A client library for the [Homebox](https://homebox.software) inventory
//! management API, plus the core logic for the `hbx` CLI tool.
//!
//! ## Overview
//!
//! Homebox exposes a JSON REST API under a versioned `/api/v1` prefix with
//! bearer-token authentication. This library wraps that API with:
//!
//! - **Typed resource wrappers**: items, labels, locations, attachments,
//!   maintenance logs, notifiers, and reports
//! - **Token lifecycle management**: login, caching, and a single bounded
//!   re-authentication retry when the server rejects a token
//! - **Secure credential storage**: passwords live in the OS keyring, never
//!   in config files
//! - **File handling**: attachment upload (multipart) and download with
//!   filename sanitization and collision handling
//!
//! ## Module Structure
//!
//! - [`api`]: The HTTP client and per-resource convenience wrappers
//! - [`auth`]: Credential providers, login, and keyring storage
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (table and JSON)
//! - [`util`]: Filename and filesystem helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use homebox_cli::api::HomeboxClient;
//! use homebox_cli::auth::StaticCredentials;
//!
//! # async fn example() -> homebox_cli::Result<()> {
//! let client = HomeboxClient::new(
//!     "https://homebox.example.com",
//!     Box::new(StaticCredentials::new("user@example.com", "hunter2")),
//! )?;
//!
//! let items = client.list_all_items().await?;
//! println!("{} items in inventory", items.len());
//! # Ok(())
//! # }
//! ```

/// API client and per-resource convenience wrappers.
///
/// Provides [`api::HomeboxClient`], which owns the session token and the
/// generic request dispatcher, along with typed operations for every
/// Homebox resource.
pub mod api;

/// Authentication and credential management.
///
/// Handles the login endpoint, bearer-token parsing, the injectable
/// [`auth::CredentialProvider`] seam, and secure credential storage via the
/// system keyring.
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API. Interactive credential prompting lives here, at the
/// boundary, so the core stays testable without terminal I/O.
pub mod cli;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/hbx/config.toml`
/// - macOS: `~/Library/Application Support/hbx/config.toml`
/// - Windows: `%APPDATA%\hbx\config.toml`
pub mod config;

/// Error taxonomy for the library.
pub mod error;

/// Output formatting for table and JSON modes.
pub mod output;

/// Filesystem helpers: filename sanitization, download directory resolution,
/// and collision-tolerant paths.
pub mod util;

pub use config::Config;
pub use error::{Error, Result};

/// Application name constant, used for display and configuration paths.
pub const APP_NAME: &str = "hbx";

/// Application version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes allowing scripts to programmatically detect the
/// outcome of CLI operations.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed. Run `hbx auth login`.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist.
    pub const NOT_FOUND: i32 = 8;
}
