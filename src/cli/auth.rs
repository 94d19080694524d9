//
//  homebox-cli
//  cli/auth.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

//! Authentication commands.
//!
//! `login` validates credentials against the server before storing the
//! password in the OS keyring and the server URL and username in the config
//! file. `logout` removes the stored password; `status` reports what is
//! configured and whether the server answers.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::HomeboxClient;
use crate::auth::{KeyringStore, StaticCredentials};
use crate::config::Config;

use super::{prompt_input, prompt_password, GlobalOptions};

/// Authenticate with a Homebox server.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in and store the password in the OS keyring
    Login(LoginArgs),

    /// Remove the stored password
    Logout,

    /// View authentication status
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the password from standard input instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global).await,
            AuthSubcommand::Status => status(global).await,
        }
    }
}

/// Performs the login flow.
async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;

    let base_url = match global.url.clone().or_else(|| config.base_url.clone()) {
        Some(url) => url,
        None if global.no_prompt => bail!("no server URL configured; pass --url"),
        None => prompt_input("Homebox server URL (e.g., https://homebox.example.com)")?,
    };

    let username = match global.username.clone().or_else(|| config.username.clone()) {
        Some(username) => username,
        None if global.no_prompt => bail!("no username configured; pass --username"),
        None => prompt_input("Username (email)")?,
    };

    let password = if args.password_stdin {
        read_password_from_stdin()?
    } else if global.no_prompt {
        bail!("cannot prompt for a password with --no-prompt; use --password-stdin");
    } else {
        prompt_password(&format!("Password for {username}"))?
    };

    // Validate against the server before touching the keyring.
    println!("Validating credentials...");
    let client = HomeboxClient::with_timeout(
        &base_url,
        Box::new(StaticCredentials::new(&username, &password)),
        config.timeout(),
    )?;
    client.authenticate().await?;

    let store = KeyringStore::new(config.service_name());
    store.store(&username, &password)?;

    config.base_url = Some(base_url.clone());
    config.username = Some(username.clone());
    config.save()?;

    println!("Logged in to {base_url} as {username}");
    Ok(())
}

/// Removes the stored password and the configured username.
async fn logout(global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;

    let username = match global.username.clone().or_else(|| config.username.clone()) {
        Some(username) => username,
        None => {
            println!("Not logged in");
            return Ok(());
        }
    };

    let store = KeyringStore::new(config.service_name());
    store.delete(&username)?;

    config.username = None;
    config.save()?;

    println!("Logged out {username}");
    Ok(())
}

/// Shows authentication status.
pub(super) async fn status(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    let base_url = global.url.clone().or_else(|| config.base_url.clone());
    let username = global.username.clone().or_else(|| config.username.clone());

    match &base_url {
        Some(url) => println!("Server: {url}"),
        None => println!("Server: not configured"),
    }

    match &username {
        Some(user) => {
            let store = KeyringStore::new(config.service_name());
            let has_password = store.get(user)?.is_some();
            println!("User: {user}");
            println!(
                "Password: {}",
                if has_password {
                    "stored in keyring"
                } else {
                    "not stored"
                }
            );
        }
        None => println!("User: not configured"),
    }

    if base_url.is_none() || username.is_none() {
        println!();
        println!("Run 'hbx auth login' to authenticate");
    }

    Ok(())
}

/// Reads a password from stdin, trimming the trailing newline.
fn read_password_from_stdin() -> Result<String> {
    use std::io::Read;
    let mut password = String::new();
    std::io::stdin().read_to_string(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("empty password on stdin");
    }
    Ok(password)
}
