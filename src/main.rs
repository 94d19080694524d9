//
//  homebox-cli
//  main.rs
//
//  Copyright (c) 2025 homebox-cli contributors. All rights reserved.
//

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use homebox_cli::cli::{Cli, Commands};
use homebox_cli::{exit_codes, Error};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("HBX_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Item(cmd) => cmd.run(&cli.global).await,
        Commands::Label(cmd) => cmd.run(&cli.global).await,
        Commands::Location(cmd) => cmd.run(&cli.global).await,
        Commands::Attachment(cmd) => cmd.run(&cli.global).await,
        Commands::Maintenance(cmd) => cmd.run(&cli.global).await,
        Commands::Notifier(cmd) => cmd.run(&cli.global).await,
        Commands::Report(cmd) => cmd.run(&cli.global).await,
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Status(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("hbx version {}", homebox_cli::VERSION);
            Ok(())
        }
    }
}

/// Maps error categories to distinct exit codes for scripting.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<Error>() {
        Some(e) if e.is_auth() => exit_codes::AUTH_ERROR,
        Some(e) if e.is_not_found() => exit_codes::NOT_FOUND,
        _ => exit_codes::ERROR,
    }
}
