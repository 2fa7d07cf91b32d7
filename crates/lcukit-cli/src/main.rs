//! lcukit Command-Line Interface
//!
//! The main entry point for the lcukit CLI tool.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use lcukit_cli::{Cli, Config, Settings, commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")
        .and_then(|config| {
            // Setup logging
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(config.log_filter(cli.verbose)))
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();

            let settings = Settings::resolve(&config, cli.format);
            commands::execute(cli.command, &settings)
        });

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
