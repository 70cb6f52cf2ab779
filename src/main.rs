//! vaultenv - Vault secrets as sourceable env files
//!
//! CLI entry point. Standard output carries only the env file path;
//! logs and errors go to standard error.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vaultenv::cli::{commands, Cli};
use vaultenv::config::ConfigManager;
use vaultenv::error::VaultenvResult;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Aborting on {} error", e.kind());
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> VaultenvResult<()> {
    let cli = Cli::parse();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Configuration: {}", config_manager.path().display());

    commands::materialize(&cli, &config).await
}

/// 0 = warn, 1 = info, 2+ = debug; always to stderr
fn init_logging(verbose: u8, log_format: &str) {
    let filter = match verbose {
        0 => EnvFilter::new("vaultenv=warn"),
        1 => EnvFilter::new("vaultenv=info"),
        _ => EnvFilter::new("vaultenv=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
