//! Materialize command - fetch (or reuse) a secret and print its env file

use crate::cli::args::Cli;
use crate::config::Config;
use crate::error::{VaultenvError, VaultenvResult};
use crate::materializer::{CacheOutcome, Materializer};
use crate::mount::create_mount;
use crate::vault::{SecretReference, VaultClient, VaultToken};
use std::io::Write;
use tracing::{debug, info};

/// Execute the materialize command
pub async fn execute(args: &Cli, config: &Config) -> VaultenvResult<()> {
    let reference = SecretReference::parse(&args.secret)?;

    // The token is required before touching the mount or the network
    let token_path = match &config.vault.token_path {
        Some(path) => path.clone(),
        None => VaultToken::default_path()?,
    };
    let token = VaultToken::load(&token_path).await?;
    let client = VaultClient::new(&config.vault, token);
    debug!("Using Vault at {}", config.vault.address);

    let mount = create_mount(&config.mount)?;
    let materialized = Materializer::new(&client, mount.as_ref(), config.vault.versioned)
        .materialize(&reference)
        .await?;

    match materialized.outcome {
        CacheOutcome::Hit => info!("Reusing {}", materialized.path.display()),
        CacheOutcome::Miss => info!("Materialized {}", materialized.path.display()),
    }

    // No trailing newline so the output can be captured verbatim
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", materialized.path.display())
        .and_then(|()| stdout.flush())
        .map_err(|e| VaultenvError::io("writing path to stdout", e))?;

    Ok(())
}
