//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// vaultenv - Vault secrets as sourceable env files
///
/// Fetches a secret from Vault, caches it in memory-backed storage and
/// prints the path of the env file, ready for `source "$(vaultenv kv/app)"`.
#[derive(Parser, Debug)]
#[command(name = "vaultenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Secret to materialize, as <mount>/<path>
    pub secret: String,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "VAULTENV_CONFIG")]
    pub config: Option<PathBuf>,
}
