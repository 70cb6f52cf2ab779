//! Configuration management for vaultenv

pub mod schema;

pub use schema::Config;

use crate::error::{VaultenvError, VaultenvResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultenv")
            .join("config.toml")
    }

    /// Load configuration, falling back to defaults, then apply env overrides
    pub async fn load(&self) -> VaultenvResult<Config> {
        let mut config = if self.config_path.exists() {
            self.load_from_file(&self.config_path).await?
        } else {
            debug!("Config file not found, using defaults");
            Config::default()
        };

        apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> VaultenvResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| VaultenvError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| VaultenvError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the standard Vault client environment variables on top of `config`
fn apply_env_overrides(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> VaultenvResult<()> {
    if let Some(addr) = lookup("VAULT_ADDR").filter(|v| !v.is_empty()) {
        debug!("Using VAULT_ADDR={}", addr);
        config.vault.address = addr;
    }

    if let Some(namespace) = lookup("VAULT_NAMESPACE").filter(|v| !v.is_empty()) {
        config.vault.namespace = Some(namespace);
    }

    if let Some(timeout) = lookup("VAULT_CLIENT_TIMEOUT").filter(|v| !v.is_empty()) {
        config.vault.timeout_secs =
            parse_timeout(&timeout).ok_or_else(|| VaultenvError::ConfigInvalid {
                path: PathBuf::from("VAULT_CLIENT_TIMEOUT"),
                reason: format!(
                    "expected a duration like 30, 30s, 5m or 1h (0 disables), got {:?}",
                    timeout
                ),
            })?;
        if config.vault.timeout_secs == 0 {
            debug!("Vault request timeout disabled");
        }
    }

    Ok(())
}

/// Whole seconds from an integer with an optional `s`, `m` or `h` unit
fn parse_timeout(value: &str) -> Option<u64> {
    let value = value.trim();
    let (digits, scale) = match value.char_indices().last()? {
        (i, 's') => (&value[..i], 1),
        (i, 'm') => (&value[..i], 60),
        (i, 'h') => (&value[..i], 3600),
        _ => (value, 1),
    };
    digits.parse::<u64>().ok()?.checked_mul(scale)
}
