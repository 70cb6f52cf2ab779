//! Configuration schema for vaultenv
//!
//! Configuration is stored at `~/.config/vaultenv/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Secret store settings
    pub vault: VaultConfig,

    /// Memory-backed mount settings
    pub mount: MountConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Vault connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Vault server address
    pub address: String,

    /// Enterprise namespace, sent as `X-Vault-Namespace`
    pub namespace: Option<String>,

    /// Per-request timeout in seconds; 0 disables it
    pub timeout_secs: u64,

    /// Token file (defaults to `~/.vault-token`)
    pub token_path: Option<PathBuf>,

    /// Include the secret's current version in the cache file name
    pub versioned: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: "https://127.0.0.1:8200".to_string(),
            namespace: None,
            timeout_secs: 60,
            token_path: None,
            versioned: true,
        }
    }
}

/// Memory-backed mount configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// tmpfs directory used on Linux
    pub shm_path: PathBuf,

    /// Volume label of the macOS RAM disk, mounted at `/Volumes/<label>`
    pub ramdisk_label: String,

    /// RAM disk capacity in MiB
    pub ramdisk_size_mib: u32,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            shm_path: PathBuf::from("/dev/shm"),
            ramdisk_label: "vaultenv".to_string(),
            ramdisk_size_mib: 20,
        }
    }
}

impl MountConfig {
    /// Mount point of the macOS RAM disk
    pub fn ramdisk_path(&self) -> PathBuf {
        PathBuf::from("/Volumes").join(&self.ramdisk_label)
    }
}
