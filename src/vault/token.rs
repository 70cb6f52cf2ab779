//! Vault token loading

use crate::error::{VaultenvError, VaultenvResult};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Bearer token for the Vault API
#[derive(Clone)]
pub struct VaultToken(String);

impl VaultToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token file written by `vault login`: `~/.vault-token`
    pub fn default_path() -> VaultenvResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".vault-token"))
            .ok_or(VaultenvError::HomeNotFound)
    }

    /// Read the token from `path`
    pub async fn load(path: &Path) -> VaultenvResult<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| VaultenvError::TokenUnreadable {
                path: path.to_path_buf(),
                source: e,
            })?;

        // Header values cannot carry the newline some editors leave behind
        let token = content.trim();
        if token.is_empty() {
            return Err(VaultenvError::TokenEmpty(path.to_path_buf()));
        }

        debug!("Loaded Vault token from {}", path.display());
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VaultToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultToken(***)")
    }
}
