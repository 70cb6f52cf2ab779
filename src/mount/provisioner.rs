//! Memory mount abstraction
//!
//! One implementation per OS family:
//! - Linux: the kernel-provided tmpfs at /dev/shm
//! - macOS: a RAM disk created on first use

use crate::error::VaultenvResult;
use async_trait::async_trait;
use std::path::PathBuf;

/// A directory whose contents live only in memory
#[async_trait]
pub trait MemoryMount: Send + Sync {
    /// Return the mount directory, provisioning it first if needed
    async fn resolve(&self) -> VaultenvResult<PathBuf>;

    /// Get the human-readable mount kind for display
    fn mount_name(&self) -> &'static str;
}
