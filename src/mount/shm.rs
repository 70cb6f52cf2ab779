//! Linux shared-memory tmpfs

use crate::error::VaultenvResult;
use crate::mount::provisioner::MemoryMount;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// The OS-provided tmpfs, usually /dev/shm. Never created by us.
pub struct SharedMemoryMount {
    path: PathBuf,
}

impl SharedMemoryMount {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl MemoryMount for SharedMemoryMount {
    async fn resolve(&self) -> VaultenvResult<PathBuf> {
        debug!("Using shared memory mount {}", self.path.display());
        Ok(self.path.clone())
    }

    fn mount_name(&self) -> &'static str {
        "tmpfs"
    }
}
