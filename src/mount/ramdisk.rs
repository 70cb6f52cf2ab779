//! macOS RAM disk provisioning
//!
//! The RAM disk is created lazily on first use and lives until unmount or
//! reboot. Provisioning is not guarded against two first-time invocations
//! racing each other.

use crate::error::{VaultenvError, VaultenvResult};
use crate::mount::provisioner::MemoryMount;
use crate::mount::runner::{command_line, CommandRunner};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

/// `hdiutil` sizes RAM devices in 512-byte sectors
const SECTORS_PER_MIB: u64 = 2048;

/// RAM disk mounted at `/Volumes/<label>`
pub struct RamDiskMount {
    path: PathBuf,
    label: String,
    size_mib: u32,
    runner: Arc<dyn CommandRunner>,
}

impl RamDiskMount {
    /// Create a RAM disk manager; nothing is provisioned until `resolve`
    pub fn new(path: PathBuf, label: &str, size_mib: u32, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            path,
            label: label.to_string(),
            size_mib,
            runner,
        }
    }

    async fn is_mounted(&self) -> VaultenvResult<bool> {
        fs::try_exists(&self.path)
            .await
            .map_err(|e| VaultenvError::MountProbe {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Allocate the RAM device, returning its device node
    async fn attach(&self) -> VaultenvResult<String> {
        let args = vec![
            "attach".to_string(),
            "-nomount".to_string(),
            format!("ram://{}", u64::from(self.size_mib) * SECTORS_PER_MIB),
        ];
        let stdout = self.runner.run("hdiutil", &args).await?;

        let device = String::from_utf8_lossy(&stdout)
            .split_whitespace()
            .next()
            .map(str::to_string)
            .ok_or_else(|| {
                VaultenvError::command_exec(command_line("hdiutil", &args), "no device returned")
            })?;

        debug!("Attached RAM device {}", device);
        Ok(device)
    }

    /// Format the fresh device with one APFS partition named after the label
    async fn partition(&self, device: &str) -> VaultenvResult<()> {
        let args = vec![
            "partitionDisk".to_string(),
            device.to_string(),
            "1".to_string(),
            "GPTFormat".to_string(),
            "APFS".to_string(),
            self.label.clone(),
            "100%".to_string(),
        ];
        self.runner.run("diskutil", &args).await?;
        Ok(())
    }

    /// Best-effort release of a device we failed to format
    async fn detach(&self, device: &str) {
        let args = vec!["detach".to_string(), device.to_string()];
        if let Err(e) = self.runner.run("hdiutil", &args).await {
            warn!("Failed to detach {}: {}", device, e);
        }
    }
}

#[async_trait]
impl MemoryMount for RamDiskMount {
    async fn resolve(&self) -> VaultenvResult<PathBuf> {
        if self.is_mounted().await? {
            debug!("RAM disk already mounted at {}", self.path.display());
            return Ok(self.path.clone());
        }

        info!(
            "Creating {} MiB RAM disk at {}",
            self.size_mib,
            self.path.display()
        );

        let device = self.attach().await?;
        if let Err(e) = self.partition(&device).await {
            self.detach(&device).await;
            return Err(e);
        }

        if !self.is_mounted().await? {
            return Err(VaultenvError::RamDiskNotMounted(self.path.clone()));
        }

        Ok(self.path.clone())
    }

    fn mount_name(&self) -> &'static str {
        "RAM disk"
    }
}
