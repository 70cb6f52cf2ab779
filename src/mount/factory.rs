//! Mount factory for creating platform-appropriate memory mounts
//!
//! Provides automatic platform detection and mount instantiation.

use crate::config::schema::MountConfig;
use crate::error::{VaultenvError, VaultenvResult};
use crate::mount::provisioner::MemoryMount;
use crate::mount::ramdisk::RamDiskMount;
use crate::mount::runner::{CommandRunner, SystemCommandRunner};
use crate::mount::shm::SharedMemoryMount;
use std::sync::Arc;
use tracing::debug;

/// Detected platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS - RAM disk via hdiutil/diskutil
    MacOS,
    /// Linux - kernel tmpfs
    Linux,
    /// Unsupported platform
    Unsupported,
}

impl Platform {
    /// Detect the current platform
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOS,
            "linux" => Platform::Linux,
            _ => Platform::Unsupported,
        }
    }

    /// Get a human-readable platform name
    pub fn name(&self) -> &'static str {
        match self {
            Platform::MacOS => "macOS",
            Platform::Linux => "Linux",
            Platform::Unsupported => "Unsupported",
        }
    }
}

/// Create a memory mount appropriate for the current platform
pub fn create_mount(config: &MountConfig) -> VaultenvResult<Box<dyn MemoryMount>> {
    create_mount_for(Platform::detect(), config, Arc::new(SystemCommandRunner))
}

/// Create a memory mount for an explicit platform and command runner
pub fn create_mount_for(
    platform: Platform,
    config: &MountConfig,
    runner: Arc<dyn CommandRunner>,
) -> VaultenvResult<Box<dyn MemoryMount>> {
    debug!("Selecting memory mount for {}", platform.name());
    match platform {
        Platform::MacOS => Ok(Box::new(RamDiskMount::new(
            config.ramdisk_path(),
            &config.ramdisk_label,
            config.ramdisk_size_mib,
            runner,
        ))),
        Platform::Linux => Ok(Box::new(SharedMemoryMount::new(config.shm_path.clone()))),
        Platform::Unsupported => Err(VaultenvError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        )),
    }
}
