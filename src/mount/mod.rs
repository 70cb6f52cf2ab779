//! Memory-backed mounts
//!
//! Provides a platform-agnostic place to materialize secrets:
//! - macOS: RAM disk at /Volumes/<label>, created on first use
//! - Linux: tmpfs at /dev/shm

mod factory;
mod provisioner;
pub mod ramdisk;
pub mod runner;
mod shm;
#[cfg(test)]
pub(crate) mod testing;

pub use factory::{create_mount, create_mount_for, Platform};
pub use provisioner::MemoryMount;
pub use ramdisk::RamDiskMount;
pub use runner::{CommandRunner, SystemCommandRunner};
pub use shm::SharedMemoryMount;
