//! Secret materialization
//!
//! Sequences mount resolution, naming, the existence check and, on a miss,
//! fetch and write. There are no retries: any error aborts the run.

use crate::cache::{derive_file_name, entry_exists, write_entry};
use crate::error::VaultenvResult;
use crate::mount::MemoryMount;
use crate::vault::{SecretReference, SecretStore};
use std::path::PathBuf;
use tracing::{debug, info};

/// Whether the entry was already present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Entry existed; nothing was fetched
    Hit,
    /// Entry was fetched and written
    Miss,
}

/// Result of a successful materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    /// Full path of the env file
    pub path: PathBuf,
    pub outcome: CacheOutcome,
    /// Secret version encoded in the name, when versioned
    pub version: Option<u64>,
}

/// Materializes secrets from a store into a memory mount
pub struct Materializer<'a> {
    store: &'a dyn SecretStore,
    mount: &'a dyn MemoryMount,
    versioned: bool,
}

impl<'a> Materializer<'a> {
    pub fn new(store: &'a dyn SecretStore, mount: &'a dyn MemoryMount, versioned: bool) -> Self {
        Self {
            store,
            mount,
            versioned,
        }
    }

    /// Ensure `reference` is materialized and return where it lives
    pub async fn materialize(&self, reference: &SecretReference) -> VaultenvResult<Materialized> {
        let dir = self.mount.resolve().await?;
        debug!("Using {} at {}", self.mount.mount_name(), dir.display());

        let version = if self.versioned {
            Some(self.store.fetch_version(reference).await?)
        } else {
            None
        };

        // Keyed on the full `<mount>/<path>` reference so the same path under
        // two mounts never shares an entry
        let name = derive_file_name(&reference.to_string(), version);
        let path = dir.join(&name);

        if entry_exists(&dir, &name).await? {
            debug!("Cache hit for {}", reference);
            return Ok(Materialized {
                path,
                outcome: CacheOutcome::Hit,
                version,
            });
        }

        info!("Cache miss for {}", reference);
        // Pinned to the version in the name; a write landing after the
        // metadata read must not end up under the older name
        let payload = self.store.fetch_secret(reference, version).await?;
        write_entry(&payload, &path).await?;

        Ok(Materialized {
            path,
            outcome: CacheOutcome::Miss,
            version,
        })
    }
}
