//! Cache entry probing and writing
//!
//! Entries are shell-sourceable `KEY="VALUE"` files. They are written to a
//! temp file next to the target and renamed into place, so a concurrent
//! reader sees either the old entry, no entry, or the complete new one.

use crate::error::{VaultenvError, VaultenvResult};
use crate::vault::SecretPayload;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

/// Check whether `name` is already materialized inside `dir`.
///
/// Only "not found" counts as a miss. Any other metadata failure is returned
/// as [`VaultenvError::CacheProbe`].
pub async fn entry_exists(dir: &Path, name: &str) -> VaultenvResult<bool> {
    let path = dir.join(name);
    match fs::metadata(&path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(VaultenvError::CacheProbe { path, source: e }),
    }
}

/// Render a payload as `KEY="VALUE"` lines.
///
/// Values are not escaped; a value holding `"` or a newline will not
/// source cleanly.
pub fn render_entry(payload: &SecretPayload) -> String {
    let mut out = String::new();
    for (key, value) in payload {
        if value.contains('"') || value.contains('\n') {
            warn!("Value of {} contains a quote or newline and will not source cleanly", key);
        }
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push_str("\"\n");
    }
    out
}

/// Atomically write `payload` to `target`
pub async fn write_entry(payload: &SecretPayload, target: &Path) -> VaultenvResult<()> {
    let temp = temp_path(target)?;
    let contents = render_entry(payload);

    if let Err(e) = write_private(&temp, contents.as_bytes()).await {
        let _ = fs::remove_file(&temp).await;
        return Err(VaultenvError::CacheWrite {
            path: target.to_path_buf(),
            source: e,
        });
    }

    if let Err(e) = fs::rename(&temp, target).await {
        let _ = fs::remove_file(&temp).await;
        return Err(VaultenvError::CacheWrite {
            path: target.to_path_buf(),
            source: e,
        });
    }

    debug!("Wrote {} keys to {}", payload.len(), target.display());
    Ok(())
}

/// Uniquely named sibling of `target`
fn temp_path(target: &Path) -> VaultenvResult<PathBuf> {
    let (Some(dir), Some(name)) = (target.parent(), target.file_name()) else {
        return Err(VaultenvError::Internal(format!(
            "cache target {} has no file name",
            target.display()
        )));
    };

    Ok(dir.join(format!(
        ".{}.{}.tmp",
        name.to_string_lossy(),
        Uuid::new_v4().simple()
    )))
}

/// Create `path` readable by the owner only and fill it
async fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    Ok(())
}
