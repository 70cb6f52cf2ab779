//! Cache file naming
//!
//! A cache entry's name is its validity key: the SHA256 digest of the secret
//! reference, base64url encoded, optionally prefixed with the secret version.
//! Same reference and version = same name.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use sha2::{Digest, Sha256};

/// Separator between the version prefix and the digest
pub const VERSION_SEPARATOR: &str = "__-__";

/// Hash a secret reference into a filesystem-safe, single-segment name
fn digest_name(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    URL_SAFE.encode(hasher.finalize())
}

/// Derive the cache file name for `key`, prefixed with `version` when known
pub fn derive_file_name(key: &str, version: Option<u64>) -> String {
    let digest = digest_name(key);
    match version {
        Some(version) => format!("{}{}{}", version, VERSION_SEPARATOR, digest),
        None => digest,
    }
}
