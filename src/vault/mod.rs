//! Vault KV v2 secret store adapter
//!
//! The rest of the crate only sees the [`SecretStore`] trait and flat
//! string payloads; JSON typing stays at this boundary.

mod client;
mod token;

pub use client::VaultClient;
pub use token::VaultToken;

use crate::error::{VaultenvError, VaultenvResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Secret fields, ready for serialization
pub type SecretPayload = BTreeMap<String, String>;

/// A secret addressed as `<mount>/<path>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretReference {
    pub mount: String,
    pub path: String,
}

impl SecretReference {
    /// Parse `<mount>/<path>`, splitting on the first `/`
    pub fn parse(reference: &str) -> VaultenvResult<Self> {
        match reference.split_once('/') {
            Some((mount, path)) if !mount.is_empty() => Ok(Self {
                mount: mount.to_string(),
                path: path.to_string(),
            }),
            _ => Err(VaultenvError::InvalidReference {
                reference: reference.to_string(),
            }),
        }
    }
}

impl fmt::Display for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.mount, self.path)
    }
}

/// Read access to a versioned secret store
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Current version of the secret, from metadata only
    async fn fetch_version(&self, reference: &SecretReference) -> VaultenvResult<u64>;

    /// Payload of the secret at `version`, or the latest when `None`
    async fn fetch_secret(
        &self,
        reference: &SecretReference,
        version: Option<u64>,
    ) -> VaultenvResult<SecretPayload>;
}

/// Flatten a JSON object into string fields.
///
/// Strings are taken as-is, numbers and booleans by their JSON text.
/// Nulls, arrays and objects have no stable env representation and are
/// rejected.
pub fn payload_from_json(data: Map<String, Value>) -> VaultenvResult<SecretPayload> {
    data.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(VaultenvError::NonStringValue { key });
                }
            };
            Ok((key, text))
        })
        .collect()
}
