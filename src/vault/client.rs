//! Vault HTTP client for the KV v2 engine

use crate::config::schema::VaultConfig;
use crate::error::{VaultenvError, VaultenvResult};
use crate::vault::{payload_from_json, SecretPayload, SecretReference, SecretStore, VaultToken};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info};
use ureq::Agent;
use url::Url;

/// Vault client bound to one address and token
#[derive(Clone)]
pub struct VaultClient {
    agent: Agent,
    address: String,
    namespace: Option<String>,
    token: VaultToken,
}

#[derive(Deserialize)]
struct MetadataResponse {
    data: MetadataData,
}

#[derive(Deserialize)]
struct MetadataData {
    current_version: u64,
}

#[derive(Deserialize)]
struct SecretResponse {
    data: SecretData,
}

#[derive(Deserialize)]
struct SecretData {
    #[serde(default)]
    data: Option<Map<String, Value>>,
}

impl VaultClient {
    /// Create a client; `token` must already be loaded.
    ///
    /// A `timeout_secs` of 0 disables the request timeout.
    pub fn new(config: &VaultConfig, token: VaultToken) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            address: config.address.trim_end_matches('/').to_string(),
            namespace: config.namespace.clone(),
            token,
        }
    }

    /// `<address>/v1/<mount>/<endpoint>/<path>[?version=<v>]`.
    ///
    /// Each `/`-separated segment of the mount and path is percent-encoded,
    /// so `#`, `?` and spaces stay part of the secret path.
    fn url(
        &self,
        reference: &SecretReference,
        endpoint: &str,
        version: Option<u64>,
    ) -> VaultenvResult<String> {
        let mut url = Url::parse(&self.address).map_err(|e| VaultenvError::VaultRequest {
            url: self.address.clone(),
            reason: e.to_string(),
        })?;

        url.path_segments_mut()
            .map_err(|()| VaultenvError::VaultRequest {
                url: self.address.clone(),
                reason: "address cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push("v1")
            .extend(reference.mount.split('/'))
            .push(endpoint)
            .extend(reference.path.split('/'));

        if let Some(version) = version {
            url.query_pairs_mut()
                .append_pair("version", &version.to_string());
        }

        Ok(url.into())
    }

    /// GET a KV v2 endpoint and decode the JSON body.
    ///
    /// `ureq` is blocking, so the call runs on the blocking pool.
    async fn get_json<T>(
        &self,
        reference: &SecretReference,
        endpoint: &str,
        version: Option<u64>,
    ) -> VaultenvResult<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = self.url(reference, endpoint, version)?;
        debug!("GET {}", url);

        let client = self.clone();
        let reference = reference.clone();
        tokio::task::spawn_blocking(move || client.get_json_blocking(&url, &reference))
            .await
            .map_err(|e| VaultenvError::Internal(format!("vault request task failed: {}", e)))?
    }

    fn get_json_blocking<T: DeserializeOwned>(
        &self,
        url: &str,
        reference: &SecretReference,
    ) -> VaultenvResult<T> {
        let mut request = self
            .agent
            .get(url)
            .header("X-Vault-Token", self.token.as_str())
            .header("X-Vault-Request", "true");
        if let Some(namespace) = &self.namespace {
            request = request.header("X-Vault-Namespace", namespace.as_str());
        }

        let mut response = request.call().map_err(|e| VaultenvError::VaultRequest {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        match response.status().as_u16() {
            200..=299 => {}
            404 => {
                return Err(VaultenvError::SecretNotFound {
                    mount: reference.mount.clone(),
                    path: reference.path.clone(),
                })
            }
            403 => {
                return Err(VaultenvError::PermissionDenied {
                    mount: reference.mount.clone(),
                    path: reference.path.clone(),
                })
            }
            status => {
                return Err(VaultenvError::VaultStatus {
                    status,
                    url: url.to_string(),
                })
            }
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| VaultenvError::VaultResponse {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|e| VaultenvError::VaultResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn fetch_version(&self, reference: &SecretReference) -> VaultenvResult<u64> {
        let metadata: MetadataResponse = self.get_json(reference, "metadata", None).await?;
        debug!(
            "{} is at version {}",
            reference, metadata.data.current_version
        );
        Ok(metadata.data.current_version)
    }

    async fn fetch_secret(
        &self,
        reference: &SecretReference,
        version: Option<u64>,
    ) -> VaultenvResult<SecretPayload> {
        match version {
            Some(version) => info!("Fetching secret {} at version {}", reference, version),
            None => info!("Fetching secret {}", reference),
        }
        let secret: SecretResponse = self.get_json(reference, "data", version).await?;

        // A soft-deleted version comes back with `data: null`
        let data = secret.data.data.ok_or_else(|| VaultenvError::SecretNotFound {
            mount: reference.mount.clone(),
            path: reference.path.clone(),
        })?;

        payload_from_json(data)
    }
}
