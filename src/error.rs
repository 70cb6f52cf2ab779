//! Error types for vaultenv
//!
//! All modules use `VaultenvResult<T>` as their return type.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vaultenv operations
pub type VaultenvResult<T> = Result<T, VaultenvError>;

/// Broad failure category, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Auth,
    Fetch,
    Provisioning,
    Probe,
    Write,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Config => "config",
            Self::Auth => "auth",
            Self::Fetch => "fetch",
            Self::Provisioning => "provisioning",
            Self::Probe => "probe",
            Self::Write => "write",
        };
        write!(f, "{}", name)
    }
}

/// All errors that can occur in vaultenv
#[derive(Error, Debug)]
pub enum VaultenvError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Invalid secret reference {reference:?}: expected <mount>/<path>")]
    InvalidReference { reference: String },

    #[error("Could not determine home directory")]
    HomeNotFound,

    // Authentication errors
    #[error("Unable to read Vault token from {path}: {source}")]
    TokenUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Vault token file {0} is empty")]
    TokenEmpty(PathBuf),

    // Secret fetch errors
    #[error("Secret not found: {mount}/{path}")]
    SecretNotFound { mount: String, path: String },

    #[error("Permission denied reading {mount}/{path}")]
    PermissionDenied { mount: String, path: String },

    #[error("Vault returned HTTP {status} for {url}")]
    VaultStatus { status: u16, url: String },

    #[error("Vault request to {url} failed: {reason}")]
    VaultRequest { url: String, reason: String },

    #[error("Unexpected Vault response from {url}: {reason}")]
    VaultResponse { url: String, reason: String },

    #[error("Secret field {key} is not a scalar value")]
    NonStringValue { key: String },

    // Provisioning errors
    #[error("Unsupported platform: {0}. vaultenv supports macOS and Linux.")]
    UnsupportedPlatform(String),

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    #[error("Unable to check memory mount {path}: {source}")]
    MountProbe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("RAM disk provisioned but {0} is not mounted")]
    RamDiskNotMounted(PathBuf),

    // Cache errors
    #[error("Unable to check cache entry {path}: {source}")]
    CacheProbe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write cache entry {path}: {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VaultenvError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigInvalid { .. }
            | Self::InvalidReference { .. }
            | Self::HomeNotFound
            | Self::Io { .. }
            | Self::Internal(_) => ErrorKind::Config,
            Self::TokenUnreadable { .. } | Self::TokenEmpty(_) => ErrorKind::Auth,
            Self::SecretNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::VaultStatus { .. }
            | Self::VaultRequest { .. }
            | Self::VaultResponse { .. }
            | Self::NonStringValue { .. } => ErrorKind::Fetch,
            Self::UnsupportedPlatform(_)
            | Self::CommandFailed { .. }
            | Self::CommandExecution { .. }
            | Self::MountProbe { .. }
            | Self::RamDiskNotMounted(_) => ErrorKind::Provisioning,
            Self::CacheProbe { .. } => ErrorKind::Probe,
            Self::CacheWrite { .. } => ErrorKind::Write,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::TokenUnreadable { .. } | Self::TokenEmpty(_) => {
                Some("Are you signed in? Run: vault login")
            }
            Self::PermissionDenied { .. } => Some("Check the policies attached to your token"),
            Self::UnsupportedPlatform(_) => Some("Only Linux (/dev/shm) and macOS RAM disks are supported"),
            Self::InvalidReference { .. } => Some("Example: vaultenv kv/app/db"),
            _ => None,
        }
    }
}
