//! vaultenv - Vault secrets as sourceable env files
//!
//! Fetches a secret from Vault's KV v2 engine, writes it as `KEY="VALUE"`
//! lines into memory-backed storage and reuses that file on later calls.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod materializer;
pub mod mount;
pub mod vault;

pub use error::{VaultenvError, VaultenvResult};
pub use materializer::{CacheOutcome, Materialized, Materializer};
