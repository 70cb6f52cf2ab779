//! In-memory secret cache
//!
//! Secrets are materialized as env files inside a memory-backed mount.
//! Entries are keyed by name alone: an entry existing under a derived name
//! means its content is valid for the reference (and version) encoded in
//! that name.
//!
//! Entries are never evicted or mutated in place; they disappear with the
//! backing tmpfs / RAM disk.

pub mod entry;
pub mod filename;

pub use entry::{entry_exists, render_entry, write_entry};
pub use filename::{derive_file_name, VERSION_SEPARATOR};
