//! CLI command implementations

pub mod materialize;

pub use materialize::execute as materialize;
