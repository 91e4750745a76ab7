//! High-level operations behind the CLI commands.

pub mod slipway_build;
pub mod slipway_new;
