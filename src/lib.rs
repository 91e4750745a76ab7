//! Slipway - A recipe-driven build and packaging engine for CMake libraries
//!
//! This crate provides the core library functionality for Slipway:
//! resolving build options against platform settings, driving the
//! layout/generate/build/package lifecycle, and exporting a consumable
//! package descriptor.

pub mod core;
pub mod lifecycle;
pub mod ops;
pub mod policy;
pub mod toolchain;
pub mod util;

/// Test utilities and fakes for Slipway unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording fake toolchain and recipe
/// directory fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    descriptor::PackageDescriptor, options::OptionSet, options::ResolvedOptions,
    recipe::Recipe, settings::Settings, snapshot::Snapshot,
};

pub use lifecycle::orchestrator::Lifecycle;
pub use toolchain::Toolchain;
