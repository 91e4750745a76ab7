//! The external toolchain, modeled as a narrow interface.
//!
//! The lifecycle never embeds toolchain-specific logic: it hands the
//! resolved snapshot and the layout to an implementation of [`Toolchain`]
//! and treats the calls as synchronous, opaque operations. This keeps the
//! engine toolchain-agnostic and testable with a fake.

use anyhow::Result;

use crate::core::snapshot::Snapshot;
use crate::lifecycle::layout::Layout;

pub mod cmake;

pub use cmake::CMakeToolchain;

/// One external build tool, driven through three opaque operations.
pub trait Toolchain {
    /// Emit the toolchain-description artifacts (dependency manifest and
    /// toolchain file) into the layout's generators directory.
    fn generate(&self, snapshot: &Snapshot, layout: &Layout) -> Result<()>;

    /// Run the external configure+build step.
    fn build(&self, layout: &Layout) -> Result<()>;

    /// Run the external install step into the layout's package directory.
    fn install(&self, layout: &Layout) -> Result<()>;
}
