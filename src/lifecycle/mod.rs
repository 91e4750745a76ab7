//! The build lifecycle: phases, transitions, and their error taxonomy.
//!
//! One build invocation moves through five phases in strict order:
//!
//! `Unconfigured → LaidOut → Generated → Built → Packaged`
//!
//! A phase is never re-entered, nothing is rolled back on failure, and no
//! failure is retried here: a failed phase leaves the previous phase's
//! artifacts on disk for inspection and halts forward progress.

use std::fmt;

use thiserror::Error;

pub mod layout;
pub mod orchestrator;

/// Lifecycle phase. `Packaged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Unconfigured,
    LaidOut,
    Generated,
    Built,
    Packaged,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Unconfigured => "unconfigured",
            Phase::LaidOut => "laid-out",
            Phase::Generated => "generated",
            Phase::Built => "built",
            Phase::Packaged => "packaged",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure establishing the on-disk layout.
#[derive(Debug, Error)]
#[error("layout phase failed ({snapshot}): {message}")]
pub struct LayoutError {
    /// Rendering of the resolved snapshot, for deterministic reproduction.
    pub snapshot: String,
    pub message: String,
}

/// Failure emitting the toolchain-description artifacts, or an
/// inconsistent snapshot reaching the generate phase.
#[derive(Debug, Error)]
#[error("generate phase failed ({snapshot}): {message}")]
pub struct GenerationError {
    pub snapshot: String,
    pub message: String,
}

/// Failure in the external configure+build step. Surfaced verbatim and
/// never retried: build failures are code defects, not transient.
#[derive(Debug, Error)]
#[error("build phase failed ({snapshot}): {message}")]
pub struct BuildError {
    pub snapshot: String,
    pub message: String,
}

/// Failure packaging the built artifacts. Declared header globs matching
/// zero files is a defect, not a valid empty package.
#[derive(Debug, Error)]
#[error("package phase failed ({snapshot}): {message}")]
pub struct PackageError {
    pub snapshot: String,
    pub message: String,
}

/// Any lifecycle failure; each variant is tied to exactly one transition.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Package(#[from] PackageError),
}

impl LifecycleError {
    /// The phase whose transition failed.
    pub fn phase(&self) -> Phase {
        match self {
            LifecycleError::Layout(_) => Phase::LaidOut,
            LifecycleError::Generation(_) => Phase::Generated,
            LifecycleError::Build(_) => Phase::Built,
            LifecycleError::Package(_) => Phase::Packaged,
        }
    }
}
