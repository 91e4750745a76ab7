//! The frozen settings/options snapshot for one build invocation.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::options::ResolvedOptions;
use crate::core::settings::Settings;

/// The resolved, read-only input to every lifecycle phase.
///
/// Owned exclusively by one build invocation; two invocations with
/// different snapshots never share on-disk state because the layout
/// directory is keyed by [`Snapshot::short_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub settings: Settings,
    pub options: ResolvedOptions,
}

impl Snapshot {
    pub fn new(settings: Settings, options: ResolvedOptions) -> Self {
        Snapshot { settings, options }
    }

    /// A short, stable hash of the snapshot contents.
    ///
    /// Used to key the per-invocation build directory so matrix builds
    /// with different settings/options get distinct layouts.
    pub fn short_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_string().as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..6])
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "settings[{}] options[", self.settings)?;
        let mut first = true;
        for (name, value) in self.options.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        write!(f, "]")
    }
}
