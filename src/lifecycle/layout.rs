//! The on-disk layout contract for one build invocation.
//!
//! Everything an invocation writes lives under a root keyed by the
//! snapshot hash, so independent matrix invocations (different
//! settings/options combinations) never share mutable on-disk state.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::snapshot::Snapshot;
use crate::util::fs::ensure_dir;

/// Directory under the recipe dir that holds all invocation roots.
pub const BUILD_ROOT: &str = "build";

/// Resolved directory layout for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// The recipe's source directory (read-only input).
    pub source_dir: PathBuf,

    /// Per-invocation root: `<source>/build/<build_type>-<hash>`.
    pub root: PathBuf,

    /// Where generated toolchain-description artifacts go.
    pub generators_dir: PathBuf,

    /// Where the package phase assembles the consumable package.
    pub package_dir: PathBuf,
}

impl Layout {
    /// Compute the layout for a snapshot. Pure path computation; nothing
    /// touches the filesystem until [`Layout::create`].
    pub fn resolve(source_dir: &Path, snapshot: &Snapshot) -> Layout {
        let root = source_dir.join(BUILD_ROOT).join(format!(
            "{}-{}",
            snapshot.settings.build_type_or_default().to_lowercase(),
            snapshot.short_hash()
        ));
        Layout {
            source_dir: source_dir.to_path_buf(),
            generators_dir: root.join("generators"),
            package_dir: root.join("package"),
            root,
        }
    }

    /// Create the layout directories.
    pub fn create(&self) -> Result<()> {
        ensure_dir(&self.root)?;
        ensure_dir(&self.generators_dir)?;
        ensure_dir(&self.package_dir)?;
        Ok(())
    }

    /// The CMake binary dir for configure and build.
    pub fn build_dir(&self) -> &Path {
        &self.root
    }

    /// The generated toolchain file consumed by the external build tool.
    pub fn toolchain_file(&self) -> PathBuf {
        self.generators_dir.join("slipway_toolchain.cmake")
    }

    /// The generated dependency manifest.
    pub fn deps_file(&self) -> PathBuf {
        self.generators_dir.join("slipway_deps.cmake")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::OptionSet;
    use crate::core::settings::Settings;
    use crate::policy;
    use tempfile::TempDir;

    fn snapshot(build_type: &str, os: &str) -> Snapshot {
        let settings = Settings {
            os: Some(os.to_string()),
            build_type: Some(build_type.to_string()),
            ..Default::default()
        };
        let options = policy::resolve(&settings, OptionSet::library_defaults());
        Snapshot::new(settings, options)
    }

    #[test]
    fn test_resolve_is_pure_and_stable() {
        let tmp = TempDir::new().unwrap();
        let snap = snapshot("Release", "Linux");

        let a = Layout::resolve(tmp.path(), &snap);
        let b = Layout::resolve(tmp.path(), &snap);
        assert_eq!(a, b);
        assert!(!a.root.exists());
    }

    #[test]
    fn test_distinct_snapshots_get_distinct_roots() {
        let tmp = TempDir::new().unwrap();

        let release = Layout::resolve(tmp.path(), &snapshot("Release", "Linux"));
        let debug = Layout::resolve(tmp.path(), &snapshot("Debug", "Linux"));
        let windows = Layout::resolve(tmp.path(), &snapshot("Release", "Windows"));

        assert_ne!(release.root, debug.root);
        assert_ne!(release.root, windows.root);
    }

    #[test]
    fn test_create_establishes_directories() {
        let tmp = TempDir::new().unwrap();
        let layout = Layout::resolve(tmp.path(), &snapshot("Release", "Linux"));

        layout.create().unwrap();
        assert!(layout.root.is_dir());
        assert!(layout.generators_dir.is_dir());
        assert!(layout.package_dir.is_dir());

        // Creating again is harmless.
        layout.create().unwrap();
    }
}
