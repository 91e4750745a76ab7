//! The exported package descriptor.
//!
//! The descriptor is computed purely from the recipe's declarations and
//! the resolved snapshot, never by inspecting build output. A consumer can
//! therefore resolve against it without binaries present, and repeated
//! exports of the same snapshot are byte-identical.

use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::recipe::Recipe;
use crate::core::snapshot::Snapshot;
use crate::util::fs::write_string;

/// File name the descriptor is persisted under inside the package dir.
pub const DESCRIPTOR_FILE: &str = "descriptor.json";

/// The consumable metadata record for a packaged library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Library names, in link order.
    pub library_names: Vec<String>,

    /// Include directories, relative to the package root.
    pub include_dirs: Vec<String>,

    /// Canonical CMake config-file name.
    pub cmake_file_name: String,

    /// Canonical CMake target name.
    pub cmake_target_name: String,

    /// The resolved snapshot the descriptor was computed from.
    pub snapshot: Snapshot,
}

impl PackageDescriptor {
    /// Compute the descriptor from recipe declarations and the resolved
    /// snapshot.
    pub fn export(recipe: &Recipe, snapshot: &Snapshot) -> PackageDescriptor {
        PackageDescriptor {
            library_names: recipe.libs(),
            include_dirs: recipe.includedirs(),
            cmake_file_name: recipe.cmake_file_name(),
            cmake_target_name: recipe.cmake_target_name(),
            snapshot: snapshot.clone(),
        }
    }

    /// Render the descriptor as pretty JSON. Field order is fixed by the
    /// struct, so the rendering is stable across invocations.
    pub fn to_json(&self) -> String {
        let mut json = serde_json::to_string_pretty(self)
            .expect("descriptor serialization cannot fail");
        json.push('\n');
        json
    }

    /// Persist the descriptor into the package directory.
    pub fn write_to(&self, package_dir: &Path) -> Result<()> {
        write_string(&package_dir.join(DESCRIPTOR_FILE), &self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::OptionSet;
    use crate::core::settings::Settings;
    use crate::policy;
    use crate::test_support::fixtures::recipe_dir;

    fn snapshot(os: &str) -> Snapshot {
        let settings = Settings {
            os: Some(os.to_string()),
            arch: Some("x86_64".to_string()),
            ..Default::default()
        };
        let options = policy::resolve(&settings, OptionSet::library_defaults());
        Snapshot::new(settings, options)
    }

    #[test]
    fn test_export_uses_declarations_only() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();

        let descriptor = PackageDescriptor::export(&recipe, &snapshot("Linux"));
        assert_eq!(descriptor.library_names, vec!["armv4vm"]);
        assert_eq!(descriptor.include_dirs, vec!["include"]);
        assert_eq!(descriptor.cmake_file_name, "armv4vm");
        assert_eq!(descriptor.cmake_target_name, "armv4vm::armv4vm");
    }

    #[test]
    fn test_export_is_reproducible() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let snap = snapshot("Linux");

        let first = PackageDescriptor::export(&recipe, &snap);
        let second = PackageDescriptor::export(&recipe, &snap);
        assert_eq!(first, second);
        assert_eq!(first.to_json(), second.to_json());
    }

    #[test]
    fn test_write_to_persists_json() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let descriptor = PackageDescriptor::export(&recipe, &snapshot("Linux"));

        let out = tempfile::TempDir::new().unwrap();
        descriptor.write_to(out.path()).unwrap();

        let written = std::fs::read_to_string(out.path().join(DESCRIPTOR_FILE)).unwrap();
        let parsed: PackageDescriptor = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, descriptor);
    }
}
