//! Slipway.toml recipe parsing and schema.
//!
//! A recipe is a declarative description of how to configure, build, and
//! package one CMake library. The recipe never reads the library's
//! sources; it only declares where they live and what the produced
//! package looks like.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use semver::Version;
use serde::Deserialize;

use crate::core::options::OptionSet;
use crate::util::fs::read_to_string;

/// The recipe manifest file name.
pub const MANIFEST_FILE: &str = "Slipway.toml";

/// The fixed set of relative paths a recipe's source tree must provide.
///
/// The engine only checks that these exist; it never reads their contents.
/// The external toolchain consumes them.
pub const SOURCE_TREE_CONTRACT: &[&str] =
    &["CMakeLists.txt", "src", "include", "test", "config.h.in"];

/// Raw `[recipe]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeMetadata {
    /// Package name; also the default library and CMake names.
    pub name: String,

    /// Package version.
    pub version: Version,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub topics: Vec<String>,
}

/// Raw `[exports]` section: what the recipe ships and packages.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportsConfig {
    /// Source globs exported alongside the recipe.
    #[serde(default = "default_export_sources")]
    pub sources: Vec<String>,

    /// Header globs, matched under `include/`, copied into the package's
    /// include tree during the package phase.
    #[serde(default = "default_export_headers")]
    pub headers: Vec<String>,
}

fn default_export_sources() -> Vec<String> {
    SOURCE_TREE_CONTRACT
        .iter()
        .map(|p| match *p {
            "src" | "include" | "test" => format!("{}/*", p),
            other => other.to_string(),
        })
        .collect()
}

fn default_export_headers() -> Vec<String> {
    vec!["**/*.h".to_string()]
}

impl Default for ExportsConfig {
    fn default() -> Self {
        ExportsConfig {
            sources: default_export_sources(),
            headers: default_export_headers(),
        }
    }
}

/// Raw `[package]` section: what downstream consumers resolve against.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageConfig {
    /// Library names consumers link. Defaults to `[name]`.
    #[serde(default)]
    pub libs: Option<Vec<String>>,

    /// Include directories, relative to the package root.
    /// Defaults to `["include"]`.
    #[serde(default)]
    pub includedirs: Option<Vec<String>>,

    /// Canonical CMake config-file name. Defaults to `name`.
    #[serde(default)]
    pub cmake_file_name: Option<String>,

    /// Canonical CMake target name. Defaults to `name::name`.
    #[serde(default)]
    pub cmake_target_name: Option<String>,
}

/// The raw deserialized manifest.
#[derive(Debug, Clone, Deserialize)]
struct RecipeManifest {
    recipe: RecipeMetadata,

    /// Default-option overrides, keyed by option name.
    #[serde(default)]
    options: BTreeMap<String, bool>,

    #[serde(default)]
    exports: ExportsConfig,

    #[serde(default)]
    package: PackageConfig,
}

/// A loaded, validated recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    /// Directory containing the manifest; the source tree contract is
    /// checked relative to this.
    pub dir: PathBuf,

    pub metadata: RecipeMetadata,
    pub exports: ExportsConfig,

    option_overrides: BTreeMap<String, bool>,
    package: PackageConfig,
}

impl Recipe {
    /// Load the recipe manifest from a directory.
    pub fn load(dir: &Path) -> Result<Recipe> {
        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            bail!(
                "no `{}` found in `{}`\n\
                 \n\
                 Run `slipway new` to scaffold a recipe.",
                MANIFEST_FILE,
                dir.display()
            );
        }

        let contents = read_to_string(&manifest_path)?;
        let manifest: RecipeManifest = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

        if manifest.recipe.name.is_empty() {
            bail!("recipe name must not be empty");
        }

        Ok(Recipe {
            dir: dir.to_path_buf(),
            metadata: manifest.recipe,
            exports: manifest.exports,
            option_overrides: manifest.options,
            package: manifest.package,
        })
    }

    /// Check the source tree contract: every required path must exist
    /// relative to the recipe directory. Existence only; contents are the
    /// toolchain's business.
    pub fn check_source_tree(&self) -> Result<()> {
        let missing: Vec<&str> = SOURCE_TREE_CONTRACT
            .iter()
            .copied()
            .filter(|path| !self.dir.join(path).exists())
            .collect();

        if !missing.is_empty() {
            bail!(
                "recipe `{}` is missing required source paths: {}",
                self.metadata.name,
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// The declared option set: library defaults with the manifest's
    /// `[options]` overrides applied.
    pub fn options(&self) -> Result<OptionSet> {
        let mut options = OptionSet::library_defaults();
        for (name, value) in &self.option_overrides {
            options
                .set(name, *value)
                .with_context(|| format!("invalid [options] override in {}", MANIFEST_FILE))?;
        }
        Ok(options)
    }

    /// Library names downstream consumers link against.
    pub fn libs(&self) -> Vec<String> {
        self.package
            .libs
            .clone()
            .unwrap_or_else(|| vec![self.metadata.name.clone()])
    }

    /// Include directories, relative to the package root.
    pub fn includedirs(&self) -> Vec<String> {
        self.package
            .includedirs
            .clone()
            .unwrap_or_else(|| vec!["include".to_string()])
    }

    /// Canonical CMake config-file name.
    pub fn cmake_file_name(&self) -> String {
        self.package
            .cmake_file_name
            .clone()
            .unwrap_or_else(|| self.metadata.name.clone())
    }

    /// Canonical CMake target name.
    pub fn cmake_target_name(&self) -> String {
        self.package.cmake_target_name.clone().unwrap_or_else(|| {
            format!("{name}::{name}", name = self.metadata.name)
        })
    }
}

/// Generate a manifest for a freshly scaffolded library recipe.
pub fn generate_manifest(name: &str) -> String {
    format!(
        r#"[recipe]
name = "{name}"
version = "1.0.0"
description = "The {name} library"

[options]
shared = false
fPIC = true

[exports]
headers = ["**/*.h"]

[package]
libs = ["{name}"]
includedirs = ["include"]
cmake-file-name = "{name}"
cmake-target-name = "{name}::{name}"
"#
    )
}
