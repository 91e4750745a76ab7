//! Command implementations.

pub mod build;
pub mod clean;
pub mod completions;
pub mod info;
pub mod new;

use std::path::PathBuf;

use slipway::core::settings::Settings;
use slipway::ops::slipway_build::BuildOptions;

use crate::cli::{OptionArgs, SettingsArgs};

/// Resolve the recipe directory from an optional `--path`.
pub fn recipe_dir(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}

/// Assemble the engine's build inputs from CLI flags, filling unset
/// settings from the host platform. Detection lives here, in the
/// surrounding tool; the engine takes settings purely as input.
pub fn build_options(settings: SettingsArgs, options: OptionArgs) -> BuildOptions {
    let os = settings.os.or_else(|| {
        Some(
            match std::env::consts::OS {
                "linux" => "Linux",
                "windows" => "Windows",
                "macos" => "Macos",
                other => other,
            }
            .to_string(),
        )
    });
    let arch = settings
        .arch
        .or_else(|| Some(std::env::consts::ARCH.to_string()));

    BuildOptions {
        settings: Settings {
            os,
            compiler: settings.compiler,
            build_type: Some(settings.build_type),
            arch,
        },
        shared: options.shared,
        fpic: options.fpic,
    }
}
