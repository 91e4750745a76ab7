//! Implementation of `slipway build`: one full recipe invocation.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::descriptor::PackageDescriptor;
use crate::core::options::{FPIC, SHARED};
use crate::core::recipe::Recipe;
use crate::core::settings::Settings;
use crate::core::snapshot::Snapshot;
use crate::lifecycle::orchestrator::Lifecycle;
use crate::policy;
use crate::toolchain::Toolchain;

/// Per-invocation inputs from the surrounding tool: the settings matrix
/// and any option overrides.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub settings: Settings,
    pub shared: Option<bool>,
    pub fpic: Option<bool>,
}

/// Prepare the resolved snapshot for an invocation: recipe defaults,
/// then overrides, then policy resolution.
pub fn prepare_snapshot(recipe: &Recipe, opts: &BuildOptions) -> Result<Snapshot> {
    let mut options = recipe.options()?;
    if let Some(shared) = opts.shared {
        options.set(SHARED, shared)?;
    }
    if let Some(fpic) = opts.fpic {
        options.set(FPIC, fpic)?;
    }

    let resolved = policy::resolve(&opts.settings, options);
    let snapshot = Snapshot::new(opts.settings.clone(), resolved);
    tracing::debug!(%snapshot, "resolved snapshot");
    Ok(snapshot)
}

/// Run the full lifecycle for the recipe at `dir` and export the package
/// descriptor into the package directory.
pub fn execute<T: Toolchain>(
    dir: &Path,
    opts: &BuildOptions,
    toolchain: &T,
) -> Result<PackageDescriptor> {
    let recipe = Recipe::load(dir)?;
    recipe.check_source_tree()?;

    let snapshot = prepare_snapshot(&recipe, opts)?;
    tracing::info!(
        recipe = %recipe.metadata.name,
        version = %recipe.metadata.version,
        %snapshot,
        "starting build invocation"
    );

    let mut lifecycle = Lifecycle::new(&recipe, &snapshot, toolchain);
    lifecycle.run()?;

    // The descriptor is computed from declarations and the snapshot, not
    // from build output; it is exported only once PACKAGED is reached.
    let descriptor = PackageDescriptor::export(&recipe, &snapshot);
    descriptor
        .write_to(&lifecycle.layout().package_dir)
        .context("failed to persist package descriptor")?;

    tracing::info!(
        package = %lifecycle.layout().package_dir.display(),
        "build invocation complete"
    );
    Ok(descriptor)
}
