//! `slipway info` command
//!
//! Prints the package descriptor computed from the recipe's declarations
//! and the resolved snapshot. No toolchain is invoked: the descriptor is
//! reproducible without binaries present.

use anyhow::Result;

use slipway::core::descriptor::PackageDescriptor;
use slipway::core::recipe::Recipe;
use slipway::ops::slipway_build::prepare_snapshot;

use crate::cli::InfoArgs;
use crate::commands::{build_options, recipe_dir};

pub fn execute(args: InfoArgs) -> Result<()> {
    let dir = recipe_dir(args.path)?;
    let opts = build_options(args.settings, args.options);

    let recipe = Recipe::load(&dir)?;
    let snapshot = prepare_snapshot(&recipe, &opts)?;
    let descriptor = PackageDescriptor::export(&recipe, &snapshot);

    print!("{}", descriptor.to_json());
    Ok(())
}
