//! `slipway build` command

use anyhow::Result;

use slipway::ops::slipway_build;
use slipway::toolchain::CMakeToolchain;

use crate::cli::BuildArgs;
use crate::commands::{build_options, recipe_dir};

pub fn execute(args: BuildArgs) -> Result<()> {
    let dir = recipe_dir(args.path)?;
    let opts = build_options(args.settings, args.options);
    let toolchain = CMakeToolchain::new()?;

    let descriptor = slipway_build::execute(&dir, &opts, &toolchain)?;

    eprintln!(
        "    Packaged {} ({})",
        descriptor.library_names.join(", "),
        descriptor.cmake_target_name
    );
    Ok(())
}
