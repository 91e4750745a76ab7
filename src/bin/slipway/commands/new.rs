//! `slipway new` command

use anyhow::Result;

use slipway::ops::slipway_new::{new_recipe, NewOptions};

use crate::cli::NewArgs;

pub fn execute(args: NewArgs) -> Result<()> {
    let path = args
        .path
        .unwrap_or_else(|| std::path::PathBuf::from(&args.name));

    new_recipe(&path, &NewOptions { name: args.name })?;

    eprintln!("     Created recipe in {}", path.display());
    Ok(())
}
