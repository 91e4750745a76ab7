//! `slipway clean` command

use anyhow::Result;
use walkdir::WalkDir;

use slipway::core::recipe::Recipe;
use slipway::lifecycle::layout::BUILD_ROOT;
use slipway::util::fs::remove_dir_all_if_exists;

use crate::cli::CleanArgs;
use crate::commands::recipe_dir;

pub fn execute(args: CleanArgs) -> Result<()> {
    let dir = recipe_dir(args.path)?;

    // Refuse to clean a directory that is not a recipe.
    let _recipe = Recipe::load(&dir)?;

    let build_root = dir.join(BUILD_ROOT);
    if !build_root.exists() {
        eprintln!("     Nothing to clean");
        return Ok(());
    }

    // Report each invocation root before removing the tree.
    for entry in WalkDir::new(&build_root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
    {
        eprintln!("     Removed {}", entry.path().display());
    }

    remove_dir_all_if_exists(&build_root)?;
    Ok(())
}
