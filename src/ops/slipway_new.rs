//! Implementation of `slipway new`: scaffold a recipe and its source tree.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::core::recipe::{generate_manifest, MANIFEST_FILE};

/// Options for creating a new recipe.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Recipe (and library) name.
    pub name: String,
}

/// Create a new recipe directory satisfying the source tree contract:
/// `Slipway.toml`, `CMakeLists.txt`, `config.h.in`, `src/`, `include/`,
/// and `test/`.
pub fn new_recipe(path: &Path, opts: &NewOptions) -> Result<()> {
    if path.exists() {
        bail!("destination `{}` already exists", path.display());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))?;

    let name = &opts.name;
    let guard = name.to_uppercase().replace('-', "_");

    fs::write(path.join(MANIFEST_FILE), generate_manifest(name))
        .with_context(|| format!("failed to write {}", MANIFEST_FILE))?;

    let cmake = format!(
        r#"cmake_minimum_required(VERSION 3.15)
project({name} VERSION 1.0.0 LANGUAGES C)

configure_file(config.h.in config.h)

add_library({name} src/{name}.c)
target_include_directories({name} PUBLIC include PRIVATE ${{CMAKE_CURRENT_BINARY_DIR}})

install(TARGETS {name})

enable_testing()
add_executable(test_{name} test/test_{name}.c)
target_link_libraries(test_{name} PRIVATE {name})
add_test(NAME test_{name} COMMAND test_{name})
"#
    );
    fs::write(path.join("CMakeLists.txt"), cmake)
        .context("failed to write CMakeLists.txt")?;

    fs::write(
        path.join("config.h.in"),
        format!(
            r#"#ifndef {guard}_CONFIG_H
#define {guard}_CONFIG_H

#define {guard}_VERSION "@PROJECT_VERSION@"

#endif /* {guard}_CONFIG_H */
"#
        ),
    )
    .context("failed to write config.h.in")?;

    let include_dir = path.join("include");
    fs::create_dir_all(&include_dir).context("failed to create include directory")?;
    fs::write(
        include_dir.join(format!("{}.h", name)),
        format!(
            r#"#ifndef {guard}_H
#define {guard}_H

/**
 * Initialize the {name} library.
 */
int {name}_init(void);

#endif /* {guard}_H */
"#
        ),
    )?;

    let src_dir = path.join("src");
    fs::create_dir_all(&src_dir).context("failed to create src directory")?;
    fs::write(
        src_dir.join(format!("{}.c", name)),
        format!(
            r#"#include "{name}.h"

int {name}_init(void) {{
    return 0;
}}
"#
        ),
    )?;

    let test_dir = path.join("test");
    fs::create_dir_all(&test_dir).context("failed to create test directory")?;
    fs::write(
        test_dir.join(format!("test_{}.c", name)),
        format!(
            r#"#include "{name}.h"

int main(void) {{
    return {name}_init();
}}
"#
        ),
    )?;

    Ok(())
}
