//! CMake implementation of the toolchain interface.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::core::options::{FPIC, SHARED};
use crate::core::snapshot::Snapshot;
use crate::lifecycle::layout::Layout;
use crate::toolchain::Toolchain;
use crate::util::fs::write_string;
use crate::util::process::{find_cmake, ProcessBuilder};

/// Drives `cmake` for the generate, build, and install phases.
pub struct CMakeToolchain {
    cmake: PathBuf,
}

impl CMakeToolchain {
    /// Create a CMake toolchain, checking that `cmake` is on PATH.
    pub fn new() -> Result<Self> {
        let Some(cmake) = find_cmake() else {
            bail!(
                "CMake not found\n\
                 \n\
                 CMake is required to build and package recipes.\n\
                 Install CMake and ensure it's in your PATH."
            );
        };
        Ok(CMakeToolchain { cmake })
    }

    /// Render the toolchain file contents from the resolved snapshot.
    ///
    /// Only resolved options are emitted: a removed `fPIC` produces no
    /// `CMAKE_POSITION_INDEPENDENT_CODE` line at all.
    fn toolchain_contents(snapshot: &Snapshot) -> String {
        let mut lines = vec![
            "# Generated by slipway. Do not edit.".to_string(),
            format!(
                "set(CMAKE_BUILD_TYPE \"{}\" CACHE STRING \"\" FORCE)",
                snapshot.settings.build_type_or_default()
            ),
        ];

        if let Some(shared) = snapshot.options.get(SHARED) {
            lines.push(format!(
                "set(BUILD_SHARED_LIBS {} CACHE BOOL \"\" FORCE)",
                if shared { "ON" } else { "OFF" }
            ));
        }
        if let Some(fpic) = snapshot.options.get(FPIC) {
            lines.push(format!(
                "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"\" FORCE)",
                if fpic { "ON" } else { "OFF" }
            ));
        }

        lines.join("\n") + "\n"
    }

    /// Render the dependency manifest. The engine models no cross-package
    /// dependencies, so this declares only the package search prefix.
    fn deps_contents(layout: &Layout) -> String {
        format!(
            "# Generated by slipway. Do not edit.\n\
             list(PREPEND CMAKE_PREFIX_PATH \"{}\")\n",
            layout.package_dir.display()
        )
    }
}

impl Toolchain for CMakeToolchain {
    fn generate(&self, snapshot: &Snapshot, layout: &Layout) -> Result<()> {
        tracing::info!("generating toolchain files");

        write_string(&layout.deps_file(), &Self::deps_contents(layout))?;
        write_string(
            &layout.toolchain_file(),
            &Self::toolchain_contents(snapshot),
        )?;
        Ok(())
    }

    fn build(&self, layout: &Layout) -> Result<()> {
        tracing::info!("configuring CMake project");

        ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(&layout.source_dir)
            .arg("-B")
            .arg(layout.build_dir())
            .arg(format!(
                "-DCMAKE_TOOLCHAIN_FILE={}",
                layout.toolchain_file().display()
            ))
            .exec_and_check()?;

        tracing::info!("building CMake project");

        ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(layout.build_dir())
            .arg("--parallel")
            .exec_and_check()?;

        Ok(())
    }

    fn install(&self, layout: &Layout) -> Result<()> {
        tracing::info!("installing into package directory");

        ProcessBuilder::new(&self.cmake)
            .arg("--install")
            .arg(layout.build_dir())
            .arg("--prefix")
            .arg(&layout.package_dir)
            .exec_and_check()?;

        Ok(())
    }
}
