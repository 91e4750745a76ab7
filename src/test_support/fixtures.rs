//! Fixture recipe directories and a recording fake toolchain.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use tempfile::TempDir;

use crate::core::recipe::generate_manifest;
use crate::core::snapshot::Snapshot;
use crate::lifecycle::layout::Layout;
use crate::toolchain::Toolchain;

/// Create a recipe directory satisfying the full source tree contract,
/// with one public header under `include/`.
pub fn recipe_dir(name: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    populate_source_tree(tmp.path(), name);
    fs::write(
        tmp.path().join("include").join(format!("{}.h", name)),
        format!("/* {} public header */\n", name),
    )
    .unwrap();
    tmp
}

/// Create a recipe directory whose source tree contract holds but whose
/// `include/` tree contains no headers, so header globs match nothing.
pub fn recipe_dir_without_headers(name: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    populate_source_tree(tmp.path(), name);
    tmp
}

fn populate_source_tree(dir: &Path, name: &str) {
    fs::write(dir.join("Slipway.toml"), generate_manifest(name)).unwrap();
    fs::write(
        dir.join("CMakeLists.txt"),
        format!("project({} C)\n", name),
    )
    .unwrap();
    fs::write(dir.join("config.h.in"), "#define VERSION \"@VERSION@\"\n").unwrap();
    for sub in ["src", "include", "test"] {
        fs::create_dir_all(dir.join(sub)).unwrap();
    }
    fs::write(dir.join("src").join(format!("{}.c", name)), "").unwrap();
}

/// A toolchain that records calls instead of running anything, with
/// per-operation failure injection.
#[derive(Debug, Default)]
pub struct FakeToolchain {
    calls: RefCell<Vec<&'static str>>,
    fail_on: Option<&'static str>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        FakeToolchain::default()
    }

    /// Fail the named operation ("generate", "build", or "install").
    pub fn failing_on(op: &'static str) -> Self {
        FakeToolchain {
            calls: RefCell::new(Vec::new()),
            fail_on: Some(op),
        }
    }

    /// The operations invoked so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn record(&self, op: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(op);
        if self.fail_on == Some(op) {
            bail!("injected {} failure", op);
        }
        Ok(())
    }
}

impl Toolchain for FakeToolchain {
    fn generate(&self, _snapshot: &Snapshot, _layout: &Layout) -> Result<()> {
        self.record("generate")
    }

    fn build(&self, _layout: &Layout) -> Result<()> {
        self.record("build")
    }

    fn install(&self, _layout: &Layout) -> Result<()> {
        self.record("install")
    }
}
