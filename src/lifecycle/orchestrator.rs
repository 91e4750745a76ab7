//! The lifecycle orchestrator: guarded, monotonic phase transitions.

use crate::core::options::{FPIC, SHARED};
use crate::core::recipe::Recipe;
use crate::core::snapshot::Snapshot;
use crate::lifecycle::layout::Layout;
use crate::lifecycle::{
    BuildError, GenerationError, LayoutError, LifecycleError, PackageError, Phase,
};
use crate::toolchain::Toolchain;
use crate::util::fs::copy_matching;

/// Drives one build invocation through the five lifecycle phases.
///
/// Owns the phase state for the invocation; the snapshot and recipe are
/// read-only throughout. Each transition is a single unit: on failure the
/// phase does not advance and prior phases' artifacts are left on disk.
pub struct Lifecycle<'a, T: Toolchain> {
    recipe: &'a Recipe,
    snapshot: &'a Snapshot,
    toolchain: &'a T,
    layout: Layout,
    phase: Phase,
}

impl<'a, T: Toolchain> Lifecycle<'a, T> {
    /// Start an invocation in the `Unconfigured` phase.
    pub fn new(recipe: &'a Recipe, snapshot: &'a Snapshot, toolchain: &'a T) -> Self {
        let layout = Layout::resolve(&recipe.dir, snapshot);
        Lifecycle {
            recipe,
            snapshot,
            toolchain,
            layout,
            phase: Phase::Unconfigured,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The resolved layout for this invocation.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn expect(&self, want: Phase) -> Result<(), String> {
        if self.phase == want {
            Ok(())
        } else {
            Err(format!(
                "phase out of order: expected `{}`, currently `{}`",
                want, self.phase
            ))
        }
    }

    /// `Unconfigured → LaidOut`: establish the on-disk layout.
    pub fn lay_out(&mut self) -> Result<(), LayoutError> {
        let fail = |message: String| LayoutError {
            snapshot: self.snapshot.to_string(),
            message,
        };

        self.expect(Phase::Unconfigured).map_err(fail)?;
        self.layout.create().map_err(|e| fail(format!("{:#}", e)))?;

        self.phase = Phase::LaidOut;
        tracing::info!(root = %self.layout.root.display(), "layout established");
        Ok(())
    }

    /// `LaidOut → Generated`: emit the toolchain-description artifacts.
    ///
    /// Rejects a snapshot that violates the resolution invariants (a
    /// surviving `fPIC` on Windows or alongside `shared=true`) rather than
    /// letting it leak into the toolchain file.
    pub fn generate(&mut self) -> Result<(), GenerationError> {
        let fail = |message: String| GenerationError {
            snapshot: self.snapshot.to_string(),
            message,
        };

        self.expect(Phase::LaidOut).map_err(fail)?;

        if self.snapshot.options.contains(FPIC)
            && (self.snapshot.settings.is_windows()
                || self.snapshot.options.get(SHARED) == Some(true))
        {
            return Err(fail(
                "inconsistent snapshot: fPIC survived resolution".to_string(),
            ));
        }

        self.toolchain
            .generate(self.snapshot, &self.layout)
            .map_err(|e| fail(format!("{:#}", e)))?;

        self.phase = Phase::Generated;
        tracing::info!("toolchain artifacts generated");
        Ok(())
    }

    /// `Generated → Built`: invoke the external configure+build step.
    /// Failures are surfaced verbatim and never retried.
    pub fn build(&mut self) -> Result<(), BuildError> {
        let fail = |message: String| BuildError {
            snapshot: self.snapshot.to_string(),
            message,
        };

        self.expect(Phase::Generated).map_err(fail)?;
        self.toolchain
            .build(&self.layout)
            .map_err(|e| fail(format!("{:#}", e)))?;

        self.phase = Phase::Built;
        tracing::info!("build succeeded");
        Ok(())
    }

    /// `Built → Packaged` (terminal): copy declared public headers into
    /// the package's include tree, then invoke the external install step.
    ///
    /// A header glob matching zero files fails the phase: a silently
    /// empty package is a defect, not a valid terminal state.
    pub fn package(&mut self) -> Result<(), PackageError> {
        let fail = |message: String| PackageError {
            snapshot: self.snapshot.to_string(),
            message,
        };

        self.expect(Phase::Built).map_err(fail)?;

        let include_src = self.layout.source_dir.join("include");
        let include_dst = self.layout.package_dir.join("include");
        let copied = copy_matching(&include_src, &include_dst, &self.recipe.exports.headers)
            .map_err(|e| fail(format!("{:#}", e)))?;

        if copied.is_empty() {
            return Err(fail(format!(
                "header globs {:?} matched no files under {}",
                self.recipe.exports.headers,
                include_src.display()
            )));
        }
        tracing::info!(headers = copied.len(), "public headers packaged");

        self.toolchain
            .install(&self.layout)
            .map_err(|e| fail(format!("{:#}", e)))?;

        self.phase = Phase::Packaged;
        tracing::info!(package = %self.layout.package_dir.display(), "packaged");
        Ok(())
    }

    /// Run all phases in order.
    pub fn run(&mut self) -> Result<(), LifecycleError> {
        self.lay_out()?;
        self.generate()?;
        self.build()?;
        self.package()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::OptionSet;
    use crate::core::settings::Settings;
    use crate::policy;
    use crate::test_support::{recipe_dir, recipe_dir_without_headers, FakeToolchain};

    fn snapshot(os: &str) -> Snapshot {
        let settings = Settings {
            os: Some(os.to_string()),
            build_type: Some("Release".to_string()),
            ..Default::default()
        };
        let options = policy::resolve(&settings, OptionSet::library_defaults());
        Snapshot::new(settings, options)
    }

    #[test]
    fn test_full_run_reaches_packaged() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let snap = snapshot("Linux");
        let toolchain = FakeToolchain::new();

        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);
        assert_eq!(lifecycle.phase(), Phase::Unconfigured);

        lifecycle.run().unwrap();
        assert_eq!(lifecycle.phase(), Phase::Packaged);
        assert_eq!(toolchain.calls(), vec!["generate", "build", "install"]);

        // Headers were copied into the package include tree.
        assert!(lifecycle
            .layout()
            .package_dir
            .join("include/armv4vm.h")
            .exists());
    }

    #[test]
    fn test_phases_cannot_run_out_of_order() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let snap = snapshot("Linux");
        let toolchain = FakeToolchain::new();

        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);

        // Build before layout/generate is rejected and nothing runs.
        let err = lifecycle.build().unwrap_err();
        assert!(err.message.contains("phase out of order"));
        assert_eq!(lifecycle.phase(), Phase::Unconfigured);
        assert!(toolchain.calls().is_empty());
    }

    #[test]
    fn test_packaged_is_terminal() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let snap = snapshot("Linux");
        let toolchain = FakeToolchain::new();

        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);
        lifecycle.run().unwrap();

        // No transition re-enters a completed phase.
        assert!(lifecycle.lay_out().is_err());
        assert!(lifecycle.package().is_err());
        assert_eq!(lifecycle.phase(), Phase::Packaged);
    }

    #[test]
    fn test_build_failure_halts_at_generated() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let snap = snapshot("Linux");
        let toolchain = FakeToolchain::failing_on("build");

        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);
        let err = lifecycle.run().unwrap_err();

        assert!(matches!(err, LifecycleError::Build(_)));
        assert_eq!(err.phase(), Phase::Built);
        assert_eq!(lifecycle.phase(), Phase::Generated);
        // Layout artifacts are preserved for inspection.
        assert!(lifecycle.layout().root.is_dir());
        // Install was never attempted.
        assert_eq!(toolchain.calls(), vec!["generate", "build"]);
    }

    #[test]
    fn test_error_carries_snapshot_context() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let snap = snapshot("Linux");
        let toolchain = FakeToolchain::failing_on("generate");

        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);
        let err = lifecycle.run().unwrap_err();

        assert!(err.to_string().contains("os=Linux"));
        assert!(err.to_string().contains("injected generate failure"));
    }

    #[test]
    fn test_empty_header_glob_is_a_package_error() {
        let fixture = recipe_dir_without_headers("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();
        let snap = snapshot("Linux");
        let toolchain = FakeToolchain::new();

        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);
        let err = lifecycle.run().unwrap_err();

        assert!(matches!(err, LifecycleError::Package(_)));
        assert_eq!(lifecycle.phase(), Phase::Built);
        // Install is not reached when the package would be empty.
        assert_eq!(toolchain.calls(), vec!["generate", "build"]);
    }

    #[test]
    fn test_generate_rejects_inconsistent_snapshot() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();

        // Bypass the policy layer: options resolved against non-Windows
        // settings paired with Windows settings, so fPIC survived wrongly.
        let settings = Settings {
            os: Some("Windows".to_string()),
            ..Default::default()
        };
        let options = policy::resolve(&Settings::default(), OptionSet::library_defaults());
        let snap = Snapshot::new(settings, options);

        let toolchain = FakeToolchain::new();
        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);
        lifecycle.lay_out().unwrap();

        let err = lifecycle.generate().unwrap_err();
        assert!(err.message.contains("inconsistent snapshot"));
        assert_eq!(lifecycle.phase(), Phase::LaidOut);
        assert!(toolchain.calls().is_empty());
    }

    #[test]
    fn test_shared_build_packages_without_fpic() {
        let fixture = recipe_dir("armv4vm");
        let recipe = Recipe::load(fixture.path()).unwrap();

        let settings = Settings {
            os: Some("Linux".to_string()),
            ..Default::default()
        };
        let mut options = OptionSet::library_defaults();
        options.set(SHARED, true).unwrap();
        let snap = Snapshot::new(settings.clone(), policy::resolve(&settings, options));

        let toolchain = FakeToolchain::new();
        let mut lifecycle = Lifecycle::new(&recipe, &snap, &toolchain);
        lifecycle.run().unwrap();
        assert_eq!(lifecycle.phase(), Phase::Packaged);
    }
}
