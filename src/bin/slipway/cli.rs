//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Slipway - a recipe-driven build and packaging engine for CMake libraries
#[derive(Parser)]
#[command(name = "slipway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new Slipway recipe with a scaffolded source tree
    New(NewArgs),

    /// Build and package the recipe in the current directory
    Build(BuildArgs),

    /// Print the package descriptor without building
    Info(InfoArgs),

    /// Remove build artifacts
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target settings supplied to the engine. Unset settings fall back to
/// host-platform detection.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Target operating system (e.g. Linux, Windows, Macos)
    #[arg(long)]
    pub os: Option<String>,

    /// Compiler family (e.g. gcc, msvc)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Build type
    #[arg(long, default_value = "Release")]
    pub build_type: String,

    /// Target architecture
    #[arg(long)]
    pub arch: Option<String>,
}

/// Option overrides for the recipe's declared options.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Override the `shared` option
    #[arg(long)]
    pub shared: Option<bool>,

    /// Override the `fPIC` option
    #[arg(long)]
    pub fpic: Option<bool>,
}

#[derive(Args)]
pub struct NewArgs {
    /// Recipe name
    pub name: String,

    /// Directory to create the recipe in (defaults to name)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Recipe directory (defaults to current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Recipe directory (defaults to current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Recipe directory (defaults to current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
