//! Core data model: settings, options, recipes, and the package descriptor.

pub mod descriptor;
pub mod options;
pub mod recipe;
pub mod settings;
pub mod snapshot;
