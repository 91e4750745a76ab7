//! Test fixtures and fakes for Slipway unit tests.

pub mod fixtures;

pub use fixtures::{recipe_dir, recipe_dir_without_headers, FakeToolchain};
