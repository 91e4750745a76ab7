//! Platform settings supplied by the invoking environment.
//!
//! Settings are facts about the target platform, not choices the recipe
//! makes. They are treated as opaque strings: the engine never enumerates
//! legal values, and the only setting it ever interprets is `os` (to decide
//! whether position-independent-code applies).

use std::fmt;

use serde::{Deserialize, Serialize};

/// The settings matrix for one build invocation: operating system,
/// compiler, build type, and architecture.
///
/// Immutable once constructed; every lifecycle phase reads the same
/// snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Target operating system (e.g. "Linux", "Windows", "Macos").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Compiler family (e.g. "gcc", "msvc").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,

    /// Build type (e.g. "Debug", "Release").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_type: Option<String>,

    /// Target architecture (e.g. "x86_64", "armv8").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

impl Settings {
    /// Whether the target platform is Windows.
    ///
    /// This is the single settings comparison the engine performs;
    /// everything else is passed through opaquely.
    pub fn is_windows(&self) -> bool {
        self.os
            .as_deref()
            .is_some_and(|os| os.eq_ignore_ascii_case("windows"))
    }

    /// The build type, defaulting to "Release" when unset.
    pub fn build_type_or_default(&self) -> &str {
        self.build_type.as_deref().unwrap_or("Release")
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in [
            ("os", &self.os),
            ("compiler", &self.compiler),
            ("build_type", &self.build_type),
            ("arch", &self.arch),
        ] {
            if let Some(value) = value {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", key, value)?;
                first = false;
            }
        }
        if first {
            write!(f, "(no settings)")?;
        }
        Ok(())
    }
}
