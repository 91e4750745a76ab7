//! Package build options and their enumerated domains.
//!
//! An option is a choice the recipe makes (as opposed to a setting, which
//! the environment imposes). This layer is a pure data holder: it validates
//! domain membership on assignment, but cross-option legality is the
//! policy layer's responsibility.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// The shared-linkage option.
pub const SHARED: &str = "shared";
/// The position-independent-code option. Only meaningful for static,
/// non-Windows builds; the policy layer removes it everywhere else.
pub const FPIC: &str = "fPIC";

/// One declared option: its legal values and its current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDecl {
    /// The enumerated domain of legal values.
    pub domain: Vec<bool>,
    /// The currently selected value.
    pub value: bool,
}

/// The mutable option set for one build invocation.
///
/// Constructed from declared defaults, optionally overridden, then handed
/// to the policy layer which freezes it into a [`ResolvedOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet {
    options: BTreeMap<String, OptionDecl>,
}

impl OptionSet {
    /// An empty option set with no declarations.
    pub fn new() -> Self {
        OptionSet::default()
    }

    /// The default option set for a library recipe:
    /// `shared = false`, `fPIC = true`.
    pub fn library_defaults() -> Self {
        let mut set = OptionSet::new();
        set.declare(SHARED, &[true, false], false);
        set.declare(FPIC, &[true, false], true);
        set
    }

    /// Declare an option with its domain and default value.
    pub fn declare(&mut self, name: &str, domain: &[bool], default: bool) {
        self.options.insert(
            name.to_string(),
            OptionDecl {
                domain: domain.to_vec(),
                value: default,
            },
        );
    }

    /// Set a declared option, validating domain membership only.
    pub fn set(&mut self, name: &str, value: bool) -> Result<()> {
        let Some(decl) = self.options.get_mut(name) else {
            bail!("unknown option `{}`", name);
        };
        if !decl.domain.contains(&value) {
            bail!(
                "value `{}` is outside the domain of option `{}`",
                value,
                name
            );
        }
        decl.value = value;
        Ok(())
    }

    /// Get the current value of an option, if present.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.options.get(name).map(|decl| decl.value)
    }

    /// Whether an option is present in the set.
    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Remove an option if present. Removing an absent option is a no-op,
    /// never an error, so removal is idempotent.
    ///
    /// Returns `true` if the option was present.
    pub fn remove_if_present(&mut self, name: &str) -> bool {
        self.options.remove(name).is_some()
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.options
            .iter()
            .map(|(name, decl)| (name.as_str(), decl.value))
    }

    /// Number of options present.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// A frozen option set, produced exactly once by option resolution.
///
/// Read-only from here on: every lifecycle phase and the descriptor
/// exporter see the same values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedOptions(OptionSet);

impl ResolvedOptions {
    /// Freeze an option set. Only the policy layer should call this.
    pub(crate) fn freeze(set: OptionSet) -> Self {
        ResolvedOptions(set)
    }

    /// Get the resolved value of an option, if present.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name)
    }

    /// Whether an option survived resolution.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter()
    }

    /// Number of resolved options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no options survived resolution.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_defaults() {
        let set = OptionSet::library_defaults();
        assert_eq!(set.get(SHARED), Some(false));
        assert_eq!(set.get(FPIC), Some(true));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_validates_domain() {
        let mut set = OptionSet::new();
        set.declare("frozen", &[false], false);

        assert!(set.set("frozen", false).is_ok());
        assert!(set.set("frozen", true).is_err());
        assert!(set.set("missing", true).is_err());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut set = OptionSet::library_defaults();

        assert!(set.remove_if_present(FPIC));
        let after_once = set.clone();

        // Removing again changes nothing and does not error.
        assert!(!set.remove_if_present(FPIC));
        assert_eq!(set, after_once);
        assert!(!set.contains(FPIC));
        assert_eq!(set.get(SHARED), Some(false));
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let set = OptionSet::library_defaults();
        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![FPIC, SHARED]);
    }
}
