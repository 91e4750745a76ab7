//! Option resolution policy.
//!
//! Cross-option legality is expressed as independent removal rules rather
//! than ad-hoc mutation: each rule names the option it removes and the
//! predicate under which removal applies. Rules are applied in a fixed
//! order, and because removal is idempotent the outcome is independent of
//! the order in which platform facts became known.

use crate::core::options::{OptionSet, ResolvedOptions, FPIC, SHARED};
use crate::core::settings::Settings;

/// A single resolution rule: remove option `removes` when `applies` holds.
pub struct Rule {
    /// Rule name, used in trace output.
    pub name: &'static str,
    /// The option this rule removes.
    pub removes: &'static str,
    /// Predicate over the settings/options snapshot.
    pub applies: fn(&Settings, &OptionSet) -> bool,
}

/// Windows has no position-independent-code concept, regardless of linkage.
const WINDOWS_NO_FPIC: Rule = Rule {
    name: "windows-no-fpic",
    removes: FPIC,
    applies: |settings, _| settings.is_windows(),
};

/// fPIC is redundant for shared libraries; drop it so it cannot leak into
/// the snapshot or the toolchain file.
const SHARED_NO_FPIC: Rule = Rule {
    name: "shared-no-fpic",
    removes: FPIC,
    applies: |_, options| options.get(SHARED) == Some(true),
};

/// All resolution rules, in application order.
pub const RULES: &[Rule] = &[WINDOWS_NO_FPIC, SHARED_NO_FPIC];

/// Resolve an option set against the platform settings.
///
/// Pure: the same settings and options always produce the same resolved
/// set. Freezes the result; options are immutable from here on.
pub fn resolve(settings: &Settings, mut options: OptionSet) -> ResolvedOptions {
    for rule in RULES {
        if (rule.applies)(settings, &options) && options.remove_if_present(rule.removes) {
            tracing::debug!(rule = rule.name, option = rule.removes, "removed option");
        }
    }
    ResolvedOptions::freeze(options)
}
