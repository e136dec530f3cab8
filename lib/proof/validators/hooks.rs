//! Lifecycle hook validation.

use crate::constants::HOOKS_DIR;
use crate::probe::Probe;
use regex::Regex;
use std::sync::LazyLock;

use super::super::result::ValidationResult;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Patterns flagged when found in hook scripts, with the message to report.
static HOOK_WARNINGS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![(
        Regex::new(r"http://169\.254\.169\.254/").expect("valid regex"),
        "hook accesses EC2 metadata service directly",
    )]
});

/// Hooks every charm is checked for, in order.
const LIFECYCLE_HOOKS: &[(&str, HookRequirement)] = &[
    ("install", HookRequirement::Required),
    ("start", HookRequirement::Recommended),
    ("stop", HookRequirement::Recommended),
    ("config-changed", HookRequirement::Optional),
];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// How a missing hook is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookRequirement {
    /// Missing hook is an error.
    Required,
    /// Missing hook is a warning.
    Recommended,
    /// Missing hook is not reported.
    Optional,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Check the standard lifecycle hooks.
pub fn validate_lifecycle_hooks(probe: &dyn Probe, result: &mut ValidationResult) {
    for (name, requirement) in LIFECYCLE_HOOKS {
        check_hook(probe, name, *requirement, result);
    }
}

/// Check a single hook. Returns whether it exists.
pub fn check_hook(
    probe: &dyn Probe,
    name: &str,
    requirement: HookRequirement,
    result: &mut ValidationResult,
) -> bool {
    let path = format!("{}/{}", HOOKS_DIR, name);

    if !probe.exists(&path) {
        match requirement {
            HookRequirement::Required => result.err(format!("missing hook {}", name)),
            HookRequirement::Recommended => {
                result.warn(format!("missing recommended hook {}", name))
            }
            HookRequirement::Optional => {}
        }
        return false;
    }

    if !probe.is_executable(&path) {
        result.warn(format!("{} not executable", name));
    }

    // Hooks may be compiled binaries; scan whatever text they hold.
    match probe.read_bytes(&path) {
        Ok(bytes) => scan_hook(name, &String::from_utf8_lossy(&bytes), result),
        Err(e) => result.err(format!("Error while opening {} ({})", path, e)),
    }

    true
}

fn scan_hook(name: &str, content: &str, result: &mut ValidationResult) {
    for (index, line) in content.lines().enumerate() {
        for (pattern, message) in HOOK_WARNINGS.iter() {
            if pattern.is_match(line) {
                result.warn(format!("({}:{}) - {}", name, index + 1, message));
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
