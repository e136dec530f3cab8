//! Checks on charm files that do not depend on the manifest.

use crate::constants::{AUTOGEN_TEST_FILE, COPYRIGHT_FILE, HOOKS_DIR, REVISION_FILE};
use crate::probe::Probe;

use super::super::result::ValidationResult;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// A charm must have a hooks directory.
pub fn validate_hooks_dir(probe: &dyn Probe, result: &mut ValidationResult) {
    if !probe.exists(HOOKS_DIR) {
        result.err("no hooks directory");
    }
}

/// A charm must have a copyright file.
pub fn validate_copyright(probe: &dyn Probe, result: &mut ValidationResult) {
    if !probe.exists(COPYRIGHT_FILE) {
        result.err("no copyright file");
    }
}

/// The generated test scaffold should not be left in place.
pub fn validate_autogen_test(probe: &dyn Probe, result: &mut ValidationResult) {
    if probe.exists(AUTOGEN_TEST_FILE) {
        result.warn("has templated 00-autogen test file");
    }
}

/// The revision file, if present, must hold a bare integer.
pub fn validate_revision_file(probe: &dyn Probe, result: &mut ValidationResult) {
    if !probe.exists(REVISION_FILE) {
        return;
    }

    match probe.read_text(REVISION_FILE) {
        Ok(content) => {
            if !is_bare_integer(content.trim()) {
                result.err("revision file contains non-numeric data");
            }
        }
        Err(e) => result.err(format!("Error while opening {} ({})", REVISION_FILE, e)),
    }
}

/// An optional sign followed by ASCII digits, of any length.
fn is_bare_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
