//! Constants for charm-tools.
//!
//! File names inside a charm, proof thresholds and environment lookups.

use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The manifest file that marks a directory as a charm.
pub const METADATA_FILE: &str = "metadata.yaml";

/// Optional configuration schema.
pub const CONFIG_FILE: &str = "config.yaml";

/// Directory holding lifecycle hook scripts.
pub const HOOKS_DIR: &str = "hooks";

/// Required copyright file.
pub const COPYRIGHT_FILE: &str = "copyright";

/// Optional revision marker file.
pub const REVISION_FILE: &str = "revision";

/// Charm icon.
pub const ICON_FILE: &str = "icon.svg";

/// Name of the bundled README template, flagged if shipped as-is.
pub const TEMPLATE_README_NAME: &str = "README.ex";

/// Test scaffold left behind by charm generation.
pub const AUTOGEN_TEST_FILE: &str = "tests/00-autogen";

/// Version control marker for locally checked-out charms.
pub const BZR_DIR: &str = ".bzr";

/// Summaries longer than this are flagged.
pub const MAX_SUMMARY_LEN: usize = 72;

/// Template README lines shorter than this are not matched against charm READMEs.
pub const BOILERPLATE_MIN_LINE_LEN: usize = 40;

/// Environment variable naming the directory bare charm names resolve against.
pub const CHARM_HOME_ENV: &str = "CHARM_HOME";

/// Fallback charm home when `CHARM_HOME` is unset.
pub const DEFAULT_CHARM_HOME: &str = ".";

/// Bundled README template.
pub const TEMPLATE_README: &str = include_str!("../templates/charm/README.ex");

/// Bundled icon template.
pub const TEMPLATE_ICON: &[u8] = include_bytes!("../templates/charm/icon.svg");

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Get the charm home, checking the CHARM_HOME env var first.
pub fn get_charm_home() -> PathBuf {
    std::env::var(CHARM_HOME_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CHARM_HOME))
}
