//! Local charm listing command handler.

use crate::charms::local_charms;
use crate::constants::get_charm_home;
use crate::error::CharmResult;
use colored::Colorize;
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// List charms checked out under a directory.
pub fn list_charms(dir: Option<String>, json_output: bool) -> CharmResult<()> {
    let dir = dir.map(PathBuf::from).unwrap_or_else(get_charm_home);
    let charms = local_charms(&dir)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&charms)?);
        return Ok(());
    }

    if charms.is_empty() {
        println!("  {} no charms found in {}", "!".bright_yellow(), dir.display());
        return Ok(());
    }

    for charm in &charms {
        println!("  {}", charm.bright_cyan());
    }
    Ok(())
}
