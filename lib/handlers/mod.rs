//! Command handlers.

mod list_cmd;
mod proof_cmd;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use list_cmd::list_charms;
pub use proof_cmd::proof_charm;
