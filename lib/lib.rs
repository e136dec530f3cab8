//! `charm-tools` library.

pub mod charms;
pub mod commands;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod node;
pub mod probe;
pub mod proof;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use charms::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use node::*;
pub use probe::*;
pub use proof::*;
