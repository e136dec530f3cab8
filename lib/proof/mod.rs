//! Static proofing of charm directories.

mod manifest;
mod result;

pub mod validators;


//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use manifest::{KNOWN_METADATA_KEYS, Manifest, ManifestError, RelationKind};
pub use result::{Diagnostic, Severity, ValidationResult};
pub use validators::{proof, proof_dir, proof_in, proof_probe};
