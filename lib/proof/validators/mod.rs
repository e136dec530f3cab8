//! Proof stages for charm directories.

mod core;
mod files;
mod metadata;
mod templates;

pub mod config;
pub mod hooks;
pub mod relations;

//--------------------------------------------------------------------------------------------------
// Re-Exports
//--------------------------------------------------------------------------------------------------

pub use config::{OptionType, TypeMismatch, validate_config, validate_config_node};
pub use self::core::{
    ProofContext, STAGES, Stage, load_manifest, proof, proof_dir, proof_in, proof_probe,
    resolve_charm_path,
};
pub use files::{validate_autogen_test, validate_copyright, validate_hooks_dir, validate_revision_file};
pub use hooks::{HookRequirement, check_hook, validate_lifecycle_hooks};
pub use metadata::{format_address, parse_address, validate_metadata};
pub use relations::{Scope, has_container_scope, validate_all_relations, validate_relations};
pub use templates::{
    BoilerplateLine, boilerplate_lines, find_boilerplate, fingerprint, is_unmodified_template,
    validate_icon, validate_readmes,
};
