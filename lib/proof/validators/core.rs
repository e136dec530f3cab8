//! Core proof entry point and stage pipeline.

use crate::constants::{METADATA_FILE, get_charm_home};
use crate::probe::{DiskProbe, Probe};
use std::path::{Path, PathBuf};

use super::super::manifest::Manifest;
use super::super::result::ValidationResult;
use super::config::validate_config;
use super::files::{
    validate_autogen_test, validate_copyright, validate_hooks_dir, validate_revision_file,
};
use super::hooks::validate_lifecycle_hooks;
use super::metadata::validate_metadata;
use super::relations::validate_all_relations;
use super::templates::{validate_icon, validate_readmes};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Everything a stage may read during one proof run.
pub struct ProofContext<'a> {
    /// Charm files.
    pub probe: &'a dyn Probe,

    /// Base name of the charm directory.
    pub dir_name: &'a str,

    /// Parsed manifest, absent if it could not be loaded.
    pub manifest: Option<&'a Manifest>,
}

/// One step of the proof pipeline.
#[derive(Clone, Copy)]
pub struct Stage {
    /// Stage name, used in logs.
    pub name: &'static str,

    /// Skip this stage when the manifest could not be loaded.
    pub needs_manifest: bool,

    run: fn(&ProofContext<'_>, &mut ValidationResult),
}

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Proof stages, in the order they run.
pub const STAGES: &[Stage] = &[
    Stage {
        name: "metadata",
        needs_manifest: true,
        run: run_metadata,
    },
    Stage {
        name: "icon",
        needs_manifest: false,
        run: run_icon,
    },
    Stage {
        name: "readme",
        needs_manifest: false,
        run: run_readmes,
    },
    Stage {
        name: "hooks-dir",
        needs_manifest: false,
        run: run_hooks_dir,
    },
    Stage {
        name: "copyright",
        needs_manifest: false,
        run: run_copyright,
    },
    Stage {
        name: "relations",
        needs_manifest: true,
        run: run_relations,
    },
    Stage {
        name: "lifecycle-hooks",
        needs_manifest: false,
        run: run_lifecycle_hooks,
    },
    Stage {
        name: "autogen-test",
        needs_manifest: false,
        run: run_autogen_test,
    },
    Stage {
        name: "revision-file",
        needs_manifest: false,
        run: run_revision_file,
    },
    Stage {
        name: "config",
        needs_manifest: false,
        run: run_config,
    },
];

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Stage {
    /// Run the stage. Stages that need a manifest do nothing without one.
    pub fn run(&self, ctx: &ProofContext<'_>, result: &mut ValidationResult) {
        if self.needs_manifest && ctx.manifest.is_none() {
            tracing::debug!(stage = self.name, "skipped, no manifest");
            return;
        }
        tracing::debug!(stage = self.name, "running");
        (self.run)(ctx, result);
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Proof a charm given as a path, or as a name under `CHARM_HOME`.
pub fn proof(charm: &str) -> ValidationResult {
    proof_in(charm, &get_charm_home())
}

/// Proof a charm given as a path, or as a name under the given charm home.
pub fn proof_in(charm: &str, charm_home: &Path) -> ValidationResult {
    let path = resolve_charm_path(charm, charm_home);
    proof_dir(&path)
}

/// Proof the charm rooted at a directory.
pub fn proof_dir(path: &Path) -> ValidationResult {
    if !path.is_dir() {
        let mut result = ValidationResult::default();
        result.crit(format!("{} is not a directory, Aborting", path.display()));
        return result;
    }

    let dir_name = dir_name(path);
    tracing::debug!(path = %path.display(), %dir_name, "proofing charm");
    proof_probe(&DiskProbe::new(path), &dir_name)
}

/// Run every stage against a charm. The root is assumed to exist.
pub fn proof_probe(probe: &dyn Probe, dir_name: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    let manifest = load_manifest(probe, &mut result);

    let ctx = ProofContext {
        probe,
        dir_name,
        manifest: manifest.as_ref(),
    };
    for stage in STAGES {
        stage.run(&ctx, &mut result);
    }

    result
}

/// Use the path as-is if it is a directory, otherwise look it up under the charm home.
pub fn resolve_charm_path(charm: &str, charm_home: &Path) -> PathBuf {
    let path = PathBuf::from(charm);
    if path.is_dir() {
        path
    } else {
        charm_home.join(charm)
    }
}

/// Load and parse `metadata.yaml`. Any failure is recorded as `crit`.
pub fn load_manifest(probe: &dyn Probe, result: &mut ValidationResult) -> Option<Manifest> {
    if !probe.exists(METADATA_FILE) {
        result.crit(format!("could not find {} file", METADATA_FILE));
        return None;
    }

    let text = match probe.read_text(METADATA_FILE) {
        Ok(text) => text,
        Err(e) => {
            result.crit(format!("cannot read {}: {}", METADATA_FILE, e));
            return None;
        }
    };

    match Manifest::parse(&text) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            result.crit(format!("cannot parse {}: {}", METADATA_FILE, e));
            None
        }
    }
}

/// Base name of the path as given. Only `.`-style paths are resolved first.
fn dir_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().to_string();
    }
    path.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| path.display().to_string())
}

fn run_metadata(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    if let Some(manifest) = ctx.manifest {
        validate_metadata(manifest, ctx.dir_name, result);
    }
}

fn run_icon(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_icon(ctx.probe, result);
}

fn run_readmes(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_readmes(ctx.probe, result);
}

fn run_hooks_dir(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_hooks_dir(ctx.probe, result);
}

fn run_copyright(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_copyright(ctx.probe, result);
}

fn run_relations(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    if let Some(manifest) = ctx.manifest {
        validate_all_relations(manifest, ctx.probe, result);
    }
}

fn run_lifecycle_hooks(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_lifecycle_hooks(ctx.probe, result);
}

fn run_autogen_test(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_autogen_test(ctx.probe, result);
}

fn run_revision_file(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_revision_file(ctx.probe, result);
}

fn run_config(ctx: &ProofContext<'_>, result: &mut ValidationResult) {
    validate_config(ctx.probe, result);
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryProbe;
    use crate::proof::result::Severity;

    const METADATA: &str = "name: nginx\n\
        summary: Web server\n\
        maintainer: Jane Doe <jane@example.com>\n\
        description: Serves pages.\n\
        categories: [app-servers]\n\
        provides:\n  website:\n    interface: http\n";

    const CONFIG: &str = "options:\n  port:\n    type: int\n    default: 80\n    description: Port\n";

    fn complete() -> MemoryProbe {
        MemoryProbe::new()
            .with_file("metadata.yaml", METADATA)
            .with_file("config.yaml", CONFIG)
            .with_file("copyright", "Copyright 2024 Jane Doe")
            .with_file("README.md", "# nginx\n\nServes web pages.\n")
            .with_file("icon.svg", "<svg/>")
            .with_file("revision", "3\n")
            .with_executable("hooks/install", "#!/bin/sh\napt-get install -y nginx\n")
            .with_executable("hooks/start", "#!/bin/sh\nservice nginx start\n")
            .with_executable("hooks/stop", "#!/bin/sh\nservice nginx stop\n")
            .with_executable("hooks/website-relation-joined", "#!/bin/sh\n")
    }

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = STAGES.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "metadata",
                "icon",
                "readme",
                "hooks-dir",
                "copyright",
                "relations",
                "lifecycle-hooks",
                "autogen-test",
                "revision-file",
                "config",
            ]
        );
    }

    #[test]
    fn test_complete_charm_is_clean() {
        let result = proof_probe(&complete(), "nginx");
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_missing_manifest_still_runs_file_checks() {
        let probe = MemoryProbe::new().with_file("revision", "abc");
        let result = proof_probe(&probe, "nginx");

        assert_eq!(result.diagnostics[0].severity, Severity::Crit);
        assert_eq!(result.exit_code(), -1);
        let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert!(messages.contains(&"no hooks directory"));
        assert!(messages.contains(&"no copyright file"));
        assert!(messages.contains(&"revision file contains non-numeric data"));
        assert!(messages.contains(&"File config.yaml not found."));
        assert!(!messages.iter().any(|m| m.contains("maintainer")));
    }

    #[test]
    fn test_unparseable_manifest_is_crit() {
        let probe = complete().with_file("metadata.yaml", "name: [unclosed\n");
        let result = proof_probe(&probe, "nginx");
        assert_eq!(result.count(Severity::Crit), 1);
        assert!(result.diagnostics[0].message.starts_with("cannot parse metadata.yaml"));
        assert!(result.is_fatal());
    }

    #[test]
    fn test_manifest_not_a_mapping_is_crit() {
        let probe = complete().with_file("metadata.yaml", "just text\n");
        let result = proof_probe(&probe, "nginx");
        assert_eq!(result.count(Severity::Crit), 1);
    }

    #[test]
    fn test_diagnostics_follow_stage_order() {
        let probe = MemoryProbe::new()
            .with_file("metadata.yaml", "name: other\nsummary: s\nmaintainer: a@b.c\ncategories: [misc]\n")
            .with_file("README", "readme\n")
            .with_file("icon.svg", "<svg/>")
            .with_file("tests/00-autogen", "");
        let result = proof_probe(&probe, "nginx");
        let messages: Vec<_> = result.diagnostics.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "W: metadata name (other) must match directory name (nginx) exactly for local deployment.",
                "E: no hooks directory",
                "E: no copyright file",
                "W: all charms should provide at least one thing",
                "E: missing hook install",
                "W: missing recommended hook start",
                "W: missing recommended hook stop",
                "W: has templated 00-autogen test file",
                "W: File config.yaml not found.",
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let probe = complete().with_file("revision", "x");
        assert_eq!(proof_probe(&probe, "nginx"), proof_probe(&probe, "nginx"));
    }

    #[test]
    fn test_resolve_charm_path_uses_home_for_names() {
        let home = tempfile::TempDir::new().unwrap();
        let resolved = resolve_charm_path("no-such-charm-dir", home.path());
        assert_eq!(resolved, home.path().join("no-such-charm-dir"));

        let resolved = resolve_charm_path(&home.path().display().to_string(), Path::new("/x"));
        assert_eq!(resolved, home.path());
    }
}
