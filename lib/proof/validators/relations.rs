//! Relation block validation.

use crate::node::Node;
use crate::probe::Probe;

use super::super::manifest::{Manifest, RelationKind};
use super::super::result::ValidationResult;
use super::hooks::{HookRequirement, check_hook};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Fields a relation entry may declare.
pub const KNOWN_RELATION_KEYS: &[&str] = &["interface", "scope", "limit", "optional"];

/// Interface name left in place by the charm template.
const TEMPLATE_INTERFACE: &str = "interface-name";

/// Relation name left in place by the charm template.
const TEMPLATE_RELATION: &str = "relation-name";

/// Hook suffixes, in the order they are looked up.
const RELATION_HOOK_SUFFIXES: &[&str] = &[
    "-relation-changed",
    "-relation-departed",
    "-relation-joined",
    "-relation-broken",
];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Relation visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Visible across the whole deployment.
    #[default]
    Global,
    /// Visible only to co-located units.
    Container,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Scope {
    /// Parse a scope value. Returns `None` for anything outside the known set.
    pub fn parse(value: &Node) -> Option<Self> {
        match value.as_str()? {
            "global" => Some(Scope::Global),
            "container" => Some(Scope::Container),
            _ => None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate the `provides`, `requires` and `peers` blocks of a manifest.
pub fn validate_all_relations(manifest: &Manifest, probe: &dyn Probe, result: &mut ValidationResult) {
    let subordinate = manifest.is_subordinate();

    match manifest.relations(RelationKind::Provides) {
        Some(provides) => validate_relations(RelationKind::Provides, provides, subordinate, probe, result),
        None if !subordinate => result.warn("all charms should provide at least one thing"),
        None => {}
    }

    let requires = manifest.relations(RelationKind::Requires);
    if subordinate {
        if !has_container_scope(requires) {
            result.err("subordinates must have at least one scope: container relation");
        }
    } else if let Some(requires) = requires {
        validate_relations(RelationKind::Requires, requires, subordinate, probe, result);
    }

    if let Some(peers) = manifest.relations(RelationKind::Peers) {
        validate_relations(RelationKind::Peers, peers, subordinate, probe, result);
    }
}

/// Validate every entry of one relation block and look for its hooks.
pub fn validate_relations(
    kind: RelationKind,
    relations: &Node,
    subordinate: bool,
    probe: &dyn Probe,
    result: &mut ValidationResult,
) {
    let Some(entries) = relations.as_mapping() else {
        result.err(format!("{} must be a map of relations", kind.as_str()));
        return;
    };

    for (name, relation) in entries {
        validate_relation_entry(name, relation, result);

        if name == TEMPLATE_RELATION {
            result.err(format!(
                "template relations should be renamed to fit charm: {}",
                name
            ));
        }

        if !has_relation_hook(name, probe, result) && !subordinate {
            result.info(format!("relation {} has no hooks", name));
        }
    }
}

fn validate_relation_entry(name: &str, relation: &Node, result: &mut ValidationResult) {
    let Some(fields) = relation.as_mapping() else {
        result.err(format!("relation {} is not a map", name));
        return;
    };

    if let Some(scope) = relation.get("scope")
        && Scope::parse(scope).is_none()
    {
        result.err(format!(
            "Unknown scope found in relation {} - ({})",
            name, scope
        ));
    }

    match relation.get("interface") {
        Some(interface) if interface.as_str() == Some(TEMPLATE_INTERFACE) => {
            result.err(format!(
                "template interface names should be changed: {}",
                interface
            ));
        }
        Some(_) => {}
        None => result.err(format!("relation {} missing interface", name)),
    }

    for (key, _) in fields {
        if !KNOWN_RELATION_KEYS.contains(&key.as_str()) {
            result.err(format!(
                "Unknown relation field in relation {} - ({})",
                name, key
            ));
        }
    }
}

/// Returns true once any of the relation's hooks is found. Later hooks are not inspected.
fn has_relation_hook(name: &str, probe: &dyn Probe, result: &mut ValidationResult) -> bool {
    RELATION_HOOK_SUFFIXES.iter().any(|suffix| {
        check_hook(
            probe,
            &format!("{}{}", name, suffix),
            HookRequirement::Optional,
            result,
        )
    })
}

/// Returns true if any `requires` entry declares `scope: container`.
pub fn has_container_scope(requires: Option<&Node>) -> bool {
    requires
        .and_then(Node::as_mapping)
        .into_iter()
        .flatten()
        .filter_map(|(_, relation)| relation.get("scope"))
        .any(|scope| Scope::parse(scope) == Some(Scope::Container))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
