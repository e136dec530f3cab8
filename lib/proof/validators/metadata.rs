//! Manifest schema validation.

use crate::constants::MAX_SUMMARY_LEN;
use crate::node::Node;

use super::super::manifest::{KNOWN_METADATA_KEYS, Manifest};
use super::super::result::ValidationResult;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Characters that force a display name to be quoted.
const ADDRESS_SPECIALS: &[char] = &[
    '(', ')', '<', '>', '@', ',', ':', ';', '.', '"', '[', ']', '\\',
];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate the manifest's top-level fields.
pub fn validate_metadata(manifest: &Manifest, dir_name: &str, result: &mut ValidationResult) {
    validate_known_keys(manifest, result);
    validate_name(manifest, dir_name, result);
    validate_summary(manifest, result);
    validate_maintainer(manifest, result);
    validate_categories(manifest, result);
    validate_subordinate(manifest, result);
    validate_revision_field(manifest, result);
}

fn validate_known_keys(manifest: &Manifest, result: &mut ValidationResult) {
    for key in manifest.keys() {
        if !KNOWN_METADATA_KEYS.contains(&key) {
            result.err(format!("Unknown root metadata field ({})", key));
        }
    }
}

fn validate_name(manifest: &Manifest, dir_name: &str, result: &mut ValidationResult) {
    let Some(name) = manifest.get("name") else {
        result.err("Metadata is missing name.");
        return;
    };

    let name = name.to_string();
    if name != dir_name {
        result.warn(format!(
            "metadata name ({}) must match directory name ({}) exactly for local deployment.",
            name, dir_name
        ));
    }
}

fn validate_summary(manifest: &Manifest, result: &mut ValidationResult) {
    match manifest.get("summary") {
        None => result.err("Metadata is missing summary."),
        Some(Node::String(summary)) => {
            if summary.chars().count() > MAX_SUMMARY_LEN {
                result.warn(format!(
                    "summary should be {} characters or less",
                    MAX_SUMMARY_LEN
                ));
            }
        }
        Some(other) => result.warn(format!(
            "summary should be a string, found {}",
            other.type_name()
        )),
    }
}

fn validate_maintainer(manifest: &Manifest, result: &mut ValidationResult) {
    let Some(maintainer) = manifest.get("maintainer") else {
        result.err("Charms need a maintainer (See RFC2822) - Name <email>");
        return;
    };

    let maintainers: Vec<&Node> = match maintainer {
        Node::Sequence(items) => items.iter().collect(),
        single => vec![single],
    };

    for maintainer in maintainers {
        let maintainer = maintainer.to_string();
        let (name, address) = parse_address(&maintainer);
        let formatted = format_address(&name, &address);
        if formatted != maintainer {
            result.warn(format!(
                "Maintainer address should contain a real-name and email only. [{}]",
                formatted
            ));
        }
    }
}

fn validate_categories(manifest: &Manifest, result: &mut ValidationResult) {
    let Some(categories) = manifest.get("categories") else {
        result.warn("Metadata is missing categories.");
        return;
    };

    // Category names are not checked; the list of valid ones changes.
    let non_empty_list = categories
        .as_sequence()
        .map(|items| !items.is_empty())
        .unwrap_or(false);
    if !non_empty_list {
        result.warn(
            "Categories metadata must be a list of one or more of: applications, \
             app-servers, databases, file-servers, cache-proxy, misc",
        );
    }
}

fn validate_subordinate(manifest: &Manifest, result: &mut ValidationResult) {
    if let Some(subordinate) = manifest.get("subordinate")
        && subordinate.as_bool().is_none()
    {
        result.err("subordinate must be a boolean value");
    }
}

fn validate_revision_field(manifest: &Manifest, result: &mut ValidationResult) {
    if !manifest.has_key("revision") {
        return;
    }

    result.warn(
        "Revision should not be stored in metadata.yaml anymore. Move it to the revision file",
    );

    let valid = match manifest.get("revision") {
        Some(Node::Int(n)) => *n >= 0,
        Some(Node::String(s)) => s.trim().parse::<u64>().is_ok(),
        _ => false,
    };
    if !valid {
        result.warn("revision should be a positive integer");
    }
}

/// Split an address into display name and address, the way mail headers are read.
pub fn parse_address(raw: &str) -> (String, String) {
    let raw = raw.trim();

    if let Some(lt) = raw.find('<')
        && let Some(gt) = raw[lt..].find('>').map(|i| i + lt)
    {
        let name = format!("{} {}", &raw[..lt], &raw[gt + 1..]);
        let address = raw[lt + 1..gt].trim().to_string();
        return (clean_display_name(&name), address);
    }

    if let Some(open) = raw.find('(')
        && let Some(close) = raw.rfind(')')
        && close > open
    {
        let name = raw[open + 1..close].to_string();
        let address = format!("{}{}", &raw[..open], &raw[close + 1..]);
        return (
            clean_display_name(&name),
            address.split_whitespace().collect(),
        );
    }

    (String::new(), raw.split_whitespace().collect())
}

/// Format a display name and address as `Name <address>`, quoting the name when needed.
pub fn format_address(name: &str, address: &str) -> String {
    if name.is_empty() {
        return address.to_string();
    }

    if name.contains(ADDRESS_SPECIALS) {
        let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{}\" <{}>", escaped, address)
    } else {
        format!("{} <{}>", name, address)
    }
}

fn clean_display_name(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    {
        Some(quoted) => quoted.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => collapsed,
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
