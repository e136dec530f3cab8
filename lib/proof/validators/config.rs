//! `config.yaml` schema validation.

use crate::constants::CONFIG_FILE;
use crate::node::Node;
use crate::probe::Probe;
use std::collections::BTreeSet;
use std::fmt;

use super::super::result::ValidationResult;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Fields an option may declare.
pub const KNOWN_OPTION_KEYS: &[&str] = &["default", "description", "type"];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Declared type of a configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    String,
    Int,
    Float,
    Boolean,
}

/// A default value whose type disagrees with the declared option type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    /// Declared option type.
    pub expected: OptionType,

    /// Type of the default value as parsed.
    pub actual: &'static str,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl OptionType {
    /// Parse a type token. Returns `None` for anything unrecognized.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "string" => Some(OptionType::String),
            "int" => Some(OptionType::Int),
            "float" => Some(OptionType::Float),
            "boolean" => Some(OptionType::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::String => "string",
            OptionType::Int => "int",
            OptionType::Float => "float",
            OptionType::Boolean => "boolean",
        }
    }

    /// Check that a default value has exactly this type. No coercion is done:
    /// `1` is not a float and `true` is not an int.
    pub fn check(&self, value: &Node) -> Result<(), TypeMismatch> {
        let matches = matches!(
            (self, value),
            (OptionType::String, Node::String(_))
                | (OptionType::Int, Node::Int(_))
                | (OptionType::Float, Node::Float(_))
                | (OptionType::Boolean, Node::Bool(_))
        );
        if matches {
            Ok(())
        } else {
            Err(TypeMismatch {
                expected: *self,
                actual: value.type_name(),
            })
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate `config.yaml` if the charm ships one.
pub fn validate_config(probe: &dyn Probe, result: &mut ValidationResult) {
    if !probe.exists(CONFIG_FILE) || probe.is_dir(CONFIG_FILE) {
        result.warn("File config.yaml not found.");
        return;
    }

    let text = match probe.read_text(CONFIG_FILE) {
        Ok(text) => text,
        Err(e) => {
            result.err(format!("Cannot read config.yaml: {}", e));
            return;
        }
    };

    let config = match Node::parse(&text) {
        Ok(node) => node,
        Err(e) => {
            result.err(format!("Cannot parse config.yaml: {}", e));
            return;
        }
    };

    validate_config_node(&config, result);
}

/// Validate an already parsed `config.yaml` document.
pub fn validate_config_node(config: &Node, result: &mut ValidationResult) {
    let Some(entries) = config.as_mapping() else {
        result.err("config.yaml not parsed into a mapping.");
        return;
    };

    let Some(options) = config.get("options") else {
        result.err("config.yaml must have an \"options\" key.");
        return;
    };

    let ignored: BTreeSet<&str> = entries
        .iter()
        .map(|(k, _)| k.as_str())
        .filter(|k| *k != "options")
        .collect();
    if !ignored.is_empty() {
        result.warn(format!(
            "Ignored keys in config.yaml: {}",
            ignored.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    let Some(options) = options.as_mapping() else {
        result.err("config.yaml: options section is not parsed as a mapping");
        return;
    };

    for (name, option) in options {
        validate_option(name, option, result);
    }
}

fn validate_option(name: &str, option: &Node, result: &mut ValidationResult) {
    let Some(fields) = option.as_mapping() else {
        result.err(format!("config.yaml: data for option {} is not a mapping", name));
        return;
    };

    let present: BTreeSet<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
    let known: BTreeSet<&str> = KNOWN_OPTION_KEYS.iter().copied().collect();

    let missing: Vec<&str> = known.difference(&present).copied().collect();
    if !missing.is_empty() {
        result.warn(format!(
            "config.yaml: option {} does not have the keys: {}",
            name,
            missing.join(", ")
        ));
    }

    let unknown: Vec<&str> = present.difference(&known).copied().collect();
    if !unknown.is_empty() {
        result.warn(format!(
            "config.yaml: option {} has unknown keys: {}",
            name,
            unknown.join(", ")
        ));
    }

    if let Some(description) = option.get("description")
        && description.as_str().is_none()
    {
        result.warn(format!(
            "config.yaml: description of option {} should be a string",
            name
        ));
    }

    let declared = option.get("type");
    let option_type = match declared {
        None => Some(OptionType::String),
        Some(token) => token.as_str().and_then(OptionType::parse),
    };

    let Some(option_type) = option_type else {
        let token = declared.map(Node::to_string).unwrap_or_default();
        result.warn(format!(
            "config.yaml: option {} has an invalid type ({})",
            name, token
        ));
        return;
    };

    // A valid type with no default needs nothing further.
    if let Some(default) = option.get("default")
        && let Err(mismatch) = option_type.check(default)
    {
        result.err(format!(
            "config.yaml: type of option {} is specified as {}, but the type of the default value is {}",
            name, mismatch.expected, mismatch.actual
        ));
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
