//! Charm manifest (`metadata.yaml`) model.

use crate::node::Node;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Top-level manifest keys that are understood.
pub const KNOWN_METADATA_KEYS: &[&str] = &[
    "name",
    "summary",
    "maintainer",
    "description",
    "categories",
    "subordinate",
    "provides",
    "requires",
    "peers",
    "format",
    "revision",
];

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Parsed manifest. Always backed by a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    entries: Vec<(String, Node)>,
}

/// The three relation blocks a manifest can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Provides,
    Requires,
    Peers,
}

/// Why a document could not be used as a manifest.
#[derive(Debug)]
pub enum ManifestError {
    /// The YAML itself is malformed.
    Parse(serde_yaml::Error),
    /// The document parsed but is not a mapping.
    NotAMapping(&'static str),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Manifest {
    /// Parse manifest text.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let node = Node::parse(text).map_err(ManifestError::Parse)?;
        Self::from_node(node)
    }

    /// Wrap an already decoded node.
    pub fn from_node(node: Node) -> Result<Self, ManifestError> {
        match node {
            Node::Mapping(entries) => Ok(Self { entries }),
            other => Err(ManifestError::NotAMapping(other.type_name())),
        }
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Look up a top-level key. A key with an explicit null value counts as absent.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    /// Returns true if the key is present, even with a null value.
    pub fn has_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Whether the charm declares itself a subordinate. Anything but a literal
    /// `true` counts as not subordinate.
    pub fn is_subordinate(&self) -> bool {
        self.get("subordinate").and_then(Node::as_bool).unwrap_or(false)
    }

    /// The relation block of the given kind, if declared.
    pub fn relations(&self, kind: RelationKind) -> Option<&Node> {
        self.get(kind.as_str())
    }
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::Provides,
        RelationKind::Requires,
        RelationKind::Peers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Provides => "provides",
            RelationKind::Requires => "requires",
            RelationKind::Peers => "peers",
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Parse(e) => write!(f, "{}", e),
            ManifestError::NotAMapping(kind) => write!(f, "expected a mapping, found {}", kind),
        }
    }
}

impl std::error::Error for ManifestError {}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
