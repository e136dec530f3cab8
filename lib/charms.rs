//! Charm directories on disk.

use crate::constants::{BZR_DIR, METADATA_FILE};
use crate::error::{CharmError, CharmResult};
use crate::node::Node;
use crate::proof::{ValidationResult, proof_dir};
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A directory holding a `metadata.yaml` manifest.
#[derive(Debug, Clone)]
pub struct Charm {
    path: PathBuf,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Charm {
    /// Open a charm, failing if the directory has no manifest.
    pub fn open(path: impl Into<PathBuf>) -> CharmResult<Self> {
        let charm = Self { path: path.into() };
        if !charm.is_charm() {
            return Err(CharmError::NotACharm(charm.path));
        }
        Ok(charm)
    }

    /// The charm root.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the directory holds a manifest file.
    pub fn is_charm(&self) -> bool {
        self.path.join(METADATA_FILE).is_file()
    }

    /// Parse the manifest.
    pub fn metadata(&self) -> CharmResult<Node> {
        let text = std::fs::read_to_string(self.path.join(METADATA_FILE))?;
        Ok(Node::parse(&text)?)
    }

    /// Proof the charm.
    pub fn proof(&self) -> ValidationResult {
        proof_dir(&self.path)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Names of the charms checked out under a directory, sorted.
///
/// A checkout is any subdirectory carrying a `.bzr` directory.
pub fn local_charms(dir: &Path) -> CharmResult<Vec<String>> {
    if !dir.is_dir() {
        return Err(CharmError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut charms = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().join(BZR_DIR).exists() {
            charms.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    charms.sort();

    tracing::debug!(dir = %dir.display(), count = charms.len(), "listed local charms");
    Ok(charms)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_requires_manifest() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Charm::open(dir.path()),
            Err(CharmError::NotACharm(_))
        ));

        std::fs::write(dir.path().join("metadata.yaml"), "name: foo\n").unwrap();
        let charm = Charm::open(dir.path()).unwrap();
        assert_eq!(
            charm.metadata().unwrap().get("name").and_then(Node::as_str),
            Some("foo")
        );
        assert!(!charm.proof().is_valid());
    }

    #[test]
    fn test_local_charms() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("wordpress/.bzr")).unwrap();
        std::fs::create_dir_all(dir.path().join("mysql/.bzr")).unwrap();
        std::fs::create_dir_all(dir.path().join("scratch")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        assert_eq!(local_charms(dir.path()).unwrap(), vec!["mysql", "wordpress"]);
    }

    #[test]
    fn test_local_charms_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            local_charms(&dir.path().join("nope")),
            Err(CharmError::DirectoryNotFound(_))
        ));
    }
}
