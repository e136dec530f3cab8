//! Read-only filesystem access for proofing a charm.
//!
//! All paths are relative to the charm root. The probe never decides the
//! severity of a missing file; validators translate absence into diagnostics.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Read-only view of a charm directory.
pub trait Probe {
    /// Returns true if a file or directory exists at the relative path.
    fn exists(&self, relative: &str) -> bool;

    /// Returns true if a directory exists at the relative path.
    fn is_dir(&self, relative: &str) -> bool;

    /// Returns true if the owner-execute permission bit is set.
    fn is_executable(&self, relative: &str) -> bool;

    /// Read a file as raw bytes.
    fn read_bytes(&self, relative: &str) -> io::Result<Vec<u8>>;

    /// Names of the entries directly under the charm root, sorted.
    fn list_root(&self) -> io::Result<Vec<String>>;

    /// Read a file as UTF-8 text.
    fn read_text(&self, relative: &str) -> io::Result<String> {
        let bytes = self.read_bytes(relative)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Probe backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskProbe {
    root: PathBuf,
}

/// Probe backed by an in-memory tree, for fixtures that need no real filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryProbe {
    files: BTreeMap<String, MemoryFile>,
    dirs: BTreeSet<String>,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    content: Vec<u8>,
    executable: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DiskProbe {
    /// Create a probe rooted at the given charm directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The charm root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

impl MemoryProbe {
    /// Create an empty in-memory charm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a non-executable file.
    pub fn with_file(mut self, relative: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(relative, content.into(), false);
        self
    }

    /// Add a file with the owner-execute bit set.
    pub fn with_executable(mut self, relative: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(relative, content.into(), true);
        self
    }

    /// Add an empty directory.
    pub fn with_dir(mut self, relative: &str) -> Self {
        self.add_parents(relative);
        self.dirs.insert(normalize(relative));
        self
    }

    fn insert(&mut self, relative: &str, content: Vec<u8>, executable: bool) {
        self.add_parents(relative);
        self.files.insert(
            normalize(relative),
            MemoryFile {
                content,
                executable,
            },
        );
    }

    fn add_parents(&mut self, relative: &str) {
        let relative = normalize(relative);
        let mut end = 0;
        while let Some(pos) = relative[end..].find('/') {
            end += pos;
            self.dirs.insert(relative[..end].to_string());
            end += 1;
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Probe for DiskProbe {
    fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    fn is_dir(&self, relative: &str) -> bool {
        self.path(relative).is_dir()
    }

    #[cfg(unix)]
    fn is_executable(&self, relative: &str) -> bool {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(self.path(relative))
            .map(|m| m.permissions().mode() & 0o100 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, relative: &str) -> bool {
        self.path(relative).is_file()
    }

    fn read_bytes(&self, relative: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.path(relative))
    }

    fn list_root(&self) -> io::Result<Vec<String>> {
        let mut names = std::fs::read_dir(&self.root)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().to_string()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}

impl Probe for MemoryProbe {
    fn exists(&self, relative: &str) -> bool {
        let relative = normalize(relative);
        self.files.contains_key(&relative) || self.dirs.contains(&relative)
    }

    fn is_dir(&self, relative: &str) -> bool {
        self.dirs.contains(&normalize(relative))
    }

    fn is_executable(&self, relative: &str) -> bool {
        self.files
            .get(&normalize(relative))
            .map(|f| f.executable)
            .unwrap_or(false)
    }

    fn read_bytes(&self, relative: &str) -> io::Result<Vec<u8>> {
        let relative = normalize(relative);
        match self.files.get(&relative) {
            Some(file) => Ok(file.content.clone()),
            None if self.dirs.contains(&relative) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Is a directory",
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
        }
    }

    fn list_root(&self) -> io::Result<Vec<String>> {
        let names: BTreeSet<String> = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter_map(|p| p.split('/').next())
            .map(str::to_string)
            .collect();
        Ok(names.into_iter().collect())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn normalize(relative: &str) -> String {
    relative.trim_matches('/').replace('\\', "/")
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
