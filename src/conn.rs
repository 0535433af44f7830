//! Connection: binds a database path to a filesystem provider.

use crate::error::NodeError;
use crate::fs::{EntryKind, FsProvider, OsFs};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A directory listing split into plain files and subdirectories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

/// Identity of one node's directory.
///
/// Holds nothing but the path and a shared handle to the provider; every
/// call goes straight to the provider.
#[derive(Clone)]
pub struct Connection {
    path: PathBuf,
    provider: Arc<dyn FsProvider>,
}

impl Connection {
    pub fn new(path: impl Into<PathBuf>, provider: Arc<dyn FsProvider>) -> Self {
        Self {
            path: path.into(),
            provider,
        }
    }

    /// Connection against the host filesystem.
    pub fn os(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Arc::new(OsFs::new()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn provider(&self) -> &Arc<dyn FsProvider> {
        &self.provider
    }

    /// Connection for the child directory named `key`.
    ///
    /// `key` must already be a valid single path segment.
    pub fn join(&self, key: &str) -> Connection {
        Connection {
            path: self.path.join(key),
            provider: Arc::clone(&self.provider),
        }
    }

    /// List this directory and partition the result.
    pub fn list(&self) -> Result<Listing, NodeError> {
        let entries = self
            .provider
            .list(&self.path)
            .map_err(|e| NodeError::io(&self.path, e))?;

        let mut listing = Listing::default();
        for entry in entries {
            match entry.kind {
                EntryKind::File => listing.files.push(entry.name),
                EntryKind::Directory => listing.dirs.push(entry.name),
            }
        }
        Ok(listing)
    }

    pub fn remove_all(&self) -> Result<(), NodeError> {
        self.provider
            .remove_all(&self.path)
            .map_err(|e| NodeError::io(&self.path, e))
    }

    pub fn create_dir(&self) -> Result<(), NodeError> {
        self.provider
            .create_dir(&self.path)
            .map_err(|e| NodeError::io(&self.path, e))
    }

    /// Create the empty file `name` inside this directory.
    pub fn create_file(&self, name: &str) -> Result<(), NodeError> {
        let path = self.path.join(name);
        self.provider
            .create_file(&path)
            .map_err(|e| NodeError::io(path, e))
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fs::MemoryFs;

    #[test]
    fn test_list_partitions_files_and_dirs() {
        let fs = Arc::new(MemoryFs::new());
        let conn = Connection::new("db", fs.clone());
        conn.create_dir().unwrap();
        conn.create_file("SGVsbG8h.0").unwrap();
        conn.join("user").create_dir().unwrap();

        let listing = conn.list().unwrap();
        assert_eq!(listing.files, vec!["SGVsbG8h.0".to_string()]);
        assert_eq!(listing.dirs, vec!["user".to_string()]);
    }

    #[test]
    fn test_join_appends_single_segment() {
        let conn = Connection::new("db", Arc::new(MemoryFs::new()));
        assert_eq!(conn.join("user").path(), Path::new("db/user"));
    }

    #[test]
    fn test_provider_errors_carry_path() {
        let conn = Connection::new("missing", Arc::new(MemoryFs::new()));
        let err = conn.list().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("missing"));
    }
}
