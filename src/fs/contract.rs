use std::io;
use std::path::Path;

/// Whether a directory entry is a plain file or a subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    File,
    Directory,
}

/// One name returned by [`FsProvider::list`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Filesystem port used by the node engine.
///
/// Entry order from `list` carries no meaning. Callers own the provider
/// exclusively for the duration of one load or save.
pub trait FsProvider: Send + Sync {
    /// List the entries directly inside `path`.
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Create the directory `path`; its parent must exist.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove `path` and everything beneath it. Missing paths are not an error.
    fn remove_all(&self, path: &Path) -> io::Result<()>;

    /// Create a zero-length file at `path`.
    fn create_file(&self, path: &Path) -> io::Result<()>;
}
