//! In-memory virtual filesystem.

use crate::fs::{DirEntry, EntryKind, FsProvider};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Provider that keeps the whole tree in memory.
///
/// The empty path and `/` are an implicit root directory that always exists.
#[derive(Debug, Default)]
pub struct MemoryFs {
    entries: RwLock<BTreeMap<PathBuf, EntryKind>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of files and directories stored.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn kind_of(&self, path: &Path) -> Option<EntryKind> {
        let path = normalize(path);
        if is_root(&path) {
            return Some(EntryKind::Directory);
        }
        self.entries.read().get(&path).copied()
    }

    fn check_parent(
        entries: &BTreeMap<PathBuf, EntryKind>,
        path: &Path,
    ) -> io::Result<()> {
        let parent = path.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "root has no parent")
        })?;
        if is_root(parent) {
            return Ok(());
        }
        match entries.get(parent) {
            Some(EntryKind::Directory) => Ok(()),
            Some(EntryKind::File) => Err(not_a_directory(parent)),
            None => Err(not_found(parent)),
        }
    }
}

impl FsProvider for MemoryFs {
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let path = normalize(path);
        let entries = self.entries.read();
        if !is_root(&path) {
            match entries.get(&path) {
                Some(EntryKind::Directory) => {}
                Some(EntryKind::File) => return Err(not_a_directory(&path)),
                None => return Err(not_found(&path)),
            }
        }

        let listed = entries
            .range(path.clone()..)
            .skip_while(|(p, _)| **p == path)
            .take_while(|(p, _)| p.starts_with(&path))
            .filter(|(p, _)| p.parent() == Some(path.as_path()))
            .filter_map(|(p, kind)| {
                p.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| DirEntry {
                        name: name.to_string(),
                        kind: *kind,
                    })
            })
            .collect();
        Ok(listed)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        if is_root(&path) {
            return Err(already_exists(&path));
        }
        let mut entries = self.entries.write();
        Self::check_parent(&entries, &path)?;
        if entries.contains_key(&path) {
            return Err(already_exists(&path));
        }
        entries.insert(path, EntryKind::Directory);
        Ok(())
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        let mut entries = self.entries.write();
        if is_root(&path) {
            entries.clear();
        } else {
            entries.retain(|p, _| !p.starts_with(&path));
        }
        Ok(())
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        if is_root(&path) {
            return Err(already_exists(&path));
        }
        let mut entries = self.entries.write();
        Self::check_parent(&entries, &path)?;
        match entries.get(&path) {
            Some(EntryKind::Directory) => Err(already_exists(&path)),
            Some(EntryKind::File) => Ok(()),
            None => {
                entries.insert(path, EntryKind::File);
                Ok(())
            }
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path == Path::new("/")
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{}: not a directory", path.display()),
    )
}

fn already_exists(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("{}: already exists", path.display()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut entries: Vec<DirEntry>) -> Vec<DirEntry> {
        entries.sort();
        entries
    }

    #[test]
    fn test_list_direct_children_only() {
        let fs = MemoryFs::new();
        fs.create_dir(Path::new("db")).unwrap();
        fs.create_dir(Path::new("db/user")).unwrap();
        fs.create_file(Path::new("db/user/QWxpY2U=.0")).unwrap();
        fs.create_file(Path::new("db/SGVsbG8h.0")).unwrap();
        // Sibling sharing a name prefix must not leak into the listing.
        fs.create_dir(Path::new("db2")).unwrap();

        assert_eq!(
            sorted(fs.list(Path::new("db")).unwrap()),
            vec![DirEntry::file("SGVsbG8h.0"), DirEntry::directory("user")]
        );
        assert_eq!(
            sorted(fs.list(Path::new("")).unwrap()),
            vec![DirEntry::directory("db"), DirEntry::directory("db2")]
        );
    }

    #[test]
    fn test_list_missing_is_not_found() {
        let fs = MemoryFs::new();
        let err = fs.list(Path::new("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_create_requires_parent() {
        let fs = MemoryFs::new();
        assert!(fs.create_dir(Path::new("a/b")).is_err());
        assert!(fs.create_file(Path::new("a/f.0")).is_err());
        fs.create_dir(Path::new("a")).unwrap();
        fs.create_dir(Path::new("a/b")).unwrap();
        fs.create_file(Path::new("a/f.0")).unwrap();
        assert_eq!(fs.len(), 3);
    }

    #[test]
    fn test_create_dir_twice_fails() {
        let fs = MemoryFs::new();
        fs.create_dir(Path::new("a")).unwrap();
        let err = fs.create_dir(Path::new("a")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_remove_all_subtree() {
        let fs = MemoryFs::new();
        fs.create_dir(Path::new("a")).unwrap();
        fs.create_dir(Path::new("a/b")).unwrap();
        fs.create_file(Path::new("a/b/x.0")).unwrap();
        fs.create_dir(Path::new("ab")).unwrap();

        fs.remove_all(Path::new("a")).unwrap();
        assert_eq!(fs.kind_of(Path::new("a")), None);
        assert_eq!(fs.kind_of(Path::new("a/b/x.0")), None);
        assert_eq!(fs.kind_of(Path::new("ab")), Some(EntryKind::Directory));

        fs.remove_all(Path::new("missing")).unwrap();
    }

    #[test]
    fn test_normalizes_current_dir() {
        let fs = MemoryFs::new();
        fs.create_dir(Path::new("./a")).unwrap();
        assert_eq!(fs.kind_of(Path::new("a")), Some(EntryKind::Directory));
    }
}
