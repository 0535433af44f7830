use crate::fs::{DirEntry, FsProvider};
use std::fs;
use std::io;
use std::path::Path;

/// Provider backed by the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    pub fn new() -> Self {
        Self
    }
}

impl FsProvider for OsFs {
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().into_string().map_err(|raw| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("non UTF-8 entry name {:?} in {}", raw, path.display()),
                )
            })?;
            // Follow symlinks so a linked directory still reads as a child.
            let is_dir = fs::metadata(entry.path())?.is_dir();
            entries.push(if is_dir {
                DirEntry::directory(name)
            } else {
                DirEntry::file(name)
            });
        }
        Ok(entries)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        match fs::remove_dir_all(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::EntryKind;
    use tempfile::TempDir;

    #[test]
    fn test_list_partitions_kinds() {
        let temp = TempDir::new().unwrap();
        let fs = OsFs::new();
        fs.create_dir(&temp.path().join("child")).unwrap();
        fs.create_file(&temp.path().join("QQ==.0")).unwrap();

        let mut entries = fs.list(temp.path()).unwrap();
        entries.sort();
        assert_eq!(
            entries,
            vec![DirEntry::file("QQ==.0"), DirEntry::directory("child")]
        );
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    #[test]
    fn test_remove_all_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        OsFs::new().remove_all(&temp.path().join("missing")).unwrap();
    }

    #[test]
    fn test_create_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("SGVsbG8h.0");
        OsFs::new().create_file(&path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_list_missing_fails() {
        let temp = TempDir::new().unwrap();
        let err = OsFs::new().list(&temp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
