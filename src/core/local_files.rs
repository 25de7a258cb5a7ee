use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Entry returned from directory listing
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: OsString,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// A file's content and permission bits, read in one pass.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub permissions: fs::Permissions,
}

/// Trait for the file system operations a sanitize run needs
pub trait FileSystem {
    /// Snapshot the immediate children of `dir`, in the order the OS returns them.
    fn list(&self, dir: &Path) -> Result<Vec<Entry>>;
    fn read(&self, path: &Path) -> Result<FileRecord>;
    /// Write `record.content` back to `record.path` and restore `record.permissions`.
    fn write(&self, record: &FileRecord) -> Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

/// Local filesystem implementation
#[derive(Debug)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn list(&self, dir: &Path) -> Result<Vec<Entry>> {
        let entries =
            fs::read_dir(dir).map_err(|e| Error::directory_unreadable(dir, e.to_string()))?;

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::directory_unreadable(dir, e.to_string()))?;
            let path = entry.path();
            let is_dir = entry_is_dir(&entry, &path);
            result.push(Entry {
                name: entry.file_name(),
                path,
                is_dir,
            });
        }

        Ok(result)
    }

    fn read(&self, path: &Path) -> Result<FileRecord> {
        let mut file =
            fs::File::open(path).map_err(|e| Error::file_read_failed(path, e.to_string()))?;
        let permissions = file
            .metadata()
            .map_err(|e| Error::file_read_failed(path, e.to_string()))?
            .permissions();

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| Error::file_read_failed(path, e.to_string()))?;

        Ok(FileRecord {
            path: path.to_path_buf(),
            content,
            permissions,
        })
    }

    fn write(&self, record: &FileRecord) -> Result<()> {
        fs::write(&record.path, &record.content)
            .map_err(|e| Error::file_write_failed(&record.path, e.to_string()))?;

        fs::set_permissions(&record.path, record.permissions.clone())
            .map_err(|e| Error::file_write_failed(&record.path, e.to_string()))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to).map_err(|e| Error::file_rename_failed(from, to, e.to_string()))
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }
}

/// Symlinks count as directories when they resolve to one.
fn entry_is_dir(entry: &fs::DirEntry, path: &Path) -> bool {
    match entry.file_type() {
        Ok(ft) if ft.is_symlink() => fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false),
        Ok(ft) => ft.is_dir(),
        Err(_) => false,
    }
}

/// Convenience function to get local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_fs_write_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.txt");
        fs::write(&path, "hello world").unwrap();
        let fs = local();

        let mut record = fs.read(&path).unwrap();
        assert_eq!(record.content, b"hello world");

        record.content = b"hello".to_vec();
        fs.write(&record).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_local_fs_list() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let fs = local();

        let entries = fs.list(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);

        let dirs: Vec<_> = entries.iter().filter(|e| e.is_dir).collect();
        assert_eq!(dirs.len(), 1);
        assert_eq!(dirs[0].name, "sub");
    }

    #[test]
    fn test_local_fs_list_missing_dir() {
        let dir = tempdir().unwrap();
        let err = local().list(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.code.as_str(), "directory.unreadable");
    }

    #[test]
    fn test_local_fs_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = local().read(&dir.path().join("gone.txt")).unwrap_err();
        assert_eq!(err.code.as_str(), "file.read_failed");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_local_fs_rename() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("old.txt");
        let to = dir.path().join("new.txt");
        std::fs::write(&from, "x").unwrap();
        let fs = local();

        fs.rename(&from, &to).unwrap();
        assert!(!fs.exists(&from));
        assert!(fs.exists(&to));
    }

    #[cfg(unix)]
    #[test]
    fn test_local_fs_symlink_to_dir_is_dir() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = local().list(dir.path()).unwrap();
        assert!(entries.iter().all(|e| e.is_dir));
    }
}
