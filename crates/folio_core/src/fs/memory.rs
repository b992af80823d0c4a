//! In-memory document store.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{Error, ErrorKind, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::FileSystem;

/// An in-memory filesystem implementation.
///
/// Clones share the same storage, so a test can keep a handle while the
/// reconciler owns another.
#[derive(Clone, Default)]
pub struct InMemoryFileSystem {
    /// Files stored as path -> content
    files: Arc<RwLock<BTreeMap<PathBuf, String>>>,
    /// Directories that exist (implicitly created when files are added)
    directories: Arc<RwLock<BTreeSet<PathBuf>>>,
}

impl InMemoryFileSystem {
    /// Create a new empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filesystem pre-populated with files
    pub fn with_files<P: Into<PathBuf>, S: Into<String>>(
        entries: impl IntoIterator<Item = (P, S)>,
    ) -> Self {
        let fs = Self::new();
        {
            let mut files = fs.files.write().unwrap();
            let mut dirs = fs.directories.write().unwrap();

            for (path, content) in entries {
                let path = Self::normalize_path(&path.into());
                Self::insert_ancestors(&mut dirs, &path);
                files.insert(path, content.into());
            }
        }
        fs
    }

    /// Helper to normalize paths (remove . and .. components where possible)
    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    components.pop();
                }
                c => components.push(c),
            }
        }
        components.iter().collect()
    }

    fn rebase(base: &Path, relative: &Path) -> PathBuf {
        if relative.as_os_str().is_empty() {
            base.to_path_buf()
        } else {
            base.join(relative)
        }
    }

    fn insert_ancestors(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
        let mut current = path;
        while let Some(parent) = current.parent() {
            if !parent.as_os_str().is_empty() {
                dirs.insert(parent.to_path_buf());
            }
            current = parent;
        }
    }
}

impl FileSystem for InMemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let normalized = Self::normalize_path(path);
        let files = self.files.read().unwrap();
        files
            .get(&normalized)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("File not found: {:?}", path)))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let normalized = Self::normalize_path(path);
        if let Some(parent) = normalized.parent() {
            self.create_dir_all(parent)?;
        }

        let mut files = self.files.write().unwrap();
        files.insert(normalized, content.to_string());
        Ok(())
    }

    fn create_new(&self, path: &Path, content: &str) -> Result<()> {
        let normalized = Self::normalize_path(path);
        {
            let files = self.files.read().unwrap();
            if files.contains_key(&normalized) {
                return Err(Error::new(
                    ErrorKind::AlreadyExists,
                    format!("File already exists: {:?}", path),
                ));
            }
        }
        self.write_file(&normalized, content)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        let normalized = Self::normalize_path(path);
        let mut files = self.files.write().unwrap();
        files
            .remove(&normalized)
            .map(|_| ())
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("File not found: {:?}", path)))
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let normalized = Self::normalize_path(dir);
        let files = self.files.read().unwrap();
        let dirs = self.directories.read().unwrap();

        let in_dir = |path: &&PathBuf| path.parent() == Some(normalized.as_path());
        Ok(dirs
            .iter()
            .filter(in_dir)
            .chain(files.keys().filter(in_dir))
            .cloned()
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        let normalized = Self::normalize_path(path);
        self.files.read().unwrap().contains_key(&normalized)
            || self.directories.read().unwrap().contains(&normalized)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let normalized = Self::normalize_path(path);
        if normalized.as_os_str().is_empty() {
            return Ok(());
        }
        let mut dirs = self.directories.write().unwrap();
        Self::insert_ancestors(&mut dirs, &normalized);
        dirs.insert(normalized);
        Ok(())
    }

    fn is_dir(&self, path: &Path) -> bool {
        let normalized = Self::normalize_path(path);
        normalized.as_os_str().is_empty() || self.directories.read().unwrap().contains(&normalized)
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        let from_norm = Self::normalize_path(from);
        let to_norm = Self::normalize_path(to);

        if from_norm == to_norm {
            return Ok(());
        }
        if !self.exists(&from_norm) {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!("Source not found: {:?}", from),
            ));
        }
        if self.exists(&to_norm) {
            return Err(Error::new(
                ErrorKind::AlreadyExists,
                format!("Destination already exists: {:?}", to),
            ));
        }

        let mut files = self.files.write().unwrap();
        let mut dirs = self.directories.write().unwrap();

        // A folder move relocates everything under it
        let moved_files: Vec<PathBuf> = files
            .keys()
            .filter(|p| p.starts_with(&from_norm))
            .cloned()
            .collect();
        for old_path in moved_files {
            if let Some(content) = files.remove(&old_path)
                && let Ok(relative) = old_path.strip_prefix(&from_norm)
            {
                files.insert(Self::rebase(&to_norm, relative), content);
            }
        }

        let moved_dirs: Vec<PathBuf> = dirs
            .iter()
            .filter(|d| d.starts_with(&from_norm))
            .cloned()
            .collect();
        for old_dir in moved_dirs {
            dirs.remove(&old_dir);
            if let Ok(relative) = old_dir.strip_prefix(&from_norm) {
                dirs.insert(Self::rebase(&to_norm, relative));
            }
        }

        Self::insert_ancestors(&mut dirs, &to_norm);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_fs_basic_operations() {
        let fs = InMemoryFileSystem::new();
        let path = Path::new("Projects/Notes.md");

        fs.write_file(path, "hello").unwrap();
        assert_eq!(fs.read_to_string(path).unwrap(), "hello");
        assert!(fs.is_dir(Path::new("Projects")));

        fs.delete_file(path).unwrap();
        assert!(!fs.exists(path));
        assert!(fs.read_to_string(path).is_err());
    }

    #[test]
    fn test_create_new_fails_when_present() {
        let fs = InMemoryFileSystem::with_files([("a.md", "x")]);
        let err = fs.create_new(Path::new("a.md"), "y").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fs.read_to_string(Path::new("a.md")).unwrap(), "x");
    }

    #[test]
    fn test_list_entries_is_one_level_deep() {
        let fs = InMemoryFileSystem::with_files([
            ("Projects/00 - Projects.md", ""),
            ("Projects/Sub/00 - Sub.md", ""),
            ("Top.md", ""),
        ]);

        let root = fs.list_entries(Path::new("")).unwrap();
        assert_eq!(root, vec![PathBuf::from("Projects"), PathBuf::from("Top.md")]);

        let projects = fs.list_entries(Path::new("Projects")).unwrap();
        assert_eq!(
            projects,
            vec![
                PathBuf::from("Projects/Sub"),
                PathBuf::from("Projects/00 - Projects.md"),
            ]
        );
    }

    #[test]
    fn test_move_folder_relocates_contents() {
        let fs =
            InMemoryFileSystem::with_files([("Old/00 - Old.md", "idx"), ("Old/Deep/n.md", "")]);

        fs.move_file(Path::new("Old"), Path::new("New")).unwrap();

        assert!(!fs.exists(Path::new("Old")));
        assert!(fs.is_dir(Path::new("New/Deep")));
        assert_eq!(fs.read_to_string(Path::new("New/00 - Old.md")).unwrap(), "idx");
    }

    #[test]
    fn test_move_refuses_existing_destination() {
        let fs = InMemoryFileSystem::with_files([("a.md", "a"), ("b.md", "b")]);
        let err = fs.move_file(Path::new("a.md"), Path::new("b.md")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }
}
