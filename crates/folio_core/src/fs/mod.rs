//! Filesystem abstraction module.
//!
//! This module provides the `FileSystem` trait for abstracting the document store,
//! so the reconciliation engine can run against a real vault on disk or an
//! in-memory vault in tests.
//!
//! The engine itself is async-first and talks to an [`AsyncFileSystem`]; wrap a
//! synchronous implementation with [`SyncToAsyncFs`] to use it there.

mod async_fs;
mod memory;
mod native;

pub use async_fs::{AsyncFileSystem, BoxFuture, SyncToAsyncFs};
pub use memory::InMemoryFileSystem;
pub use native::RealFileSystem;

use std::io::Result;
use std::path::{Path, PathBuf};

/// Abstraction over the document store.
/// Send + Sync required so a store can be shared with a watcher thread.
pub trait FileSystem: Send + Sync {
    /// Reads the file content
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Overwrites a file, creating it if needed
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Creates a file ONLY if it doesn't exist.
    /// Should return an `AlreadyExists` error if the file exists.
    fn create_new(&self, path: &Path, content: &str) -> Result<()>;

    /// Deletes a file
    fn delete_file(&self, path: &Path) -> Result<()>;

    /// Lists the direct children (files and folders) of a folder
    fn list_entries(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Checks if a file or folder exists
    fn exists(&self, path: &Path) -> bool;

    /// Creates a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Checks if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Move/rename a file or folder from `from` to `to`.
    ///
    /// The rename is complete when this returns. Implementations should error if
    /// the source does not exist or if the destination already exists.
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
}

// Blanket implementation for references to FileSystem
impl<T: FileSystem> FileSystem for &T {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        (*self).read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        (*self).write_file(path, content)
    }

    fn create_new(&self, path: &Path, content: &str) -> Result<()> {
        (*self).create_new(path, content)
    }

    fn delete_file(&self, path: &Path) -> Result<()> {
        (*self).delete_file(path)
    }

    fn list_entries(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        (*self).list_entries(dir)
    }

    fn exists(&self, path: &Path) -> bool {
        (*self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (*self).create_dir_all(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (*self).is_dir(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        (*self).move_file(from, to)
    }
}
