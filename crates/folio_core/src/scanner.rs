//! Folder scanning: which documents belong to which index.
//!
//! All functions here are pure over a [`VaultTree`] snapshot. Empty results are
//! normal (leaf folders, folders without an index) and never an error.

use crate::pattern::NamePattern;
use crate::vault::{Document, VaultTree, parent_path};

/// Returns true if `path` is one of `ignored_folders` or nested under one.
pub fn is_ignored(path: &str, ignored_folders: &[String]) -> bool {
    ignored_folders.iter().any(|folder| {
        let folder = folder.trim_matches('/');
        !folder.is_empty()
            && (path == folder
                || path
                    .strip_prefix(folder)
                    .is_some_and(|rest| rest.starts_with('/')))
    })
}

/// Every markdown document in the vault whose basename matches `pattern`.
pub fn list_index_documents(
    tree: &VaultTree,
    pattern: &NamePattern,
    ignored_folders: &[String],
) -> Vec<Document> {
    tree.markdown_documents()
        .filter(|doc| pattern.is_match(&doc.basename))
        .filter(|doc| !is_ignored(&doc.path, ignored_folders))
        .cloned()
        .collect()
}

/// Plain documents sharing the index document's folder.
///
/// Excludes the index itself and any other document matching `pattern`.
pub fn list_siblings(
    tree: &VaultTree,
    index: &Document,
    pattern: &NamePattern,
    ignored_folders: &[String],
) -> Vec<Document> {
    tree.documents_in(index.parent_path())
        .filter(|doc| doc.path != index.path)
        .filter(|doc| !pattern.is_match(&doc.basename))
        .filter(|doc| !is_ignored(&doc.path, ignored_folders))
        .cloned()
        .collect()
}

/// The index document of each immediate subfolder of the index document's folder.
///
/// Only one level deep: deeper indexes are listed by their own parent index.
pub fn list_nested_indexes(
    tree: &VaultTree,
    index: &Document,
    pattern: &NamePattern,
    ignored_folders: &[String],
) -> Vec<Document> {
    tree.child_folders(index.parent_path())
        .filter(|folder| !is_ignored(folder, ignored_folders))
        .filter_map(|folder| find_folder_index(tree, folder, pattern, ignored_folders))
        .collect()
}

/// The index document of `folder`, if it has one.
///
/// When several documents in the folder match, the smallest path wins.
pub fn find_folder_index(
    tree: &VaultTree,
    folder: &str,
    pattern: &NamePattern,
    ignored_folders: &[String],
) -> Option<Document> {
    if is_ignored(folder, ignored_folders) {
        return None;
    }
    // documents_in yields in path order
    tree.documents_in(folder)
        .find(|doc| pattern.is_match(&doc.basename) && !is_ignored(&doc.path, ignored_folders))
        .cloned()
}

/// The folder whose index lists `path` as a nested index, i.e. the grandparent folder.
///
/// `None` for top-level documents, which have no enclosing index folder above them.
pub fn grandparent_folder(path: &str) -> Option<&str> {
    let parent = parent_path(path);
    if parent.is_empty() {
        None
    } else {
        Some(parent_path(parent))
    }
}
