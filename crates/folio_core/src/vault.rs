//! Vault snapshot: the documents and folders of a vault at one point in time.
//!
//! Paths inside a [`VaultTree`] are vault-relative and slash-delimited. The root
//! folder has the path `""`. There are no parent pointers; folder membership is
//! derived from path strings with [`parent_path`].

use std::collections::{BTreeSet, VecDeque};
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::{FolioError, Result};
use crate::fs::AsyncFileSystem;

/// A leaf node in the vault.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Document {
    /// Vault-relative path, e.g. `Projects/Notes.md`
    pub path: String,
    /// File name with extension, e.g. `Notes.md`
    pub name: String,
    /// File name without extension, e.g. `Notes`
    pub basename: String,
}

impl Document {
    /// Build a document from its vault-relative path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_name(&path).to_string();
        let basename = match name.rfind('.') {
            Some(idx) if idx > 0 => name[..idx].to_string(),
            _ => name.clone(),
        };
        Self {
            path,
            name,
            basename,
        }
    }

    /// Path of the folder containing this document.
    pub fn parent_path(&self) -> &str {
        parent_path(&self.path)
    }

    /// Whether this is a markdown document.
    pub fn is_markdown(&self) -> bool {
        self.name.len() > self.basename.len()
            && self.name[self.basename.len()..].eq_ignore_ascii_case(".md")
    }
}

/// Substring before the last `/`, or `""` for top-level paths.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Last path segment.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Join a folder path and a child name.
pub fn join_path(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Convert an absolute store path into a vault-relative, slash-delimited path.
///
/// Returns `None` when `path` is not inside `root`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Resolve a vault-relative path against the vault root.
pub fn store_path(root: &Path, path: &str) -> PathBuf {
    if path.is_empty() {
        return root.to_path_buf();
    }
    path.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
}

/// A snapshot of every document and folder in a vault.
#[derive(Debug, Clone, Default)]
pub struct VaultTree {
    documents: Vec<Document>,
    folders: Vec<String>,
}

impl VaultTree {
    /// Build a snapshot from synthetic paths.
    ///
    /// Every ancestor folder of a document is added automatically; `extra_folders`
    /// adds folders that hold no documents.
    pub fn from_paths<D, F>(documents: D, extra_folders: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        let mut folders = BTreeSet::new();
        let mut docs = BTreeSet::new();

        for path in documents {
            let doc = Document::new(path);
            let mut parent = doc.parent_path();
            while !parent.is_empty() {
                folders.insert(parent.to_string());
                parent = parent_path(parent);
            }
            docs.insert(doc);
        }
        for folder in extra_folders {
            let folder: String = folder.into();
            let mut current = folder.as_str();
            while !current.is_empty() {
                folders.insert(current.to_string());
                current = parent_path(current);
            }
        }

        Self {
            documents: docs.into_iter().collect(),
            folders: folders.into_iter().collect(),
        }
    }

    /// Walk the store under `root` and snapshot it.
    ///
    /// Uses an explicit work queue rather than recursion. Hidden entries (names
    /// starting with `.`, such as `.git` or `.obsidian`) are skipped.
    pub async fn scan<FS: AsyncFileSystem>(fs: &FS, root: &Path) -> Result<Self> {
        let mut documents = Vec::new();
        let mut folders = Vec::new();
        let mut queue = VecDeque::from([root.to_path_buf()]);

        while let Some(dir) = queue.pop_front() {
            let entries = fs
                .list_entries(&dir)
                .await
                .map_err(|e| FolioError::DirRead {
                    path: dir.clone(),
                    source: e,
                })?;

            for entry in entries {
                let Some(relative) = relative_path(root, &entry) else {
                    continue;
                };
                if relative.is_empty() || file_name(&relative).starts_with('.') {
                    continue;
                }

                if fs.is_dir(&entry).await {
                    folders.push(relative);
                    queue.push_back(entry);
                } else {
                    documents.push(Document::new(relative));
                }
            }
        }

        documents.sort();
        folders.sort();
        log::debug!(
            "Scanned {} documents in {} folders under {:?}",
            documents.len(),
            folders.len(),
            root
        );

        Ok(Self { documents, folders })
    }

    /// All documents, sorted by path.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Markdown documents, sorted by path.
    pub fn markdown_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| d.is_markdown())
    }

    /// All folders except the root, sorted by path.
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    /// Immediate child folders of `folder`.
    pub fn child_folders<'a>(&'a self, folder: &'a str) -> impl Iterator<Item = &'a str> {
        self.folders
            .iter()
            .map(String::as_str)
            .filter(move |f| parent_path(f) == folder)
    }

    /// Markdown documents directly inside `folder`.
    pub fn documents_in<'a>(&'a self, folder: &'a str) -> impl Iterator<Item = &'a Document> {
        self.markdown_documents()
            .filter(move |d| d.parent_path() == folder)
    }

    /// Look up a document by path.
    pub fn document(&self, path: &str) -> Option<&Document> {
        self.documents
            .binary_search_by(|d| d.path.as_str().cmp(path))
            .ok()
            .map(|idx| &self.documents[idx])
    }

    /// Whether `folder` exists (the root always does).
    pub fn has_folder(&self, folder: &str) -> bool {
        folder.is_empty() || self.folders.binary_search_by(|f| f.as_str().cmp(folder)).is_ok()
    }
}
