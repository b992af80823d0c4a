//! Vault mutation events.
//!
//! These are the change notifications the reconciler reacts to. Hosts (a
//! filesystem watcher, an editor integration) translate their own events into
//! [`VaultEvent`]s with vault-relative, slash-delimited paths and deliver them
//! one at a time.

use serde::{Deserialize, Serialize};

use crate::vault::parent_path;

/// A change to the vault tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VaultEvent {
    /// A document or folder was created.
    Created {
        /// Path of the new entry.
        path: String,
        /// Whether the entry is a folder.
        #[serde(default)]
        is_folder: bool,
    },

    /// A document or folder was deleted.
    Deleted {
        /// Path the entry had.
        path: String,
        /// Whether the entry was a folder.
        #[serde(default)]
        is_folder: bool,
    },

    /// A document or folder was renamed or moved.
    Renamed {
        /// Path before the rename.
        old_path: String,
        /// Path after the rename.
        new_path: String,
        /// Whether the entry is a folder.
        #[serde(default)]
        is_folder: bool,
    },
}

impl VaultEvent {
    /// Create a Created event for a document.
    pub fn file_created(path: impl Into<String>) -> Self {
        Self::Created {
            path: path.into(),
            is_folder: false,
        }
    }

    /// Create a Created event for a folder.
    pub fn folder_created(path: impl Into<String>) -> Self {
        Self::Created {
            path: path.into(),
            is_folder: true,
        }
    }

    /// Create a Deleted event.
    pub fn deleted(path: impl Into<String>, is_folder: bool) -> Self {
        Self::Deleted {
            path: path.into(),
            is_folder,
        }
    }

    /// Create a Renamed event.
    pub fn renamed(
        old_path: impl Into<String>,
        new_path: impl Into<String>,
        is_folder: bool,
    ) -> Self {
        Self::Renamed {
            old_path: old_path.into(),
            new_path: new_path.into(),
            is_folder,
        }
    }

    /// Whether the event concerns a folder.
    pub fn is_folder(&self) -> bool {
        match self {
            Self::Created { is_folder, .. }
            | Self::Deleted { is_folder, .. }
            | Self::Renamed { is_folder, .. } => *is_folder,
        }
    }

    /// The current path of the entry (the new path for renames).
    pub fn path(&self) -> &str {
        match self {
            Self::Created { path, .. } | Self::Deleted { path, .. } => path,
            Self::Renamed { new_path, .. } => new_path,
        }
    }

    /// Folders whose listing may have changed, without duplicates.
    pub fn affected_folders(&self) -> Vec<&str> {
        match self {
            Self::Created { path, .. } | Self::Deleted { path, .. } => vec![parent_path(path)],
            Self::Renamed {
                old_path, new_path, ..
            } => {
                let old_parent = parent_path(old_path);
                let new_parent = parent_path(new_path);
                if old_parent == new_parent {
                    vec![old_parent]
                } else {
                    vec![old_parent, new_parent]
                }
            }
        }
    }
}
