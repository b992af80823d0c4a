//! Reconciliation driver.
//!
//! A reconciliation pass for one index document scans its folder, renders the
//! listing, compares it with the listing already in the document and writes only
//! when they differ:
//!
//! ```text
//! Idle → Scanning → Rendering → Comparing → Writing | Skipped → Idle
//! ```
//!
//! The driver also reacts to [`VaultEvent`]s by re-running passes on the folders
//! an event touches, and can create or rename index documents as folders come
//! and go. Store conflicts while creating or renaming (the target already
//! exists) are logged and dropped: the next pass picks up whatever state the
//! vault is in, since every pass is idempotent.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::config::IndexSettings;
//! use folio_core::fs::{RealFileSystem, SyncToAsyncFs};
//! use folio_core::reconcile::Reconciler;
//!
//! let reconciler = Reconciler::new(
//!     SyncToAsyncFs::new(RealFileSystem),
//!     "/home/me/vault",
//!     IndexSettings::default(),
//! );
//! let summary = futures_lite::future::block_on(reconciler.reconcile_all())?;
//! println!("{}", summary);
//! ```

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::IndexSettings;
use crate::error::{FolioError, Result};
use crate::events::VaultEvent;
use crate::fs::AsyncFileSystem;
use crate::scanner::{
    find_folder_index, grandparent_folder, is_ignored, list_index_documents, list_nested_indexes,
    list_siblings,
};
use crate::vault::{Document, VaultTree, file_name, join_path, parent_path, store_path};
use crate::{frontmatter, region, render};

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileOutcome {
    /// The document was rewritten.
    Updated,
    /// The document already had the right contents; nothing was written.
    Unchanged,
}

/// Result of reconciling "the index of a folder".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FolderOutcome {
    /// The folder has no index document.
    NoIndex {
        /// The folder that was looked at.
        folder: String,
    },
    /// The folder's index was reconciled.
    Reconciled {
        /// Path of the index document.
        index: String,
        /// What the pass did.
        outcome: ReconcileOutcome,
    },
}

/// Aggregate result of a whole-vault pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Index documents found
    pub examined: usize,
    /// Index documents rewritten
    pub updated: usize,
    /// Index documents that could not be read or written
    pub failed: usize,
}

impl fmt::Display for ReconcileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.examined == 0 {
            write!(f, "No index files found")?;
        } else if self.updated == 0 {
            write!(f, "All indexes are up to date")?;
        } else if self.updated == 1 {
            write!(f, "Updated 1 index file")?;
        } else {
            write!(f, "Updated {} index files", self.updated)?;
        }
        if self.failed > 0 {
            write!(f, " ({} failed)", self.failed)?;
        }
        Ok(())
    }
}

/// Result of bulk index creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateSummary {
    /// Paths of the index documents created
    pub created: Vec<String>,
    /// The whole-vault pass run afterwards
    pub reconciled: ReconcileSummary,
}

/// Keeps the index documents of a vault in sync with its folders.
pub struct Reconciler<FS: AsyncFileSystem> {
    fs: FS,
    root: PathBuf,
    settings: IndexSettings,
}

impl<FS: AsyncFileSystem> Reconciler<FS> {
    /// Create a reconciler for the vault rooted at `root`.
    pub fn new(fs: FS, root: impl Into<PathBuf>, settings: IndexSettings) -> Self {
        Self {
            fs,
            root: root.into(),
            settings,
        }
    }

    /// The compiled settings in use.
    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    /// Get a reference to the underlying filesystem
    pub fn fs(&self) -> &FS {
        &self.fs
    }

    /// The vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot the vault as it is now.
    pub async fn snapshot(&self) -> Result<VaultTree> {
        VaultTree::scan(&self.fs, &self.root).await
    }

    fn is_ignored(&self, path: &str) -> bool {
        is_ignored(path, &self.settings.ignored_folders)
    }

    fn is_index_path(&self, path: &str) -> bool {
        let doc = Document::new(path);
        doc.is_markdown() && self.settings.is_index_name(&doc.basename)
    }

    /// Render the listing `index` should contain.
    pub fn render_listing(&self, tree: &VaultTree, index: &Document) -> String {
        let pattern = &self.settings.index_pattern;
        let ignored = &self.settings.ignored_folders;
        let siblings = list_siblings(tree, index, pattern, ignored);
        let nested = list_nested_indexes(tree, index, pattern, ignored);
        render::render(&siblings, &nested, &self.settings.render)
    }

    /// Run one reconciliation pass for `index`.
    pub async fn reconcile_index(
        &self,
        tree: &VaultTree,
        index: &Document,
    ) -> Result<ReconcileOutcome> {
        let path = store_path(&self.root, &index.path);
        let text = self
            .fs
            .read_to_string(&path)
            .await
            .map_err(|e| FolioError::FileRead {
                path: path.clone(),
                source: e,
            })?;

        let listing = self.render_listing(tree, index);
        let with_frontmatter =
            frontmatter::apply_attributes(&text, &self.settings.frontmatter_attributes)?;

        let current = region::extract(&text);
        if current.as_deref().map(str::trim) == Some(listing.trim()) && with_frontmatter == text {
            log::debug!("Index {} is up to date", index.path);
            return Ok(ReconcileOutcome::Unchanged);
        }

        if !region::has_region(&with_frontmatter) {
            log::debug!("Index {} has no Contents region, appending one", index.path);
        }
        let merged = region::merge(&with_frontmatter, &listing, self.settings.region_format);
        self.fs
            .write_file(&path, &merged)
            .await
            .map_err(|e| FolioError::FileWrite {
                path: path.clone(),
                source: e,
            })?;

        log::info!("Updated index {}", index.path);
        Ok(ReconcileOutcome::Updated)
    }

    /// Reconcile every index document in the vault.
    ///
    /// A document that cannot be read or written is counted as failed and the
    /// pass moves on.
    pub async fn reconcile_all(&self) -> Result<ReconcileSummary> {
        let tree = self.snapshot().await?;
        let indexes = list_index_documents(
            &tree,
            &self.settings.index_pattern,
            &self.settings.ignored_folders,
        );

        let mut summary = ReconcileSummary {
            examined: indexes.len(),
            ..ReconcileSummary::default()
        };
        for index in &indexes {
            match self.reconcile_index(&tree, index).await {
                Ok(ReconcileOutcome::Updated) => summary.updated += 1,
                Ok(ReconcileOutcome::Unchanged) => {}
                Err(e) => {
                    log::warn!("Skipping index {}: {}", index.path, e);
                    summary.failed += 1;
                }
            }
        }

        log::debug!("Whole-vault pass: {:?}", summary);
        Ok(summary)
    }

    /// Reconcile the index of `folder`, if it has one.
    pub async fn reconcile_folder(&self, folder: &str) -> Result<FolderOutcome> {
        let tree = self.snapshot().await?;
        self.reconcile_folder_in(&tree, folder).await
    }

    /// Reconcile the index of the folder containing `document`.
    pub async fn reconcile_folder_of(&self, document: &str) -> Result<FolderOutcome> {
        self.reconcile_folder(parent_path(document)).await
    }

    async fn reconcile_folder_in(&self, tree: &VaultTree, folder: &str) -> Result<FolderOutcome> {
        let index = find_folder_index(
            tree,
            folder,
            &self.settings.index_pattern,
            &self.settings.ignored_folders,
        );
        match index {
            Some(index) => {
                let outcome = self.reconcile_index(tree, &index).await?;
                Ok(FolderOutcome::Reconciled {
                    index: index.path,
                    outcome,
                })
            }
            None => Ok(FolderOutcome::NoIndex {
                folder: folder.to_string(),
            }),
        }
    }

    /// Reconcile the indexes of several folders against one fresh snapshot.
    ///
    /// Returns how many index documents were rewritten.
    async fn reconcile_folders(&self, folders: &[&str]) -> Result<usize> {
        let tree = self.snapshot().await?;
        let mut seen: Vec<&str> = Vec::new();
        let mut updated = 0;

        for &folder in folders {
            if seen.contains(&folder) || self.is_ignored(folder) {
                continue;
            }
            seen.push(folder);

            if let FolderOutcome::Reconciled {
                outcome: ReconcileOutcome::Updated,
                ..
            } = self.reconcile_folder_in(&tree, folder).await?
            {
                updated += 1;
            }
        }
        Ok(updated)
    }

    /// Create an empty index document in `folder`. Store conflicts are dropped.
    async fn create_index_file(&self, folder: &str) -> Option<String> {
        let name = self.settings.index_filename_for(file_name(folder));
        let path = join_path(folder, &name);

        match self
            .fs
            .create_new(&store_path(&self.root, &path), "")
            .await
        {
            Ok(()) => {
                log::info!("Created index {}", path);
                Some(path)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                log::debug!("Index {} already exists, not creating", path);
                None
            }
            Err(e) => {
                log::warn!("Could not create index {}: {}", path, e);
                None
            }
        }
    }

    /// Create an index document for `folder` unless it already has one.
    ///
    /// The root folder and ignored folders never get one. Returns the path of the
    /// created document.
    pub async fn ensure_folder_index(&self, folder: &str) -> Result<Option<String>> {
        if folder.is_empty() || self.is_ignored(folder) {
            return Ok(None);
        }

        let tree = self.snapshot().await?;
        let existing = find_folder_index(
            &tree,
            folder,
            &self.settings.index_pattern,
            &self.settings.ignored_folders,
        );
        if existing.is_some() {
            return Ok(None);
        }

        Ok(self.create_index_file(folder).await)
    }

    /// Create index documents for every folder that lacks one, then reconcile the vault.
    pub async fn create_missing_indexes(&self) -> Result<CreateSummary> {
        let tree = self.snapshot().await?;
        let mut created = Vec::new();

        for folder in tree.folders() {
            if self.is_ignored(folder) {
                continue;
            }
            let existing = find_folder_index(
                &tree,
                folder,
                &self.settings.index_pattern,
                &self.settings.ignored_folders,
            );
            if existing.is_none()
                && let Some(path) = self.create_index_file(folder).await
            {
                created.push(path);
            }
        }

        let reconciled = self.reconcile_all().await?;
        Ok(CreateSummary {
            created,
            reconciled,
        })
    }

    /// Rename a renamed folder's index document to follow the folder name.
    ///
    /// Only an index whose name is exactly the one derived from the old folder
    /// name is renamed, and never onto an existing document.
    async fn rename_folder_index(&self, old_folder: &str, new_folder: &str) -> Option<String> {
        let old_name = file_name(old_folder);
        let new_name = file_name(new_folder);
        if old_name == new_name || self.is_ignored(new_folder) {
            return None;
        }

        let current = join_path(new_folder, &self.settings.index_filename_for(old_name));
        let target = join_path(new_folder, &self.settings.index_filename_for(new_name));
        let current_path = store_path(&self.root, &current);
        let target_path = store_path(&self.root, &target);

        if !self.fs.exists(&current_path).await {
            log::debug!("No index named {} to rename", current);
            return None;
        }
        if self.fs.exists(&target_path).await {
            log::debug!("Not renaming {}: {} already exists", current, target);
            return None;
        }

        match self.fs.move_file(&current_path, &target_path).await {
            Ok(()) => {
                log::info!("Renamed index {} to {}", current, target);
                Some(target)
            }
            Err(e) => {
                log::warn!("Could not rename index {} to {}: {}", current, target, e);
                None
            }
        }
    }

    /// React to a change in the vault.
    ///
    /// Returns how many index documents were rewritten. Does nothing when
    /// automatic updates are turned off.
    pub async fn handle_event(&self, event: &VaultEvent) -> Result<usize> {
        if !self.settings.auto_update {
            log::debug!("Automatic updates are off, ignoring {:?}", event);
            return Ok(0);
        }
        if self.is_ignored(event.path()) {
            if let VaultEvent::Renamed { old_path, .. } = event
                && !self.is_ignored(old_path)
            {
                // Moved into an ignored folder: the old listing still needs the removal
                return self.reconcile_folders(&[parent_path(old_path)]).await;
            }
            return Ok(0);
        }

        log::debug!("Handling {:?}", event);
        let mut folders: Vec<&str> = Vec::new();

        match event {
            VaultEvent::Created {
                path,
                is_folder: true,
            } => {
                if self.settings.auto_create_index
                    && self.ensure_folder_index(path).await?.is_some()
                {
                    folders.push(path);
                }
                folders.push(parent_path(path));
            }
            VaultEvent::Created {
                path,
                is_folder: false,
            }
            | VaultEvent::Deleted {
                path,
                is_folder: false,
            } => {
                folders.push(parent_path(path));
                if self.is_index_path(path)
                    && let Some(grandparent) = grandparent_folder(path)
                {
                    folders.push(grandparent);
                }
            }
            VaultEvent::Deleted {
                path,
                is_folder: true,
            } => folders.push(parent_path(path)),
            VaultEvent::Renamed {
                old_path, new_path, ..
            } => {
                let is_folder = event.is_folder();
                if is_folder {
                    self.rename_folder_index(old_path, new_path).await;
                }
                folders.extend(event.affected_folders());
                if !is_folder && (self.is_index_path(old_path) || self.is_index_path(new_path)) {
                    folders.extend(grandparent_folder(old_path));
                    folders.extend(grandparent_folder(new_path));
                }
            }
        }

        self.reconcile_folders(&folders).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fs::{FileSystem, InMemoryFileSystem, SyncToAsyncFs};
    use crate::region::RegionFormat;
    use futures_lite::future::block_on;

    fn reconciler(
        files: &[(&str, &str)],
        config: Config,
    ) -> (InMemoryFileSystem, Reconciler<SyncToAsyncFs<InMemoryFileSystem>>) {
        let fs = InMemoryFileSystem::with_files(files.iter().map(|(p, c)| (*p, *c)));
        let reconciler = Reconciler::new(
            SyncToAsyncFs::new(fs.clone()),
            "",
            IndexSettings::from_config(&config),
        );
        (fs, reconciler)
    }

    fn heading_config() -> Config {
        Config {
            region_format: RegionFormat::Heading,
            ..Config::default()
        }
    }

    fn read(fs: &InMemoryFileSystem, path: &str) -> String {
        fs.read_to_string(Path::new(path)).unwrap()
    }

    #[test]
    fn test_reconcile_writes_then_skips() {
        let (_fs, rec) = reconciler(
            &[
                ("Projects/00 - Projects.md", "# Projects\n"),
                ("Projects/Notes.md", ""),
                ("Projects/Sub/00 - Sub.md", ""),
            ],
            heading_config(),
        );

        let tree = block_on(rec.snapshot()).unwrap();
        let index = Document::new("Projects/00 - Projects.md");

        let first = block_on(rec.reconcile_index(&tree, &index)).unwrap();
        assert_eq!(first, ReconcileOutcome::Updated);
        assert_eq!(
            read(rec.fs().inner(), "Projects/00 - Projects.md"),
            "# Projects\n\n## Contents\n\n1. [[00 - Sub|📁 Sub]]\n2. [[Notes]]\n"
        );

        let second = block_on(rec.reconcile_index(&tree, &index)).unwrap();
        assert_eq!(second, ReconcileOutcome::Unchanged);
    }

    #[test]
    fn test_stray_end_marker_settles_after_one_write() {
        let stray = format!("{}\nnotes\n", region::END_MARKER);
        let (fs, rec) = reconciler(
            &[("A/00 - A.md", stray.as_str()), ("A/n.md", "")],
            Config::default(),
        );

        assert_eq!(block_on(rec.reconcile_all()).unwrap().updated, 1);
        assert_eq!(block_on(rec.reconcile_all()).unwrap().updated, 0);

        let text = read(&fs, "A/00 - A.md");
        assert!(text.starts_with(&stray));
        assert_eq!(text.matches(region::START_MARKER).count(), 1);
        assert_eq!(region::extract(&text).as_deref(), Some("1. [[n]]"));
    }

    #[test]
    fn test_heading_format_keeps_user_text_after_markers() {
        let text = format!(
            "{}\n## Contents\n\n1. [[n]]\n{}\nMy own paragraph\n",
            region::START_MARKER,
            region::END_MARKER
        );
        let (fs, rec) = reconciler(
            &[("A/00 - A.md", text.as_str()), ("A/n.md", "")],
            heading_config(),
        );
        fs.write_file(Path::new("A/m.md"), "").unwrap();

        assert_eq!(block_on(rec.reconcile_all()).unwrap().updated, 1);
        assert_eq!(block_on(rec.reconcile_all()).unwrap().updated, 0);

        let updated = read(&fs, "A/00 - A.md");
        assert!(updated.ends_with(&format!("{}\nMy own paragraph\n", region::END_MARKER)));
        assert_eq!(region::extract(&updated).as_deref(), Some("1. [[m]]\n2. [[n]]"));
    }

    #[test]
    fn test_reconcile_all_summary() {
        let (_fs, rec) = reconciler(
            &[("00 - Home.md", ""), ("A/00 - A.md", ""), ("A/n.md", "")],
            Config::default(),
        );

        let summary = block_on(rec.reconcile_all()).unwrap();
        assert_eq!(summary.examined, 2);
        assert_eq!(summary.updated, 2);
        assert_eq!(summary.to_string(), "Updated 2 index files");

        let again = block_on(rec.reconcile_all()).unwrap();
        assert_eq!(again.updated, 0);
        assert_eq!(again.to_string(), "All indexes are up to date");
    }

    #[test]
    fn test_no_indexes_found() {
        let (_fs, rec) = reconciler(&[("note.md", "")], Config::default());
        let summary = block_on(rec.reconcile_all()).unwrap();
        assert_eq!(summary.to_string(), "No index files found");
    }

    #[test]
    fn test_reconcile_folder_without_index() {
        let (_fs, rec) = reconciler(&[("Loose/note.md", "")], Config::default());
        let outcome = block_on(rec.reconcile_folder_of("Loose/note.md")).unwrap();
        assert_eq!(
            outcome,
            FolderOutcome::NoIndex {
                folder: "Loose".to_string()
            }
        );
    }

    #[test]
    fn test_frontmatter_change_alone_triggers_write() {
        let (fs, rec) = reconciler(&[("A/00 - A.md", "")], heading_config());
        block_on(rec.reconcile_all()).unwrap();

        let config = Config {
            frontmatter_attributes: vec![frontmatter::FrontmatterAttribute::new("type", "index")],
            ..heading_config()
        };
        let rec = Reconciler::new(
            SyncToAsyncFs::new(fs.clone()),
            "",
            IndexSettings::from_config(&config),
        );
        let summary = block_on(rec.reconcile_all()).unwrap();
        assert_eq!(summary.updated, 1);
        assert_eq!(
            read(&fs, "A/00 - A.md"),
            "---\ntype: index\n---\n## Contents\n\n_No files found_\n"
        );
        assert_eq!(block_on(rec.reconcile_all()).unwrap().updated, 0);
    }

    #[test]
    fn test_document_created_updates_folder_index() {
        let (fs, rec) = reconciler(&[("A/00 - A.md", ""), ("A/new.md", "")], heading_config());
        let updated = block_on(rec.handle_event(&VaultEvent::file_created("A/new.md"))).unwrap();
        assert_eq!(updated, 1);
        assert!(read(&fs, "A/00 - A.md").contains("1. [[new]]"));
    }

    #[test]
    fn test_auto_update_off_ignores_events() {
        let config = Config {
            auto_update: false,
            ..Config::default()
        };
        let (fs, rec) = reconciler(&[("A/00 - A.md", ""), ("A/new.md", "")], config);
        let updated = block_on(rec.handle_event(&VaultEvent::file_created("A/new.md"))).unwrap();
        assert_eq!(updated, 0);
        assert_eq!(read(&fs, "A/00 - A.md"), "");
    }

    #[test]
    fn test_events_in_ignored_folders_are_dropped() {
        let config = Config {
            ignored_folders: vec!["Private".to_string()],
            ..Config::default()
        };
        let (fs, rec) = reconciler(&[("Private/00 - P.md", ""), ("Private/x.md", "")], config);
        let updated =
            block_on(rec.handle_event(&VaultEvent::file_created("Private/x.md"))).unwrap();
        assert_eq!(updated, 0);
        assert_eq!(read(&fs, "Private/00 - P.md"), "");
    }

    #[test]
    fn test_folder_rename_renames_template_index() {
        let (fs, rec) = reconciler(
            &[("00 - Home.md", ""), ("New/00 - Old.md", ""), ("New/n.md", "")],
            heading_config(),
        );
        block_on(rec.handle_event(&VaultEvent::renamed("Old", "New", true))).unwrap();

        assert!(!fs.exists(Path::new("New/00 - Old.md")));
        assert!(read(&fs, "New/00 - New.md").is_empty());
        assert!(read(&fs, "00 - Home.md").contains("1. [[00 - New|📁 New]]"));
    }

    #[test]
    fn test_folder_rename_leaves_custom_index_alone() {
        let (fs, rec) = reconciler(&[("New/01 - Custom.md", "")], heading_config());
        block_on(rec.handle_event(&VaultEvent::renamed("Old", "New", true))).unwrap();
        assert!(fs.exists(Path::new("New/01 - Custom.md")));
        assert!(!fs.exists(Path::new("New/00 - New.md")));
    }

    #[test]
    fn test_folder_rename_never_clobbers() {
        let (fs, rec) = reconciler(
            &[("New/00 - Old.md", "old"), ("New/00 - New.md", "mine")],
            heading_config(),
        );
        block_on(rec.handle_event(&VaultEvent::renamed("Old", "New", true))).unwrap();
        assert_eq!(read(&fs, "New/00 - Old.md"), "old");
        assert!(read(&fs, "New/00 - New.md").starts_with("mine"));
    }

    #[test]
    fn test_move_between_folders_updates_both() {
        let (fs, rec) = reconciler(
            &[
                ("A/00 - A.md", ""),
                ("B/00 - B.md", ""),
                ("A/stay.md", ""),
                ("B/moved.md", ""),
            ],
            heading_config(),
        );
        block_on(rec.reconcile_all()).unwrap();
        fs.write_file(
            Path::new("A/00 - A.md"),
            "## Contents\n\n1. [[moved]]\n2. [[stay]]\n",
        )
        .unwrap();

        let updated =
            block_on(rec.handle_event(&VaultEvent::renamed("A/moved.md", "B/moved.md", false)))
                .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(read(&fs, "A/00 - A.md"), "## Contents\n\n1. [[stay]]\n");
        assert!(read(&fs, "B/00 - B.md").contains("[[moved]]"));
    }

    #[test]
    fn test_deleted_index_updates_grandparent() {
        let (fs, rec) = reconciler(&[("00 - Home.md", ""), ("A/00 - A.md", "")], heading_config());
        block_on(rec.reconcile_all()).unwrap();
        assert!(read(&fs, "00 - Home.md").contains("[[00 - A|📁 A]]"));

        fs.delete_file(Path::new("A/00 - A.md")).unwrap();
        let updated =
            block_on(rec.handle_event(&VaultEvent::deleted("A/00 - A.md", false))).unwrap();
        assert_eq!(updated, 1);
        assert_eq!(read(&fs, "00 - Home.md"), "## Contents\n\n_No files found_\n");
    }

    #[test]
    fn test_unreadable_index_counts_as_failed() {
        use crate::fs::BoxFuture;
        use std::io;

        struct BrokenRead(SyncToAsyncFs<InMemoryFileSystem>);

        impl AsyncFileSystem for BrokenRead {
            fn read_to_string<'a>(&'a self, _path: &'a Path) -> BoxFuture<'a, io::Result<String>> {
                Box::pin(async { Err(io::Error::other("disk on fire")) })
            }
            fn write_file<'a>(&'a self, p: &'a Path, c: &'a str) -> BoxFuture<'a, io::Result<()>> {
                self.0.write_file(p, c)
            }
            fn create_new<'a>(&'a self, p: &'a Path, c: &'a str) -> BoxFuture<'a, io::Result<()>> {
                self.0.create_new(p, c)
            }
            fn delete_file<'a>(&'a self, p: &'a Path) -> BoxFuture<'a, io::Result<()>> {
                self.0.delete_file(p)
            }
            fn list_entries<'a>(&'a self, d: &'a Path) -> BoxFuture<'a, io::Result<Vec<PathBuf>>> {
                self.0.list_entries(d)
            }
            fn exists<'a>(&'a self, p: &'a Path) -> BoxFuture<'a, bool> {
                self.0.exists(p)
            }
            fn create_dir_all<'a>(&'a self, p: &'a Path) -> BoxFuture<'a, io::Result<()>> {
                self.0.create_dir_all(p)
            }
            fn is_dir<'a>(&'a self, p: &'a Path) -> BoxFuture<'a, bool> {
                self.0.is_dir(p)
            }
            fn move_file<'a>(&'a self, f: &'a Path, t: &'a Path) -> BoxFuture<'a, io::Result<()>> {
                self.0.move_file(f, t)
            }
        }

        let fs = InMemoryFileSystem::with_files([("A/00 - A.md", "")]);
        let rec = Reconciler::new(
            BrokenRead(SyncToAsyncFs::new(fs)),
            "",
            IndexSettings::default(),
        );
        let summary = block_on(rec.reconcile_all()).unwrap();
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.to_string(), "All indexes are up to date (1 failed)");
    }
}
