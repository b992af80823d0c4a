//! Configuration types for folio.
//!
//! This module provides the [`Config`] struct which stores the user's index
//! settings. Configuration is persisted as TOML, either per vault
//! (`<vault>/.folio.toml`) or globally (`~/.config/folio/config.toml` on Unix).
//!
//! [`Config`] is plain data. [`IndexSettings`] is the compiled form the engine
//! runs against: patterns are compiled once, so matching never fails later.
//!
//! # Example
//!
//! ```ignore
//! use folio_core::config::{Config, IndexSettings};
//!
//! let config = Config::default();
//! let settings = IndexSettings::from_config(&config);
//! assert!(settings.is_index_name("00 - Projects"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::frontmatter::FrontmatterAttribute;
use crate::fs::AsyncFileSystem;
use crate::pattern::NamePattern;
use crate::region::RegionFormat;
use crate::render::{RenderOptions, SortOrder};

/// File name of the per-vault config file.
pub const VAULT_CONFIG_FILE: &str = ".folio.toml";

/// Placeholder replaced by the folder name in [`Config::index_filename_template`].
pub const FOLDER_NAME_PLACEHOLDER: &str = "{folderName}";

/// `Config` is the part of folio that the user can configure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Regex matched against document basenames to recognize index documents
    pub index_pattern: String,

    /// File name (without extension) for auto-created index documents
    pub index_filename_template: String,

    /// Alias shown for nested indexes, with a `{name}` placeholder
    pub nested_display_format: String,

    /// Regex removed once from nested index names before display
    pub strip_pattern: String,

    /// Sort each group of the listing by name
    pub sort_enabled: bool,

    /// Direction of the listing sort
    pub sort_order: SortOrder,

    /// Folder path prefixes that are never indexed or listed
    pub ignored_folders: Vec<String>,

    /// React to create/delete/rename notifications
    pub auto_update: bool,

    /// Create an index document for newly created folders
    pub auto_create_index: bool,

    /// How newly written Contents regions are delimited
    pub region_format: RegionFormat,

    /// Static properties injected into every index document's frontmatter.
    /// Kept last so TOML emits it as a trailing array of tables.
    pub frontmatter_attributes: Vec<FrontmatterAttribute>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_pattern: r"^\d{2} - ".to_string(),
            index_filename_template: format!("00 - {}", FOLDER_NAME_PLACEHOLDER),
            nested_display_format: "📁 {name}".to_string(),
            strip_pattern: r"^\d{2} - ".to_string(),
            sort_enabled: true,
            sort_order: SortOrder::Ascending,
            ignored_folders: Vec::new(),
            auto_update: true,
            auto_create_index: false,
            region_format: RegionFormat::Markers,
            frontmatter_attributes: Vec::new(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize the config as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load config from a specific path using an AsyncFileSystem.
    pub async fn load_from<FS: AsyncFileSystem>(fs: &FS, path: &Path) -> Result<Self> {
        let contents = fs
            .read_to_string(path)
            .await
            .map_err(|e| FolioError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::from_toml(&contents)
    }

    /// Save config to a specific path using an AsyncFileSystem.
    pub async fn save_to<FS: AsyncFileSystem>(&self, fs: &FS, path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs.create_dir_all(parent).await?;
        }

        let contents = self.to_toml()?;
        fs.write_file(path, &contents)
            .await
            .map_err(|e| FolioError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Resolve and load the config for a vault.
    ///
    /// Lookup order: `explicit` path, `<vault>/.folio.toml`, the global config
    /// file, then defaults. An explicit path that cannot be read is an error;
    /// the other locations are optional.
    pub async fn resolve<FS: AsyncFileSystem>(
        fs: &FS,
        vault: &Path,
        explicit: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(fs, path).await;
        }

        let vault_config = vault.join(VAULT_CONFIG_FILE);
        if fs.exists(&vault_config).await {
            log::debug!("Using vault config {:?}", vault_config);
            return Self::load_from(fs, &vault_config).await;
        }

        if let Ok(global) = Self::global_config_path()
            && fs.exists(&global).await
        {
            log::debug!("Using global config {:?}", global);
            return Self::load_from(fs, &global).await;
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Path of the global config file (e.g. `~/.config/folio/config.toml`).
    pub fn global_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("folio").join("config.toml"))
            .ok_or(FolioError::NoConfigDir)
    }
}

/// Compiled settings the reconciliation engine runs against.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    /// Recognizes index documents by basename
    pub index_pattern: NamePattern,
    /// File name template for auto-created indexes
    pub index_filename_template: String,
    /// Listing options
    pub render: RenderOptions,
    /// Ignored folder prefixes, without surrounding slashes
    pub ignored_folders: Vec<String>,
    /// Frontmatter attributes to inject
    pub frontmatter_attributes: Vec<FrontmatterAttribute>,
    /// React to tree mutation events
    pub auto_update: bool,
    /// Create indexes for new folders
    pub auto_create_index: bool,
    /// Format for written regions
    pub region_format: RegionFormat,
}

impl IndexSettings {
    /// Compile a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            index_pattern: NamePattern::compile(&config.index_pattern),
            index_filename_template: config.index_filename_template.clone(),
            render: RenderOptions {
                sort: config.sort_enabled,
                order: config.sort_order,
                strip: NamePattern::compile(&config.strip_pattern),
                display_format: config.nested_display_format.clone(),
            },
            ignored_folders: config
                .ignored_folders
                .iter()
                .map(|f| f.trim_matches('/').to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            frontmatter_attributes: config.frontmatter_attributes.clone(),
            auto_update: config.auto_update,
            auto_create_index: config.auto_create_index,
            region_format: config.region_format,
        }
    }

    /// Whether a basename identifies an index document.
    pub fn is_index_name(&self, basename: &str) -> bool {
        self.index_pattern.is_match(basename)
    }

    /// Index file name (with `.md`) for a folder called `folder_name`.
    ///
    /// A folder whose own name already matches the index pattern gets an index
    /// named after itself; otherwise the filename template is used.
    pub fn index_filename_for(&self, folder_name: &str) -> String {
        let stem = if self.is_index_name(folder_name) {
            folder_name.to_string()
        } else {
            self.index_filename_template
                .replace(FOLDER_NAME_PLACEHOLDER, folder_name)
        };
        format!("{}.md", stem)
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{InMemoryFileSystem, SyncToAsyncFs};
    use futures_lite::future::block_on;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config =
            Config::from_toml("sort_order = \"descending\"\nignored_folders = [\"Archive\"]\n")
                .unwrap();
        assert_eq!(config.sort_order, SortOrder::Descending);
        assert_eq!(config.ignored_folders, vec!["Archive"]);
        assert_eq!(config.index_pattern, r"^\d{2} - ");
        assert!(config.auto_update);
        assert_eq!(config.region_format, RegionFormat::Markers);
    }

    #[test]
    fn test_toml_round_trip_with_attributes() {
        let config = Config {
            frontmatter_attributes: vec![FrontmatterAttribute::new("type", "index")],
            region_format: RegionFormat::Heading,
            ..Config::default()
        };
        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml("sort_enabled = \"maybe\""),
            Err(FolioError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_vault_config() {
        let fs = SyncToAsyncFs::new(InMemoryFileSystem::with_files([(
            "vault/.folio.toml",
            "auto_create_index = true\n",
        )]));
        let config = block_on(Config::resolve(&fs, Path::new("vault"), None)).unwrap();
        assert!(config.auto_create_index);
    }

    #[test]
    fn test_resolve_explicit_missing_is_error() {
        let fs = SyncToAsyncFs::new(InMemoryFileSystem::new());
        let explicit = Some(Path::new("nope.toml"));
        let result = block_on(Config::resolve(&fs, Path::new("vault"), explicit));
        assert!(matches!(result, Err(FolioError::FileRead { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let fs = SyncToAsyncFs::new(InMemoryFileSystem::new());
        let path = Path::new("vault/.folio.toml");
        let config = Config {
            sort_enabled: false,
            ..Config::default()
        };
        block_on(config.save_to(&fs, path)).unwrap();
        assert_eq!(block_on(Config::load_from(&fs, path)).unwrap(), config);
    }

    #[test]
    fn test_index_filename_for() {
        let settings = IndexSettings::default();
        assert_eq!(settings.index_filename_for("Archive"), "00 - Archive.md");
        assert_eq!(settings.index_filename_for("03 - Work"), "03 - Work.md");
    }

    #[test]
    fn test_ignored_folders_are_normalized() {
        let config = Config {
            ignored_folders: vec!["/Archive/".to_string(), "".to_string()],
            ..Config::default()
        };
        assert_eq!(IndexSettings::from_config(&config).ignored_folders, vec!["Archive"]);
    }
}
