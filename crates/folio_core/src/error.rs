use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Unified error type for folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to list folder '{path}': {source}")]
    DirRead {
        path: PathBuf,
        source: std::io::Error,
    },

    // Frontmatter errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // Config errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    // Vault errors
    #[error("Vault not found at '{0}'")]
    VaultNotFound(PathBuf),
}

/// Result type alias for folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// A serializable representation of FolioError for machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
    /// Associated path (if applicable)
    pub path: Option<PathBuf>,
}

impl From<&FolioError> for SerializableError {
    fn from(err: &FolioError) -> Self {
        let kind = match err {
            FolioError::Io(_) => "Io",
            FolioError::FileRead { .. } => "FileRead",
            FolioError::FileWrite { .. } => "FileWrite",
            FolioError::DirRead { .. } => "DirRead",
            FolioError::Yaml(_) => "Yaml",
            FolioError::ConfigParse(_) => "ConfigParse",
            FolioError::ConfigSerialize(_) => "ConfigSerialize",
            FolioError::NoConfigDir => "NoConfigDir",
            FolioError::VaultNotFound(_) => "VaultNotFound",
        }
        .to_string();

        let path = match err {
            FolioError::FileRead { path, .. }
            | FolioError::FileWrite { path, .. }
            | FolioError::DirRead { path, .. }
            | FolioError::VaultNotFound(path) => Some(path.clone()),
            _ => None,
        };

        Self {
            kind,
            message: err.to_string(),
            path,
        }
    }
}

impl FolioError {
    /// Convert to a serializable representation
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }
}
