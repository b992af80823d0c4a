#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Configuration options
pub mod config;

/// Error (common error types)
pub mod error;

/// Vault mutation events
pub mod events;

/// Filesystem abstraction
pub mod fs;

/// Frontmatter parsing and attribute injection
pub mod frontmatter;

/// Index name matching (regex with literal fallback)
pub mod pattern;

/// Reconciliation driver (keeps index documents in sync)
pub mod reconcile;

/// Managed region location and patching
pub mod region;

/// Contents listing rendering
pub mod render;

/// Folder scanning
pub mod scanner;

/// Vault snapshot and path helpers
pub mod vault;
