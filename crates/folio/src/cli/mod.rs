#![doc = include_str!("./README.md")]

/// Clap argument definitions
mod args;

/// Config command handlers
mod config;

/// `update`, `update-folder` and `create-missing` commands
mod update;

/// File watcher driving event reactions
mod watch;

use clap::Parser;
use std::path::{Path, PathBuf};

use folio_core::config::{Config, IndexSettings};
use folio_core::error::FolioError;
use folio_core::fs::{RealFileSystem, SyncToAsyncFs};
use folio_core::reconcile::Reconciler;

/// Type alias for the async filesystem used throughout the CLI.
/// Wraps RealFileSystem with SyncToAsyncFs for use with async-first core APIs.
pub type AsyncFs = SyncToAsyncFs<RealFileSystem>;

/// Type alias for Reconciler with the CLI's async filesystem.
pub type CliReconciler = Reconciler<AsyncFs>;

/// Helper to run async operations in sync context
fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures_lite::future::block_on(f)
}

pub use args::Cli;
use args::Commands;

/// Main entry point for the CLI
pub fn run_cli() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let fs = SyncToAsyncFs::new(RealFileSystem);
    let vault = match resolve_vault(cli.vault) {
        Some(vault) => vault,
        None => std::process::exit(1),
    };

    // Execute commands and track success
    let success = match cli.command {
        Commands::Update { json } => {
            let reconciler = build_reconciler(fs, &vault, cli.config.as_deref(), false);
            update::handle_update(&reconciler, json)
        }

        Commands::UpdateFolder { path } => {
            let reconciler = build_reconciler(fs, &vault, cli.config.as_deref(), false);
            update::handle_update_folder(&reconciler, &path)
        }

        Commands::CreateMissing => {
            let reconciler = build_reconciler(fs, &vault, cli.config.as_deref(), false);
            update::handle_create_missing(&reconciler)
        }

        // Watching is pointless without event reactions
        Commands::Watch => {
            let reconciler = build_reconciler(fs, &vault, cli.config.as_deref(), true);
            watch::handle_watch(&reconciler)
        }

        Commands::Config { init } => {
            config::handle_config_command(&fs, &vault, cli.config.as_deref(), init)
        }
    };

    if !success {
        std::process::exit(1);
    }
}

/// Install env_logger. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Make the vault path absolute and check that it is a directory.
fn resolve_vault(vault: Option<PathBuf>) -> Option<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let vault = match vault {
        Some(path) if path.is_absolute() => path,
        Some(path) => current_dir.join(path),
        None => current_dir,
    };

    if !vault.is_dir() {
        eprintln!("✗ {}", FolioError::VaultNotFound(vault));
        return None;
    }
    Some(vault)
}

/// Load the config and build a reconciler for the vault. Exits on a bad config.
fn build_reconciler(
    fs: AsyncFs,
    vault: &Path,
    explicit: Option<&Path>,
    force_auto_update: bool,
) -> CliReconciler {
    let mut config = match block_on(Config::resolve(&fs, vault, explicit)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Could not load config: {}", e);
            std::process::exit(1);
        }
    };
    if force_auto_update {
        config.auto_update = true;
    }

    Reconciler::new(fs, vault, IndexSettings::from_config(&config))
}
