//! Config command handlers

use std::path::Path;

use folio_core::config::{Config, VAULT_CONFIG_FILE};
use folio_core::fs::AsyncFileSystem;

use crate::cli::{AsyncFs, block_on};

pub fn handle_config_command(
    fs: &AsyncFs,
    vault: &Path,
    explicit: Option<&Path>,
    init: bool,
) -> bool {
    if init {
        init_config(fs, vault)
    } else {
        show_config(fs, vault, explicit)
    }
}

/// Print the effective configuration and where it came from
fn show_config(fs: &AsyncFs, vault: &Path, explicit: Option<&Path>) -> bool {
    let config = match block_on(Config::resolve(fs, vault, explicit)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Could not load config: {}", e);
            return false;
        }
    };

    let vault_config = vault.join(VAULT_CONFIG_FILE);
    let source = match explicit {
        Some(path) => path.display().to_string(),
        None if block_on(fs.exists(&vault_config)) => vault_config.display().to_string(),
        None => match Config::global_config_path() {
            Ok(global) if block_on(fs.exists(&global)) => global.display().to_string(),
            _ => "defaults".to_string(),
        },
    };

    match config.to_toml() {
        Ok(toml) => {
            println!("# folio configuration ({})", source);
            println!("# vault: {}", vault.display());
            println!();
            print!("{}", toml);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Write a default `.folio.toml` into the vault
fn init_config(fs: &AsyncFs, vault: &Path) -> bool {
    let path = vault.join(VAULT_CONFIG_FILE);
    if block_on(fs.exists(&path)) {
        eprintln!("✗ {} already exists", path.display());
        return false;
    }

    match block_on(Config::default().save_to(fs, &path)) {
        Ok(()) => {
            println!("✓ Wrote {}", path.display());
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}
