//! Update command handlers

use std::path::{Path, PathBuf};

use folio_core::fs::AsyncFileSystem;
use folio_core::reconcile::{FolderOutcome, ReconcileOutcome};
use folio_core::vault::relative_path;

use crate::cli::{CliReconciler, block_on};

/// Handle `folio update`.
/// Returns true on success, false on error
pub fn handle_update(reconciler: &CliReconciler, json: bool) -> bool {
    let summary = match block_on(reconciler.reconcile_all()) {
        Ok(summary) => summary,
        Err(e) if json => {
            if let Ok(out) = serde_json::to_string_pretty(&e.to_serializable()) {
                println!("{}", out);
            }
            return false;
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("✗ Could not serialize summary: {}", e);
                return false;
            }
        }
    } else if summary.failed > 0 {
        eprintln!("✗ {}", summary);
    } else {
        println!("✓ {}", summary);
    }

    summary.failed == 0
}

/// Handle `folio update-folder <path>`.
pub fn handle_update_folder(reconciler: &CliReconciler, path: &Path) -> bool {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };

    let Some(relative) = relative_path(reconciler.root(), &absolute) else {
        eprintln!(
            "✗ {} is not inside the vault {}",
            path.display(),
            reconciler.root().display()
        );
        return false;
    };

    let result = if block_on(reconciler.fs().is_dir(&absolute)) {
        block_on(reconciler.reconcile_folder(&relative))
    } else {
        block_on(reconciler.reconcile_folder_of(&relative))
    };

    match result {
        Ok(FolderOutcome::Reconciled {
            index,
            outcome: ReconcileOutcome::Updated,
        }) => {
            println!("✓ Updated {}", index);
            true
        }
        Ok(FolderOutcome::Reconciled {
            index,
            outcome: ReconcileOutcome::Unchanged,
        }) => {
            println!("✓ {} is up to date", index);
            true
        }
        Ok(FolderOutcome::NoIndex { folder }) => {
            let folder = if folder.is_empty() { "/" } else { folder.as_str() };
            println!("No index file found in {}", folder);
            true
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}

/// Handle `folio create-missing`.
pub fn handle_create_missing(reconciler: &CliReconciler) -> bool {
    match block_on(reconciler.create_missing_indexes()) {
        Ok(summary) => {
            for path in &summary.created {
                println!("✓ Created {}", path);
            }
            if summary.created.is_empty() {
                println!("Every folder already has an index file");
            }
            println!("✓ {}", summary.reconciled);
            summary.reconciled.failed == 0
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            false
        }
    }
}
