//! `folio watch`: feed filesystem notifications to the reconciler.
//!
//! Notifications are handled one at a time, in arrival order. Content edits are
//! ignored; only creations, deletions and renames can change a listing, which
//! also keeps the reconciler's own writes from feeding back into it.

use std::path::Path;
use std::sync::mpsc;

use folio_core::events::VaultEvent;
use folio_core::vault::relative_path;
use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher, recommended_watcher};

use crate::cli::{CliReconciler, block_on};

pub fn handle_watch(reconciler: &CliReconciler) -> bool {
    let root = reconciler.root().to_path_buf();

    match block_on(reconciler.reconcile_all()) {
        Ok(summary) => println!("✓ {}", summary),
        Err(e) => {
            eprintln!("✗ {}", e);
            return false;
        }
    }

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = match recommended_watcher(tx) {
        Ok(watcher) => watcher,
        Err(e) => {
            eprintln!("✗ Could not start file watcher: {}", e);
            return false;
        }
    };
    if let Err(e) = watcher.watch(&root, RecursiveMode::Recursive) {
        eprintln!("✗ Could not watch {}: {}", root.display(), e);
        return false;
    }

    println!("Watching {} (Ctrl-C to stop)", root.display());

    for result in rx {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                log::warn!("File watcher error: {}", e);
                continue;
            }
        };

        for vault_event in translate(&root, &event, |path| path.is_dir()) {
            match block_on(reconciler.handle_event(&vault_event)) {
                Ok(0) => log::debug!("No index changed after {:?}", vault_event),
                Ok(updated) => println!(
                    "✓ {} → updated {} index file{}",
                    vault_event.path(),
                    updated,
                    if updated == 1 { "" } else { "s" }
                ),
                Err(e) => eprintln!("✗ {}", e),
            }
        }
    }

    true
}

/// Whether any segment of a vault-relative path is hidden.
fn is_hidden(path: &str) -> bool {
    path.split('/').any(|part| part.starts_with('.'))
}

/// Translate a notify event into vault events.
///
/// Paths outside the vault, the vault root itself and hidden paths are dropped.
fn translate(root: &Path, event: &Event, is_dir: impl Fn(&Path) -> bool) -> Vec<VaultEvent> {
    let relative = |path: &Path| {
        relative_path(root, path).filter(|rel| !rel.is_empty() && !is_hidden(rel))
    };

    match &event.kind {
        EventKind::Create(kind) => event
            .paths
            .iter()
            .filter_map(|path| {
                let rel = relative(path)?;
                let is_folder = match kind {
                    CreateKind::Folder => true,
                    CreateKind::File => false,
                    _ => is_dir(path),
                };
                Some(VaultEvent::Created {
                    path: rel,
                    is_folder,
                })
            })
            .collect(),

        EventKind::Remove(kind) => event
            .paths
            .iter()
            .filter_map(|path| {
                let rel = relative(path)?;
                Some(VaultEvent::deleted(rel, matches!(kind, RemoveKind::Folder)))
            })
            .collect(),

        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let [from, to] = event.paths.as_slice() else {
                return Vec::new();
            };
            let is_folder = is_dir(to);
            match (relative(from), relative(to)) {
                (Some(old), Some(new)) => vec![VaultEvent::renamed(old, new, is_folder)],
                // Moved out of view or into view
                (Some(old), None) => vec![VaultEvent::deleted(old, is_folder)],
                (None, Some(new)) => vec![VaultEvent::Created {
                    path: new,
                    is_folder,
                }],
                (None, None) => Vec::new(),
            }
        }

        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => event
            .paths
            .iter()
            .filter_map(|path| Some(VaultEvent::deleted(relative(path)?, false)))
            .collect(),

        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => event
            .paths
            .iter()
            .filter_map(|path| {
                Some(VaultEvent::Created {
                    path: relative(path)?,
                    is_folder: is_dir(path),
                })
            })
            .collect(),

        // Backends that cannot pair rename halves report each side on its own
        EventKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .filter_map(|path| {
                let rel = relative(path)?;
                if path.exists() {
                    Some(VaultEvent::Created {
                        path: rel,
                        is_folder: is_dir(path),
                    })
                } else {
                    Some(VaultEvent::deleted(rel, false))
                }
            })
            .collect(),

        _ => Vec::new(),
    }
}
