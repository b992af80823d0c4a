//! Integration tests for index reconciliation

use std::path::Path;

use folio_core::config::{Config, IndexSettings};
use folio_core::events::VaultEvent;
use folio_core::fs::{FileSystem, InMemoryFileSystem, RealFileSystem, SyncToAsyncFs};
use folio_core::reconcile::{FolderOutcome, ReconcileOutcome, Reconciler};
use folio_core::region::{END_MARKER, RegionFormat, START_MARKER};
use futures_lite::future::block_on;

fn in_memory(
    files: &[(&str, &str)],
    config: &Config,
) -> (InMemoryFileSystem, Reconciler<SyncToAsyncFs<InMemoryFileSystem>>) {
    let fs = InMemoryFileSystem::with_files(files.iter().map(|(p, c)| (*p, *c)));
    let reconciler = Reconciler::new(
        SyncToAsyncFs::new(fs.clone()),
        "",
        IndexSettings::from_config(config),
    );
    (fs, reconciler)
}

fn read(fs: &InMemoryFileSystem, path: &str) -> String {
    fs.read_to_string(Path::new(path)).unwrap()
}

#[test]
fn test_nested_index_listed_before_siblings() {
    let (fs, rec) = in_memory(
        &[
            ("Projects/00 - Projects.md", ""),
            ("Projects/Notes.md", "some notes"),
            ("Projects/Sub/00 - Sub.md", ""),
        ],
        &Config::default(),
    );

    let outcome = block_on(rec.reconcile_folder("Projects")).unwrap();
    assert_eq!(
        outcome,
        FolderOutcome::Reconciled {
            index: "Projects/00 - Projects.md".to_string(),
            outcome: ReconcileOutcome::Updated,
        }
    );
    assert_eq!(
        read(&fs, "Projects/00 - Projects.md"),
        format!(
            "{}\n## Contents\n\n1. [[00 - Sub|📁 Sub]]\n2. [[Notes]]\n{}\n",
            START_MARKER, END_MARKER
        )
    );
}

#[test]
fn test_region_appended_after_existing_text() {
    let config = Config {
        region_format: RegionFormat::Heading,
        ..Config::default()
    };
    let original = "# Home\n\nWelcome to the vault.\n";
    let (fs, rec) = in_memory(&[("00 - Home.md", original), ("A.md", "")], &config);

    block_on(rec.reconcile_all()).unwrap();
    assert_eq!(
        read(&fs, "00 - Home.md"),
        "# Home\n\nWelcome to the vault.\n\n## Contents\n\n1. [[A]]\n"
    );
}

#[test]
fn test_new_folder_gets_index_and_parent_lists_it() {
    let config = Config {
        auto_create_index: true,
        region_format: RegionFormat::Heading,
        ..Config::default()
    };
    let (fs, rec) = in_memory(&[("00 - Home.md", ""), ("Inbox.md", "")], &config);
    fs.create_dir_all(Path::new("Archive")).unwrap();

    let updated = block_on(rec.handle_event(&VaultEvent::folder_created("Archive"))).unwrap();
    assert_eq!(updated, 2);

    assert_eq!(
        read(&fs, "Archive/00 - Archive.md"),
        "## Contents\n\n_No files found_\n"
    );
    assert_eq!(
        read(&fs, "00 - Home.md"),
        "## Contents\n\n1. [[00 - Archive|📁 Archive]]\n2. [[Inbox]]\n"
    );
}

#[test]
fn test_new_folder_without_auto_create() {
    let (fs, rec) = in_memory(&[("00 - Home.md", "")], &Config::default());
    fs.create_dir_all(Path::new("Archive")).unwrap();

    block_on(rec.handle_event(&VaultEvent::folder_created("Archive"))).unwrap();
    assert!(!fs.exists(Path::new("Archive/00 - Archive.md")));
}

#[test]
fn test_whole_vault_pass_is_idempotent() {
    let (fs, rec) = in_memory(
        &[
            ("00 - Home.md", "---\ntitle: Home\n---\n# Home\n"),
            ("Journal/00 - Journal.md", "intro\n## Contents\nold\n## Footer\nbye\n"),
            ("Journal/2024.md", ""),
            ("Journal/Trips/00 - Trips.md", ""),
            ("Journal/Trips/Rome.md", ""),
        ],
        &Config {
            frontmatter_attributes: vec![folio_core::frontmatter::FrontmatterAttribute::new(
                "type", "index",
            )],
            region_format: RegionFormat::Heading,
            ..Config::default()
        },
    );

    let first = block_on(rec.reconcile_all()).unwrap();
    assert_eq!(first.examined, 3);
    assert_eq!(first.updated, 3);

    let indexes = [
        "00 - Home.md",
        "Journal/00 - Journal.md",
        "Journal/Trips/00 - Trips.md",
    ];
    let snapshot: Vec<String> = indexes.iter().map(|p| read(&fs, p)).collect();

    let second = block_on(rec.reconcile_all()).unwrap();
    assert_eq!(second.updated, 0);
    assert_eq!(second.to_string(), "All indexes are up to date");

    let after: Vec<String> = indexes.iter().map(|p| read(&fs, p)).collect();
    assert_eq!(snapshot, after);

    // Existing heading region is replaced in place, surrounding text kept
    assert_eq!(
        read(&fs, "Journal/00 - Journal.md"),
        "---\ntype: index\n---\nintro\n## Contents\n\n\
         1. [[00 - Trips|📁 Trips]]\n2. [[2024]]\n\n## Footer\nbye\n"
    );
    assert!(read(&fs, "00 - Home.md").starts_with("---\ntitle: Home\ntype: index\n---\n# Home\n"));
}

#[test]
fn test_ignored_folders_are_invisible() {
    let config = Config {
        ignored_folders: vec!["Templates".to_string()],
        auto_create_index: true,
        ..Config::default()
    };
    let (fs, rec) = in_memory(
        &[
            ("00 - Home.md", ""),
            ("Templates/00 - Templates.md", "untouched"),
            ("Templates/Daily.md", ""),
            ("Loose/note.md", ""),
        ],
        &config,
    );

    let summary = block_on(rec.create_missing_indexes()).unwrap();
    assert_eq!(summary.created, vec!["Loose/00 - Loose.md".to_string()]);
    assert_eq!(summary.reconciled.examined, 2);

    assert_eq!(read(&fs, "Templates/00 - Templates.md"), "untouched");
    let home = read(&fs, "00 - Home.md");
    assert!(home.contains("[[00 - Loose|📁 Loose]]"));
    assert!(!home.contains("Templates"));
}

#[test]
fn test_invalid_pattern_matches_literally() {
    let config = Config {
        index_pattern: "(index".to_string(),
        ..Config::default()
    };
    let (fs, rec) = in_memory(
        &[("A/(index) A.md", ""), ("A/note.md", ""), ("A/00 - A.md", "")],
        &config,
    );

    let summary = block_on(rec.reconcile_all()).unwrap();
    assert_eq!(summary.examined, 1);
    let text = read(&fs, "A/(index) A.md");
    assert!(text.contains("1. [[00 - A]]\n2. [[note]]"));
}

#[test]
fn test_real_filesystem_vault() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("Projects/Sub")).unwrap();
    std::fs::create_dir_all(root.join(".obsidian")).unwrap();
    std::fs::write(root.join("Projects/00 - Projects.md"), "# Projects\n").unwrap();
    std::fs::write(root.join("Projects/Notes.md"), "").unwrap();
    std::fs::write(root.join("Projects/Sub/00 - Sub.md"), "").unwrap();
    std::fs::write(root.join(".obsidian/00 - Hidden.md"), "").unwrap();

    let fs = SyncToAsyncFs::new(RealFileSystem);
    let config = block_on(Config::resolve(&fs, root, None)).unwrap();
    let rec = Reconciler::new(fs, root, IndexSettings::from_config(&config));

    let summary = block_on(rec.reconcile_all()).unwrap();
    assert_eq!(summary.examined, 2);
    assert_eq!(summary.updated, 2);

    let text = std::fs::read_to_string(root.join("Projects/00 - Projects.md")).unwrap();
    assert!(text.starts_with("# Projects\n\n"));
    assert!(text.contains("1. [[00 - Sub|📁 Sub]]\n2. [[Notes]]"));
    assert_eq!(
        std::fs::read_to_string(root.join(".obsidian/00 - Hidden.md")).unwrap(),
        ""
    );

    let again = block_on(rec.reconcile_all()).unwrap();
    assert_eq!(again.updated, 0);
}
