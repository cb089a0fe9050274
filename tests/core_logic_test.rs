use changelog_fragments::builders::entry::ChangelogEntry;
use changelog_fragments::builders::store::{FileStore, FragmentStore};
use changelog_fragments::builders::writer::FileWriter;
use changelog_fragments::core::config::{ChangelogConfig, ConfigManager, ConfigProvider, EntryFormat};
use changelog_fragments::core::engine::ChangelogEngine;
use changelog_fragments::core::version::ReleaseInfo;
use chrono::{TimeZone, Utc};
use semver::Version;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_project(format: EntryFormat) -> (TempDir, ConfigManager) {
    let dir = tempfile::tempdir().unwrap();
    let config_manager = ConfigManager::new_at(dir.path().to_path_buf());
    config_manager.initialize().unwrap();

    let config = ChangelogConfig {
        format,
        ..ChangelogConfig::default()
    };
    config_manager.save_config(&config).unwrap();
    (dir, config_manager)
}

fn add_release(store: &FileStore, root: &Path, version: &str, description: &str) {
    let dir = root.join(".changes/releases").join(format!("v{version}"));
    store
        .write_release_info(&dir, &ReleaseInfo::new(Version::parse(version).unwrap()))
        .unwrap();
    let entry = ChangelogEntry::with_timestamp(
        vec!["Fixed".into()],
        description.into(),
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    );
    store.write_entry(&dir.join("entries"), &entry).unwrap();
}

#[test]
fn test_core_workflow() {
    let (td, config_manager) = setup_project(EntryFormat::Json);
    let root = td.path();
    let store = FileStore::new(EntryFormat::Json);

    // 1. Record unreleased work through the engine
    let engine = ChangelogEngine::new(&config_manager).unwrap();
    engine
        .add_entry(vec!["Added".into()], "Import from JSON".into())
        .unwrap();
    let written = fs::read_dir(root.join(".changes/Unreleased"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect::<Vec<_>>();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].extension().unwrap(), "json");

    // 2. Lay out releases out of order on disk
    add_release(&store, root, "1.0.0", "one");
    add_release(&store, root, "1.1.0", "one-one");
    add_release(&store, root, "0.9.0", "zero-nine");

    // 3. Generate
    engine.generate(&mut FileWriter::new()).unwrap();

    let changelog = fs::read_to_string(root.join("CHANGELOG.md")).unwrap();
    let headings: Vec<&str> = changelog
        .lines()
        .filter(|l| l.starts_with("## "))
        .collect();
    assert_eq!(
        headings,
        vec!["## [Unreleased]", "## [1.1.0]", "## [1.0.0]", "## [0.9.0]"]
    );
    assert!(changelog.contains("## [Unreleased]\n\n### Added\n- Import from JSON\n"));
    assert!(changelog.ends_with("## [0.9.0]\n\n### Fixed\n- zero-nine\n"));
}

#[test]
fn test_many_releases_resolve_concurrently() {
    let (td, config_manager) = setup_project(EntryFormat::Yaml);
    let root = td.path();
    let store = FileStore::new(EntryFormat::Yaml);

    for minor in 0..40 {
        add_release(&store, root, &format!("0.{minor}.0"), &format!("release {minor}"));
    }

    let engine = ChangelogEngine::new(&config_manager).unwrap();
    let aggregate = engine.aggregate().unwrap();

    let minors: Vec<u64> = aggregate.releases.iter().map(|r| r.version.minor).collect();
    assert_eq!(minors, (0..40).rev().collect::<Vec<u64>>());
    for release in &aggregate.releases {
        assert_eq!(release.entries.len(), 1);
        assert_eq!(release.entries[0].description, format!("release {}", release.version.minor));
    }
}

#[test]
fn test_entry_roundtrip_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(EntryFormat::Yaml);
    let entry = ChangelogEntry::new(vec!["Changed".into()], "Renamed the flag".into());

    store.write_entry(dir.path(), &entry).unwrap();
    let loaded = store.load_entries(dir.path()).unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].tags, entry.tags);
    assert_eq!(loaded[0].description, entry.description);
    assert_eq!(loaded[0].created_at, entry.created_at);
}
