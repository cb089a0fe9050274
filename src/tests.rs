#[cfg(test)]
mod tests {
    use crate::builders::renderer::{DISCLAIMER, TITLE};
    use crate::builders::writer::{DocumentWriter, FileWriter};
    use crate::core::config::{ChangelogConfig, ChangelogFile, ConfigManager, ConfigProvider};
    use crate::core::engine::ChangelogEngine;
    use crate::core::error::{ChangelogError, ChangelogResult};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn setup_project() -> (tempfile::TempDir, ConfigManager, PathBuf) {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let config_manager = ConfigManager::new_at(root.clone());
        config_manager.initialize().unwrap();
        (dir, config_manager, root)
    }

    fn write_release(root: &Path, name: &str, version: &str) -> PathBuf {
        let dir = root.join(".changes/releases").join(name);
        fs::create_dir_all(dir.join("entries")).unwrap();
        fs::write(dir.join("info.yaml"), format!("version: {version}\n")).unwrap();
        dir
    }

    fn write_entry(dir: &Path, name: &str, tags: &[&str], description: &str, at: &str) {
        fs::create_dir_all(dir).unwrap();
        let content = format!(
            "tags: [{}]\ndescription: {description}\ncreatedAtDate: {at}\n",
            tags.join(", ")
        );
        fs::write(dir.join(name), content).unwrap();
    }

    struct FailingWriter;

    impl DocumentWriter for FailingWriter {
        fn write(&mut self, path: &Path, _content: &str) -> ChangelogResult<()> {
            Err(ChangelogError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    #[test]
    fn test_empty_project_renders_header_only() {
        let (_dir, config_manager, root) = setup_project();
        let engine = ChangelogEngine::new(&config_manager).unwrap();

        engine.generate(&mut FileWriter::new()).unwrap();

        let content = fs::read_to_string(root.join("CHANGELOG.md")).unwrap();
        assert_eq!(content, format!("{TITLE}\n\n{DISCLAIMER}\n\n## [Unreleased]\n"));
    }

    #[test]
    fn test_full_document_layout() {
        let (_dir, config_manager, root) = setup_project();

        write_entry(
            &root.join(".changes/Unreleased"),
            "u1.yaml",
            &["Fixed"],
            "Handle empty input",
            "2024-03-01T10:00:00Z",
        );

        let release = write_release(&root, "1.0.0", "1.0.0");
        write_entry(&release.join("entries"), "f.yaml", &["Added"], "Stable API", "2024-02-01T00:00:00Z");
        let beta = release.join("beta");
        fs::create_dir_all(beta.join("entries")).unwrap();
        fs::write(beta.join("info.yaml"), "version: 1.0.0-beta\n").unwrap();
        write_entry(&beta.join("entries"), "b.yaml", &["Added"], "Beta feature", "2024-01-15T00:00:00Z");
        let alpha = release.join("alpha");
        fs::create_dir_all(alpha.join("entries")).unwrap();
        fs::write(alpha.join("info.yaml"), "version: 1.0.0-alpha\n").unwrap();
        write_entry(&alpha.join("entries"), "a.yaml", &["Fixed", "Added"], "Alpha work", "2024-01-20T00:00:00Z");

        let old = write_release(&root, "0.9.0", "0.9.0");
        write_entry(&old.join("entries"), "o.yaml", &["Security"], "Patch CVE", "2023-12-01T00:00:00Z");

        let engine = ChangelogEngine::new(&config_manager).unwrap();
        engine.generate(&mut FileWriter::new()).unwrap();

        let content = fs::read_to_string(root.join("CHANGELOG.md")).unwrap();
        let expected = format!(
            "{TITLE}\n\n{DISCLAIMER}\n\n\
             ## [Unreleased]\n\n### Fixed\n- Handle empty input\n\n\n\
             ## [1.0.0]\n\n### Added\n- Alpha work\n- Beta feature\n- Stable API\n\n### Fixed\n- Alpha work\n\n\n\
             ## [0.9.0]\n\n### Security\n- Patch CVE\n"
        );
        assert_eq!(content, expected);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let (_dir, config_manager, root) = setup_project();
        let unreleased = root.join(".changes/Unreleased");
        for i in 0..6 {
            write_entry(
                &unreleased,
                &format!("{i}.yaml"),
                &["Changed"],
                &format!("change {i}"),
                "2024-05-05T05:05:05Z",
            );
        }
        for minor in 0..5 {
            let dir = write_release(&root, &format!("r{minor}"), &format!("1.{minor}.0"));
            write_entry(&dir.join("entries"), "e.yaml", &["Added"], "thing", "2024-01-01T00:00:00Z");
        }

        let engine = ChangelogEngine::new(&config_manager).unwrap();
        engine.generate(&mut FileWriter::new()).unwrap();
        let first = fs::read(root.join("CHANGELOG.md")).unwrap();
        engine.generate(&mut FileWriter::new()).unwrap();
        let second = fs::read(root.join("CHANGELOG.md")).unwrap();

        assert_eq!(first, second);
        let text = String::from_utf8(first).unwrap();
        let bullets: Vec<&str> = text.lines().filter(|l| l.starts_with("- change")).collect();
        assert_eq!(bullets, (0..6).map(|i| format!("- change {i}")).collect::<Vec<_>>());
    }

    #[test]
    fn test_malformed_entry_leaves_outputs_untouched() {
        let (_dir, config_manager, root) = setup_project();
        let output = root.join("CHANGELOG.md");
        fs::write(&output, "previous contents\n").unwrap();

        let release = write_release(&root, "2.0.0", "2.0.0");
        fs::write(release.join("entries/bad.yaml"), "tags: [Added]\n").unwrap();

        let engine = ChangelogEngine::new(&config_manager).unwrap();
        let err = engine.generate(&mut FileWriter::new()).unwrap_err();

        assert!(matches!(err, ChangelogError::MalformedEntry { .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous contents\n");
    }

    #[test]
    fn test_missing_release_version_fails() {
        let (_dir, config_manager, root) = setup_project();
        fs::create_dir_all(root.join(".changes/releases/orphan/entries")).unwrap();

        let engine = ChangelogEngine::new(&config_manager).unwrap();
        assert!(matches!(
            engine.render(),
            Err(ChangelogError::MissingOrInvalidVersion { .. })
        ));
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let (_dir, config_manager, _root) = setup_project();
        let engine = ChangelogEngine::new(&config_manager).unwrap();
        assert!(matches!(
            engine.generate(&mut FailingWriter),
            Err(ChangelogError::Io { .. })
        ));
    }

    #[test]
    fn test_per_file_tag_filters() {
        let (_dir, config_manager, root) = setup_project();
        let mut config = ChangelogConfig::default();
        config.files = vec![
            ChangelogFile {
                identifier: "public".into(),
                path: PathBuf::from("CHANGELOG.md"),
                tags: vec!["Fixed".into(), "Added".into()],
                footer_text: None,
            },
            ChangelogFile {
                identifier: "security".into(),
                path: PathBuf::from("docs/SECURITY-CHANGES.md"),
                tags: vec!["Security".into()],
                footer_text: Some("Report issues to the security team.".into()),
            },
        ];
        config_manager.save_config(&config).unwrap();

        let unreleased = root.join(".changes/Unreleased");
        write_entry(&unreleased, "1.yaml", &["Added"], "New flag", "2024-01-01T00:00:00Z");
        write_entry(&unreleased, "2.yaml", &["Fixed"], "Off by one", "2024-01-02T00:00:00Z");
        write_entry(&unreleased, "3.yaml", &["Security"], "Escape input", "2024-01-03T00:00:00Z");

        let engine = ChangelogEngine::new(&config_manager).unwrap();
        let written = engine.generate(&mut FileWriter::new()).unwrap();
        assert_eq!(written.len(), 2);

        let public = fs::read_to_string(root.join("CHANGELOG.md")).unwrap();
        assert!(public.find("### Fixed").unwrap() < public.find("### Added").unwrap());
        assert!(!public.contains("Escape input"));

        let security = fs::read_to_string(root.join("docs/SECURITY-CHANGES.md")).unwrap();
        assert!(security.contains("### Security\n- Escape input"));
        assert!(!security.contains("New flag"));
        assert!(security.ends_with("\n\n\nReport issues to the security team.\n"));
    }

    #[test]
    fn test_add_entry_roundtrip() {
        let (_dir, config_manager, _root) = setup_project();
        let engine = ChangelogEngine::new(&config_manager).unwrap();

        let path = engine
            .add_entry(vec!["Added".into()], "  Export to CSV  ".into())
            .unwrap();
        assert_eq!(path.extension().unwrap(), "yaml");

        let aggregate = engine.aggregate().unwrap();
        assert_eq!(aggregate.unreleased.len(), 1);
        assert_eq!(aggregate.unreleased[0].description, "Export to CSV");
        assert_eq!(aggregate.unreleased[0].tags, vec!["Added"]);
    }

    #[test]
    fn test_add_entry_rejects_unknown_tag() {
        let (_dir, config_manager, root) = setup_project();
        let engine = ChangelogEngine::new(&config_manager).unwrap();

        let err = engine
            .add_entry(vec!["Nope".into()], "Whatever".into())
            .unwrap_err();
        assert!(matches!(err, ChangelogError::MalformedEntry { .. }));
        assert_eq!(fs::read_dir(root.join(".changes/Unreleased")).unwrap().count(), 0);
    }
}
