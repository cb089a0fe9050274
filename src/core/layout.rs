use std::path::{Path, PathBuf};

use crate::core::config::EntryFormat;

pub const CHANGES_DIR: &str = ".changes";
pub const CONFIG_FILE: &str = "config.toml";
pub const UNRELEASED_DIR: &str = "Unreleased";
pub const RELEASES_DIR: &str = "releases";
pub const ENTRIES_DIR: &str = "entries";
pub const INFO_STEM: &str = "info";

/// Resolves every path of the `.changes` tree for one project root.
#[derive(Debug, Clone)]
pub struct ChangesLayout {
    root: PathBuf,
}

impl ChangesLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn changes_dir(&self) -> PathBuf {
        self.root.join(CHANGES_DIR)
    }

    pub fn unreleased_dir(&self) -> PathBuf {
        self.changes_dir().join(UNRELEASED_DIR)
    }

    pub fn releases_dir(&self) -> PathBuf {
        self.changes_dir().join(RELEASES_DIR)
    }

    /// Output paths in the config are relative to the project root.
    pub fn output_path(&self, configured: &Path) -> PathBuf {
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            self.root.join(configured)
        }
    }
}

/// Path of the `info` declaration inside a release or pre-release directory.
pub fn info_path(dir: &Path, format: EntryFormat) -> PathBuf {
    dir.join(format!("{INFO_STEM}.{}", format.extension()))
}

/// Path of the `entries` folder inside a release or pre-release directory.
pub fn entries_dir(dir: &Path) -> PathBuf {
    dir.join(ENTRIES_DIR)
}

pub fn config_path_for(root: &Path) -> PathBuf {
    root.join(CHANGES_DIR).join(CONFIG_FILE)
}

/// Walks up from `start` until a directory holding `.changes/config.toml` is found.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;

    loop {
        if config_path_for(dir).exists() {
            return Some(dir.to_path_buf());
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return None,
        }
    }
}
