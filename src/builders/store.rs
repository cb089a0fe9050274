use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::builders::entry::ChangelogEntry;
use crate::core::config::EntryFormat;
use crate::core::error::{ChangelogError, ChangelogResult};
use crate::core::layout;
use crate::core::version::ReleaseInfo;

/// Read and write access to entry files and release declarations.
///
/// Implementations must be shareable across the aggregator's worker threads.
pub trait FragmentStore: Sync {
    /// Loads every entry in `dir`, oldest first. A missing directory is empty.
    fn load_entries(&self, dir: &Path) -> ChangelogResult<Vec<ChangelogEntry>>;

    /// Reads the version declared by the `info` file inside `dir`.
    fn load_release_version(&self, dir: &Path) -> ChangelogResult<Version>;

    /// Records a new entry in `dir` under a fresh unique name.
    fn write_entry(&self, dir: &Path, entry: &ChangelogEntry) -> ChangelogResult<PathBuf>;
}

/// Stores fragments as individual files on disk.
#[derive(Debug, Clone, Copy)]
pub struct FileStore {
    format: EntryFormat,
}

impl FileStore {
    pub fn new(format: EntryFormat) -> Self {
        Self { format }
    }

    fn is_entry_file(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_none_or(|n| n.starts_with('.'));
        if hidden {
            return false;
        }

        match (self.format, path.extension().and_then(|e| e.to_str())) {
            (EntryFormat::Yaml, Some("yaml" | "yml")) => true,
            (EntryFormat::Json, Some("json")) => true,
            _ => false,
        }
    }

    fn parse_entry(&self, path: &Path) -> ChangelogResult<ChangelogEntry> {
        let content = fs::read_to_string(path).map_err(|e| ChangelogError::io(path, e))?;

        let parsed: Result<ChangelogEntry, String> = match self.format {
            EntryFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            EntryFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        };
        let entry = parsed.map_err(|reason| ChangelogError::MalformedEntry {
            path: path.to_path_buf(),
            reason,
        })?;

        if entry.tags.is_empty() {
            return Err(ChangelogError::MalformedEntry {
                path: path.to_path_buf(),
                reason: "entry has no tags".to_string(),
            });
        }
        Ok(entry.dedup_tags())
    }

    fn serialize_entry(&self, entry: &ChangelogEntry) -> Result<String, String> {
        match self.format {
            EntryFormat::Yaml => serde_yaml::to_string(entry).map_err(|e| e.to_string()),
            EntryFormat::Json => serde_json::to_string_pretty(entry).map_err(|e| e.to_string()),
        }
    }

    /// Writes the `info` declaration for a release or pre-release directory.
    pub fn write_release_info(&self, dir: &Path, info: &ReleaseInfo) -> ChangelogResult<PathBuf> {
        let path = layout::info_path(dir, self.format);
        let content = match self.format {
            EntryFormat::Yaml => info.to_yaml(),
            EntryFormat::Json => info.to_json(),
        }
        .map_err(|reason| ChangelogError::MissingOrInvalidVersion {
            path: path.clone(),
            reason,
        })?;

        fs::create_dir_all(dir).map_err(|e| ChangelogError::io(dir, e))?;
        fs::write(&path, content).map_err(|e| ChangelogError::io(&path, e))?;
        Ok(path)
    }
}

impl FragmentStore for FileStore {
    fn load_entries(&self, dir: &Path) -> ChangelogResult<Vec<ChangelogEntry>> {
        if !dir.exists() {
            debug!(dir = %dir.display(), "entries directory absent, treating as empty");
            return Ok(Vec::new());
        }

        let mut named = Vec::new();
        for item in fs::read_dir(dir).map_err(|e| ChangelogError::io(dir, e))? {
            let item = item.map_err(|e| ChangelogError::io(dir, e))?;
            let path = item.path();
            if !self.is_entry_file(&path) {
                continue;
            }
            // Follows symlinks so linked entries are read like any other file.
            let metadata = fs::metadata(&path).map_err(|e| ChangelogError::io(&path, e))?;
            if !metadata.is_file() {
                continue;
            }

            let entry = self.parse_entry(&path)?;
            named.push((item.file_name(), entry));
        }

        // Equal timestamps fall back to file name so output never depends on
        // directory enumeration order.
        named.sort_by(|(name_a, a), (name_b, b)| {
            a.created_at.cmp(&b.created_at).then_with(|| name_a.cmp(name_b))
        });

        debug!(dir = %dir.display(), count = named.len(), "loaded entries");
        Ok(named.into_iter().map(|(_, entry)| entry).collect())
    }

    fn load_release_version(&self, dir: &Path) -> ChangelogResult<Version> {
        let path = layout::info_path(dir, self.format);
        if !path.is_file() {
            return Err(ChangelogError::MissingOrInvalidVersion {
                path,
                reason: "info file not found".to_string(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| ChangelogError::io(&path, e))?;
        let info = match self.format {
            EntryFormat::Yaml => ReleaseInfo::from_yaml(&content),
            EntryFormat::Json => ReleaseInfo::from_json(&content),
        }
        .map_err(|reason| ChangelogError::MissingOrInvalidVersion {
            path: path.clone(),
            reason,
        })?;

        Ok(info.version)
    }

    fn write_entry(&self, dir: &Path, entry: &ChangelogEntry) -> ChangelogResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| ChangelogError::io(dir, e))?;

        let path = dir.join(format!("{}.{}", Uuid::new_v4(), self.format.extension()));
        let content = self
            .serialize_entry(entry)
            .map_err(|reason| ChangelogError::MalformedEntry {
                path: path.clone(),
                reason,
            })?;

        fs::write(&path, content).map_err(|e| ChangelogError::io(&path, e))?;
        debug!(path = %path.display(), "recorded entry");
        Ok(path)
    }
}
