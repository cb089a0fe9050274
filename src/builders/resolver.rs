use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::builders::entry::ReleaseEntry;
use crate::builders::store::FragmentStore;
use crate::core::error::{ChangelogError, ChangelogResult};
use crate::core::layout;

/// Resolves one release directory into a `ReleaseEntry`.
///
/// Pre-release stages are the subdirectories other than `entries`. Their entries
/// come first, in ascending version order, followed by the release's own entries.
/// Stage versions are taken as declared and only ordered among themselves.
pub fn resolve_release(store: &dyn FragmentStore, release_dir: &Path) -> ChangelogResult<ReleaseEntry> {
    let version = store.load_release_version(release_dir)?;

    let mut stages: Vec<(Version, PathBuf)> = Vec::new();
    for stage_dir in prerelease_dirs(release_dir)? {
        let stage_version = store.load_release_version(&stage_dir)?;
        stages.push((stage_version, stage_dir));
    }
    stages.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut entries = Vec::new();
    for (stage_version, stage_dir) in &stages {
        let stage_entries = store.load_entries(&layout::entries_dir(stage_dir))?;
        debug!(%version, stage = %stage_version, count = stage_entries.len(), "pre-release stage");
        entries.extend(stage_entries);
    }
    entries.extend(store.load_entries(&layout::entries_dir(release_dir))?);

    Ok(ReleaseEntry { version, entries })
}

/// Subdirectories of a release that hold pre-release stages, sorted by name.
fn prerelease_dirs(release_dir: &Path) -> ChangelogResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for item in fs::read_dir(release_dir).map_err(|e| ChangelogError::io(release_dir, e))? {
        let item = item.map_err(|e| ChangelogError::io(release_dir, e))?;
        let path = item.path();
        let is_dir = fs::metadata(&path).map_err(|e| ChangelogError::io(&path, e))?.is_dir();

        if is_dir && item.file_name() != layout::ENTRIES_DIR {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}
