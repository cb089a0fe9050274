//! Concurrent discovery of every release under `.changes/releases`.
//!
//! Each release directory is resolved as a rayon task. Tasks append
//! to one mutex-guarded collector, which also keeps the first error seen.
//! All tasks run to completion before the collector is inspected; if any of
//! them failed, its error is returned and every resolved release is dropped.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::builders::entry::{ChangelogEntry, ReleaseEntry};
use crate::builders::resolver::resolve_release;
use crate::builders::store::FragmentStore;
use crate::core::error::{ChangelogError, ChangelogResult};
use crate::core::layout::ChangesLayout;

/// Everything the renderer needs: Unreleased entries and releases, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub unreleased: Vec<ChangelogEntry>,
    pub releases: Vec<ReleaseEntry>,
}

#[derive(Default)]
struct Collector {
    releases: Vec<ReleaseEntry>,
    first_error: Option<ChangelogError>,
}

impl Collector {
    fn record(&mut self, result: ChangelogResult<ReleaseEntry>) {
        match result {
            Ok(release) => self.releases.push(release),
            Err(err) => {
                if self.first_error.is_none() {
                    self.first_error = Some(err);
                } else {
                    warn!(error = %err, "discarding additional release error");
                }
            }
        }
    }
}

pub struct Aggregator<'a> {
    store: &'a dyn FragmentStore,
    layout: &'a ChangesLayout,
}

impl<'a> Aggregator<'a> {
    pub fn new(store: &'a dyn FragmentStore, layout: &'a ChangesLayout) -> Self {
        Self { store, layout }
    }

    pub fn aggregate(&self) -> ChangelogResult<Aggregate> {
        let unreleased = self.store.load_entries(&self.layout.unreleased_dir())?;
        let mut releases = self.resolve_all(&release_dirs(&self.layout.releases_dir())?)?;

        // `Version::cmp` also orders by build metadata, which SemVer precedence ignores.
        releases.sort_by(|a, b| b.version.cmp(&a.version));

        info!(
            unreleased = unreleased.len(),
            releases = releases.len(),
            "aggregated changelog fragments"
        );
        Ok(Aggregate {
            unreleased,
            releases,
        })
    }

    fn resolve_all(&self, dirs: &[PathBuf]) -> ChangelogResult<Vec<ReleaseEntry>> {
        debug!(releases = dirs.len(), "resolving releases");
        let collector = Mutex::new(Collector::default());

        // Blocks until every release has been resolved on rayon's shared pool.
        dirs.par_iter().for_each(|dir| {
            let result = resolve_release(self.store, dir);
            // Poisoned only if a worker panicked; rayon re-raises it on return.
            collector
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .record(result);
        });

        let collector = collector.into_inner().unwrap_or_else(|e| e.into_inner());
        match collector.first_error {
            Some(err) => Err(err),
            None => Ok(collector.releases),
        }
    }
}

/// Top-level release directories, sorted by name. A missing `releases` folder
/// means nothing has been released yet.
fn release_dirs(releases_dir: &Path) -> ChangelogResult<Vec<PathBuf>> {
    if !releases_dir.exists() {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    for item in fs::read_dir(releases_dir).map_err(|e| ChangelogError::io(releases_dir, e))? {
        let item = item.map_err(|e| ChangelogError::io(releases_dir, e))?;
        let path = item.path();
        // Follows symlinks; a dangling link fails the run instead of being skipped.
        if fs::metadata(&path).map_err(|e| ChangelogError::io(&path, e))?.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}
