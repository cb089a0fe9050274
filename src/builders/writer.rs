use std::fs;
use std::path::Path;

use crate::core::error::{ChangelogError, ChangelogResult};

/// Destination for rendered documents. Every write replaces the previous content.
pub trait DocumentWriter {
    fn write(&mut self, path: &Path, content: &str) -> ChangelogResult<()>;
}

/// Writes documents to the filesystem, creating parent directories as needed.
pub struct FileWriter;

impl FileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentWriter for FileWriter {
    fn write(&mut self, path: &Path, content: &str) -> ChangelogResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ChangelogError::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| ChangelogError::io(path, e))
    }
}

/// Prints documents to stdout instead of touching the filesystem.
pub struct StdoutWriter;

impl DocumentWriter for StdoutWriter {
    fn write(&mut self, path: &Path, content: &str) -> ChangelogResult<()> {
        println!("==> {} <==", path.display());
        print!("{content}");
        Ok(())
    }
}
