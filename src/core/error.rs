use std::path::PathBuf;
use thiserror::Error;

/// Error kinds produced by the aggregation pipeline.
///
/// Every variant is fatal for the current run: nothing is written to disk
/// once one of these has been returned.
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// No configuration file could be located.
    #[error("No configuration found at {}", path.display())]
    MissingConfiguration { path: PathBuf },

    /// The configuration exists but fails to parse or validate.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A release or pre-release `info` file is absent or does not hold a valid version.
    #[error("Missing or invalid version in {}: {reason}", path.display())]
    MissingOrInvalidVersion { path: PathBuf, reason: String },

    /// An entry file could not be parsed.
    #[error("Malformed entry {}: {reason}", path.display())]
    MalformedEntry { path: PathBuf, reason: String },

    /// Reading or writing a file or directory failed.
    #[error("I/O failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ChangelogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type ChangelogResult<T> = Result<T, ChangelogError>;
