use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single recorded change.
///
/// Entries are written once by `new` and never mutated afterwards; the file
/// backing an entry is its only identity.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Category labels, in the order they were given. Never empty once validated.
    pub tags: Vec<String>,
    /// Free text shown as the bullet in the rendered changelog.
    pub description: String,
    /// Creation time, used to order entries within a bucket.
    #[serde(rename = "createdAtDate")]
    pub created_at: DateTime<Utc>,
}

impl ChangelogEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(tags: Vec<String>, description: String) -> Self {
        Self::with_timestamp(tags, description, Utc::now())
    }

    pub fn with_timestamp(tags: Vec<String>, description: String, created_at: DateTime<Utc>) -> Self {
        Self {
            tags,
            description,
            created_at,
        }
        .dedup_tags()
    }

    /// Collapses repeated tags to their first occurrence.
    pub fn dedup_tags(mut self) -> Self {
        let mut seen = HashSet::new();
        self.tags.retain(|tag| seen.insert(tag.clone()));
        self
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|tag| tags.contains(tag))
    }
}

/// All entries belonging to one release, pre-release stages first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub version: Version,
    pub entries: Vec<ChangelogEntry>,
}
