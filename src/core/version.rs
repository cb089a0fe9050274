use semver::Version;
use serde::{Deserialize, Serialize};

/// The on-disk shape of an `info` file.
#[derive(Debug, Serialize, Deserialize)]
struct RawReleaseInfo {
    version: String,
}

/// The version declared by a release or pre-release directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub version: Version,
}

/// Normalize a declared version before parsing.
///
/// Tags are often written as `v1.2.0`, so a leading `v`/`V` and surrounding
/// whitespace are dropped.
fn normalize_version(version: &str) -> &str {
    version.trim().trim_start_matches(['v', 'V'])
}

/// Parse a declared version string into a SemVer `Version`.
pub fn parse_version(raw: &str) -> Result<Version, String> {
    let normalized = normalize_version(raw);
    if normalized.is_empty() {
        return Err("version is empty".to_string());
    }
    Version::parse(normalized).map_err(|e| format!("'{raw}' is not a semantic version: {e}"))
}

impl ReleaseInfo {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let raw: RawReleaseInfo = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self::new(parse_version(&raw.version)?))
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        let raw: RawReleaseInfo = serde_json::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self::new(parse_version(&raw.version)?))
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(&self.raw()).map_err(|e| e.to_string())
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(&self.raw()).map_err(|e| e.to_string())
    }

    fn raw(&self) -> RawReleaseInfo {
        RawReleaseInfo {
            version: self.version.to_string(),
        }
    }
}
