use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::builders::validator::{ConfigValidator, StandardValidator};
use crate::core::error::{ChangelogError, ChangelogResult};
use crate::core::layout::{self, ChangesLayout};

/// Serialization format of entry and `info` files.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryFormat {
    #[default]
    Yaml,
    Json,
}

impl EntryFormat {
    pub fn extension(self) -> &'static str {
        match self {
            EntryFormat::Yaml => "yaml",
            EntryFormat::Json => "json",
        }
    }
}

/// One output document and the tags it shows, in display order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChangelogFile {
    pub identifier: String,
    pub path: PathBuf,
    pub tags: Vec<String>,
    #[serde(default, alias = "footerText", skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub format: EntryFormat,
    pub tags: Vec<String>,
    pub files: Vec<ChangelogFile>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        let tags: Vec<String> = ["Added", "Changed", "Deprecated", "Removed", "Fixed", "Security"]
            .iter()
            .map(|t| t.to_string())
            .collect();

        Self {
            format: EntryFormat::Yaml,
            files: vec![ChangelogFile {
                identifier: "main".to_string(),
                path: PathBuf::from("CHANGELOG.md"),
                tags: tags.clone(),
                footer_text: None,
            }],
            tags,
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    project_root: PathBuf,
}

impl ConfigManager {
    /// Locates the project by walking up from the current directory.
    pub fn new() -> ChangelogResult<Self> {
        let current_dir = std::env::current_dir().map_err(|e| ChangelogError::io(".", e))?;
        match layout::find_project_root(&current_dir) {
            Some(root) => Ok(Self::new_at(root)),
            None => Err(ChangelogError::MissingConfiguration {
                path: layout::config_path_for(&current_dir),
            }),
        }
    }

    pub fn new_at(project_root: PathBuf) -> Self {
        Self {
            config_path: layout::config_path_for(&project_root),
            project_root,
        }
    }

    /// Creates the `.changes` tree and a default config, leaving existing files alone.
    pub fn initialize(&self) -> ChangelogResult<()> {
        let layout = ChangesLayout::new(&self.project_root);
        for dir in [layout.unreleased_dir(), layout.releases_dir()] {
            fs::create_dir_all(&dir).map_err(|e| ChangelogError::io(&dir, e))?;
        }

        if self.config_path.exists() {
            debug!(path = %self.config_path.display(), "config already present");
            return Ok(());
        }

        self.save_config(&ChangelogConfig::default())
    }

    /// Loads the config and reports every validation issue on stdout.
    pub fn validate_config(&self) -> anyhow::Result<()> {
        let config = self.read_config()?;
        let issues = StandardValidator::new().validate_config(&config);

        if issues.is_empty() {
            println!("✓ Configuration is valid.");
            Ok(())
        } else {
            println!("⚠️  Found issues in configuration:");
            for issue in issues {
                println!("  - {issue}");
            }
            anyhow::bail!("Configuration validation failed.");
        }
    }

    pub fn layout(&self) -> ChangesLayout {
        ChangesLayout::new(&self.project_root)
    }

    /// Reads and parses the config without validating it.
    fn read_config(&self) -> ChangelogResult<ChangelogConfig> {
        if !self.config_path.exists() {
            return Err(ChangelogError::MissingConfiguration {
                path: self.config_path.clone(),
            });
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ChangelogError::io(&self.config_path, e))?;

        toml::from_str(&content).map_err(|e| ChangelogError::InvalidConfiguration(e.to_string()))
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> ChangelogResult<ChangelogConfig>;
    fn save_config(&self, config: &ChangelogConfig) -> ChangelogResult<()>;
    fn get_config_path(&self) -> PathBuf;
}

impl ConfigProvider for ConfigManager {
    /// Loads and validates the config; any validation issue is fatal.
    fn load_config(&self) -> ChangelogResult<ChangelogConfig> {
        let config = self.read_config()?;
        let issues = StandardValidator::new().validate_config(&config);
        if !issues.is_empty() {
            return Err(ChangelogError::InvalidConfiguration(issues.join("; ")));
        }
        Ok(config)
    }

    fn save_config(&self, config: &ChangelogConfig) -> ChangelogResult<()> {
        let content = toml::to_string_pretty(config)
            .map_err(|e| ChangelogError::InvalidConfiguration(e.to_string()))?;

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ChangelogError::io(parent, e))?;
        }
        fs::write(&self.config_path, content).map_err(|e| ChangelogError::io(&self.config_path, e))
    }

    fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }
}
