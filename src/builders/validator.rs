use std::collections::HashSet;

use crate::builders::entry::ChangelogEntry;
use crate::core::config::{ChangelogConfig, ChangelogFile};

/// The `ConfigValidator` trait defines the public interface for validating the
/// changelog configuration and the entries recorded against it.
pub trait ConfigValidator {
    /// Performs a full validation of the `ChangelogConfig` and returns
    /// a list of issues found. An empty list means the config is usable.
    fn validate_config(&self, config: &ChangelogConfig) -> Vec<String>;

    /// Validates a single output file against the globally declared tags.
    fn validate_file(&self, file: &ChangelogFile, declared_tags: &HashSet<&str>) -> Vec<String>;

    /// Validates a new entry before it is recorded.
    fn validate_entry(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> Vec<String>;
}

/// The `StandardValidator` performs the checks every config must pass before
/// the pipeline runs.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Reports every value that appears more than once, in first-seen order.
    fn find_duplicates<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for value in values {
            if !seen.insert(value) && reported.insert(value) {
                duplicates.push(value);
            }
        }
        duplicates
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for StandardValidator {
    /// Checks:
    /// - the global tag list is non-empty and free of duplicates,
    /// - at least one output file is configured,
    /// - output identifiers and paths are unique,
    /// - each file passes `validate_file`.
    fn validate_config(&self, config: &ChangelogConfig) -> Vec<String> {
        let mut issues = Vec::new();

        if config.tags.is_empty() {
            issues.push("No tags declared".to_string());
        }
        for tag in Self::find_duplicates(config.tags.iter().map(String::as_str)) {
            issues.push(format!("Duplicate tag: {tag}"));
        }

        if config.files.is_empty() {
            issues.push("No output files configured".to_string());
        }
        for id in Self::find_duplicates(config.files.iter().map(|f| f.identifier.as_str())) {
            issues.push(format!("Duplicate file identifier: {id}"));
        }

        let paths: Vec<String> = config
            .files
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect();
        for path in Self::find_duplicates(paths.iter().map(String::as_str)) {
            issues.push(format!("Duplicate output path: {path}"));
        }

        let declared: HashSet<&str> = config.tags.iter().map(String::as_str).collect();
        for file in &config.files {
            issues.extend(self.validate_file(file, &declared));
        }

        issues
    }

    fn validate_file(&self, file: &ChangelogFile, declared_tags: &HashSet<&str>) -> Vec<String> {
        let mut issues = Vec::new();

        if file.identifier.trim().is_empty() {
            issues.push(format!("File {} has an empty identifier", file.path.display()));
        }
        if file.path.as_os_str().is_empty() {
            issues.push(format!("File '{}' has an empty path", file.identifier));
        }
        if file.tags.is_empty() {
            issues.push(format!("File '{}' shows no tags", file.identifier));
        }

        for tag in &file.tags {
            if !declared_tags.contains(tag.as_str()) {
                issues.push(format!(
                    "File '{}' uses undeclared tag: {tag}",
                    file.identifier
                ));
            }
        }
        for tag in Self::find_duplicates(file.tags.iter().map(String::as_str)) {
            issues.push(format!("File '{}' lists tag twice: {tag}", file.identifier));
        }

        issues
    }

    fn validate_entry(&self, entry: &ChangelogEntry, config: &ChangelogConfig) -> Vec<String> {
        let mut issues = Vec::new();

        if entry.tags.is_empty() {
            issues.push("An entry needs at least one tag".to_string());
        }
        if entry.description.trim().is_empty() {
            issues.push("An entry needs a description".to_string());
        }
        for tag in &entry.tags {
            if !config.tags.contains(tag) {
                issues.push(format!(
                    "Unknown tag '{tag}' (declared: {})",
                    config.tags.join(", ")
                ));
            }
        }

        issues
    }
}
