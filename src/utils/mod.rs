use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::builders::writer::{DocumentWriter, FileWriter, StdoutWriter};
use crate::core::config::ConfigManager;
use crate::core::engine::ChangelogEngine;

pub fn initialize_project() -> Result<()> {
    let root = std::env::current_dir().context("Failed to read current directory")?;
    let config_manager = ConfigManager::new_at(root);
    config_manager
        .initialize()
        .context("Failed to initialize .changes directory")?;
    println!("✓ Initialized changelog fragments in .changes/");
    println!("Run 'changelog-fragments new --tag <TAG> --description <TEXT>' to record a change");
    Ok(())
}

pub fn add_entry(tags: Vec<String>, description: String) -> Result<()> {
    let engine = get_engine()?;
    let path = engine
        .add_entry(tags, description)
        .context("Failed to record entry")?;
    println!("✓ Recorded {}", path.display());
    Ok(())
}

pub fn generate(dry_run: bool) -> Result<()> {
    let engine = get_engine()?;
    let mut writer: Box<dyn DocumentWriter> = if dry_run {
        Box::new(StdoutWriter)
    } else {
        Box::new(FileWriter::new())
    };

    let written: Vec<PathBuf> = engine
        .generate(writer.as_mut())
        .context("Failed to generate changelogs")?;

    if !dry_run {
        for path in written {
            println!("✓ Wrote {}", path.display());
        }
    }
    Ok(())
}

pub fn validate() -> Result<()> {
    get_config_manager()?.validate_config()
}

// Helper function to create ConfigManager instance
fn get_config_manager() -> Result<ConfigManager> {
    ConfigManager::new().context("Run 'changelog-fragments init' first")
}

fn get_engine() -> Result<ChangelogEngine> {
    let config_manager = get_config_manager()?;
    Ok(ChangelogEngine::new(&config_manager)?)
}
