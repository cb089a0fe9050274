use std::path::PathBuf;
use tracing::info;

use crate::builders::aggregator::{Aggregate, Aggregator};
use crate::builders::entry::ChangelogEntry;
use crate::builders::renderer::{ChangelogRenderer, MarkdownRenderer, RenderedDocument};
use crate::builders::store::{FileStore, FragmentStore};
use crate::builders::validator::{ConfigValidator, StandardValidator};
use crate::builders::writer::DocumentWriter;
use crate::core::config::{ChangelogConfig, ConfigManager, ConfigProvider};
use crate::core::error::{ChangelogError, ChangelogResult};
use crate::core::layout::ChangesLayout;

/// Runs the whole pipeline for one project: discover, resolve, render, write.
pub struct ChangelogEngine {
    config: ChangelogConfig,
    layout: ChangesLayout,
    store: FileStore,
    renderer: Box<dyn ChangelogRenderer>,
}

impl ChangelogEngine {
    pub fn new(config_manager: &ConfigManager) -> ChangelogResult<Self> {
        let config = config_manager.load_config()?;
        let layout = config_manager.layout();

        Ok(Self {
            store: FileStore::new(config.format),
            renderer: Box::new(MarkdownRenderer::new()),
            config,
            layout,
        })
    }

    pub fn aggregate(&self) -> ChangelogResult<Aggregate> {
        Aggregator::new(&self.store, &self.layout).aggregate()
    }

    /// Renders every configured file in memory. Output paths are resolved
    /// against the project root.
    pub fn render(&self) -> ChangelogResult<Vec<RenderedDocument>> {
        let aggregate = self.aggregate()?;
        let mut documents = self.renderer.render_all(&aggregate, &self.config.files);
        for document in &mut documents {
            document.path = self.layout.output_path(&document.path);
        }
        Ok(documents)
    }

    /// Regenerates every output document.
    ///
    /// Writing starts only after all documents rendered, so a bad fragment
    /// leaves every existing document untouched.
    pub fn generate(&self, writer: &mut dyn DocumentWriter) -> ChangelogResult<Vec<PathBuf>> {
        let documents = self.render()?;

        let mut written = Vec::with_capacity(documents.len());
        for document in documents {
            writer.write(&document.path, &document.content)?;
            info!(file = %document.identifier, path = %document.path.display(), "wrote changelog");
            written.push(document.path);
        }
        Ok(written)
    }

    /// Records a new Unreleased entry after checking its tags against the config.
    pub fn add_entry(&self, tags: Vec<String>, description: String) -> ChangelogResult<PathBuf> {
        let entry = ChangelogEntry::new(tags, description.trim().to_string());
        let issues = StandardValidator::new().validate_entry(&entry, &self.config);
        if !issues.is_empty() {
            return Err(ChangelogError::MalformedEntry {
                path: self.layout.unreleased_dir(),
                reason: issues.join("; "),
            });
        }

        self.store.write_entry(&self.layout.unreleased_dir(), &entry)
    }
}
