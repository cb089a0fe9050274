use std::path::PathBuf;

use crate::builders::aggregator::Aggregate;
use crate::builders::entry::{ChangelogEntry, ReleaseEntry};
use crate::core::config::ChangelogFile;

pub const TITLE: &str = "# Changelog";
pub const DISCLAIMER: &str = "This file is generated from the entries under `.changes/`. \
Do not edit it by hand: record changes with `changelog-fragments new` and run \
`changelog-fragments generate`.";
pub const UNRELEASED_SECTION: &str = "Unreleased";

/// A rendered document, ready for the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub identifier: String,
    pub path: PathBuf,
    pub content: String,
}

/// Turns aggregated entries into changelog text for one output file.
pub trait ChangelogRenderer {
    /// Renders one section (Unreleased or a single release).
    fn render_section(&self, name: &str, entries: &[ChangelogEntry], file: &ChangelogFile) -> String;

    /// Renders the full document for one output file.
    fn render_document(
        &self,
        unreleased: &[ChangelogEntry],
        releases: &[ReleaseEntry],
        file: &ChangelogFile,
    ) -> String;

    /// Renders every configured output file, in config order.
    fn render_all(&self, aggregate: &Aggregate, files: &[ChangelogFile]) -> Vec<RenderedDocument> {
        files
            .iter()
            .map(|file| RenderedDocument {
                identifier: file.identifier.clone(),
                path: file.path.clone(),
                content: self.render_document(&aggregate.unreleased, &aggregate.releases, file),
            })
            .collect()
    }
}

/// Renders Markdown in the "Keep a Changelog" shape.
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Groups entries by tag, ordering groups by the file's tag list.
    ///
    /// Only entries sharing at least one tag with the file are kept. An entry
    /// appears under every tag it carries, including a tag the file does not
    /// list; such groups sort after the configured ones in encounter order.
    fn group_by_tag<'e>(
        entries: &'e [ChangelogEntry],
        file: &ChangelogFile,
    ) -> Vec<(&'e str, Vec<&'e ChangelogEntry>)> {
        let mut groups: Vec<(&str, Vec<&ChangelogEntry>)> = Vec::new();

        for entry in entries.iter().filter(|e| e.has_any_tag(&file.tags)) {
            for tag in &entry.tags {
                match groups.iter_mut().find(|(name, _)| *name == tag.as_str()) {
                    Some((_, members)) => members.push(entry),
                    None => groups.push((tag.as_str(), vec![entry])),
                }
            }
        }

        // Stable sort keeps encounter order among unconfigured tags.
        groups.sort_by_key(|(tag, _)| {
            file.tags
                .iter()
                .position(|t| t == tag)
                .unwrap_or(usize::MAX)
        });
        groups
    }
}

/// Formats a description as a list item. Continuation lines are indented
/// two spaces so they stay inside the item.
fn bullet(description: &str) -> String {
    let mut lines = description.trim().lines();
    let mut item = format!("- {}", lines.next().unwrap_or_default());
    for line in lines {
        item.push('\n');
        if !line.trim().is_empty() {
            item.push_str("  ");
            item.push_str(line.trim_end());
        }
    }
    item
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogRenderer for MarkdownRenderer {
    fn render_section(&self, name: &str, entries: &[ChangelogEntry], file: &ChangelogFile) -> String {
        let blocks: Vec<String> = Self::group_by_tag(entries, file)
            .into_iter()
            .map(|(tag, members)| {
                let bullets: Vec<String> = members.iter().map(|e| bullet(&e.description)).collect();
                format!("### {tag}\n{}", bullets.join("\n"))
            })
            .collect();

        if blocks.is_empty() {
            format!("## [{name}]")
        } else {
            format!("## [{name}]\n\n{}", blocks.join("\n\n"))
        }
    }

    fn render_document(
        &self,
        unreleased: &[ChangelogEntry],
        releases: &[ReleaseEntry],
        file: &ChangelogFile,
    ) -> String {
        let mut sections = vec![self.render_section(UNRELEASED_SECTION, unreleased, file)];
        sections.extend(
            releases
                .iter()
                .map(|r| self.render_section(&r.version.to_string(), &r.entries, file)),
        );
        if let Some(footer) = file.footer_text.as_deref()
            && !footer.trim().is_empty()
        {
            sections.push(footer.trim().to_string());
        }

        let document = format!("{TITLE}\n\n{DISCLAIMER}\n\n{}", sections.join("\n\n\n"));
        format!("{}\n", document.trim())
    }
}
