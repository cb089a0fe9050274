//! Aggregates changelog fragments into Markdown changelogs.
//!
//! Every change is recorded as a small file under `.changes/`. A run discovers
//! those files, orders releases and their pre-release stages by version,
//! groups entries by tag, and rewrites each configured changelog document.

pub mod builders;
pub mod core;
pub mod logging;
pub mod utils;

#[cfg(test)]
mod tests;
