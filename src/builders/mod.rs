// This file is the module declaration file for the `builders` module.
// It declares and makes public the stages of the changelog pipeline, leaves first.

// `entry` module:
// The `ChangelogEntry` and `ReleaseEntry` data types.
pub mod entry;

// `store` module:
// The `FragmentStore` trait and its `FileStore` implementation, which read
// and write entry files and `info` version declarations.
pub mod store;

// `resolver` module:
// Resolves a single release directory, ordering its pre-release stages by
// version and concatenating their entries ahead of the release's own.
pub mod resolver;

// `aggregator` module:
// Resolves every release concurrently, loads the Unreleased bucket, and
// sorts releases newest first.
pub mod aggregator;

// `renderer` module:
// The `ChangelogRenderer` trait and `MarkdownRenderer`, which filter entries
// per output file, group them by tag, and produce Markdown.
pub mod renderer;

// `writer` module:
// The `DocumentWriter` trait with filesystem and stdout implementations.
pub mod writer;

// `validator` module:
// The `ConfigValidator` trait and `StandardValidator`, checking the config
// and new entries for problems before anything runs.
pub mod validator;
