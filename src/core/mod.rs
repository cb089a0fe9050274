// This file is the module declaration file for the `core` module.
// It declares the submodules that make up the application's backbone and
// exposes them to the rest of the crate.

// `config` module:
// Defines the configuration file (`ChangelogConfig`, `ChangelogFile`), the
// `ConfigProvider` trait, and the `ConfigManager` that locates, loads,
// validates and saves `.changes/config.toml`.
pub mod config;

// `engine` module:
// The `ChangelogEngine` ties the pipeline together: it aggregates fragments,
// renders every configured document, and hands them to a writer.
pub mod engine;

// `error` module:
// The `ChangelogError` enum shared by every stage of the pipeline.
pub mod error;

// `layout` module:
// Path conventions of the `.changes` tree and project-root discovery.
pub mod layout;

// `version` module:
// Parsing of declared release versions and the `info` file format.
pub mod version;
