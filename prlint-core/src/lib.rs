// prlint Core Library
//
// Classifies a pull request's changed files and runs the review rule
// pipeline over them. Main interface for turning a change list (plus an
// optional manifest diff) into an ordered list of annotations.

pub mod changes;
pub mod classifier;
pub mod config;
pub mod error;
pub mod jest;
pub mod manifest;
pub mod reader;
pub mod report;
pub mod rules;
pub mod types;

// Re-export main types and functions for easy use
pub use types::*;
pub use changes::parse_changed_files;
pub use classifier::FileClassifier;
pub use config::ReviewConfig;
pub use error::PrlintError;
pub use manifest::{ManifestDiff, VersionDiff};
pub use reader::{ContentReader, FsContentReader, InMemoryContentReader};
pub use report::{OutputFormat, Report};
pub use rules::{ReviewRule, RuleEngine};
