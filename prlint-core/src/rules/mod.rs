// Main rules module - delegates to one module per review check
// - engine.rs: RuleEngine, the ReviewRule trait and pipeline dispatch
// - jest_results.rs: Jest results reporting
// - version_bump.rs: manifest version bump acknowledgment
// - changelog.rs: changelog enforcement for app changes
// - missing_tests.rs: library changes without test changes
// - paired_files.rs: files that should change together
// - semver_sensitive.rs: API-surface files that may need a major bump
// - exclusive_tests.rs: `.only` markers left in tests

pub mod changelog;
pub mod engine;
pub mod jest_results;
pub mod paired_files;
pub mod semver_sensitive;
pub mod version_bump;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::*;
