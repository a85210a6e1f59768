use crate::error::{PrlintError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_source_dirs() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_source_extensions() -> Vec<String> {
    vec!["js".to_string()]
}

fn default_test_suffixes() -> Vec<String> {
    vec![".test.js".to_string()]
}

fn default_test_dirs() -> Vec<String> {
    vec!["__tests__".to_string()]
}

fn default_vendor_dirs() -> Vec<String> {
    vec!["src/vendor".to_string()]
}

fn default_changelog_path() -> String {
    "CHANGELOG.md".to_string()
}

fn default_manifest_path() -> String {
    "package.json".to_string()
}

fn default_changelog_link() -> String {
    "https://github.com/styled-components/styled-components/blob/master/CHANGELOG.md".to_string()
}

fn default_semver_sensitive_files() -> Vec<String> {
    vec![
        "ThemeProvider.js".to_string(),
        "StyledComponent.js".to_string(),
        "StyledNativeComponent.js".to_string(),
    ]
}

fn default_paired_files() -> Vec<FilePair> {
    vec![FilePair {
        first: "StyledComponent.js".to_string(),
        second: "StyledNativeComponent.js".to_string(),
    }]
}

fn default_test_markers() -> Vec<String> {
    vec!["it.only".to_string(), "test.only".to_string()]
}

fn default_group_markers() -> Vec<String> {
    vec!["describe.only".to_string()]
}

/// Top-level review configuration.
///
/// Every section falls back to its default, so a YAML file only needs the
/// keys it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// How changed paths are classified
    pub files: FileLayoutConfig,
    pub changelog: ChangelogConfig,
    /// Files that should change together, matched by basename
    pub paired_files: Vec<FilePair>,
    /// Basenames whose changes may need a major version bump
    pub semver_sensitive_files: Vec<String>,
    pub exclusive_tests: ExclusiveTestsConfig,
    /// Pipeline configuration - defines which rules to run and in what order
    pub pipeline: PipelineConfig,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            files: FileLayoutConfig::default(),
            changelog: ChangelogConfig::default(),
            paired_files: default_paired_files(),
            semver_sensitive_files: default_semver_sensitive_files(),
            exclusive_tests: ExclusiveTestsConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLayoutConfig {
    /// Directories holding library sources
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<String>,
    /// Extensions (without the dot) that count as source
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    /// File name endings that mark a test file
    #[serde(default = "default_test_suffixes")]
    pub test_suffixes: Vec<String>,
    /// Directory names whose contents are tests
    #[serde(default = "default_test_dirs")]
    pub test_dirs: Vec<String>,
    /// Third-party code that does not need tests of its own
    #[serde(default = "default_vendor_dirs")]
    pub vendor_dirs: Vec<String>,
    #[serde(default = "default_changelog_path")]
    pub changelog: String,
    #[serde(default = "default_manifest_path")]
    pub manifest: String,
}

impl Default for FileLayoutConfig {
    fn default() -> Self {
        Self {
            source_dirs: default_source_dirs(),
            source_extensions: default_source_extensions(),
            test_suffixes: default_test_suffixes(),
            test_dirs: default_test_dirs(),
            vendor_dirs: default_vendor_dirs(),
            changelog: default_changelog_path(),
            manifest: default_manifest_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Where authors can find the changelog, shown in the failure text
    #[serde(default = "default_changelog_link")]
    pub link: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            link: default_changelog_link(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePair {
    pub first: String,
    pub second: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusiveTestsConfig {
    /// Markers that restrict a run to one test
    #[serde(default = "default_test_markers")]
    pub test_markers: Vec<String>,
    /// Markers that restrict a run to one group
    #[serde(default = "default_group_markers")]
    pub group_markers: Vec<String>,
}

impl Default for ExclusiveTestsConfig {
    fn default() -> Self {
        Self {
            test_markers: default_test_markers(),
            group_markers: default_group_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// List of rules to run in order
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Name of the rule
    pub name: String,
    /// Whether this rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl RuleConfig {
    pub fn enabled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                RuleConfig::enabled("JestResults"),
                RuleConfig::enabled("VersionBump"),
                RuleConfig::enabled("Changelog"),
                RuleConfig::enabled("MissingTests"),
                RuleConfig::enabled("PairedFiles"),
                RuleConfig::enabled("SemverSensitive"),
                RuleConfig::enabled("ExclusiveTests"),
            ],
        }
    }
}

impl ReviewConfig {
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|source| PrlintError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load config from file path
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PrlintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {p} ({e}), using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
