use crate::classifier::{normalize_path, FileClassifier};
use crate::manifest::ManifestDiff;
use crate::reader::ContentReader;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ===== ANNOTATIONS =====
// The engine's entire output is an ordered list of these.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Message,
    Warning,
    Failure,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Message => "message",
            Severity::Warning => "warning",
            Severity::Failure => "failure",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub severity: Severity,
    pub text: String,
    /// The file the annotation is about, when it concerns exactly one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Annotation {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            file: None,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self::new(Severity::Message, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self::new(Severity::Failure, text)
    }

    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.file = Some(path.into());
        self
    }
}

// ===== CHANGED FILES =====

/// Status of a path in the change list. Plain path lists carry `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed { from: String },
    Copied { from: String },
    Unknown,
}

impl FileStatus {
    pub fn is_deleted(&self) -> bool {
        matches!(self, FileStatus::Deleted)
    }
}

/// Derived classification of a changed path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileClass {
    pub is_source: bool,
    pub is_test: bool,
    pub is_vendor: bool,
    pub is_changelog: bool,
    pub is_manifest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    pub path: String,
    pub status: FileStatus,
    pub class: FileClass,
}

impl ChangedFile {
    /// Last path component
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// The classified set of files touched by a pull request.
///
/// Files keep their input order; a path listed twice keeps its first entry.
/// Classification happens once here and every rule reads the result.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    files: Vec<ChangedFile>,
    index: BTreeMap<String, usize>,
}

impl ChangeSet {
    pub fn new<I>(entries: I, classifier: &FileClassifier) -> Self
    where
        I: IntoIterator<Item = (FileStatus, String)>,
    {
        let mut set = Self::default();
        for (status, raw_path) in entries {
            let path = normalize_path(&raw_path);
            if path.is_empty() || set.index.contains_key(&path) {
                continue;
            }
            let class = classifier.classify(&path);
            set.index.insert(path.clone(), set.files.len());
            set.files.push(ChangedFile {
                path,
                status,
                class,
            });
        }
        set
    }

    /// Build from bare paths with no status information
    pub fn from_paths<I, S>(paths: I, classifier: &FileClassifier) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            paths.into_iter().map(|p| (FileStatus::Unknown, p.into())),
            classifier,
        )
    }

    pub fn files(&self) -> &[ChangedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&ChangedFile> {
        self.index
            .get(&normalize_path(path))
            .map(|&position| &self.files[position])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// True if any changed file has exactly this basename
    pub fn contains_file_name(&self, name: &str) -> bool {
        self.files.iter().any(|file| file.file_name() == name)
    }

    pub fn source_files(&self) -> impl Iterator<Item = &ChangedFile> {
        self.files.iter().filter(|file| file.class.is_source)
    }

    pub fn test_files(&self) -> impl Iterator<Item = &ChangedFile> {
        self.files.iter().filter(|file| file.class.is_test)
    }

    /// Source files outside the vendor subtree
    pub fn library_files(&self) -> impl Iterator<Item = &ChangedFile> {
        self.source_files().filter(|file| !file.class.is_vendor)
    }

    /// Source files that are not tests
    pub fn app_files(&self) -> impl Iterator<Item = &ChangedFile> {
        self.source_files().filter(|file| !file.class.is_test)
    }

    pub fn changelog_changed(&self) -> bool {
        self.files.iter().any(|file| file.class.is_changelog)
    }

    pub fn manifest_changed(&self) -> bool {
        self.files.iter().any(|file| file.class.is_manifest)
    }
}

// ===== REVIEW CONTEXT =====

/// Everything a review pass looks at, gathered before any rule runs
pub struct ReviewContext {
    pub changes: ChangeSet,
    /// Structured diff of the manifest; `None` when it was not modified
    pub manifest_diff: Option<ManifestDiff>,
    /// Reads test sources and the Jest results file
    pub reader: Box<dyn ContentReader>,
    /// Path of a Jest `--json` results file, when Jest reporting is wanted
    pub jest_results: Option<String>,
}

impl ReviewContext {
    pub fn new(changes: ChangeSet, reader: Box<dyn ContentReader>) -> Self {
        Self {
            changes,
            manifest_diff: None,
            reader,
            jest_results: None,
        }
    }

    pub fn with_manifest_diff(mut self, diff: Option<ManifestDiff>) -> Self {
        self.manifest_diff = diff;
        self
    }

    pub fn with_jest_results(mut self, path: impl Into<String>) -> Self {
        self.jest_results = Some(path.into());
        self
    }
}

impl fmt::Debug for ReviewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewContext")
            .field("changes", &self.changes)
            .field("manifest_diff", &self.manifest_diff)
            .field("reader", &self.reader.name())
            .field("jest_results", &self.jest_results)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReviewConfig;

    fn classifier() -> FileClassifier {
        FileClassifier::new(&ReviewConfig::default().files)
    }

    #[test]
    fn test_duplicate_paths_keep_first_entry() {
        let changes = ChangeSet::new(
            vec![
                (FileStatus::Modified, "src/a.js".to_string()),
                (FileStatus::Deleted, "./src/a.js".to_string()),
                (FileStatus::Added, "src/b.js".to_string()),
            ],
            &classifier(),
        );
        assert_eq!(changes.len(), 2);
        assert_eq!(changes.get("src/a.js").unwrap().status, FileStatus::Modified);
        assert_eq!(changes.files()[1].path, "src/b.js");
    }

    #[test]
    fn test_derived_views() {
        let changes = ChangeSet::from_paths(
            [
                "src/Button.js",
                "src/Button.test.js",
                "src/vendor/glamor.js",
                "README.md",
            ],
            &classifier(),
        );
        let app: Vec<_> = changes.app_files().map(|f| f.path.as_str()).collect();
        let library: Vec<_> = changes.library_files().map(|f| f.path.as_str()).collect();
        let tests: Vec<_> = changes.test_files().map(|f| f.path.as_str()).collect();

        assert_eq!(app, vec!["src/Button.js", "src/vendor/glamor.js"]);
        assert_eq!(library, vec!["src/Button.js", "src/Button.test.js"]);
        assert_eq!(tests, vec!["src/Button.test.js"]);
        assert!(!changes.changelog_changed());
    }

    #[test]
    fn test_file_name_lookup() {
        let changes = ChangeSet::from_paths(["src/models/ThemeProvider.js"], &classifier());
        assert!(changes.contains_file_name("ThemeProvider.js"));
        assert!(!changes.contains_file_name("models/ThemeProvider.js"));
        assert_eq!(changes.files()[0].file_name(), "ThemeProvider.js");
        assert!(changes.contains("./src/models/ThemeProvider.js"));
        assert!(!changes.contains("src/ThemeProvider.js"));
    }
}
