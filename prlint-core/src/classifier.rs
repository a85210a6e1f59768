use crate::config::FileLayoutConfig;
use crate::types::FileClass;

/// Normalise a repository-relative path: forward slashes, no leading `./`,
/// no surrounding whitespace.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim().replace('\\', "/");
    while let Some(stripped) = normalized.strip_prefix("./") {
        normalized = stripped.to_string();
    }
    normalized
}

/// True if `path` lies inside directory `dir` (component-wise, so `srcx/a.js`
/// is not under `src`).
fn is_under(path: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        return true;
    }
    path.strip_prefix(dir)
        .map(|rest| rest.starts_with('/'))
        .unwrap_or(false)
}

/// Classifies changed paths according to the repository layout.
///
/// Classification looks only at the path string, never at the filesystem.
pub struct FileClassifier {
    source_dirs: Vec<String>,
    source_extensions: Vec<String>,
    test_suffixes: Vec<String>,
    test_dirs: Vec<String>,
    vendor_dirs: Vec<String>,
    changelog: String,
    manifest: String,
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(&FileLayoutConfig::default())
    }
}

impl FileClassifier {
    pub fn new(layout: &FileLayoutConfig) -> Self {
        Self {
            source_dirs: layout.source_dirs.iter().map(|d| normalize_path(d)).collect(),
            source_extensions: layout
                .source_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            test_suffixes: layout.test_suffixes.clone(),
            test_dirs: layout.test_dirs.clone(),
            vendor_dirs: layout.vendor_dirs.iter().map(|d| normalize_path(d)).collect(),
            changelog: normalize_path(&layout.changelog),
            manifest: normalize_path(&layout.manifest),
        }
    }

    pub fn classify(&self, path: &str) -> FileClass {
        let path = normalize_path(path);
        let is_source = self.has_source_extension(&path)
            && self.source_dirs.iter().any(|dir| is_under(&path, dir));

        FileClass {
            is_source,
            // Tests are a subset of the source files
            is_test: is_source && self.is_test_path(&path),
            is_vendor: self.vendor_dirs.iter().any(|dir| is_under(&path, dir)),
            is_changelog: path == self.changelog,
            is_manifest: path == self.manifest,
        }
    }

    fn has_source_extension(&self, path: &str) -> bool {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        match file_name.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => {
                self.source_extensions.iter().any(|ext| ext == extension)
            }
            _ => false,
        }
    }

    fn is_test_path(&self, path: &str) -> bool {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        if self
            .test_suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
        {
            return true;
        }

        // Any directory component (not the file name itself) named like a test dir
        let mut components: Vec<&str> = path.split('/').collect();
        components.pop();
        components
            .iter()
            .any(|component| self.test_dirs.iter().any(|dir| dir == component))
    }
}
