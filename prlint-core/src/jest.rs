//! Jest `--json` results.
//!
//! Only the fields the review needs are modelled; everything else in the
//! results file is ignored.

use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JestResults {
    pub success: bool,
    pub num_total_tests: u64,
    pub num_passed_tests: u64,
    pub num_failed_tests: u64,
    pub num_pending_tests: u64,
    pub test_results: Vec<SuiteResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteResult {
    /// Path of the test file, usually absolute
    pub name: String,
    pub status: String,
    /// Suite-level failure output, set when the file failed to run at all
    pub message: String,
    pub assertion_results: Vec<AssertionResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssertionResult {
    pub ancestor_titles: Vec<String>,
    pub title: String,
    pub status: String,
    pub failure_messages: Vec<String>,
}

impl AssertionResult {
    pub fn is_failed(&self) -> bool {
        self.status == "failed"
    }

    /// Ancestor titles and the test title joined the way Jest prints them
    pub fn full_title(&self) -> String {
        self.ancestor_titles
            .iter()
            .chain(std::iter::once(&self.title))
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" › ")
    }
}

/// One failure worth reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JestFailure {
    pub file: String,
    /// Test title, `None` when the whole suite failed to run
    pub title: Option<String>,
    pub details: String,
}

impl JestResults {
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Failed assertions in file order. A failed suite with no failed
    /// assertions reports its suite message instead.
    pub fn failures(&self, root: Option<&Path>) -> Vec<JestFailure> {
        let mut failures = Vec::new();

        for suite in &self.test_results {
            let file = relative_to(&suite.name, root);
            let failed: Vec<&AssertionResult> = suite
                .assertion_results
                .iter()
                .filter(|assertion| assertion.is_failed())
                .collect();

            if failed.is_empty() {
                if suite.status == "failed" {
                    failures.push(JestFailure {
                        file,
                        title: None,
                        details: strip_ansi(suite.message.trim()),
                    });
                }
                continue;
            }

            for assertion in failed {
                failures.push(JestFailure {
                    file: file.clone(),
                    title: Some(assertion.full_title()),
                    details: strip_ansi(assertion.failure_messages.join("\n").trim()),
                });
            }
        }

        failures
    }
}

fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ANSI escape pattern is valid")
    })
}

/// Remove terminal colour codes from Jest output
pub fn strip_ansi(text: &str) -> String {
    ansi_pattern().replace_all(text, "").into_owned()
}

/// Show `path` relative to `root` when it lies inside it
pub fn relative_to(path: &str, root: Option<&Path>) -> String {
    root.and_then(|root| Path::new(path).strip_prefix(root).ok())
        .map(|relative| relative.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILING: &str = r#"{
        "success": false,
        "numTotalTests": 3,
        "numPassedTests": 1,
        "numFailedTests": 2,
        "numPendingTests": 0,
        "testResults": [
            {
                "name": "/repo/src/test/basic.test.js",
                "status": "failed",
                "message": "",
                "assertionResults": [
                    {"ancestorTitles": ["basic"], "title": "renders", "status": "passed", "failureMessages": []},
                    {"ancestorTitles": ["basic", "css"], "title": "injects styles", "status": "failed",
                     "failureMessages": ["\u001b[31mExpected\u001b[39m 1 to be 2"]}
                ]
            },
            {
                "name": "/repo/src/test/broken.test.js",
                "status": "failed",
                "message": "SyntaxError: Unexpected token",
                "assertionResults": []
            }
        ]
    }"#;

    #[test]
    fn test_failures_are_extracted_per_assertion() {
        let results = JestResults::parse(FAILING).unwrap();
        let failures = results.failures(Some(Path::new("/repo")));

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].file, "src/test/basic.test.js");
        assert_eq!(failures[0].title.as_deref(), Some("basic › css › injects styles"));
        assert_eq!(failures[0].details, "Expected 1 to be 2");

        assert_eq!(failures[1].file, "src/test/broken.test.js");
        assert_eq!(failures[1].title, None);
        assert_eq!(failures[1].details, "SyntaxError: Unexpected token");
    }

    #[test]
    fn test_paths_outside_root_are_kept() {
        let results = JestResults::parse(FAILING).unwrap();
        let failures = results.failures(Some(Path::new("/elsewhere")));
        assert_eq!(failures[0].file, "/repo/src/test/basic.test.js");
    }

    #[test]
    fn test_missing_fields_default() {
        let results = JestResults::parse(r#"{"success": true}"#).unwrap();
        assert!(results.success);
        assert_eq!(results.num_total_tests, 0);
        assert!(results.failures(None).is_empty());
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\u{1b}[1m\u{1b}[31mboom\u{1b}[0m"), "boom");
        assert_eq!(strip_ansi("plain"), "plain");
    }
}
