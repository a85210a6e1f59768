use super::engine::ReviewRule;
use crate::jest::{JestFailure, JestResults};
use crate::types::*;

pub const UNREADABLE_RESULTS: &str =
    "Could not read test results. The Jest outcome cannot be checked.";

// JestResultsRule - surface Jest `--json` outcomes as annotations
pub struct JestResultsRule;

impl Default for JestResultsRule {
    fn default() -> Self {
        Self::new()
    }
}

impl JestResultsRule {
    pub fn new() -> Self {
        Self
    }

    fn load(&self, ctx: &ReviewContext, path: &str) -> Option<JestResults> {
        let content = match ctx.reader.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("cannot read Jest results at {path}: {e:#}");
                return None;
            }
        };
        match JestResults::parse(&content) {
            Ok(results) => Some(results),
            Err(e) => {
                tracing::warn!("invalid Jest results at {path}: {e}");
                None
            }
        }
    }

    fn failure_annotation(failure: JestFailure) -> Annotation {
        let heading = match &failure.title {
            Some(title) => format!("🃏 FAIL in `{}`: {}", failure.file, title),
            None => format!("🃏 FAIL in `{}`", failure.file),
        };
        let text = if failure.details.is_empty() {
            heading
        } else {
            format!("{heading}\n\n```\n{}\n```", failure.details)
        };
        Annotation::failure(text).with_file(failure.file)
    }
}

impl ReviewRule for JestResultsRule {
    fn evaluate(&self, ctx: &ReviewContext) -> Vec<Annotation> {
        let Some(path) = ctx.jest_results.as_deref() else {
            return Vec::new();
        };

        let Some(results) = self.load(ctx, path) else {
            return vec![Annotation::failure(UNREADABLE_RESULTS).with_file(path)];
        };

        if results.success {
            return vec![Annotation::message(format!(
                ":+1: Jest tests passed: {}/{} ({} skipped)",
                results.num_passed_tests, results.num_total_tests, results.num_pending_tests
            ))];
        }

        let failures = results.failures(ctx.reader.root());
        if failures.is_empty() {
            // Unsuccessful run with nothing to point at, e.g. a coverage threshold
            return vec![Annotation::failure(format!(
                "🃏 Jest run failed: {} of {} tests failed",
                results.num_failed_tests, results.num_total_tests
            ))];
        }

        failures.into_iter().map(Self::failure_annotation).collect()
    }

    fn name(&self) -> &str {
        "JestResults"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::InMemoryContentReader;
    use crate::rules::testing::{context, context_with_reader};

    const PASSING: &str = r#"{"success": true, "numTotalTests": 12, "numPassedTests": 11, "numPendingTests": 1, "testResults": []}"#;

    const TWO_FAILURES: &str = r#"{
        "success": false,
        "numTotalTests": 3,
        "numFailedTests": 2,
        "testResults": [{
            "name": "src/test/css.test.js",
            "status": "failed",
            "assertionResults": [
                {"ancestorTitles": ["css"], "title": "a", "status": "failed", "failureMessages": ["boom a"]},
                {"ancestorTitles": ["css"], "title": "b", "status": "failed", "failureMessages": ["boom b"]},
                {"ancestorTitles": ["css"], "title": "c", "status": "passed", "failureMessages": []}
            ]
        }]
    }"#;

    #[test]
    fn test_disabled_without_results_path() {
        assert!(JestResultsRule::new().evaluate(&context(&["src/a.js"])).is_empty());
    }

    #[test]
    fn test_success_emits_one_message() {
        let reader = InMemoryContentReader::new().with_file("test-results.json", PASSING);
        let ctx = context_with_reader(&[], reader).with_jest_results("test-results.json");
        let annotations = JestResultsRule::new().evaluate(&ctx);

        assert_eq!(
            annotations,
            vec![Annotation::message(":+1: Jest tests passed: 11/12 (1 skipped)")]
        );
    }

    #[test]
    fn test_each_failed_assertion_fails() {
        let reader = InMemoryContentReader::new().with_file("test-results.json", TWO_FAILURES);
        let ctx = context_with_reader(&[], reader).with_jest_results("test-results.json");
        let annotations = JestResultsRule::new().evaluate(&ctx);

        assert_eq!(annotations.len(), 2);
        assert!(annotations.iter().all(|a| a.severity == Severity::Failure));
        assert!(annotations[0].text.contains("css › a"));
        assert!(annotations[1].text.contains("boom b"));
        assert_eq!(annotations[0].file.as_deref(), Some("src/test/css.test.js"));
    }

    #[test]
    fn test_missing_or_invalid_results_fail_once() {
        let ctx = context(&[]).with_jest_results("test-results.json");
        let annotations = JestResultsRule::new().evaluate(&ctx);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].text, UNREADABLE_RESULTS);

        let reader = InMemoryContentReader::new().with_file("test-results.json", "{ not json");
        let ctx = context_with_reader(&[], reader).with_jest_results("test-results.json");
        assert_eq!(JestResultsRule::new().evaluate(&ctx).len(), 1);
    }

    #[test]
    fn test_failed_run_without_failed_tests() {
        let reader = InMemoryContentReader::new().with_file(
            "test-results.json",
            r#"{"success": false, "numTotalTests": 4, "numFailedTests": 0}"#,
        );
        let ctx = context_with_reader(&[], reader).with_jest_results("test-results.json");
        let annotations = JestResultsRule::new().evaluate(&ctx);

        assert_eq!(annotations.len(), 1);
        assert!(annotations[0].text.contains("0 of 4"));
    }
}
