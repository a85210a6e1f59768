use super::engine::ReviewRule;
use crate::config::{FilePair, ReviewConfig};
use crate::types::*;

// PairedFilesRule - files that are expected to change together
pub struct PairedFilesRule<'a> {
    config: &'a ReviewConfig,
}

impl<'a> PairedFilesRule<'a> {
    pub fn new(config: &'a ReviewConfig) -> Self {
        Self { config }
    }

    fn check_pair(&self, pair: &FilePair, changes: &ChangeSet) -> Option<Annotation> {
        let first_changed = changes.contains_file_name(&pair.first);
        let second_changed = changes.contains_file_name(&pair.second);

        // Only one side moved, in either direction
        if first_changed != second_changed {
            Some(Annotation::warning(format!(
                "A change was made in {} that wasn't made in {} or viceversa.",
                pair.first, pair.second
            )))
        } else {
            None
        }
    }
}

impl<'a> ReviewRule for PairedFilesRule<'a> {
    fn evaluate(&self, ctx: &ReviewContext) -> Vec<Annotation> {
        self.config
            .paired_files
            .iter()
            .filter_map(|pair| self.check_pair(pair, &ctx.changes))
            .collect()
    }

    fn name(&self) -> &str {
        "PairedFiles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::context;

    #[test]
    fn test_one_side_changed_warns() {
        let config = ReviewConfig::default();
        let rule = PairedFilesRule::new(&config);

        let forward = rule.evaluate(&context(&["src/StyledComponent.js"]));
        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].severity, Severity::Warning);
        assert!(forward[0].text.contains("StyledNativeComponent.js"));

        let backward = rule.evaluate(&context(&["src/native/StyledNativeComponent.js"]));
        assert_eq!(backward, forward);
    }

    #[test]
    fn test_both_or_neither_changed_is_silent() {
        let config = ReviewConfig::default();
        let rule = PairedFilesRule::new(&config);

        assert!(rule
            .evaluate(&context(&[
                "src/models/StyledComponent.js",
                "src/models/StyledNativeComponent.js",
            ]))
            .is_empty());
        assert!(rule.evaluate(&context(&["src/utils/css.js"])).is_empty());
    }

    #[test]
    fn test_each_configured_pair_is_checked() {
        let config = ReviewConfig {
            paired_files: vec![
                FilePair {
                    first: "a.js".to_string(),
                    second: "b.js".to_string(),
                },
                FilePair {
                    first: "c.js".to_string(),
                    second: "d.js".to_string(),
                },
            ],
            ..ReviewConfig::default()
        };
        let annotations = PairedFilesRule::new(&config).evaluate(&context(&["src/a.js", "src/d.js"]));

        assert_eq!(annotations.len(), 2);
        assert!(annotations[0].text.contains("a.js"));
        assert!(annotations[1].text.contains("c.js"));
    }
}
