use crate::classifier::FileClassifier;
use crate::config::ReviewConfig;
use crate::report::Report;
use crate::types::*;

use super::changelog::ChangelogRule;
use super::exclusive_tests::ExclusiveTestsRule;
use super::jest_results::JestResultsRule;
use super::missing_tests::MissingTestsRule;
use super::paired_files::PairedFilesRule;
use super::semver_sensitive::SemverSensitiveRule;
use super::version_bump::VersionBumpRule;

/// A single review check.
///
/// Rules are independent: each reads the shared context and returns the
/// annotations it wants emitted, in emission order. Absent or malformed
/// optional input is a reason to return nothing, never an error.
pub trait ReviewRule {
    fn evaluate(&self, ctx: &ReviewContext) -> Vec<Annotation>;
    fn name(&self) -> &str;
}

/// Runs the configured rule pipeline over a review context
pub struct RuleEngine {
    config: ReviewConfig,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(ReviewConfig::default())
    }
}

impl RuleEngine {
    pub fn new(config: ReviewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Classifier for the configured file layout
    pub fn classifier(&self) -> FileClassifier {
        FileClassifier::new(&self.config.files)
    }

    /// Classify a changed-file list with this engine's layout
    pub fn change_set<I>(&self, entries: I) -> ChangeSet
    where
        I: IntoIterator<Item = (FileStatus, String)>,
    {
        ChangeSet::new(entries, &self.classifier())
    }

    pub fn evaluate(&self, ctx: &ReviewContext) -> Report {
        tracing::debug!(
            files = ctx.changes.len(),
            manifest_diff = ctx.manifest_diff.is_some(),
            reader = ctx.reader.name(),
            "evaluating review rules"
        );

        let mut annotations = Vec::new();
        for rule_config in &self.config.pipeline.rules {
            if !rule_config.enabled {
                tracing::debug!("skipping disabled rule: {}", rule_config.name);
                continue;
            }

            match self.apply_rule_by_name(&rule_config.name, ctx) {
                Some(emitted) => {
                    tracing::debug!(
                        rule = %rule_config.name,
                        emitted = emitted.len(),
                        "rule finished"
                    );
                    annotations.extend(emitted);
                }
                None => tracing::warn!("unknown rule: {}. Skipping...", rule_config.name),
            }
        }

        Report::new(annotations)
    }

    fn apply_rule_by_name(&self, rule_name: &str, ctx: &ReviewContext) -> Option<Vec<Annotation>> {
        let config = &self.config;
        let annotations = match rule_name {
            "JestResults" => JestResultsRule::new().evaluate(ctx),
            "VersionBump" => VersionBumpRule::new().evaluate(ctx),
            "Changelog" => ChangelogRule::new(config).evaluate(ctx),
            "MissingTests" => MissingTestsRule::new().evaluate(ctx),
            "PairedFiles" => PairedFilesRule::new(config).evaluate(ctx),
            "SemverSensitive" => SemverSensitiveRule::new(config).evaluate(ctx),
            "ExclusiveTests" => ExclusiveTestsRule::new(config).evaluate(ctx),
            _ => return None,
        };
        Some(annotations)
    }
}
