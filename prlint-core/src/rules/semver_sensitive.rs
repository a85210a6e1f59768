use super::engine::ReviewRule;
use crate::config::ReviewConfig;
use crate::types::*;

// SemverSensitiveRule - API-surface files whose changes may be breaking
pub struct SemverSensitiveRule<'a> {
    config: &'a ReviewConfig,
}

impl<'a> SemverSensitiveRule<'a> {
    pub fn new(config: &'a ReviewConfig) -> Self {
        Self { config }
    }
}

impl<'a> ReviewRule for SemverSensitiveRule<'a> {
    fn evaluate(&self, ctx: &ReviewContext) -> Vec<Annotation> {
        self.config
            .semver_sensitive_files
            .iter()
            .filter(|file_name| ctx.changes.contains_file_name(file_name))
            .map(|file_name| {
                Annotation::warning(format!(
                    "Changes to {file_name} might be SemVer major changes."
                ))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "SemverSensitive"
    }
}
