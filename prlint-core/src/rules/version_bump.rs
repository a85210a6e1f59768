use super::engine::ReviewRule;
use crate::types::*;

pub const VERSION_BUMP_MESSAGE: &str = ":tada: Version BUMP UP!";

// VersionBumpRule - congratulate a manifest version increase
pub struct VersionBumpRule;

impl Default for VersionBumpRule {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionBumpRule {
    pub fn new() -> Self {
        Self
    }
}

impl ReviewRule for VersionBumpRule {
    fn evaluate(&self, ctx: &ReviewContext) -> Vec<Annotation> {
        let Some(version) = ctx.manifest_diff.as_ref().and_then(|diff| diff.version()) else {
            return Vec::new();
        };

        if version.is_bump() {
            vec![Annotation::message(VERSION_BUMP_MESSAGE)]
        } else {
            tracing::debug!(
                before = ?version.before,
                after = ?version.after,
                "version changed without a SemVer increase"
            );
            Vec::new()
        }
    }

    fn name(&self) -> &str {
        "VersionBump"
    }
}
